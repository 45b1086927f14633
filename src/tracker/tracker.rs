use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::config::TrackerConfig;
use crate::index::SpatialIndex;
use crate::model::{BoatPosition, Filters, RestrictionArea, TrafficSign};
use super::pipeline::{evaluate_position, Evaluation};
use super::throttle::Throttle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    /// No data loaded yet.
    Idle,
    /// Indexes built, samples are evaluated.
    Ready,
}

/// What happened to one position sample.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// No index yet; the position was recorded only.
    Idle,
    /// Too soon after the last accepted evaluation.
    Throttled,
    Evaluated(Arc<Evaluation>),
}

#[derive(Debug)]
struct Session {
    position: Option<BoatPosition>,
    throttle: Throttle,
}

/// Evaluation orchestrator: owns the current index and filters, gates
/// samples through the throttle and publishes one snapshot per evaluation.
///
/// All methods take `&self`; share it behind an `Arc` between the
/// positioning source, the dataset loader and readers of [`Tracker::latest`].
#[derive(Debug)]
pub struct Tracker {
    config: TrackerConfig,
    filters: RwLock<Filters>,
    index: RwLock<Option<Arc<SpatialIndex>>>,
    session: Mutex<Session>,
    latest: RwLock<Option<Arc<Evaluation>>>,
}

impl Tracker {
    pub fn new(config: TrackerConfig, filters: Filters) -> Self {
        let throttle = Throttle::new(config.throttle_ms);
        Self {
            config,
            filters: RwLock::new(filters),
            index: RwLock::new(None),
            session: Mutex::new(Session { position: None, throttle }),
            latest: RwLock::new(None),
        }
    }

    #[inline] pub fn config(&self) -> &TrackerConfig { &self.config }

    pub fn state(&self) -> TrackerState {
        if self.index.read().is_some() { TrackerState::Ready } else { TrackerState::Idle }
    }

    /// Current index, if loaded.
    pub fn index(&self) -> Option<Arc<SpatialIndex>> { self.index.read().clone() }

    pub fn filters(&self) -> Filters { self.filters.read().clone() }

    /// Replace the filters. Takes effect on the next accepted sample.
    pub fn set_filters(&self, filters: Filters) { *self.filters.write() = filters }

    /// Most recently recorded position, evaluated or not.
    pub fn current_position(&self) -> Option<BoatPosition> { self.session.lock().position }

    /// Most recent published evaluation.
    pub fn latest(&self) -> Option<Arc<Evaluation>> { self.latest.read().clone() }

    /// Build indexes from freshly decoded datasets and swap them in.
    pub fn load(&self, areas: Vec<RestrictionArea>, signs: Vec<TrafficSign>) -> Option<Arc<Evaluation>> {
        self.install(SpatialIndex::build(areas, signs))
    }

    /// Swap in a prebuilt index. When a position is already known it is
    /// evaluated right away, bypassing the throttle.
    pub fn install(&self, index: SpatialIndex) -> Option<Arc<Evaluation>> {
        let index = Arc::new(index);
        let mut session = self.session.lock();
        *self.index.write() = Some(Arc::clone(&index));
        tracing::info!(areas = index.area_count(), signs = index.sign_count(), "index ready");

        let position = session.position?;
        session.throttle.mark(position.timestamp_ms);
        Some(self.publish(&index, &position))
    }

    /// Feed one position sample.
    pub fn on_position(&self, position: BoatPosition) -> Outcome {
        let mut session = self.session.lock();
        session.position = Some(position);

        let Some(index) = self.index() else {
            return Outcome::Idle;
        };
        if !session.throttle.try_accept(position.timestamp_ms) {
            tracing::debug!(timestamp_ms = position.timestamp_ms, "sample throttled");
            return Outcome::Throttled;
        }
        Outcome::Evaluated(self.publish(&index, &position))
    }

    /// Evaluate against `index` and replace the published snapshot.
    fn publish(&self, index: &SpatialIndex, position: &BoatPosition) -> Arc<Evaluation> {
        let filters = self.filters();
        let evaluation = Arc::new(evaluate_position(index, position, &filters, &self.config, position.time()));
        *self.latest.write() = Some(Arc::clone(&evaluation));
        evaluation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_loaded() {
        let tracker = Tracker::new(TrackerConfig::default(), Filters::default());
        assert_eq!(tracker.state(), TrackerState::Idle);
        assert_eq!(tracker.on_position(BoatPosition::new(60.0, 25.0, 0)), Outcome::Idle);
        assert_eq!(tracker.current_position().map(|p| p.timestamp_ms), Some(0));
        assert!(tracker.latest().is_none());
    }

    #[test]
    fn load_evaluates_known_position() {
        let tracker = Tracker::new(TrackerConfig::default(), Filters::default());
        assert!(tracker.load(Vec::new(), Vec::new()).is_none());

        tracker.on_position(BoatPosition::new(60.0, 25.0, 1_000));
        let evaluation = tracker.load(Vec::new(), Vec::new()).unwrap();
        assert_eq!(evaluation.position.timestamp_ms, 1_000);
        assert_eq!(tracker.state(), TrackerState::Ready);
        // The bypass counts as the last accepted evaluation.
        assert_eq!(tracker.on_position(BoatPosition::new(60.0, 25.0, 1_500)), Outcome::Throttled);
    }
}
