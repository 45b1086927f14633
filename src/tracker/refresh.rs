use crate::config::ExtractOptions;
use crate::error::Result;
use crate::extract::{spawn_decode, DatasetKind};
use crate::source::DatasetSource;
use super::tracker::Tracker;

/// Feature counts of a successful refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub areas: usize,
    pub signs: usize,
}

/// Fetch both datasets, decode them in parallel on background threads and
/// swap the result into `tracker`. Any failure leaves the tracker unchanged.
pub fn refresh(tracker: &Tracker, source: &dyn DatasetSource, options: &ExtractOptions) -> Result<LoadSummary> {
    let restriction_bytes = source.fetch(DatasetKind::Restriction)?;
    let sign_bytes = source.fetch(DatasetKind::Sign)?;

    let restrictions = spawn_decode(restriction_bytes, DatasetKind::Restriction, options.clone())?;
    let signs = spawn_decode(sign_bytes, DatasetKind::Sign, options.clone())?;

    // Both workers are joined before either result is inspected.
    let (restrictions, signs) = (restrictions.join(), signs.join());
    let areas = restrictions?.into_restrictions().unwrap_or_default();
    let signs = signs?.into_signs().unwrap_or_default();

    let summary = LoadSummary { areas: areas.len(), signs: signs.len() };
    tracker.load(areas, signs);
    tracing::info!(areas = summary.areas, signs = summary.signs, "datasets refreshed");
    Ok(summary)
}
