mod pipeline;
mod refresh;
mod throttle;
mod tracker;

pub use pipeline::{evaluate_position, Evaluation};
pub use refresh::{refresh, LoadSummary};
pub use throttle::Throttle;
pub use tracker::{Outcome, Tracker, TrackerState};
