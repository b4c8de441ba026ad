use lazy_static::lazy_static;
use prometheus::{register_histogram_vec, HistogramVec};

/// Query mode label: viewer sent coordinates.
pub const MODE_NEARBY: &str = "nearby";
/// Query mode label: viewer sent no location, newest thoughts returned.
pub const MODE_RECENT: &str = "recent";

lazy_static! {
    /// Proximity query duration by mode (nearby, recent).
    pub static ref PROXIMITY_QUERY_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "thought_proximity_query_duration_seconds",
        "Proximity query duration segmented by mode",
        &["mode"]
    )
    .expect("failed to register thought_proximity_query_duration_seconds");

    /// Rows pulled from storage before exact-radius filtering.
    pub static ref PROXIMITY_CANDIDATES: HistogramVec = register_histogram_vec!(
        "thought_proximity_candidates",
        "Number of candidate thoughts evaluated segmented by mode",
        &["mode"],
        vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0]
    )
    .expect("failed to register thought_proximity_candidates");
}
