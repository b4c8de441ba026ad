use lazy_static::lazy_static;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

lazy_static! {
    /// Thoughts created, by author kind (registered, guest).
    pub static ref THOUGHTS_CREATED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "thoughts_created_total",
        "Total thoughts created segmented by author kind",
        &["author_kind"]
    )
    .expect("failed to register thoughts_created_total");

    pub static ref COMMENTS_CREATED_TOTAL: IntCounter = register_int_counter!(
        "thought_comments_created_total",
        "Total comments created"
    )
    .expect("failed to register thought_comments_created_total");

    /// Cloud placements by the strategy that produced them (radial, grid, uniform, forced).
    pub static ref LAYOUT_PLACEMENTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "thought_layout_placements_total",
        "Cloud layout placements segmented by strategy",
        &["strategy"]
    )
    .expect("failed to register thought_layout_placements_total");
}

pub fn author_kind(is_guest: bool) -> &'static str {
    if is_guest {
        "guest"
    } else {
        "registered"
    }
}
