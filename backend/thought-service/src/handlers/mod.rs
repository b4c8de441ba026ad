/// HTTP handlers for thought-service
///
/// - Thoughts: nearby listing, creation, cloud view
/// - Comments: listing and creation under a thought
/// - Users: guest creation
/// - Health: summary, readiness, liveness
pub mod comments;
pub mod health;
pub mod thoughts;
pub mod users;

pub use comments::{create_comment, get_comments};
pub use health::{health_summary, liveness_check, readiness_check};
pub use thoughts::{create_thought, get_thought_cloud, get_thoughts};
pub use users::create_guest;
