/// Business logic layer for thought-service
///
/// - Proximity: nearby thought lookup and ranking
/// - Thoughts: thought creation and author resolution
/// - Comments: comment listing and creation
/// - Guests: guest account creation
/// - Cloud: proximity results laid out for the floating cloud view
pub mod cloud;
pub mod comments;
pub mod guests;
pub mod proximity;
pub mod thoughts;

pub use cloud::CloudService;
pub use comments::CommentService;
pub use guests::GuestService;
pub use proximity::{ProximityQuery, ProximityService};
pub use thoughts::ThoughtService;
