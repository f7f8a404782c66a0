/// Handler Module Index
///
/// Request handlers grouped by domain area. Every handler follows the same
/// shape: resolve identity (extractor), evaluate the policy gate, run the
/// state-machine transition or repository call, and translate the outcome
/// into a JSON response or an `ApiError`.
pub mod jobs;
pub mod misc;
pub mod news;
pub mod reporter;
pub mod tasks;
pub mod users;

pub use jobs::*;
pub use misc::*;
pub use news::*;
pub use reporter::*;
pub use tasks::*;
pub use users::*;
