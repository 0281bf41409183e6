pub mod rating;

use crate::core::GameRecord;

pub use rating::RatingRanker;

/// Maximum number of results a query returns
pub const MAX_RESULTS: usize = 50;

/// Trait for result ordering implementations
pub trait Ranker: Send + Sync {
    /// Order matches best-first and truncate to [`MAX_RESULTS`]
    fn rank(&self, matches: Vec<GameRecord>) -> Vec<GameRecord>;

    /// Get ranker name for logging
    fn name(&self) -> &str;
}
