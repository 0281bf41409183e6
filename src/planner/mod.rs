pub mod players;
pub mod predicate;

use crate::core::{FilterCriteria, GameRecord};
use crate::ranking::MAX_RESULTS;

pub use players::PlayerCountSet;
pub use predicate::MatchPredicate;

/// What a store needs to answer one query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub predicate: MatchPredicate,

    /// Stores may stop after this many matches, provided they visit records
    /// in rating order
    pub limit: usize,
}

impl QueryPlan {
    pub fn new(criteria: &FilterCriteria) -> Self {
        Self {
            predicate: MatchPredicate::from_criteria(criteria),
            limit: MAX_RESULTS,
        }
    }

    /// Reference execution: a linear scan keeping input order
    pub fn scan<I>(&self, records: I) -> Vec<GameRecord>
    where
        I: IntoIterator<Item = GameRecord>,
    {
        if self.predicate.is_unsatisfiable() {
            return Vec::new();
        }

        records
            .into_iter()
            .filter(|game| self.predicate.matches(game))
            .collect()
    }
}
