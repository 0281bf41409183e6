use crate::core::{FilterCriteria, GameRecord, ValueRange};
use crate::planner::PlayerCountSet;

/// Typed match predicate over catalog entries.
///
/// A record matches only when all four conditions hold; see
/// [`MatchPredicate::matches`].
#[derive(Debug, Clone, PartialEq)]
pub struct MatchPredicate {
    pub weight: ValueRange<f64>,
    pub rating: ValueRange<f64>,
    pub playtime: ValueRange<u32>,
    pub players: PlayerCountSet,
}

impl MatchPredicate {
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        Self {
            weight: criteria.weight(),
            rating: criteria.rating(),
            playtime: criteria.playtime(),
            players: PlayerCountSet::from_range(criteria.players()),
        }
    }

    pub fn weight_matches(&self, game: &GameRecord) -> bool {
        self.weight.contains(game.complexity_weight)
    }

    pub fn rating_matches(&self, game: &GameRecord) -> bool {
        self.rating.contains(game.average_rating)
    }

    /// Unknown playtime never matches
    pub fn playtime_matches(&self, game: &GameRecord) -> bool {
        game.manufacturer_playtime
            .is_some_and(|minutes| self.playtime.contains(minutes))
    }

    pub fn players_match(&self, game: &GameRecord) -> bool {
        self.players.intersects(&game.supported_player_counts)
    }

    pub fn matches(&self, game: &GameRecord) -> bool {
        self.weight_matches(game)
            && self.rating_matches(game)
            && self.playtime_matches(game)
            && self.players_match(game)
    }

    /// True when nothing can possibly match
    pub fn is_unsatisfiable(&self) -> bool {
        self.players.is_empty()
            || self.weight.is_inverted()
            || self.rating.is_inverted()
            || self.playtime.is_inverted()
    }
}
