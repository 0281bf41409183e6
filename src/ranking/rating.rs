use crate::core::GameRecord;
use crate::ranking::{Ranker, MAX_RESULTS};

/// Orders by average rating, highest first.
///
/// The sort is stable, so equal ratings keep catalog order.
pub struct RatingRanker;

impl RatingRanker {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RatingRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ranker for RatingRanker {
    fn rank(&self, mut matches: Vec<GameRecord>) -> Vec<GameRecord> {
        matches.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating));
        matches.truncate(MAX_RESULTS);
        matches
    }

    fn name(&self) -> &str {
        "rating"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: usize, rating: f64) -> GameRecord {
        GameRecord::new(id.to_string(), format!("Game {}", id), 2.0, rating)
    }

    #[test]
    fn test_sorted_descending() {
        let ranker = RatingRanker::new();
        let ranked = ranker.rank(vec![game(1, 6.5), game(2, 8.1), game(3, 7.0)]);

        let ratings: Vec<f64> = ranked.iter().map(|g| g.average_rating).collect();
        assert_eq!(ratings, vec![8.1, 7.0, 6.5]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranker = RatingRanker::new();
        let ranked = ranker.rank(vec![game(1, 7.0), game(2, 9.0), game(3, 7.0), game(4, 7.0)]);

        let ids: Vec<&str> = ranked.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1", "3", "4"]);
    }

    #[test]
    fn test_truncates_to_cap() {
        let ranker = RatingRanker::new();
        let games: Vec<GameRecord> = (0..120).map(|i| game(i, (i % 10) as f64)).collect();
        let ranked = ranker.rank(games);

        assert_eq!(ranked.len(), MAX_RESULTS);
        assert!(ranked
            .windows(2)
            .all(|pair| pair[0].average_rating >= pair[1].average_rating));
        assert_eq!(ranked[0].average_rating, 9.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(RatingRanker::new().rank(Vec::new()).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let ranker = RatingRanker::new();
        let games: Vec<GameRecord> = (0..80).map(|i| game(i, (i % 3) as f64)).collect();
        assert_eq!(ranker.rank(games.clone()), ranker.rank(games));
    }
}
