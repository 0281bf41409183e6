use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};

use crate::core::GameRecord;
use crate::error::Result;
use crate::planner::QueryPlan;
use crate::store::{CatalogStats, CatalogStore};

/// Immutable in-memory catalog snapshot.
///
/// Keeps records in catalog order plus two indexes: positions sorted by
/// rating (highest first, ties in catalog order) and, per player count, the
/// rating positions of games good at that count.
pub struct InMemoryCatalog {
    games: Vec<GameRecord>,
    rating_order: Vec<usize>,
    player_index: HashMap<u32, Vec<usize>>,
    loaded_at: DateTime<Utc>,
}

impl InMemoryCatalog {
    pub fn new(games: Vec<GameRecord>) -> Self {
        let mut rating_order: Vec<usize> = (0..games.len()).collect();
        rating_order.sort_by(|&a, &b| {
            games[b]
                .average_rating
                .total_cmp(&games[a].average_rating)
        });

        let mut player_index: HashMap<u32, Vec<usize>> = HashMap::new();
        for (rank, &idx) in rating_order.iter().enumerate() {
            for &count in &games[idx].supported_player_counts {
                player_index.entry(count).or_default().push(rank);
            }
        }

        tracing::debug!(
            "Indexed {} games across {} player counts",
            games.len(),
            player_index.len()
        );

        Self {
            games,
            rating_order,
            player_index,
            loaded_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn all_games(&self) -> Result<Vec<GameRecord>> {
        Ok(self.games.clone())
    }

    async fn find_matching(&self, plan: &QueryPlan) -> Result<Vec<GameRecord>> {
        let predicate = &plan.predicate;
        if predicate.is_unsatisfiable() || plan.limit == 0 {
            return Ok(Vec::new());
        }

        // Union of rating positions for every acceptable player count;
        // BTreeSet iteration keeps rating order
        let candidates: BTreeSet<usize> = predicate
            .players
            .iter()
            .filter_map(|count| self.player_index.get(&count))
            .flatten()
            .copied()
            .collect();

        let mut matches = Vec::new();
        for rank in candidates {
            let game = &self.games[self.rating_order[rank]];

            // Everything after this rates lower still
            if game.average_rating < predicate.rating.min {
                break;
            }
            if predicate.matches(game) {
                matches.push(game.clone());
                if matches.len() >= plan.limit {
                    break;
                }
            }
        }

        Ok(matches)
    }

    async fn stats(&self) -> Result<CatalogStats> {
        Ok(CatalogStats::from_records(&self.games, Some(self.loaded_at)))
    }

    fn name(&self) -> &str {
        "memory"
    }
}
