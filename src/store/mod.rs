pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use serde::Serialize;

use crate::core::GameRecord;
use crate::error::Result;
use crate::planner::QueryPlan;

pub use memory::InMemoryCatalog;
pub use sqlite::SqliteCatalog;

/// Trait for catalog backends
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every record, in catalog order
    async fn all_games(&self) -> Result<Vec<GameRecord>>;

    /// Records matching `plan.predicate`.
    ///
    /// Results in catalog order, or in rating order truncated to
    /// `plan.limit`. The default scans [`CatalogStore::all_games`].
    async fn find_matching(&self, plan: &QueryPlan) -> Result<Vec<GameRecord>> {
        Ok(plan.scan(self.all_games().await?))
    }

    /// Catalog statistics
    async fn stats(&self) -> Result<CatalogStats>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Catalog statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogStats {
    pub total_games: u64,
    pub games_with_players: u64,
    pub games_with_playtime: u64,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub loaded_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl CatalogStats {
    /// Compute statistics from in-memory records
    pub fn from_records(
        games: &[GameRecord],
        loaded_at: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Self {
        let ratings = games.iter().map(|g| g.average_rating);

        Self {
            total_games: games.len() as u64,
            games_with_players: games
                .iter()
                .filter(|g| !g.supported_player_counts.is_empty())
                .count() as u64,
            games_with_playtime: games
                .iter()
                .filter(|g| g.manufacturer_playtime.is_some())
                .count() as u64,
            min_rating: ratings.clone().reduce(f64::min),
            max_rating: ratings.reduce(f64::max),
            loaded_at,
        }
    }
}
