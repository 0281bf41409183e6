use std::sync::Arc;
use std::time::Instant;

use crate::core::{FilterCriteria, GameRecord, ResultItem};
use crate::error::Result;
use crate::planner::QueryPlan;
use crate::ranking::{RatingRanker, Ranker};
use crate::store::{CatalogStats, CatalogStore, InMemoryCatalog, SqliteCatalog};
use crate::validation::RawFilter;

/// Query engine: validated filter in, ranked catalog entries out.
///
/// Holds no per-query state, so one instance can serve concurrent queries
/// behind an `Arc`.
pub struct QueryEngine {
    store: Arc<dyn CatalogStore>,
    ranker: Arc<dyn Ranker>,
}

impl QueryEngine {
    /// Create engine over an existing store
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            ranker: Arc::new(RatingRanker::new()),
        }
    }

    /// Create engine backed by a SQLite catalog file
    pub async fn open(db_path: impl AsRef<str>) -> Result<Self> {
        let store = SqliteCatalog::new(db_path.as_ref()).await?;
        tracing::info!("Catalog store opened: {}", db_path.as_ref());
        Ok(Self::new(Arc::new(store)))
    }

    /// Create engine over an in-memory snapshot
    pub fn from_records(games: Vec<GameRecord>) -> Self {
        Self::new(Arc::new(InMemoryCatalog::new(games)))
    }

    /// Validate raw transport input, then query
    pub async fn query_raw(&self, filter: &RawFilter) -> Result<Vec<ResultItem>> {
        let criteria = filter.validate()?;
        self.query(&criteria).await
    }

    /// Run a query: at most 50 matches, highest rated first
    pub async fn query(&self, criteria: &FilterCriteria) -> Result<Vec<ResultItem>> {
        let start = Instant::now();
        let plan = QueryPlan::new(criteria);

        tracing::debug!("Executing query via {}: {}", self.store.name(), criteria);

        let matches = self.store.find_matching(&plan).await?;
        let matched = matches.len();
        let ranked = self.ranker.rank(matches);

        tracing::debug!(
            "Found {} games ({} matched, ranked by {}) in {:.2}ms",
            ranked.len(),
            matched,
            self.ranker.name(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(ranked.into_iter().map(ResultItem::from).collect())
    }

    /// Get catalog statistics
    pub async fn catalog_stats(&self) -> Result<CatalogStats> {
        self.store.stats().await
    }

    /// Name of the backing store
    pub fn store_name(&self) -> &str {
        self.store.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[tokio::test]
    async fn test_engine_creation() {
        let engine = QueryEngine::open(":memory:").await.unwrap();
        assert_eq!(engine.store_name(), "sqlite");
        let stats = engine.catalog_stats().await.unwrap();
        assert_eq!(stats.total_games, 0);
    }

    #[tokio::test]
    async fn test_empty_result_is_ok() {
        let engine = QueryEngine::from_records(Vec::new());
        let results = engine.query(&FilterCriteria::wide_open()).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_query_raw_validates() {
        let engine = QueryEngine::from_records(vec![GameRecord::new("13", "Catan", 2.3, 7.2)
            .with_playtime(90)
            .with_players([3, 4])]);

        let filter: RawFilter = serde_json::from_value(json!({
            "weight_min": 1, "weight_max": 5,
            "rating_min": 8, "rating_max": 2,
            "playtime_min": 0, "playtime_max": 120,
            "players_min": 3, "players_max": 6
        }))
        .unwrap();

        let err = engine.query_raw(&filter).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
        assert_eq!(err.field(), Some("rating_min"));
    }
}
