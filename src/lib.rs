//! # Board Game Query Engine
//!
//! Finds board games matching numeric ranges:
//! - Filter validation (weight, rating, playtime, player count)
//! - Player-count overlap matching ("good at any of these group sizes")
//! - Rating-ranked results, capped at 50
//! - SQLite and in-memory catalog stores
//! - Interfaces: Rust library, HTTP API, CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use boardgame_query_engine::{FilterCriteria, QueryEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = QueryEngine::open("board_games.db").await?;
//!
//!     let criteria = FilterCriteria::from_ranges((1.0, 5.0), (7.0, 10.0), (0, 120), (3, 6))?;
//!     for game in engine.query(&criteria).await? {
//!         println!("{} - {} ({})", game.name, game.rating_display(), game.player_summary());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
#[cfg(feature = "server")]
pub mod http;
pub mod logging;
pub mod planner;
pub mod ranking;
pub mod store;
pub mod validation;

// Re-export primary types
pub use crate::core::{FilterCriteria, GameRecord, ResultItem, ValueRange};
pub use config::ServerConfig;
pub use engine::QueryEngine;
pub use error::{ErrorKind, QueryError, Result};
pub use planner::{MatchPredicate, PlayerCountSet, QueryPlan};
pub use ranking::MAX_RESULTS;
pub use store::{CatalogStats, CatalogStore, InMemoryCatalog, SqliteCatalog};
pub use validation::RawFilter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
