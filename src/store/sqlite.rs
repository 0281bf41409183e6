use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::GameRecord;
use crate::error::{QueryError, Result};
use crate::planner::QueryPlan;
use crate::store::{CatalogStats, CatalogStore};

const SELECT_COLUMNS: &str = "SELECT bgg_id, game, COALESCE(image_path, ''), game_weight,
        avg_rating, mfg_playtime, good_players
     FROM board_games";

/// SQLite-backed game catalog
///
/// Schema:
/// ```sql
/// CREATE TABLE board_games (
///     bgg_id TEXT PRIMARY KEY,
///     game TEXT NOT NULL,
///     image_path TEXT,
///     game_weight REAL NOT NULL,
///     avg_rating REAL NOT NULL,
///     mfg_playtime INTEGER,
///     good_players TEXT,      -- JSON array of player counts, NULL when unknown
///     loaded_at TEXT NOT NULL
/// );
/// ```
pub struct SqliteCatalog {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCatalog {
    /// Open (or create) a catalog database
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS board_games (
                bgg_id TEXT PRIMARY KEY,
                game TEXT NOT NULL,
                image_path TEXT,
                game_weight REAL NOT NULL,
                avg_rating REAL NOT NULL,
                mfg_playtime INTEGER,
                good_players TEXT,
                loaded_at TEXT NOT NULL
            )",
            [],
        )?;

        // Rating order drives both ranking and early truncation
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_avg_rating ON board_games(avg_rating)",
            [],
        )?;

        tracing::debug!("Opened catalog database at {}", db_path);

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Insert or replace catalog records in one transaction
    pub async fn load_games(&self, games: &[GameRecord]) -> Result<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let loaded_at = Utc::now().to_rfc3339();

        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO board_games
                    (bgg_id, game, image_path, game_weight, avg_rating, mfg_playtime, good_players, loaded_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;

            for game in games {
                let image_path = (!game.image_path.is_empty()).then_some(game.image_path.as_str());
                let good_players = if game.supported_player_counts.is_empty() {
                    None
                } else {
                    Some(serde_json::to_string(&game.supported_player_counts)?)
                };

                stmt.execute(params![
                    game.id,
                    game.name,
                    image_path,
                    game.complexity_weight,
                    game.average_rating,
                    game.manufacturer_playtime,
                    good_players,
                    loaded_at,
                ])?;
            }
        }

        tx.commit()?;
        tracing::info!("Loaded {} games into catalog", games.len());

        Ok(games.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| QueryError::StoreUnavailable("catalog connection lock poisoned".into()))
    }

    fn row_to_game(row: &Row<'_>) -> rusqlite::Result<GameRecord> {
        let good_players: Option<String> = row.get(6)?;
        let supported_player_counts: BTreeSet<u32> = match good_players {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?,
            None => BTreeSet::new(),
        };

        Ok(GameRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            image_path: row.get(2)?,
            complexity_weight: row.get(3)?,
            average_rating: row.get(4)?,
            manufacturer_playtime: row.get(5)?,
            supported_player_counts,
        })
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalog {
    async fn all_games(&self) -> Result<Vec<GameRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY rowid", SELECT_COLUMNS))?;

        let games = stmt
            .query_map([], Self::row_to_game)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(games)
    }

    async fn find_matching(&self, plan: &QueryPlan) -> Result<Vec<GameRecord>> {
        let predicate = &plan.predicate;
        let (players_min, players_max) = match (predicate.players.min(), predicate.players.max()) {
            (Some(min), Some(max)) if !predicate.is_unsatisfiable() => (min, max),
            _ => return Ok(Vec::new()),
        };

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "{}
             WHERE game_weight >= ?1 AND game_weight <= ?2
               AND avg_rating >= ?3 AND avg_rating <= ?4
               AND mfg_playtime >= ?5 AND mfg_playtime <= ?6
               AND good_players IS NOT NULL
               AND EXISTS (
                   SELECT 1 FROM json_each(board_games.good_players) AS p
                   WHERE CAST(p.value AS INTEGER) BETWEEN ?7 AND ?8
               )
             ORDER BY avg_rating DESC, rowid ASC
             LIMIT ?9",
            SELECT_COLUMNS
        ))?;

        let games = stmt
            .query_map(
                params![
                    predicate.weight.min,
                    predicate.weight.max,
                    predicate.rating.min,
                    predicate.rating.max,
                    predicate.playtime.min,
                    predicate.playtime.max,
                    players_min,
                    players_max,
                    plan.limit as i64,
                ],
                Self::row_to_game,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(games)
    }

    async fn stats(&self) -> Result<CatalogStats> {
        let conn = self.lock()?;

        let (total_games, games_with_players, games_with_playtime, min_rating, max_rating, loaded_at) =
            conn.query_row(
                "SELECT COUNT(*), COUNT(good_players), COUNT(mfg_playtime),
                        MIN(avg_rating), MAX(avg_rating), MAX(loaded_at)
                 FROM board_games",
                [],
                |row| {
                    Ok((
                        row.get::<_, u64>(0)?,
                        row.get::<_, u64>(1)?,
                        row.get::<_, u64>(2)?,
                        row.get::<_, Option<f64>>(3)?,
                        row.get::<_, Option<f64>>(4)?,
                        row.get::<_, Option<String>>(5)?,
                    ))
                },
            )?;

        let loaded_at = loaded_at.and_then(|s| {
            DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        });

        Ok(CatalogStats {
            total_games,
            games_with_players,
            games_with_playtime,
            min_rating,
            max_rating,
            loaded_at,
        })
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}
