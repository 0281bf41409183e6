use clap::{Parser, Subcommand};
use std::path::PathBuf;

use boardgame_query_engine::{
    config::DEFAULT_DB_PATH, logging, FilterCriteria, GameRecord, QueryEngine, SqliteCatalog,
};

#[derive(Parser)]
#[command(name = "game-query-cli")]
#[command(about = "Board game catalog query CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database path
    #[arg(short, long, default_value = DEFAULT_DB_PATH)]
    db: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Find games matching the given ranges
    Query {
        #[arg(long, default_value = "1")]
        weight_min: f64,
        #[arg(long, default_value = "5")]
        weight_max: f64,

        #[arg(long, default_value = "0")]
        rating_min: f64,
        #[arg(long, default_value = "10")]
        rating_max: f64,

        /// Minutes
        #[arg(long, default_value = "0")]
        playtime_min: u32,
        /// Minutes
        #[arg(long, default_value = "500")]
        playtime_max: u32,

        #[arg(long, default_value = "2")]
        players_min: u32,
        #[arg(long, default_value = "6")]
        players_max: u32,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load a JSON catalog dump into the database
    Import {
        /// JSON array of games
        file: PathBuf,
    },

    /// Get catalog statistics
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing("warn");

    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            weight_min,
            weight_max,
            rating_min,
            rating_max,
            playtime_min,
            playtime_max,
            players_min,
            players_max,
            json,
        } => {
            let criteria = FilterCriteria::from_ranges(
                (weight_min, weight_max),
                (rating_min, rating_max),
                (playtime_min, playtime_max),
                (players_min, players_max),
            )?;

            let engine = QueryEngine::open(&cli.db).await?;
            let games = engine.query(&criteria).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&games)?);
                return Ok(());
            }

            if games.is_empty() {
                println!("No games found matching your criteria. Try adjusting the filters!");
                return Ok(());
            }

            println!("Found {} games\n", games.len());
            for (i, game) in games.iter().enumerate() {
                println!("{:>2}. {}", i + 1, game.name);
                println!("    Rating: {}  Complexity: {}", game.rating_display(), game.weight_display());
                println!("    Playtime: {}  Players: {}", game.playtime_display(), game.player_summary());
                println!("    {}", game.bgg_url());
            }
        }

        Commands::Import { file } => {
            let json = tokio::fs::read_to_string(&file).await?;
            let games = GameRecord::list_from_json(&json)?;

            let catalog = SqliteCatalog::new(&cli.db).await?;
            let loaded = catalog.load_games(&games).await?;

            println!("Loaded {} games from {} into {}", loaded, file.display(), cli.db);
        }

        Commands::Stats => {
            let engine = QueryEngine::open(&cli.db).await?;
            let stats = engine.catalog_stats().await?;

            println!("Catalog Statistics:");
            println!("   Total games: {}", stats.total_games);
            println!("   With player data: {}", stats.games_with_players);
            println!("   With playtime: {}", stats.games_with_playtime);

            if let (Some(min), Some(max)) = (stats.min_rating, stats.max_rating) {
                println!("   Ratings: {:.1} - {:.1}", min, max);
            }

            if let Some(loaded_at) = stats.loaded_at {
                println!("   Last loaded: {}", loaded_at.format("%Y-%m-%d %H:%M:%S"));
            }
        }
    }

    Ok(())
}
