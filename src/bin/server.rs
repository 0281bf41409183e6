use std::sync::Arc;

use boardgame_query_engine::http::{app, AppState};
use boardgame_query_engine::{logging, QueryEngine, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing("game_query_server=debug,boardgame_query_engine=debug,info");

    let config = ServerConfig::from_env()?;
    let addr = config.bind_addr()?;

    tracing::info!("Starting board game query server");
    tracing::info!("Database: {}", config.db_path);
    tracing::info!("Port: {}", config.port);

    let engine = Arc::new(QueryEngine::open(&config.db_path).await?);
    let state = AppState {
        engine: Arc::clone(&engine),
    };

    let app = app(state);

    tracing::info!("Server is running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    drop(engine);
    tracing::info!("Catalog store released, server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
