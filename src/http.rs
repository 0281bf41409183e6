//! HTTP transport: routes, handlers and error responses.

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;

use crate::core::ResultItem;
use crate::engine::QueryEngine;
use crate::error::{ErrorKind, QueryError};
use crate::store::CatalogStats;
use crate::validation::RawFilter;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<QueryEngine>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorKind,
    details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    store: String,
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/test", get(test_handler))
        .route("/health", get(health_handler))
        .route("/api/games", post(games_handler))
        .route("/api/stats", get(stats_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn test_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Backend is running!".to_string(),
    })
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        store: state.engine.store_name().to_string(),
    })
}

async fn games_handler(
    State(state): State<AppState>,
    payload: Result<Json<RawFilter>, JsonRejection>,
) -> Result<Json<Vec<ResultItem>>, AppError> {
    let Json(filter) = payload.map_err(|rejection| {
        QueryError::validation("body", rejection.body_text())
    })?;

    tracing::debug!("Query request: {:?}", filter);
    let start = Instant::now();

    let games = state.engine.query_raw(&filter).await?;

    tracing::info!(
        "Found {} games in {:.2}ms",
        games.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(Json(games))
}

async fn stats_handler(State(state): State<AppState>) -> Result<Json<CatalogStats>, AppError> {
    Ok(Json(state.engine.catalog_stats().await?))
}

// Error handling
pub struct AppError(QueryError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.0.kind();
        let status = match kind {
            ErrorKind::ValidationError => StatusCode::BAD_REQUEST,
            ErrorKind::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Query failed: {} - {}", status, self.0);
        } else {
            tracing::warn!("Rejected query: {}", self.0);
        }

        let body = ErrorResponse {
            error: kind,
            details: self.0.to_string(),
            field: self.0.field().map(str::to_string),
        };

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<QueryError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRecord;
    use crate::store::CatalogStore;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct UnreachableCatalog;

    #[async_trait]
    impl CatalogStore for UnreachableCatalog {
        async fn all_games(&self) -> crate::Result<Vec<GameRecord>> {
            Err(QueryError::StoreUnavailable("connection refused".into()))
        }

        async fn stats(&self) -> crate::Result<CatalogStats> {
            Err(QueryError::StoreUnavailable("connection refused".into()))
        }

        fn name(&self) -> &str {
            "unreachable"
        }
    }

    fn catan_app() -> Router {
        let engine = QueryEngine::from_records(vec![GameRecord::new("13", "Catan", 2.3, 7.2)
            .with_playtime(90)
            .with_players([3, 4])]);
        app(AppState {
            engine: Arc::new(engine),
        })
    }

    fn post_games(body: &str, content_type: Option<&str>) -> Request<Body> {
        let mut builder = Request::post("/api/games");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, serde_json::from_slice(&bytes).unwrap())
    }

    fn valid_body() -> String {
        json!({
            "weight_min": 1, "weight_max": 5,
            "rating_min": 0, "rating_max": 10,
            "playtime_min": 0, "playtime_max": 120,
            "players_min": 3, "players_max": 6
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_games_returns_array() {
        let (status, _, body) =
            send(catan_app(), post_games(&valid_body(), Some("application/json"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["game"], "Catan");
        assert_eq!(body[0]["bgg_id"], "13");
    }

    #[tokio::test]
    async fn test_malformed_json_uses_error_shape() {
        let (status, content_type, body) =
            send(catan_app(), post_games("{\"weight_min\":", Some("application/json"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["field"], "body");
        assert!(body["details"].as_str().unwrap().contains("JSON"));
    }

    #[tokio::test]
    async fn test_missing_content_type_uses_error_shape() {
        let (status, content_type, body) = send(catan_app(), post_games(&valid_body(), None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["field"], "body");
    }

    #[tokio::test]
    async fn test_non_object_body_rejected() {
        let (status, _, body) =
            send(catan_app(), post_games("[1, 2, 3]", Some("application/json"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_missing_field_names_field() {
        let (status, _, body) =
            send(catan_app(), post_games("{\"weight_min\":1}", Some("application/json"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["field"], "weight_max");
    }

    #[tokio::test]
    async fn test_store_failure_is_service_unavailable() {
        let app = app(AppState {
            engine: Arc::new(QueryEngine::new(Arc::new(UnreachableCatalog))),
        });
        let (status, _, body) = send(app, post_games(&valid_body(), Some("application/json"))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "store_unavailable");
    }

    #[tokio::test]
    async fn test_test_route() {
        let request = Request::get("/test").body(Body::empty()).unwrap();
        let (status, _, body) = send(catan_app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Backend is running!");
    }
}
