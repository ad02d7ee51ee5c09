use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

use common::types::Health;

use crate::state::AppState;

pub mod db;
pub mod system;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Assemble the full application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/db", get(db::list_databases))
        .route(
            "/db/:database",
            post(db::create_database).delete(db::delete_database),
        )
        .route("/db/:database/keys", get(db::list_keys))
        .route(
            "/db/:database/kv/:key",
            get(db::get_value).post(db::set_value).delete(db::delete_key),
        )
        .route("/system/storage", get(system::storage_status))
        .route("/system/software", get(system::software_info))
        .with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
