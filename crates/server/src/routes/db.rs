use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use store::StoreError;

use crate::errors::ApiError;
use crate::state::AppState;

/// `GET /db` — all database names with a count.
pub async fn list_databases(State(state): State<AppState>) -> Json<Value> {
    let dbs = state.storage.database_names().await;
    Json(json!({ "dbs": dbs, "count": dbs.len() }))
}

/// `POST /db/{database}` — create an empty database.
pub async fn create_database(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    state.storage.create_database(&name).await?;
    info!(name = %name, "database created");
    Ok((StatusCode::CREATED, Json(json!({ "name": name }))))
}

/// `DELETE /db/{database}` — drop a database and everything in it.
pub async fn delete_database(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.storage.delete_database(&name).await?;
    info!(name = %name, "database deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /db/{database}/keys` — copy of the full table with a count.
pub async fn list_keys(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let database = state.storage.database(&name).await?;
    let keys = database.snapshot_table().await;
    Ok(Json(json!({ "db": name, "keys": keys, "count": keys.len() })))
}

/// `GET /db/{database}/kv/{key}` — the raw value as the response body.
pub async fn get_value(
    State(state): State<AppState>,
    Path((name, key)): Path<(String, String)>,
) -> Result<String, ApiError> {
    let database = state.storage.database(&name).await?;
    let value = database
        .get(&key)
        .await
        .ok_or(StoreError::KeyNotFound(key))?;
    Ok(value)
}

/// `POST /db/{database}/kv/{key}` — set the key from the raw request body.
pub async fn set_value(
    State(state): State<AppState>,
    Path((name, key)): Path<(String, String)>,
    body: String,
) -> Result<Json<Value>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::EmptyBody);
    }

    let database = state.storage.database(&name).await?;
    database.set(key.clone(), body).await;
    info!(database = %name, key = %key, "key set");
    Ok(Json(json!({ "ok": true })))
}

/// `DELETE /db/{database}/kv/{key}`.
pub async fn delete_key(
    State(state): State<AppState>,
    Path((name, key)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let database = state.storage.database(&name).await?;
    database.delete(&key).await?;
    info!(database = %name, key = %key, "key deleted");
    Ok(Json(json!({ "ok": true })))
}
