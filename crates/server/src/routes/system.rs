use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// `GET /system/storage` — snapshot configuration and dirty state.
pub async fn storage_status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "snapshot_enabled": state.config.snapshot_enabled,
        "dirty": state.storage.is_dirty(),
        "count_dbs": state.storage.count().await,
    }))
}

/// `GET /system/software` — build identification.
pub async fn software_info() -> Json<Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "os": std::env::consts::OS,
        "arch": std::env::consts::ARCH,
    }))
}
