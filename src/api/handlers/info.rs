//! Service info API handler

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct InfoResponse {
    pub message: String,
    pub version: String,
}

/// GET /
pub async fn get_info() -> Json<InfoResponse> {
    Json(InfoResponse {
        message: "taskdeck API running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
