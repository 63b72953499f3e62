//! Stats API handler

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::state::AppState;
use crate::error::Result;
use crate::stats::{self, TaskStats};

/// Stats response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub success: bool,
    pub stats: TaskStats,
    pub generated_at: DateTime<Utc>,
}

/// GET /api/tasks/stats
/// Aggregate counts and completion rate over the whole store
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let now = Utc::now();
    let stats = stats::compute(&state.store.snapshot()?, now);

    Ok(Json(StatsResponse {
        success: true,
        stats,
        generated_at: now,
    }))
}
