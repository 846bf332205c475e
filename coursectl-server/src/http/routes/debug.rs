//! Diagnostic endpoints, mounted only when debug routes are enabled

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use super::MessageResponse;
use crate::domain::{self, SeedOutcome};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::DataStats;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub stats: DataStats,
}

/// GET /debug/stats - row counts per table
async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>, ApiError> {
    let stats = state.store.stats().await?;
    Ok(Json(StatsResponse { stats }))
}

/// POST /debug/reset-data - clear everything and reseed the sample dataset
async fn reset_data(State(state): State<Arc<AppState>>) -> Result<Json<MessageResponse>, ApiError> {
    let outcome = domain::reset_sample_data(state.store.as_ref()).await?;

    let message = match outcome {
        SeedOutcome::Seeded {
            students,
            courses,
            enrollments,
        } => format!(
            "data reset: {} students, {} courses, {} enrollments",
            students, courses, enrollments
        ),
        SeedOutcome::Skipped => "data reset".to_string(),
    };
    Ok(Json(MessageResponse::new(message)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/debug/stats", get(stats))
        .route("/debug/reset-data", post(reset_data))
}
