//! Settings API endpoints - JSON API

use axum::extract::State;
use axum::Json;

use velto_config::Config;

use crate::AppState;

/// Active configuration with account passwords blanked
pub async fn api_settings(State(state): State<AppState>) -> Json<Config> {
    Json(state.config.redacted())
}
