//! バージョン情報API

use axum::{extract::State, Json};
use msggen_common::types::VersionMap;
use tracing::error;

use super::error::ApiError;
use crate::AppState;

/// GET /versions
pub async fn get_versions(State(state): State<AppState>) -> Result<Json<VersionMap>, ApiError> {
    match state.versions.messaging_versions().await {
        Ok(versions) => Ok(Json(versions)),
        Err(source) => {
            error!(error = %source, "Failed to collect messaging versions");
            Err(ApiError::Versions {
                source,
                error_field: state.error_field.clone(),
            })
        }
    }
}
