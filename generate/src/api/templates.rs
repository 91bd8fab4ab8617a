//! イベントタイプ・テンプレートAPI

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use msggen_common::protocol::MsgService;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

use super::error::ApiError;
use super::negotiation::accepts_html;
use crate::AppState;

const HTML_HEAD: &str = "<!DOCTYPE html><html><body><pre>";
const HTML_TAIL: &str = "</pre></body></html>";

fn resolve(state: &AppState, protocol: String) -> Result<Arc<dyn MsgService>, ApiError> {
    state.registry.resolve(&protocol).ok_or_else(|| {
        debug!(protocol = %protocol, "No generator service registered");
        ApiError::NoServiceAvailable {
            protocol,
            error_field: state.error_field.clone(),
        }
    })
}

/// GET /event_types/{protocol}
pub async fn get_event_types(
    State(state): State<AppState>,
    Path(protocol): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let service = resolve(&state, protocol)?;
    let event_types = service.supported_event_types().await.map_err(|err| {
        error!(
            protocol = %service.service_name(),
            error = %err,
            "Failed to list supported event types"
        );
        ApiError::Fault(err)
    })?;
    Ok(Json(event_types))
}

/// GET /template/{type}/{protocol}
pub async fn get_event_template(
    State(state): State<AppState>,
    Path((event_type, protocol)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let service = resolve(&state, protocol)?;
    let template = service.event_template(&event_type).await.map_err(|err| {
        error!(
            protocol = %service.service_name(),
            event_type = %event_type,
            error = %err,
            "Failed to fetch event template"
        );
        ApiError::Fault(err)
    })?;

    let Some(template) = template else {
        return Err(ApiError::TemplateNotFound(event_type));
    };

    if accepts_html(&headers) {
        let html = render_html(&template).map_err(|err| ApiError::Fault(err.into()))?;
        return Ok((StatusCode::OK, Html(html)).into_response());
    }

    Ok((StatusCode::OK, Json(template)).into_response())
}

/// ブラウザ表示用に整形済みJSONを `<pre>` で包む
pub fn html_document(pretty_json: &str) -> String {
    format!("{}{}{}", HTML_HEAD, pretty_json, HTML_TAIL)
}

/// テンプレートをブラウザ表示用HTMLに変換する
pub fn render_html(template: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(template).map(|pretty| html_document(&pretty))
}
