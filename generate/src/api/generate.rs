//! イベント生成API
//!
//! `POST /{protocol}?msgType={type}` をプロトコル名で選択した生成サービスへ委譲する

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use msggen_common::error::ServiceError;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use super::error::ApiError;
use crate::AppState;

/// クエリパラメータ
#[derive(Debug, Deserialize)]
pub struct GenerateParams {
    /// 生成するメッセージタイプ
    #[serde(rename = "msgType")]
    pub msg_type: String,
}

/// POST /{protocol}?msgType={type}
pub async fn generate(
    State(state): State<AppState>,
    Path(protocol): Path<String>,
    params: Result<Query<GenerateParams>, QueryRejection>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params.map_err(|rejection| ApiError::BadRequest {
        message: rejection.body_text(),
        error_field: state.error_field.clone(),
    })?;
    let Json(body) = body.map_err(|rejection| ApiError::BadRequest {
        message: rejection.body_text(),
        error_field: state.error_field.clone(),
    })?;

    let Some(service) = state.registry.resolve(&protocol) else {
        debug!(protocol = %protocol, "No generator service registered");
        return Err(ApiError::NoServiceAvailable {
            protocol,
            error_field: state.error_field.clone(),
        });
    };

    let generated = match service.generate_msg(&params.msg_type, &body).await {
        Ok(generated) => generated,
        Err(err) => return Err(fault(&protocol, &params.msg_type, err)),
    };

    let payload = match parse_object(&generated) {
        Ok(payload) => payload,
        Err(err) => return Err(fault(&protocol, &params.msg_type, err)),
    };

    if payload.contains_key(&*state.error_field) {
        warn!(
            protocol = %protocol,
            msg_type = %params.msg_type,
            "Generator service rejected the request"
        );
        return Err(ApiError::Rejected(Value::Object(payload)));
    }

    Ok((StatusCode::OK, Json(Value::Object(payload))).into_response())
}

/// 生成結果をJSONオブジェクトとして解析する
fn parse_object(generated: &str) -> Result<Map<String, Value>, ServiceError> {
    match serde_json::from_str::<Value>(generated)? {
        Value::Object(map) => Ok(map),
        other => Err(ServiceError::InvalidResponse(format!(
            "generated message is not a JSON object: {}",
            other
        ))),
    }
}

fn fault(protocol: &str, msg_type: &str, err: ServiceError) -> ApiError {
    error!(
        protocol = %protocol,
        msg_type = %msg_type,
        error = %err,
        "Message generation failed"
    );
    ApiError::Fault(err)
}
