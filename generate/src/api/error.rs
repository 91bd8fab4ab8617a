//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use msggen_common::error::ServiceError;
use msggen_common::protocol::no_service_payload;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// Axum用のエラーレスポンス型
///
/// `Display` はログ用。レスポンスボディには内部情報を含めない。
#[derive(Debug, Error)]
pub enum ApiError {
    /// プロトコルに対応するサービスが登録されていない
    #[error("No service registered for protocol '{protocol}'")]
    NoServiceAvailable {
        /// 要求されたプロトコル名
        protocol: String,
        /// エラー応答を示すフィールド名
        error_field: Arc<str>,
    },

    /// サービスがエラーフィールド付きの応答を返した
    #[error("Generation rejected by service: {0}")]
    Rejected(Value),

    /// 生成・解析中の想定外の障害
    #[error("Unexpected fault: {0}")]
    Fault(#[from] ServiceError),

    /// テンプレートが存在しない
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// リクエストの形式が不正
    #[error("Bad request: {message}")]
    BadRequest {
        /// 拒否理由
        message: String,
        /// エラー応答を示すフィールド名
        error_field: Arc<str>,
    },

    /// バージョン情報の取得に失敗
    #[error("Version lookup failed: {source}")]
    Versions {
        /// 元のエラー
        source: ServiceError,
        /// エラー応答を示すフィールド名
        error_field: Arc<str>,
    },
}

impl ApiError {
    /// HTTPステータスコード
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NoServiceAvailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Rejected(_) | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Fault(_) | Self::Versions { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::TemplateNotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

fn message_payload(error_field: &str, message: &str) -> Value {
    let mut payload = Map::new();
    payload.insert(error_field.to_string(), Value::from(message));
    Value::Object(payload)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::NoServiceAvailable { error_field, .. } => {
                (status, Json(no_service_payload(&error_field))).into_response()
            }
            Self::Rejected(payload) => (status, Json(payload)).into_response(),
            // 障害の詳細はログにのみ残し、ボディは空で返す
            Self::Fault(_) => status.into_response(),
            Self::TemplateNotFound(event_type) => (
                status,
                format!("Requested {} Template Not Available", event_type),
            )
                .into_response(),
            Self::BadRequest {
                message,
                error_field,
            } => (status, Json(message_payload(&error_field, &message))).into_response(),
            Self::Versions { error_field, .. } => (
                status,
                Json(message_payload(&error_field, "Internal server error")),
            )
                .into_response(),
        }
    }
}
