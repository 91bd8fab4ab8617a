//! HTTP経由のリモート生成サービス
//!
//! 設定ファイルに記載された外部の生成サービスへ `MsgService` の各操作を転送する。
//!
//! | operation | request |
//! |---|---|
//! | `generate_msg` | `POST {base_url}/generate?msgType={type}` |
//! | `supported_event_types` | `GET {base_url}/event_types` |
//! | `event_template` | `GET {base_url}/template/{type}` |
//!
//! イベントタイプはパスセグメント1つとしてパーセントエンコードする。

use async_trait::async_trait;
use msggen_common::config::ProtocolConfig;
use msggen_common::error::ServiceError;
use msggen_common::protocol::{MsgService, JSON_ERROR_MESSAGE_FIELD};
use reqwest::{Client, StatusCode, Url};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

/// リモート生成サービス
#[derive(Debug, Clone)]
pub struct HttpMsgService {
    name: String,
    base_url: String,
    version: Option<String>,
    error_field: String,
    client: Client,
}

impl HttpMsgService {
    /// 作成
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, client: Client) -> Self {
        let base_url: String = base_url.into();
        Self {
            name: name.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            version: None,
            error_field: JSON_ERROR_MESSAGE_FIELD.to_string(),
            client,
        }
    }

    /// `GET /versions` に表示するバージョンを設定
    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    /// 4xx応答をそのまま返す条件となるエラーフィールド名を設定
    pub fn with_error_field(mut self, error_field: impl Into<String>) -> Self {
        self.error_field = error_field.into();
        self
    }

    /// 設定から作成
    pub fn from_config(config: &ProtocolConfig, client: Client) -> Self {
        Self::new(&config.name, &config.base_url, client).with_version(config.version.clone())
    }

    /// タイムアウト付きの共有HTTPクライアントを作成
    pub fn build_client(timeout: Duration) -> Result<Client, ServiceError> {
        Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Internal(format!("failed to build HTTP client: {}", e)))
    }

    /// ベースURL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `base_url` の末尾にパスセグメントを追加したURL
    ///
    /// `/` `?` `#` はエンコードされる。`.` `..` のセグメントは拒否する。
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        if segments.iter().any(|s| matches!(*s, "" | "." | "..")) {
            return Err(ServiceError::Internal(format!(
                "invalid path segment in {:?}",
                segments
            )));
        }
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ServiceError::Internal(format!("invalid base_url '{}': {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ServiceError::Internal(format!("base_url '{}' cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// 4xxのボディがエラーフィールドを持つJSONオブジェクトか
    fn is_rejection(&self, text: &str) -> bool {
        serde_json::from_str::<Map<String, Value>>(text)
            .map(|payload| payload.contains_key(&self.error_field))
            .unwrap_or(false)
    }
}

fn transport_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        ServiceError::Timeout(err.to_string())
    } else {
        ServiceError::Http(err.to_string())
    }
}

#[async_trait]
impl MsgService for HttpMsgService {
    fn service_name(&self) -> &str {
        &self.name
    }

    async fn generate_msg(
        &self,
        msg_type: &str,
        body: &Map<String, Value>,
    ) -> Result<String, ServiceError> {
        let url = self.endpoint(&["generate"])?;
        let response = self
            .client
            .post(url.clone())
            .query(&[("msgType", msg_type)])
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        debug!(protocol = %self.name, status = %status, "Remote generation finished");

        // エラーフィールド付きの4xxは生成エラーとしてそのまま返す
        if status.is_success() || (status.is_client_error() && self.is_rejection(&text)) {
            Ok(text)
        } else {
            Err(ServiceError::Backend(format!("{} returned {}", url, status)))
        }
    }

    async fn supported_event_types(&self) -> Result<Vec<String>, ServiceError> {
        let url = self.endpoint(&["event_types"])?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(ServiceError::Backend(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        response
            .json::<Vec<String>>()
            .await
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))
    }

    async fn event_template(&self, event_type: &str) -> Result<Option<Value>, ServiceError> {
        // ドットセグメントはどのテンプレートにも一致しない
        if matches!(event_type, "." | "..") {
            return Ok(None);
        }
        let url = self.endpoint(&["template", event_type])?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(transport_error)?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => response
                .json::<Value>()
                .await
                .map(Some)
                .map_err(|e| ServiceError::InvalidResponse(e.to_string())),
            status => Err(ServiceError::Backend(format!("{} returned {}", url, status))),
        }
    }

    fn version(&self) -> Option<String> {
        self.version.clone()
    }
}
