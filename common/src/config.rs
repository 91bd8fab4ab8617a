//! 設定管理
//!
//! GenerateConfig, ProtocolConfig等の設定構造体

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CommonError;
use crate::protocol::JSON_ERROR_MESSAGE_FIELD;

/// 環境変数で設定ファイルを上書きする際のプレフィックス
pub const ENV_PREFIX: &str = "MSGGEN";

/// ルーター設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// ホストアドレス (デフォルト: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// エラー応答を示すフィールド名 (デフォルト: "message")
    #[serde(default = "default_error_field")]
    pub error_field: String,

    /// リモート生成サービスへのリクエストタイムアウト（秒）(デフォルト: 30)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// 登録するプロトコル
    #[serde(default)]
    pub protocols: Vec<ProtocolConfig>,
}

/// リモート生成サービス1件分の設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProtocolConfig {
    /// プロトコル名（`POST /{name}` の `name`）
    pub name: String,

    /// 生成サービスのベースURL
    pub base_url: String,

    /// `GET /versions` に表示するバージョン
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_error_field() -> String {
    JSON_ERROR_MESSAGE_FIELD.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            error_field: default_error_field(),
            request_timeout_secs: default_request_timeout(),
            protocols: Vec::new(),
        }
    }
}

impl GenerateConfig {
    /// 設定ファイル（任意）と `MSGGEN_*` 環境変数から設定を読み込む
    ///
    /// ファイル形式は拡張子（toml / yaml / json）から判定する。
    pub fn load(path: Option<&Path>) -> Result<Self, CommonError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path));
        }
        let settings = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: GenerateConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 設定値を検証する
    pub fn validate(&self) -> Result<(), CommonError> {
        if self.error_field.trim().is_empty() {
            return Err(CommonError::Validation(
                "error_field must not be empty".to_string(),
            ));
        }
        for protocol in &self.protocols {
            if protocol.name.trim().is_empty() {
                return Err(CommonError::Validation(
                    "protocol name must not be empty".to_string(),
                ));
            }
            if protocol.base_url.trim().is_empty() {
                return Err(CommonError::Validation(format!(
                    "protocol '{}' has an empty base_url",
                    protocol.name
                )));
            }
        }
        Ok(())
    }

    /// バインドアドレス
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
