//! 生成サービス契約
//!
//! ルーターが委譲する `MsgService` と、ルーター・サービス間で共有する定数

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::ServiceError;
use crate::types::VersionMap;

/// 生成結果のトップレベルに含まれる場合、エラー応答とみなすフィールド名
pub const JSON_ERROR_MESSAGE_FIELD: &str = "message";

/// プロトコルに対応するサービスが登録されていない場合のメッセージ
pub const NO_SERVICE_MESSAGE: &str = "No protocol service has been found registered";

/// プロトコル未登録時に返す固定ペイロード
pub const NO_SERVICE_ERROR: &str = r#"{"status_code":503,"result":"FAIL","message":"No protocol service has been found registered"}"#;

/// プロトコル未登録時のペイロードを組み立てる
///
/// `error_field` が既定値の場合は [`NO_SERVICE_ERROR`] と同じ内容になる。
pub fn no_service_payload(error_field: &str) -> Value {
    let mut payload = Map::new();
    payload.insert("status_code".to_string(), Value::from(503));
    payload.insert("result".to_string(), Value::from("FAIL"));
    payload.insert(error_field.to_string(), Value::from(NO_SERVICE_MESSAGE));
    Value::Object(payload)
}

/// メッセージプロトコル生成サービス
///
/// 1プロトコルにつき1実装。ルーターは `service_name()` をキーに登録し、
/// リクエストのパスパラメータと完全一致（大文字小文字区別）で選択する。
#[async_trait]
pub trait MsgService: Send + Sync {
    /// 登録名（パスパラメータと照合される）
    fn service_name(&self) -> &str;

    /// イベントを生成し、JSON文字列で返す
    ///
    /// 入力内容に問題がある場合は [`JSON_ERROR_MESSAGE_FIELD`] を含む
    /// JSONオブジェクトを `Ok` で返す。`Err` は想定外の障害を表す。
    async fn generate_msg(
        &self,
        msg_type: &str,
        body: &Map<String, Value>,
    ) -> Result<String, ServiceError>;

    /// サポートするイベントタイプ名の一覧
    async fn supported_event_types(&self) -> Result<Vec<String>, ServiceError>;

    /// イベントタイプのテンプレート（存在しない場合は `None`）
    async fn event_template(&self, event_type: &str) -> Result<Option<Value>, ServiceError>;

    /// サービスのバージョン（報告しない場合は `None`）
    fn version(&self) -> Option<String> {
        None
    }
}

/// バージョン情報の提供元
#[async_trait]
pub trait VersionSource: Send + Sync {
    /// コンポーネント名 → (キー → バージョン) のマップを返す
    async fn messaging_versions(&self) -> Result<VersionMap, ServiceError>;
}
