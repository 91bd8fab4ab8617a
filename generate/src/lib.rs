//! msggen Server
//!
//! プロトコル名で選択した生成サービスへイベント生成リクエストを振り分けるHTTPファサード

#![warn(missing_docs)]

/// REST APIハンドラー
pub mod api;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 生成サービス登録管理
pub mod registry;

/// HTTP経由のリモート生成サービス
pub mod remote;

/// axumサーバー起動・シャットダウン
pub mod server;

/// バージョン情報の集約
pub mod versions;

use msggen_common::protocol::VersionSource;
use std::sync::Arc;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// 生成サービスレジストリ（起動後は不変）
    pub registry: registry::ServiceRegistry,
    /// バージョン情報の提供元
    pub versions: Arc<dyn VersionSource>,
    /// エラー応答を示すフィールド名
    pub error_field: Arc<str>,
}

impl AppState {
    /// レジストリから状態を組み立てる（バージョン情報はレジストリから集約）
    pub fn new(registry: registry::ServiceRegistry, error_field: &str) -> Self {
        let versions = Arc::new(versions::VersionService::new(registry.clone()));
        Self {
            registry,
            versions,
            error_field: Arc::from(error_field),
        }
    }

    /// バージョン情報の提供元を差し替える
    pub fn with_version_source(mut self, versions: Arc<dyn VersionSource>) -> Self {
        self.versions = versions;
        self
    }
}
