//! 共通型定義

use std::collections::BTreeMap;

/// コンポーネント名 → (キー → バージョン文字列)
pub type VersionMap = BTreeMap<String, BTreeMap<String, String>>;

/// `GET /versions` のトップレベルキー: ルーター自身のバージョン
pub const SERVICE_VERSION_KEY: &str = "serviceVersion";

/// `GET /versions` のトップレベルキー: 登録プロトコルのバージョン
pub const ENDPOINT_VERSIONS_KEY: &str = "endpointVersions";
