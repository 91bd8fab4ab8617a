//! バージョン情報の集約
//!
//! ルーター自身と登録済み生成サービスのバージョンを `GET /versions` 用にまとめる

use async_trait::async_trait;
use msggen_common::error::ServiceError;
use msggen_common::protocol::VersionSource;
use msggen_common::types::{VersionMap, ENDPOINT_VERSIONS_KEY, SERVICE_VERSION_KEY};
use std::collections::BTreeMap;

use crate::registry::ServiceRegistry;

/// ルーターのコンポーネント名
pub const SERVICE_NAME: &str = env!("CARGO_PKG_NAME");

/// レジストリからバージョン情報を集約する [`VersionSource`]
#[derive(Debug, Clone)]
pub struct VersionService {
    registry: ServiceRegistry,
}

impl VersionService {
    /// 作成
    pub fn new(registry: ServiceRegistry) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl VersionSource for VersionService {
    async fn messaging_versions(&self) -> Result<VersionMap, ServiceError> {
        let mut versions = VersionMap::new();

        let mut service = BTreeMap::new();
        service.insert(
            SERVICE_NAME.to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );
        versions.insert(SERVICE_VERSION_KEY.to_string(), service);

        let endpoints: BTreeMap<String, String> = self
            .registry
            .services()
            .iter()
            .filter_map(|s| s.version().map(|v| (s.service_name().to_string(), v)))
            .collect();
        versions.insert(ENDPOINT_VERSIONS_KEY.to_string(), endpoints);

        Ok(versions)
    }
}
