//! 生成サービス登録管理
//!
//! プロトコル名 → サービスのマップを起動時に一度だけ構築し、以降は読み取り専用で共有する

use msggen_common::protocol::MsgService;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// レジストリ構築時のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// 同名のサービスが既に登録されている
    #[error("Service already registered: {0}")]
    DuplicateService(String),

    /// サービス名が空
    #[error("Service name must not be empty")]
    EmptyName,

    /// APIの固定パスと衝突する名前
    #[error("Service name is reserved by the API: {0}")]
    ReservedName(String),
}

/// `POST /{protocol}` に届かない、APIの固定パス先頭セグメント
pub const RESERVED_NAMES: &[&str] = &["versions", "event_types", "template"];

/// 生成サービスレジストリ
///
/// `Clone` は内部の `Arc` を共有するだけで、登録内容は複製しない。
#[derive(Clone, Default)]
pub struct ServiceRegistry {
    services: Arc<HashMap<String, Arc<dyn MsgService>>>,
}

impl ServiceRegistry {
    /// ビルダーを作成
    pub fn builder() -> ServiceRegistryBuilder {
        ServiceRegistryBuilder::default()
    }

    /// プロトコル名でサービスを取得（完全一致・大文字小文字区別）
    pub fn resolve(&self, protocol: &str) -> Option<Arc<dyn MsgService>> {
        self.services.get(protocol).cloned()
    }

    /// 登録済みプロトコル名（昇順）
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.services.keys().cloned().collect();
        names.sort();
        names
    }

    /// 登録済みサービス（プロトコル名の昇順）
    pub fn services(&self) -> Vec<Arc<dyn MsgService>> {
        self.names()
            .iter()
            .filter_map(|name| self.services.get(name).cloned())
            .collect()
    }

    /// 登録数
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// 登録が空か
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("protocols", &self.names())
            .finish()
    }
}

/// [`ServiceRegistry`] のビルダー
#[derive(Default)]
pub struct ServiceRegistryBuilder {
    services: HashMap<String, Arc<dyn MsgService>>,
}

impl ServiceRegistryBuilder {
    /// サービスを登録する（同名の二重登録はエラー）
    pub fn register(mut self, service: Arc<dyn MsgService>) -> Result<Self, RegistryError> {
        let name = service.service_name().to_string();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if RESERVED_NAMES.contains(&name.as_str()) {
            return Err(RegistryError::ReservedName(name));
        }
        if self.services.contains_key(&name) {
            return Err(RegistryError::DuplicateService(name));
        }
        self.services.insert(name, service);
        Ok(self)
    }

    /// 複数のサービスをまとめて登録する
    pub fn register_all<I>(self, services: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = Arc<dyn MsgService>>,
    {
        services
            .into_iter()
            .try_fold(self, |builder, service| builder.register(service))
    }

    /// レジストリを確定する
    pub fn build(self) -> ServiceRegistry {
        ServiceRegistry {
            services: Arc::new(self.services),
        }
    }
}
