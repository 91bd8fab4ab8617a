//! テスト用の生成サービススタブとルーター構築ヘルパー

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, Response, StatusCode},
    Router,
};
use msggen::{api, registry::ServiceRegistry, AppState};
use msggen_common::error::ServiceError;
use msggen_common::protocol::{MsgService, VersionSource};
use msggen_common::types::VersionMap;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tower::ServiceExt;

/// 生成結果の振る舞い
#[derive(Clone)]
pub enum Generated {
    /// このJSON文字列をそのまま返す
    Text(String),
    /// 障害を返す
    Fail,
}

/// 設定どおりに応答する生成サービス
pub struct StubService {
    pub name: String,
    pub generated: Generated,
    pub event_types: Result<Vec<String>, ()>,
    pub templates: HashMap<String, Value>,
    pub template_fails: bool,
    pub version: Option<String>,
    pub calls: AtomicUsize,
}

impl StubService {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            generated: Generated::Text("{}".to_string()),
            event_types: Ok(Vec::new()),
            templates: HashMap::new(),
            template_fails: false,
            version: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn generating(mut self, generated: Generated) -> Self {
        self.generated = generated;
        self
    }

    pub fn with_event_types(mut self, types: &[&str]) -> Self {
        self.event_types = Ok(types.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn failing_event_types(mut self) -> Self {
        self.event_types = Err(());
        self
    }

    pub fn with_template(mut self, event_type: &str, template: Value) -> Self {
        self.templates.insert(event_type.to_string(), template);
        self
    }

    pub fn failing_templates(mut self) -> Self {
        self.template_fails = true;
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MsgService for StubService {
    fn service_name(&self) -> &str {
        &self.name
    }

    async fn generate_msg(
        &self,
        _msg_type: &str,
        _body: &Map<String, Value>,
    ) -> Result<String, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.generated {
            Generated::Text(text) => Ok(text.clone()),
            Generated::Fail => Err(ServiceError::Internal("stub failure".to_string())),
        }
    }

    async fn supported_event_types(&self) -> Result<Vec<String>, ServiceError> {
        self.event_types
            .clone()
            .map_err(|_| ServiceError::Backend("stub failure".to_string()))
    }

    async fn event_template(&self, event_type: &str) -> Result<Option<Value>, ServiceError> {
        if self.template_fails {
            return Err(ServiceError::Backend("stub failure".to_string()));
        }
        Ok(self.templates.get(event_type).cloned())
    }

    fn version(&self) -> Option<String> {
        self.version.clone()
    }
}

/// 生成時に入力をそのまま返すサービス（msgType を meta.type に入れる）
pub struct EchoService;

#[async_trait]
impl MsgService for EchoService {
    fn service_name(&self) -> &str {
        "echo"
    }

    async fn generate_msg(
        &self,
        msg_type: &str,
        body: &Map<String, Value>,
    ) -> Result<String, ServiceError> {
        let mut body = body.clone();
        body.insert("msgType".to_string(), Value::from(msg_type));
        Ok(serde_json::to_string(&body)?)
    }

    async fn supported_event_types(&self) -> Result<Vec<String>, ServiceError> {
        Ok(Vec::new())
    }

    async fn event_template(&self, _event_type: &str) -> Result<Option<Value>, ServiceError> {
        Ok(None)
    }
}

/// 固定のマップ、または障害を返すバージョン提供元
pub struct FixedVersions(pub Option<VersionMap>);

#[async_trait]
impl VersionSource for FixedVersions {
    async fn messaging_versions(&self) -> Result<VersionMap, ServiceError> {
        self.0
            .clone()
            .ok_or_else(|| ServiceError::Backend("version store unavailable".to_string()))
    }
}

/// 具象サービスを登録用の `Arc<dyn MsgService>` に変換する
pub fn dyn_arc<S: MsgService + 'static>(service: &Arc<S>) -> Arc<dyn MsgService> {
    service.clone()
}

/// テスト用のRouterを作成する
pub fn create_test_router(services: Vec<Arc<dyn MsgService>>) -> Router {
    create_test_router_with_field(services, "message")
}

/// エラーフィールド名を指定してテスト用のRouterを作成する
pub fn create_test_router_with_field(services: Vec<Arc<dyn MsgService>>, field: &str) -> Router {
    api::create_router(test_state(services, field))
}

/// テスト用のAppStateを作成する
pub fn test_state(services: Vec<Arc<dyn MsgService>>, field: &str) -> AppState {
    let registry = ServiceRegistry::builder()
        .register_all(services)
        .expect("stub services must have unique names")
        .build();
    AppState::new(registry, field)
}

/// POST /{protocol}?msgType={type}
pub async fn post_generate(
    app: Router,
    protocol: &str,
    msg_type: &str,
    body: &Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(format!("/{}?msgType={}", protocol, msg_type))
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// GETリクエスト（Acceptヘッダー任意）
pub async fn get(app: Router, uri: &str, accept: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(accept) = accept {
        builder = builder.header("accept", accept);
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// レスポンスボディを取り出す
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

/// レスポンスボディをJSONとして取り出す
pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("response body is JSON")
}

/// ステータスとJSONボディを確認する
pub async fn assert_json(response: Response<Body>, status: StatusCode, expected: &Value) {
    assert_eq!(response.status(), status);
    assert_eq!(&body_json(response).await, expected);
}
