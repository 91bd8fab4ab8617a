//! GET /versions の契約テスト

use crate::support::{assert_json, dyn_arc, get, test_state, FixedVersions, StubService};
use axum::http::StatusCode;
use msggen::api;
use msggen_common::types::VersionMap;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

#[tokio::test]
async fn versions_mirror_the_version_source() {
    let mut versions = VersionMap::new();
    versions.insert(
        "serviceVersion".to_string(),
        BTreeMap::from([("serviceVersion".to_string(), "2.0.1".to_string())]),
    );
    versions.insert(
        "endpointVersions".to_string(),
        BTreeMap::from([
            ("eiffelSemantics".to_string(), "0.3.4".to_string()),
            ("eiffel3".to_string(), "0.1.7".to_string()),
        ]),
    );
    let state = test_state(Vec::new(), "message")
        .with_version_source(Arc::new(FixedVersions(Some(versions))));
    let app = api::create_router(state);

    let response = get(app, "/versions", None).await;

    assert_json(
        response,
        StatusCode::OK,
        &json!({
            "serviceVersion": {"serviceVersion": "2.0.1"},
            "endpointVersions": {"eiffelSemantics": "0.3.4", "eiffel3": "0.1.7"}
        }),
    )
    .await;
}

#[tokio::test]
async fn default_versions_include_registered_services() {
    let service = Arc::new(StubService::new("eiffel3").with_version("3.1.0"));
    let app = api::create_router(test_state(vec![dyn_arc(&service)], "message"));

    let response = get(app, "/versions", None).await;

    assert_json(
        response,
        StatusCode::OK,
        &json!({
            "serviceVersion": {"msggen": env!("CARGO_PKG_VERSION")},
            "endpointVersions": {"eiffel3": "3.1.0"}
        }),
    )
    .await;
}

#[tokio::test]
async fn version_source_failure_returns_500() {
    let state = test_state(Vec::new(), "message")
        .with_version_source(Arc::new(FixedVersions(None)));
    let app = api::create_router(state);

    let response = get(app, "/versions", None).await;

    assert_json(
        response,
        StatusCode::INTERNAL_SERVER_ERROR,
        &json!({"message": "Internal server error"}),
    )
    .await;
}
