//! REST APIハンドラー
//!
//! イベント生成、バージョン情報、イベントタイプ・テンプレート参照API

/// APIエラーレスポンス
pub mod error;
/// イベント生成
pub mod generate;
/// Acceptヘッダー判定
pub mod negotiation;
/// イベントタイプ・テンプレート
pub mod templates;
/// バージョン情報
pub mod versions;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// APIルーターを作成
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/versions", get(versions::get_versions))
        .route("/event_types/:protocol", get(templates::get_event_types))
        .route(
            "/template/:event_type/:protocol",
            get(templates::get_event_template),
        )
        .route("/:protocol", post(generate::generate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
