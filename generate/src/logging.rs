//! ロギング初期化
//!
//! `MSGGEN_LOG_LEVEL` のフィルタ式でtracingを初期化する

use tracing_subscriber::{
    filter::ParseError, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::config::get_env_or;

const DEFAULT_LOG_LEVEL: &str = "info";

/// ログフィルタ式を取得
pub fn filter_directive() -> String {
    get_env_or("MSGGEN_LOG_LEVEL", DEFAULT_LOG_LEVEL)
}

/// フィルタ式を解釈する。不正な場合は `info` とパースエラーを返す
fn build_filter(directive: &str) -> (EnvFilter, Option<ParseError>) {
    match EnvFilter::try_new(directive) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new(DEFAULT_LOG_LEVEL), Some(err)),
    }
}

/// tracing subscriberを初期化する
///
/// 二重に初期化した場合はエラーを返す。
pub fn init() -> anyhow::Result<()> {
    let directive = filter_directive();
    let (filter, invalid) = build_filter(&directive);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()?;

    if let Some(err) = invalid {
        tracing::warn!(
            directive = %directive,
            error = %err,
            "Invalid MSGGEN_LOG_LEVEL, falling back to '{}'",
            DEFAULT_LOG_LEVEL
        );
    }
    Ok(())
}
