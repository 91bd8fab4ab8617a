//! serve サブコマンド
//!
//! 設定ファイルのプロトコルを登録してルーターサーバーを起動します。

use anyhow::Context;
use clap::Args;
use msggen_common::config::GenerateConfig;
use msggen_common::protocol::MsgService;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::{get_env, get_env_parse};
use crate::registry::ServiceRegistry;
use crate::remote::HttpMsgService;
use crate::AppState;

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Listen port (overrides the config file)
    #[arg(short, long, env = "MSGGEN_PORT")]
    pub port: Option<u16>,

    /// Bind address (overrides the config file)
    #[arg(short = 'H', long, env = "MSGGEN_HOST")]
    pub host: Option<String>,

    /// Config file listing the generator services
    #[arg(short, long, env = "MSGGEN_CONFIG")]
    pub config: Option<PathBuf>,
}

impl ServeArgs {
    /// 環境変数から引数を組み立てる（サブコマンド省略時）
    pub fn from_env() -> Self {
        Self {
            port: get_env_parse("MSGGEN_PORT"),
            host: get_env("MSGGEN_HOST"),
            config: get_env("MSGGEN_CONFIG").map(PathBuf::from),
        }
    }

    /// コマンドライン引数で設定を上書きする
    pub fn apply(&self, config: &mut GenerateConfig) {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
    }
}

/// 設定からアプリケーション状態を組み立てる
///
/// 設定された各プロトコルをリモート生成サービスとして登録する。
/// 同名のプロトコルが重複している場合はエラー。
pub fn build_state(config: &GenerateConfig) -> anyhow::Result<AppState> {
    let client = HttpMsgService::build_client(Duration::from_secs(config.request_timeout_secs))?;

    let services = config.protocols.iter().map(|protocol| {
        Arc::new(
            HttpMsgService::from_config(protocol, client.clone())
                .with_error_field(&config.error_field),
        ) as Arc<dyn MsgService>
    });
    let registry = ServiceRegistry::builder()
        .register_all(services)
        .context("failed to register generator services")?
        .build();

    Ok(AppState::new(registry, &config.error_field))
}

/// serve サブコマンドを実行
pub async fn execute(args: &ServeArgs) -> anyhow::Result<()> {
    let mut config = crate::config::load(args.config.as_deref())?;
    args.apply(&mut config);

    let state = build_state(&config)?;
    if state.registry.is_empty() {
        warn!("No generator services configured; every protocol request will return 503");
    }
    for protocol in &config.protocols {
        info!(
            protocol = %protocol.name,
            base_url = %protocol.base_url,
            "Registered generator service"
        );
    }

    crate::server::run(state, &config.bind_addr()).await
}
