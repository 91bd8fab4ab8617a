//! CLI module for msggen
//!
//! Provides command-line interface for the generation router.

/// protocols サブコマンド
pub mod protocols;
/// serve サブコマンド
pub mod serve;

use clap::{Parser, Subcommand};

/// msggen - HTTP router for pluggable message-protocol generator services
#[derive(Parser, Debug)]
#[command(name = "msggen")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    MSGGEN_HOST                  Bind address (default: 0.0.0.0)
    MSGGEN_PORT                  Listen port (default: 8080)
    MSGGEN_CONFIG                Config file (toml / yaml / json)
    MSGGEN_LOG_LEVEL             Log filter (default: info)
    MSGGEN_ERROR_FIELD           Error field name in generated JSON (default: message)
    MSGGEN_REQUEST_TIMEOUT_SECS  Remote generator timeout (default: 30)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the router server
    Serve(serve::ServeArgs),
    /// List the configured protocols
    Protocols(protocols::ProtocolsArgs),
}
