//! msggen Server Entry Point

use clap::Parser;
use msggen::cli::{serve::ServeArgs, Cli, Commands};
use msggen::logging;

fn main() {
    let cli = Cli::parse();

    if let Some(Commands::Protocols(args)) = &cli.command {
        if let Err(e) = msggen::cli::protocols::execute(args) {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = logging::init() {
        eprintln!("Error: failed to initialize logging: {:#}", e);
        std::process::exit(1);
    }

    // サブコマンドなしは環境変数の設定で serve と同じ動作
    let args = match cli.command {
        Some(Commands::Serve(args)) => args,
        _ => ServeArgs::from_env(),
    };
    tracing::info!("msggen v{}", env!("CARGO_PKG_VERSION"));

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to build Tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(msggen::cli::serve::execute(&args)) {
        tracing::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
