//! protocols サブコマンド
//!
//! 設定ファイルに登録されたプロトコルを表示します。

use clap::Args;
use msggen_common::config::ProtocolConfig;
use std::path::PathBuf;

/// protocols サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ProtocolsArgs {
    /// Config file listing the generator services
    #[arg(short, long, env = "MSGGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// protocols サブコマンドを実行
pub fn execute(args: &ProtocolsArgs) -> anyhow::Result<()> {
    let config = crate::config::load(args.config.as_deref())?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&config.protocols)?);
    } else {
        print!("{}", format_table(&config.protocols));
    }
    Ok(())
}

/// プロトコル一覧を表形式の文字列にする
pub fn format_table(protocols: &[ProtocolConfig]) -> String {
    if protocols.is_empty() {
        return "No protocols configured\n".to_string();
    }

    let name_width = protocols
        .iter()
        .map(|p| p.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    let url_width = protocols
        .iter()
        .map(|p| p.base_url.len())
        .max()
        .unwrap_or(0)
        .max("BASE URL".len());

    let mut out = format!(
        "{:<name_width$}  {:<url_width$}  VERSION\n",
        "NAME", "BASE URL"
    );
    for p in protocols {
        out.push_str(&format!(
            "{:<name_width$}  {:<url_width$}  {}\n",
            p.name,
            p.base_url,
            p.version.as_deref().unwrap_or("-")
        ));
    }
    out
}
