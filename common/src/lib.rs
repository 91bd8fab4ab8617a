//! msggen 共通定義
//!
//! ルーターと生成サービス（プラグイン）の間で共有する契約・定数・設定

#![warn(missing_docs)]

/// 設定構造体（設定ファイル）
pub mod config;

/// エラー型
pub mod error;

/// 生成サービス契約（MsgService）と共有定数
pub mod protocol;

/// 共通型定義
pub mod types;
