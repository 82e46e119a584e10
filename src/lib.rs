//! バーチャル試着クライアント（CLI）
//!
//! 試着処理・クレジット管理は `tryon-common` を使い、
//! このクレートはHTTPクライアントとファイル保存、端末表示を提供する。

pub mod cli;
pub mod config;
pub mod error;
pub mod file_storage;
pub mod http;
pub mod image_file;
pub mod terminal;
