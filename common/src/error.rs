//! エラー型定義

use thiserror::Error;

/// アップロード失敗時の汎用メッセージ
pub const UPLOAD_FALLBACK_MESSAGE: &str = "画像ホスティングへのアップロードに失敗しました";

/// 生成失敗時の汎用メッセージ
pub const GENERATION_FALLBACK_MESSAGE: &str = "生成APIでエラーが発生しました";

/// 決済セッション作成失敗時の汎用メッセージ
pub const CHECKOUT_FALLBACK_MESSAGE: &str = "サーバーエラー";

/// 決済サーバーに到達できない場合のメッセージ
pub const CHECKOUT_UNREACHABLE_MESSAGE: &str = "サーバーに接続できません";

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TryOnError {
    #[error("入力エラー: {0}")]
    Validation(String),

    #[error("クレジットが不足しています")]
    InsufficientCredits,

    #[error("アップロードエラー: {0}")]
    Upload(String),

    #[error("生成エラー: {0}")]
    Generation(String),

    #[error("決済エラー: {0}")]
    Checkout(String),

    #[error("保存エラー: {0}")]
    Storage(String),

    #[error("処理が中断されました")]
    Cancelled,
}

impl TryOnError {
    /// ユーザーに表示するメッセージ（サービス側のメッセージをそのまま含む）
    pub fn user_message(&self) -> String {
        match self {
            TryOnError::Validation(msg)
            | TryOnError::Upload(msg)
            | TryOnError::Generation(msg)
            | TryOnError::Checkout(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    /// 通信失敗をアップロードエラーに包む
    pub fn upload_unreachable(cause: impl std::fmt::Display) -> Self {
        TryOnError::Upload(format!("{}: {}", UPLOAD_FALLBACK_MESSAGE, cause))
    }

    /// 通信失敗を生成エラーに包む
    pub fn generation_unreachable(cause: impl std::fmt::Display) -> Self {
        TryOnError::Generation(format!("{}: {}", GENERATION_FALLBACK_MESSAGE, cause))
    }

    /// 決済サーバーへの通信失敗
    pub fn checkout_unreachable() -> Self {
        TryOnError::Checkout(CHECKOUT_UNREACHABLE_MESSAGE.to_string())
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, TryOnError>;
