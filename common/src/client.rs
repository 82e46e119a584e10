//! 外部サービスクライアントの抽象
//!
//! ブラウザ版は fetch、CLIは reqwest で実装する。

use crate::error::Result;
use crate::wire::{CheckoutRequest, GenerationRequest};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 呼び出し側から処理を中断するためのトークン
///
/// 現状はタイムアウトを設定する呼び出し元はないが、各クライアントは
/// 送信前と応答後にこれを確認する。
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// 中断済みなら `TryOnError::Cancelled`
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(crate::error::TryOnError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// 画像ホスティング
#[allow(async_fn_in_trait)]
pub trait ImageHost {
    /// プラットフォームごとのファイル表現
    type File;

    /// 1ファイルをアップロードして公開URLを返す
    async fn upload(&self, file: &Self::File, cancel: &CancelToken) -> Result<String>;
}

/// 試着画像生成バックエンド
#[allow(async_fn_in_trait)]
pub trait TryOnBackend {
    async fn generate(&self, request: &GenerationRequest, cancel: &CancelToken) -> Result<String>;
}

/// 決済セッション作成バックエンド
#[allow(async_fn_in_trait)]
pub trait CheckoutBackend {
    /// チェックアウトページのURLを返す
    async fn create_session(&self, request: &CheckoutRequest, cancel: &CancelToken)
        -> Result<String>;
}

/// 現在時刻（エポックミリ秒）
pub trait Clock {
    fn now_millis(&self) -> i64;
}
