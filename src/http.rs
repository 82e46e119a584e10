//! reqwestによる外部サービスクライアント

use crate::image_file::ImageFile;
use crate::terminal::TerminalLocation;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tryon_common::{
    buy_pack, parse_checkout_response, parse_generation_response, parse_upload_response,
    CancelToken, CheckoutBackend, CheckoutRequest, Clock, GenerationRequest, ImageHost,
    TryOnBackend, TryOnConfig, TryOnError, TryOnView,
};

/// 画像ホスティング（マルチパートアップロード）
#[derive(Debug, Clone)]
pub struct HttpImageHost {
    client: reqwest::Client,
    upload_url: String,
    upload_preset: String,
    cloud_name: String,
}

impl HttpImageHost {
    pub fn new(client: reqwest::Client, config: &TryOnConfig) -> Self {
        Self {
            client,
            upload_url: config.upload_url.clone(),
            upload_preset: config.upload_preset.clone(),
            cloud_name: config.cloud_name.clone(),
        }
    }
}

impl ImageHost for HttpImageHost {
    type File = ImageFile;

    async fn upload(&self, file: &ImageFile, cancel: &CancelToken) -> tryon_common::Result<String> {
        cancel.check()?;

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)
            .map_err(TryOnError::upload_unreachable)?;
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone())
            .text("cloud_name", self.cloud_name.clone());

        tracing::debug!(file = %file.file_name, url = %self.upload_url, "アップロード開始");
        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(TryOnError::upload_unreachable)?;

        let ok = response.status().is_success();
        let body = response.text().await.map_err(TryOnError::upload_unreachable)?;
        cancel.check()?;

        parse_upload_response(ok, &body)
    }
}

/// 試着画像生成API
#[derive(Debug, Clone)]
pub struct HttpTryOnBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTryOnBackend {
    pub fn new(client: reqwest::Client, config: &TryOnConfig) -> Self {
        Self { client, endpoint: config.generate_endpoint() }
    }
}

impl TryOnBackend for HttpTryOnBackend {
    async fn generate(
        &self,
        request: &GenerationRequest,
        cancel: &CancelToken,
    ) -> tryon_common::Result<String> {
        cancel.check()?;

        tracing::debug!(endpoint = %self.endpoint, category = %request.category, "生成リクエスト送信");
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(TryOnError::generation_unreachable)?;

        let ok = response.status().is_success();
        let body = response.text().await.map_err(TryOnError::generation_unreachable)?;
        cancel.check()?;

        parse_generation_response(ok, &body)
    }
}

/// 決済セッション作成API
#[derive(Debug, Clone)]
pub struct HttpCheckoutBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCheckoutBackend {
    pub fn new(client: reqwest::Client, config: &TryOnConfig) -> Self {
        Self { client, endpoint: config.checkout_endpoint() }
    }
}

impl CheckoutBackend for HttpCheckoutBackend {
    async fn create_session(
        &self,
        request: &CheckoutRequest,
        cancel: &CancelToken,
    ) -> tryon_common::Result<String> {
        cancel.check()?;

        let response = match self.client.post(&self.endpoint).json(request).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "決済サーバーに接続できません");
                return Err(TryOnError::checkout_unreachable());
            }
        };

        let body = response.text().await.map_err(|e| {
            tracing::error!(error = %e, "決済レスポンスの読み込みに失敗");
            TryOnError::checkout_unreachable()
        })?;

        parse_checkout_response(&body)
    }
}

/// 端末から決済を開始し、チェックアウトURLを表示する
///
/// 決済後はベースURLのフロントエンドに戻り、そこでクレジットが付与される。
pub async fn start_checkout<V: TryOnView>(
    client: reqwest::Client,
    config: &TryOnConfig,
    pack_id: &str,
    view: &mut V,
    cancel: &CancelToken,
) -> tryon_common::Result<String> {
    let backend = HttpCheckoutBackend::new(client, config);
    let return_url = config.return_url();
    buy_pack(&backend, pack_id, Some(&return_url), &TerminalLocation, view, cancel).await
}

/// システム時計
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// 結果画像をファイルに保存する
pub async fn download_result(
    client: &reqwest::Client,
    url: &str,
    output: &Path,
) -> crate::error::Result<u64> {
    let bytes = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(output, &bytes).await?;
    Ok(bytes.len() as u64)
}
