//! 外部サービスとのリクエスト/レスポンス定義
//!
//! レスポンスの解釈はブラウザ版とCLIで共通化する。

use crate::error::{
    Result, TryOnError, CHECKOUT_FALLBACK_MESSAGE, GENERATION_FALLBACK_MESSAGE,
    UPLOAD_FALLBACK_MESSAGE,
};
use serde::{Deserialize, Serialize};

/// 生成リクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub person_image_url: String,
    pub clothing_image_url: String,
    pub category: String,
    pub user_id: String,
    pub security_key: String,
}

impl GenerationRequest {
    pub fn new(
        person_image_url: impl Into<String>,
        clothing_image_url: impl Into<String>,
        category: impl Into<String>,
        now_millis: i64,
        security_key: impl Into<String>,
    ) -> Self {
        Self {
            person_image_url: person_image_url.into(),
            clothing_image_url: clothing_image_url.into(),
            category: category.into(),
            user_id: user_id_for(now_millis),
            security_key: security_key.into(),
        }
    }
}

/// リクエストごとのユーザーID（"user_<エポックミリ秒>"）
pub fn user_id_for(now_millis: i64) -> String {
    format!("user_{}", now_millis)
}

/// 決済セッション作成リクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub pack_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub success_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cancel_url: Option<String>,
}

impl CheckoutRequest {
    pub fn new(pack_id: impl Into<String>) -> Self {
        Self {
            pack_id: pack_id.into(),
            success_url: None,
            cancel_url: None,
        }
    }

    /// 決済後の戻り先（成功・キャンセル共通）を設定
    pub fn with_return_url(mut self, return_url: Option<&str>) -> Self {
        self.success_url = return_url.map(str::to_string);
        self.cancel_url = return_url.map(str::to_string);
        self
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    error: Option<UploadErrorBody>,
}

#[derive(Debug, Deserialize)]
struct UploadErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    result_image_url: Option<String>,
    detail: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct CheckoutResponse {
    url: Option<String>,
    detail: Option<serde_json::Value>,
}

/// detailを表示用文字列にする（FastAPIの検証エラーは配列で返る）
fn detail_text(detail: Option<serde_json::Value>) -> Option<String> {
    match detail? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// 画像ホスティングのレスポンスを解釈し、公開URLを返す
///
/// # Arguments
/// * `ok` - HTTPステータスが成功か
/// * `body` - レスポンスボディ
pub fn parse_upload_response(ok: bool, body: &str) -> Result<String> {
    let response: UploadResponse =
        serde_json::from_str(body).map_err(TryOnError::upload_unreachable)?;

    if !ok || response.error.is_some() {
        let message = response
            .error
            .and_then(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| UPLOAD_FALLBACK_MESSAGE.to_string());
        return Err(TryOnError::Upload(message));
    }

    response
        .secure_url
        .ok_or_else(|| TryOnError::Upload(UPLOAD_FALLBACK_MESSAGE.to_string()))
}

/// 生成APIのレスポンスを解釈し、結果画像URLを返す
///
/// URLの形式や画像の実在は検証しない。
pub fn parse_generation_response(ok: bool, body: &str) -> Result<String> {
    let response: GenerationResponse =
        serde_json::from_str(body).map_err(TryOnError::generation_unreachable)?;

    if !ok {
        let message = detail_text(response.detail)
            .unwrap_or_else(|| GENERATION_FALLBACK_MESSAGE.to_string());
        return Err(TryOnError::Generation(message));
    }

    response
        .result_image_url
        .ok_or_else(|| TryOnError::Generation(GENERATION_FALLBACK_MESSAGE.to_string()))
}

/// 決済APIのレスポンスを解釈し、チェックアウトURLを返す
///
/// ステータスは見ずに `url` の有無で判定する。JSONでない場合は接続失敗扱い。
pub fn parse_checkout_response(body: &str) -> Result<String> {
    let response: CheckoutResponse =
        serde_json::from_str(body).map_err(|_| TryOnError::checkout_unreachable())?;

    match response.url.filter(|u| !u.is_empty()) {
        Some(url) => Ok(url),
        None => Err(TryOnError::Checkout(
            detail_text(response.detail).unwrap_or_else(|| CHECKOUT_FALLBACK_MESSAGE.to_string()),
        )),
    }
}
