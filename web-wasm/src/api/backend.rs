//! 生成APIと決済API

use super::fetch::{js_error_message, post};
use tryon_common::{
    parse_checkout_response, parse_generation_response, CancelToken, CheckoutBackend,
    CheckoutRequest, GenerationRequest, TryOnBackend, TryOnConfig, TryOnError,
};
use wasm_bindgen::JsValue;

#[derive(Debug, Clone)]
pub struct BrowserTryOnBackend {
    endpoint: String,
}

impl BrowserTryOnBackend {
    pub fn new(config: &TryOnConfig) -> Self {
        Self { endpoint: config.generate_endpoint() }
    }
}

impl TryOnBackend for BrowserTryOnBackend {
    async fn generate(
        &self,
        request: &GenerationRequest,
        cancel: &CancelToken,
    ) -> tryon_common::Result<String> {
        cancel.check()?;

        let body = serde_json::to_string(request).map_err(TryOnError::generation_unreachable)?;
        let resp = post(&self.endpoint, &JsValue::from_str(&body), true)
            .await
            .map_err(|e| TryOnError::generation_unreachable(js_error_message(&e)))?;
        cancel.check()?;

        parse_generation_response(resp.ok, &resp.body)
    }
}

#[derive(Debug, Clone)]
pub struct BrowserCheckoutBackend {
    endpoint: String,
}

impl BrowserCheckoutBackend {
    pub fn new(config: &TryOnConfig) -> Self {
        Self { endpoint: config.checkout_endpoint() }
    }
}

impl CheckoutBackend for BrowserCheckoutBackend {
    async fn create_session(
        &self,
        request: &CheckoutRequest,
        cancel: &CancelToken,
    ) -> tryon_common::Result<String> {
        cancel.check()?;

        let body = serde_json::to_string(request).map_err(|_| TryOnError::checkout_unreachable())?;
        let resp = match post(&self.endpoint, &JsValue::from_str(&body), true).await {
            Ok(resp) => resp,
            Err(e) => {
                web_sys::console::error_1(&e);
                return Err(TryOnError::checkout_unreachable());
            }
        };

        parse_checkout_response(&resp.body)
    }
}
