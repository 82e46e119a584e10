//! 画像ホスティングへのアップロード

use super::fetch::{js_error_message, post};
use tryon_common::{parse_upload_response, CancelToken, ImageHost, TryOnConfig, TryOnError};
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

#[derive(Debug, Clone)]
pub struct BrowserImageHost {
    upload_url: String,
    upload_preset: String,
    cloud_name: String,
}

impl BrowserImageHost {
    pub fn new(config: &TryOnConfig) -> Self {
        Self {
            upload_url: config.upload_url.clone(),
            upload_preset: config.upload_preset.clone(),
            cloud_name: config.cloud_name.clone(),
        }
    }

    fn form_for(&self, file: &File) -> Result<FormData, JsValue> {
        let form = FormData::new()?;
        form.append_with_blob("file", file)?;
        form.append_with_str("upload_preset", &self.upload_preset)?;
        form.append_with_str("cloud_name", &self.cloud_name)?;
        Ok(form)
    }
}

impl ImageHost for BrowserImageHost {
    type File = File;

    async fn upload(&self, file: &File, cancel: &CancelToken) -> tryon_common::Result<String> {
        cancel.check()?;

        let form = self
            .form_for(file)
            .map_err(|e| TryOnError::upload_unreachable(js_error_message(&e)))?;
        let body: JsValue = form.into();

        let resp = post(&self.upload_url, &body, false)
            .await
            .map_err(|e| TryOnError::upload_unreachable(js_error_message(&e)))?;
        cancel.check()?;

        parse_upload_response(resp.ok, &resp.body)
    }
}
