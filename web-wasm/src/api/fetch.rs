//! fetch API の共通処理

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// ステータスとボディ
pub(crate) struct FetchResponse {
    pub ok: bool,
    pub body: String,
}

/// POST送信（JSONの場合は Content-Type を付ける）
pub(crate) async fn post(url: &str, body: &JsValue, json: bool) -> Result<FetchResponse, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(body);

    let request = Request::new_with_str_and_init(url, &opts)?;
    if json {
        request.headers().set("Content-Type", "application/json")?;
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window がありません"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let text = JsFuture::from(resp.text()?).await?;
    Ok(FetchResponse {
        ok: resp.ok(),
        body: text.as_string().unwrap_or_default(),
    })
}

/// JSの例外を表示用文字列にする
pub(crate) fn js_error_message(error: &JsValue) -> String {
    if let Some(s) = error.as_string() {
        return s;
    }
    if let Some(e) = error.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    format!("{:?}", error)
}
