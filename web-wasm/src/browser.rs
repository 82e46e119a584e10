//! ブラウザ環境（localStorage、アドレスバー、時計、画面への反映）

use leptos::prelude::*;
use tryon_common::{BalanceTone, Clock, KeyValueStorage, PageLocation, Phase, TryOnError, TryOnView};
use wasm_bindgen::JsValue;

fn storage_error(e: JsValue) -> TryOnError {
    TryOnError::Storage(format!("{:?}", e))
}

/// window.localStorage（使えない環境では None）
#[derive(Debug, Clone)]
pub struct BrowserStorage {
    inner: Option<web_sys::Storage>,
}

impl BrowserStorage {
    pub fn new() -> Self {
        let inner = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if inner.is_none() {
            web_sys::console::warn_1(&"localStorage を利用できません".into());
        }
        Self { inner }
    }

    fn storage(&self) -> tryon_common::Result<&web_sys::Storage> {
        self.inner
            .as_ref()
            .ok_or_else(|| TryOnError::Storage("localStorage を利用できません".to_string()))
    }
}

impl Default for BrowserStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> tryon_common::Result<Option<String>> {
        self.storage()?.get_item(key).map_err(storage_error)
    }

    fn set_item(&self, key: &str, value: &str) -> tryon_common::Result<()> {
        self.storage()?.set_item(key, value).map_err(storage_error)
    }
}

/// 現在のページURL
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserLocation;

impl BrowserLocation {
    /// 決済後の戻り先（ページのオリジン + "/"）
    pub fn return_url(&self) -> Option<String> {
        let origin = web_sys::window()?.location().origin().ok()?;
        Some(return_url_for(&origin))
    }
}

impl PageLocation for BrowserLocation {
    fn query(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default()
    }

    fn strip_query(&self) {
        let Some(window) = web_sys::window() else { return };
        let title = window.document().map(|d| d.title()).unwrap_or_default();
        let replaced = window
            .history()
            .and_then(|h| h.replace_state_with_url(&JsValue::NULL, &title, Some("/")));
        if let Err(e) = replaced {
            web_sys::console::warn_2(&"URLを書き換えられません:".into(), &e);
        }
    }

    fn navigate(&self, url: &str) {
        let Some(window) = web_sys::window() else { return };
        if let Err(e) = window.location().set_href(url) {
            web_sys::console::error_2(&"遷移できません:".into(), &e);
        }
    }
}

/// イベントがリスナーを持つ要素そのもので発生したか（内側の要素からの伝播は除く）
pub fn is_backdrop(ev: &web_sys::Event) -> bool {
    ev.target().is_some() && ev.target() == ev.current_target()
}

pub fn return_url_for(origin: &str) -> String {
    format!("{}/", origin.trim_end_matches('/'))
}

/// Date.now()
#[derive(Debug, Clone, Copy, Default)]
pub struct JsClock;

impl Clock for JsClock {
    fn now_millis(&self) -> i64 {
        js_sys::Date::now() as i64
    }
}

/// シグナル経由で画面に反映する
#[derive(Clone, Copy)]
pub struct SignalView {
    pub phase: WriteSignal<Phase>,
    pub balance: WriteSignal<i64>,
    pub result_url: WriteSignal<Option<String>>,
    pub pricing_open: WriteSignal<bool>,
}

impl TryOnView for SignalView {
    fn set_phase(&mut self, phase: &Phase) {
        web_sys::console::log_2(&"phase:".into(), &phase.as_str().into());
        match phase {
            Phase::Charging => self.result_url.set(None),
            Phase::Displaying { result_url } => self.result_url.set(Some(result_url.clone())),
            _ => {}
        }
        self.phase.set(phase.clone());
    }

    fn show_balance(&mut self, balance: i64, _tone: BalanceTone) {
        // 色はバッジ側で残高から決める
        self.balance.set(balance);
    }

    fn alert(&mut self, message: &str) {
        web_sys::console::log_1(&message.into());
        gloo::dialogs::alert(message);
    }

    fn open_pricing(&mut self) {
        self.pricing_open.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_url_for() {
        assert_eq!(return_url_for("https://shop.example"), "https://shop.example/");
        assert_eq!(return_url_for("https://shop.example/"), "https://shop.example/");
    }
}
