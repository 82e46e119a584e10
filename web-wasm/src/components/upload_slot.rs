//! 画像選択スロット（ローカルプレビュー付き）

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{File, FileReader, HtmlInputElement};

#[component]
pub fn UploadSlot<F>(
    label: &'static str,
    placeholder: &'static str,
    on_select: F,
) -> impl IntoView
where
    F: Fn(File) + 'static,
{
    let (preview, set_preview) = signal(Option::<String>::None);

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        read_preview(&file, set_preview);
        on_select(file);
    };

    view! {
        <div class="upload-slot">
            <label class="upload-label">
                <span>{label}</span>
                <input type="file" accept="image/*" on:change=on_change />
            </label>
            <div
                class="upload-placeholder"
                style:display=move || if preview.get().is_some() { "none" } else { "flex" }
            >
                <div class="upload-icon">"📷"</div>
                <p class="text-muted">{placeholder}</p>
            </div>
            <img
                class="upload-preview"
                src=move || preview.get().unwrap_or_default()
                style:display=move || if preview.get().is_some() { "block" } else { "none" }
            />
        </div>
    }
}

/// 選択した画像を data URL で読み込み、プレビューに渡す
fn read_preview(file: &File, set_preview: WriteSignal<Option<String>>) {
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            web_sys::console::error_2(&"FileReaderを作成できません:".into(), &e);
            return;
        }
    };

    let reader_clone = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        if let Ok(result) = reader_clone.result() {
            if let Some(data_url) = result.as_string() {
                set_preview.set(Some(data_url));
            }
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    if let Err(e) = reader.read_as_data_url(file) {
        web_sys::console::error_2(&"画像を読み込めません:".into(), &e);
    }
}
