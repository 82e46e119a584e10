//! 生成結果の表示

use leptos::prelude::*;

#[component]
pub fn ResultPanel(result_url: ReadSignal<Option<String>>) -> impl IntoView {
    let href = move || result_url.get().unwrap_or_default();

    view! {
        <div
            class="result-panel"
            style:display=move || if result_url.get().is_some() { "block" } else { "none" }
        >
            <h2>"試着結果"</h2>
            <img class="result-image" src=href alt="試着結果" />
            <a
                class="btn btn-primary"
                href=href
                download="tryon-result.png"
                target="_blank"
                rel="noopener noreferrer"
            >
                "画像をダウンロード"
            </a>
        </div>
    }
}
