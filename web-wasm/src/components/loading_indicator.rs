//! ローディング表示コンポーネント

use leptos::prelude::*;
use tryon_common::Phase;

#[component]
pub fn LoadingIndicator(phase: ReadSignal<Phase>) -> impl IntoView {
    view! {
        <div
            class="loading"
            style:display=move || if phase.get().is_busy() { "flex" } else { "none" }
        >
            <div class="spinner" />
            <p class="loading-text">{move || phase.get().status_text()}</p>
        </div>
    }
}
