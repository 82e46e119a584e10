//! ヘッダーコンポーネント（クレジット残高と購入ボタン）

use leptos::prelude::*;
use tryon_common::BalanceTone;

#[component]
pub fn Header<F>(balance: ReadSignal<i64>, on_open_pricing: F) -> impl IntoView
where
    F: Fn() + 'static,
{
    view! {
        <header class="header">
            <h1>"バーチャル試着"</h1>
            <div class="credit-area">
                <span
                    class="credit-badge"
                    style:color=move || BalanceTone::for_balance(balance.get()).color()
                >
                    {move || format!("残り {} クレジット", balance.get())}
                </span>
                <button
                    class="btn btn-secondary btn-small"
                    on:click=move |_: web_sys::MouseEvent| on_open_pricing()
                >
                    "クレジットを購入"
                </button>
            </div>
        </header>
    }
}
