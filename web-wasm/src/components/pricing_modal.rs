//! 料金表モーダル
//!
//! ボタンまたは残高不足で開き、閉じるボタンか背景（内側以外）のクリック/タッチで閉じる。

use leptos::prelude::*;
use tryon_common::CREDIT_PACKS;
use web_sys::{MouseEvent, TouchEvent};

use crate::browser::is_backdrop;

#[component]
pub fn PricingModal<F>(
    open: ReadSignal<bool>,
    set_open: WriteSignal<bool>,
    on_buy: F,
) -> impl IntoView
where
    F: Fn(&'static str) + Clone + 'static,
{
    let packs = CREDIT_PACKS
        .iter()
        .map(|pack| {
            let on_buy = on_buy.clone();
            view! {
                <div class="pack-card">
                    <h3>{pack.label}</h3>
                    <p class="pack-credits">{format!("{} クレジット", pack.credits)}</p>
                    <button
                        class="btn btn-primary"
                        on:click=move |_: MouseEvent| on_buy(pack.id)
                    >
                        "購入する"
                    </button>
                </div>
            }
        })
        .collect_view();

    view! {
        <div
            class="modal-backdrop"
            style:display=move || if open.get() { "flex" } else { "none" }
            on:click=move |ev: MouseEvent| {
                if is_backdrop(&ev) {
                    set_open.set(false);
                }
            }
            on:touchstart=move |ev: TouchEvent| {
                if is_backdrop(&ev) {
                    set_open.set(false);
                }
            }
        >
            <div class="modal-content">
                <button
                    class="modal-close"
                    on:click=move |_: MouseEvent| set_open.set(false)
                >
                    "×"
                </button>
                <h2>"クレジットを購入"</h2>
                <div class="pack-grid">{packs}</div>
            </div>
        </div>
    }
}
