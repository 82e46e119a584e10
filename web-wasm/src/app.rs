//! メインアプリケーションコンポーネント

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use tryon_common::{
    buy_pack, consume_payment_return, CancelToken, CreditStore, Phase, TryOnConfig,
    TryOnController, TryOnInput, DEFAULT_CATEGORY, GARMENT_CATEGORIES,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::File;

use crate::api::{BrowserCheckoutBackend, BrowserImageHost, BrowserTryOnBackend};
use crate::browser::{BrowserLocation, BrowserStorage, JsClock, SignalView};
use crate::components::{
    header::Header,
    loading_indicator::LoadingIndicator,
    pricing_modal::PricingModal,
    result_panel::ResultPanel,
    upload_slot::UploadSlot,
};

type Controller = TryOnController<BrowserStorage, BrowserImageHost, BrowserTryOnBackend, JsClock>;

/// 選択中の画像（未選択は None）
type FileSlot = Rc<RefCell<Option<File>>>;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let config = TryOnConfig::default();
    let credits = CreditStore::load_or_default(BrowserStorage::new());

    // アプリケーション状態
    let (balance, set_balance) = signal(credits.get());
    let (phase, set_phase) = signal(Phase::Idle);
    let (result_url, set_result_url) = signal(Option::<String>::None);
    let (pricing_open, set_pricing_open) = signal(false);
    let (category, set_category) = signal(DEFAULT_CATEGORY.to_string());

    let signal_view = SignalView {
        phase: set_phase,
        balance: set_balance,
        result_url: set_result_url,
        pricing_open: set_pricing_open,
    };

    // 決済からの戻り
    if let Err(e) = consume_payment_return(&credits, &BrowserLocation, &mut signal_view.clone()) {
        web_sys::console::error_1(&format!("クレジット付与に失敗: {}", e).into());
    }

    let controller: Rc<Controller> = Rc::new(TryOnController::new(
        credits,
        BrowserImageHost::new(&config),
        BrowserTryOnBackend::new(&config),
        JsClock,
        config.security_key.clone(),
    ));
    let checkout = Rc::new(BrowserCheckoutBackend::new(&config));

    let person: FileSlot = Rc::new(RefCell::new(None));
    let clothing: FileSlot = Rc::new(RefCell::new(None));

    let on_person = {
        let person = person.clone();
        move |file: File| *person.borrow_mut() = Some(file)
    };
    let on_clothing = {
        let clothing = clothing.clone();
        move |file: File| *clothing.borrow_mut() = Some(file)
    };

    // 試着開始ハンドラ
    let on_start = move |_: web_sys::MouseEvent| {
        let input = TryOnInput {
            person: person.borrow().clone(),
            clothing: clothing.borrow().clone(),
            category: category.get_untracked(),
        };
        let controller = controller.clone();
        let mut view = signal_view;
        spawn_local(async move {
            controller.start_try_on(&input, &mut view, &CancelToken::new()).await;
        });
    };

    // パック購入ハンドラ
    let on_buy = move |pack_id: &'static str| {
        let checkout = checkout.clone();
        let mut view = signal_view;
        spawn_local(async move {
            let location = BrowserLocation;
            let return_url = location.return_url();
            let _ = buy_pack(
                checkout.as_ref(),
                pack_id,
                return_url.as_deref(),
                &location,
                &mut view,
                &CancelToken::new(),
            )
            .await;
        });
    };

    let category_options = GARMENT_CATEGORIES
        .iter()
        .map(|(value, name)| view! { <option value=*value>{*name}</option> })
        .collect_view();

    view! {
        <div class="container">
            <Header balance=balance on_open_pricing=move || set_pricing_open.set(true) />

            <div class="upload-grid">
                <UploadSlot label="人物画像" placeholder="全身が写った写真を選択" on_select=on_person />
                <UploadSlot label="衣服画像" placeholder="試着したい服の写真を選択" on_select=on_clothing />
            </div>

            <div class="form-group">
                <label for="category">"カテゴリ"</label>
                <select
                    id="category"
                    prop:value=move || category.get()
                    on:change=move |ev| set_category.set(event_target_value(&ev))
                >
                    {category_options}
                </select>
            </div>

            <button
                class="btn btn-primary btn-large"
                disabled=move || phase.get().is_busy()
                on:click=on_start
            >
                "試着する"
            </button>

            <LoadingIndicator phase=phase />
            <ResultPanel result_url=result_url />

            <PricingModal open=pricing_open set_open=set_pricing_open on_buy=on_buy />
        </div>
    }
}
