//! ブラウザ上のテスト（wasm-pack test --headless --chrome）

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use tryon_common::{BalanceTone, CreditStore, KeyValueStorage, Phase, TryOnView, CREDITS_KEY};
use tryon_wasm::browser::{is_backdrop, BrowserStorage, SignalView};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, EventInit};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn credits_persist_in_local_storage() {
    let storage = BrowserStorage::new();
    storage.set_item(CREDITS_KEY, "3").unwrap();

    let store = CreditStore::load(BrowserStorage::new()).unwrap();
    assert_eq!(store.get(), 3);
    assert_eq!(store.adjust(-1).unwrap(), 2);

    assert_eq!(BrowserStorage::new().get_item(CREDITS_KEY).unwrap().as_deref(), Some("2"));
}

#[wasm_bindgen_test]
fn non_numeric_balance_falls_back_to_initial() {
    let storage = BrowserStorage::new();
    storage.set_item(CREDITS_KEY, "abc").unwrap();

    let store = CreditStore::load_or_default(BrowserStorage::new());
    assert_eq!(store.get(), tryon_common::INITIAL_CREDITS);
}

#[wasm_bindgen_test]
fn backdrop_closes_only_on_its_own_events() {
    let document = web_sys::window().unwrap().document().unwrap();
    let backdrop = document.create_element("div").unwrap();
    let content = document.create_element("div").unwrap();
    backdrop.append_child(&content).unwrap();

    let hits = Rc::new(RefCell::new(Vec::new()));
    let recorded = hits.clone();
    let listener = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
        recorded.borrow_mut().push(is_backdrop(&ev));
    });
    backdrop
        .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
        .unwrap();

    let bubbling = EventInit::new();
    bubbling.set_bubbles(true);

    // 内側のクリックは伝播しても閉じない
    let inner_click = Event::new_with_event_init_dict("click", &bubbling).unwrap();
    content.dispatch_event(&inner_click).unwrap();
    // 背景そのもののクリックで閉じる
    let backdrop_click = Event::new_with_event_init_dict("click", &bubbling).unwrap();
    backdrop.dispatch_event(&backdrop_click).unwrap();

    assert_eq!(*hits.borrow(), vec![false, true]);
}

#[wasm_bindgen_test]
fn signal_view_tracks_phase_and_result() {
    let (phase, set_phase) = signal(Phase::Idle);
    let (balance, set_balance) = signal(0i64);
    let (result_url, set_result_url) = signal(Option::<String>::None);
    let (pricing_open, set_pricing_open) = signal(false);
    let mut view = SignalView {
        phase: set_phase,
        balance: set_balance,
        result_url: set_result_url,
        pricing_open: set_pricing_open,
    };

    view.set_phase(&Phase::Displaying { result_url: "https://cdn.example/r.png".into() });
    assert_eq!(result_url.get_untracked().as_deref(), Some("https://cdn.example/r.png"));

    // 次の試着の課金で前回の結果を消す
    view.set_phase(&Phase::Charging);
    assert_eq!(result_url.get_untracked(), None);
    assert_eq!(phase.get_untracked(), Phase::Charging);

    view.show_balance(49, BalanceTone::Normal);
    assert_eq!(balance.get_untracked(), 49);

    view.open_pricing();
    assert!(pricing_open.get_untracked());
}
