//! Try-On Common Library
//!
//! CLIとWeb(WASM)で共有される型・クレジット管理・試着処理

pub mod catalog;
pub mod checkout;
pub mod client;
pub mod config;
pub mod controller;
pub mod credits;
pub mod error;
pub mod payment_return;
pub mod phase;
pub mod storage;
pub mod wire;

pub use catalog::{find_pack, CreditPack, CREDIT_PACKS, DEFAULT_CATEGORY, GARMENT_CATEGORIES};
pub use checkout::buy_pack;
pub use client::{CancelToken, CheckoutBackend, Clock, ImageHost, TryOnBackend};
pub use config::TryOnConfig;
pub use controller::{TryOnController, TryOnInput};
pub use credits::{BalanceTone, CreditStore, WritePolicy, CREDITS_KEY, INITIAL_CREDITS};
pub use error::{Result, TryOnError};
pub use payment_return::{consume_payment_return, PageLocation, PaymentReturn};
pub use phase::{Outcome, Phase, TryOnView};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use wire::{
    parse_checkout_response, parse_generation_response, parse_upload_response, CheckoutRequest,
    GenerationRequest,
};
