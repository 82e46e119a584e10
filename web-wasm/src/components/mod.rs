//! UIコンポーネント

pub mod header;
pub mod loading_indicator;
pub mod pricing_modal;
pub mod result_panel;
pub mod upload_slot;
