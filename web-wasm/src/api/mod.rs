//! 外部サービス連携（fetch）

mod fetch;
pub mod backend;
pub mod image_host;

pub use backend::{BrowserCheckoutBackend, BrowserTryOnBackend};
pub use image_host::BrowserImageHost;
