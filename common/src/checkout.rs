//! クレジット購入フロー
//!
//! 決済セッションを作成し、外部のチェックアウトページへ遷移する。
//! 課金前なのでクレジットには影響しない。

use crate::client::{CancelToken, CheckoutBackend};
use crate::error::Result;
use crate::payment_return::PageLocation;
use crate::phase::TryOnView;
use crate::wire::CheckoutRequest;

/// パックを購入する（成功時はチェックアウトURLへ遷移し、そのURLを返す）
///
/// # Arguments
/// * `pack_id` - パックID（検証せずに送る）
/// * `return_url` - 決済後の戻り先。分かる場合のみ送る
pub async fn buy_pack<B, L, V>(
    backend: &B,
    pack_id: &str,
    return_url: Option<&str>,
    location: &L,
    view: &mut V,
    cancel: &CancelToken,
) -> Result<String>
where
    B: CheckoutBackend,
    L: PageLocation,
    V: TryOnView,
{
    let request = CheckoutRequest::new(pack_id).with_return_url(return_url);

    match backend.create_session(&request, cancel).await {
        Ok(url) => {
            tracing::info!(pack_id, %url, "チェックアウトへ遷移");
            location.navigate(&url);
            Ok(url)
        }
        Err(e) => {
            tracing::warn!(pack_id, error = %e, "決済セッション作成失敗");
            view.alert(&format!("エラー: {}", e.user_message()));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credits::BalanceTone;
    use crate::error::TryOnError;
    use crate::phase::Phase;
    use futures::executor::block_on;
    use std::cell::RefCell;

    struct FakeCheckout {
        response: Result<String>,
        requests: RefCell<Vec<CheckoutRequest>>,
    }

    impl FakeCheckout {
        fn new(response: Result<String>) -> Self {
            Self { response, requests: RefCell::new(Vec::new()) }
        }
    }

    impl CheckoutBackend for FakeCheckout {
        async fn create_session(&self, request: &CheckoutRequest, _cancel: &CancelToken) -> Result<String> {
            self.requests.borrow_mut().push(request.clone());
            self.response.clone()
        }
    }

    #[derive(Default)]
    struct FakeLocation {
        navigated: RefCell<Vec<String>>,
    }

    impl PageLocation for FakeLocation {
        fn query(&self) -> String {
            String::new()
        }

        fn strip_query(&self) {}

        fn navigate(&self, url: &str) {
            self.navigated.borrow_mut().push(url.to_string());
        }
    }

    #[derive(Default)]
    struct AlertView {
        alerts: Vec<String>,
    }

    impl TryOnView for AlertView {
        fn set_phase(&mut self, _phase: &Phase) {}
        fn show_balance(&mut self, _balance: i64, _tone: BalanceTone) {}
        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }
        fn open_pricing(&mut self) {}
    }

    #[test]
    fn test_buy_pack_redirects() {
        let backend = FakeCheckout::new(Ok("https://checkout.stripe.com/c/pay/cs_1".into()));
        let location = FakeLocation::default();
        let mut view = AlertView::default();

        let url = block_on(buy_pack(
            &backend,
            "pack_30",
            Some("https://shop.example/"),
            &location,
            &mut view,
            &CancelToken::new(),
        ))
        .unwrap();

        assert_eq!(url, "https://checkout.stripe.com/c/pay/cs_1");
        assert_eq!(*location.navigated.borrow(), vec![url]);
        assert!(view.alerts.is_empty());

        let requests = backend.requests.borrow();
        assert_eq!(requests[0].pack_id, "pack_30");
        assert_eq!(requests[0].success_url.as_deref(), Some("https://shop.example/"));
    }

    #[test]
    fn test_buy_pack_failure_alerts() {
        let backend = FakeCheckout::new(Err(TryOnError::Checkout("Pack ID invalide.".into())));
        let location = FakeLocation::default();
        let mut view = AlertView::default();

        let result = block_on(buy_pack(
            &backend,
            "pack_x",
            None,
            &location,
            &mut view,
            &CancelToken::new(),
        ));

        assert!(result.is_err());
        assert!(location.navigated.borrow().is_empty());
        assert_eq!(view.alerts, vec!["エラー: Pack ID invalide.".to_string()]);
    }
}
