//! 決済完了後の戻りURL処理
//!
//! `?success=true&add_credits=<N>` で戻ってきた場合にクレジットを付与し、
//! 再付与を防ぐためにアドレスからクエリを取り除く。

use crate::credits::CreditStore;
use crate::error::Result;
use crate::phase::TryOnView;
use crate::storage::KeyValueStorage;

/// 現在ページのアドレス操作
pub trait PageLocation {
    /// クエリ文字列（先頭の `?` は有無どちらでもよい）
    fn query(&self) -> String;
    /// 再読み込みせずにクエリを取り除く
    fn strip_query(&self);
    /// 別ページへ遷移する
    fn navigate(&self, url: &str);
}

/// 決済成功の戻り情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentReturn {
    pub credits: i64,
}

impl PaymentReturn {
    /// クエリ文字列を解析する（成功フラグがなければ None）
    pub fn parse(query: &str) -> Option<Self> {
        let success = query_value(query, "success")? == "true";
        let credits = query_value(query, "add_credits")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0);

        success.then_some(Self { credits })
    }
}

/// キーの最初の値（パーセントデコードはしない。値は真偽値と整数のみ）
fn query_value<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|p| !p.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

/// 戻りURLを消費してクレジットを付与し、付与数を返す
pub fn consume_payment_return<S, L, V>(
    store: &CreditStore<S>,
    location: &L,
    view: &mut V,
) -> Result<i64>
where
    S: KeyValueStorage,
    L: PageLocation,
    V: TryOnView,
{
    let Some(ret) = PaymentReturn::parse(&location.query()) else {
        return Ok(0);
    };

    let mut granted = 0;
    if ret.credits > 0 {
        let balance = store.adjust(ret.credits)?;
        view.show_balance(balance, store.tone());
        view.alert(&format!("ありがとうございます！{}クレジットが追加されました。", ret.credits));
        tracing::info!(credits = ret.credits, balance, "購入クレジット付与");
        granted = ret.credits;
    }

    location.strip_query();
    Ok(granted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credits::{BalanceTone, CREDITS_KEY};
    use crate::phase::Phase;
    use crate::storage::MemoryStorage;
    use std::cell::RefCell;

    struct FakeLocation {
        query: RefCell<String>,
    }

    impl FakeLocation {
        fn new(query: &str) -> Self {
            Self { query: RefCell::new(query.to_string()) }
        }
    }

    impl PageLocation for FakeLocation {
        fn query(&self) -> String {
            self.query.borrow().clone()
        }

        fn strip_query(&self) {
            self.query.borrow_mut().clear();
        }

        fn navigate(&self, _url: &str) {}
    }

    #[derive(Default)]
    struct RecordingView {
        balances: Vec<i64>,
        alerts: Vec<String>,
    }

    impl TryOnView for RecordingView {
        fn set_phase(&mut self, _phase: &Phase) {}

        fn show_balance(&mut self, balance: i64, _tone: BalanceTone) {
            self.balances.push(balance);
        }

        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }

        fn open_pricing(&mut self) {}
    }

    #[test]
    fn test_parse_success() {
        assert_eq!(
            PaymentReturn::parse("?success=true&add_credits=20"),
            Some(PaymentReturn { credits: 20 })
        );
        assert_eq!(
            PaymentReturn::parse("add_credits=5&success=true"),
            Some(PaymentReturn { credits: 5 })
        );
    }

    #[test]
    fn test_parse_without_success() {
        assert_eq!(PaymentReturn::parse("?add_credits=20"), None);
        assert_eq!(PaymentReturn::parse("?success=false&add_credits=20"), None);
        assert_eq!(PaymentReturn::parse(""), None);
    }

    #[test]
    fn test_parse_invalid_amount() {
        assert_eq!(
            PaymentReturn::parse("?success=true&add_credits=abc"),
            Some(PaymentReturn { credits: 0 })
        );
        assert_eq!(PaymentReturn::parse("?success=true"), Some(PaymentReturn { credits: 0 }));
    }

    #[test]
    fn test_parse_repeated_key_uses_first() {
        assert_eq!(
            PaymentReturn::parse("?success=true&add_credits=20&add_credits=500"),
            Some(PaymentReturn { credits: 20 })
        );
        assert_eq!(PaymentReturn::parse("?success=false&success=true"), None);
    }

    #[test]
    fn test_grant_and_strip() {
        let store = CreditStore::load(MemoryStorage::with_item(CREDITS_KEY, "30")).unwrap();
        let location = FakeLocation::new("?success=true&add_credits=20");
        let mut view = RecordingView::default();

        let granted = consume_payment_return(&store, &location, &mut view).unwrap();

        assert_eq!(granted, 20);
        assert_eq!(store.get(), 50);
        assert_eq!(store.storage().peek(CREDITS_KEY), Some("50".to_string()));
        assert_eq!(location.query(), "");
        assert_eq!(view.balances, vec![50]);
        assert_eq!(view.alerts.len(), 1);
        assert!(view.alerts[0].contains("20"));
    }

    #[test]
    fn test_second_consumption_grants_nothing() {
        let store = CreditStore::load(MemoryStorage::with_item(CREDITS_KEY, "30")).unwrap();
        let location = FakeLocation::new("?success=true&add_credits=20");
        let mut view = RecordingView::default();

        consume_payment_return(&store, &location, &mut view).unwrap();
        let second = consume_payment_return(&store, &location, &mut view).unwrap();

        assert_eq!(second, 0);
        assert_eq!(store.get(), 50);
        assert_eq!(view.alerts.len(), 1);
    }

    #[test]
    fn test_zero_credits_strips_without_grant() {
        let store = CreditStore::load(MemoryStorage::new()).unwrap();
        let location = FakeLocation::new("?success=true&add_credits=0");
        let mut view = RecordingView::default();

        let granted = consume_payment_return(&store, &location, &mut view).unwrap();

        assert_eq!(granted, 0);
        assert_eq!(store.get(), 50);
        assert_eq!(location.query(), "");
        assert!(view.alerts.is_empty());
    }

    #[test]
    fn test_unrelated_query_untouched() {
        let store = CreditStore::load(MemoryStorage::new()).unwrap();
        let location = FakeLocation::new("?ref=newsletter");
        let mut view = RecordingView::default();

        consume_payment_return(&store, &location, &mut view).unwrap();
        assert_eq!(location.query(), "?ref=newsletter");
    }
}
