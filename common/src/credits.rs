//! クレジット残高
//!
//! 起動時に一度だけ読み込み、以降は変更のたびにストレージへ書き戻す。

use crate::error::Result;
use crate::storage::KeyValueStorage;
use std::cell::Cell;

/// 保存キー
pub const CREDITS_KEY: &str = "credits";

/// 保存値がない場合の初期クレジット
pub const INITIAL_CREDITS: i64 = 50;

/// 書き込み方針
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// 変更のたびに即時保存
    #[default]
    WriteThrough,
}

/// 残高表示の色分け
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceTone {
    Warning,
    Normal,
}

impl BalanceTone {
    pub fn for_balance(balance: i64) -> Self {
        if balance <= 0 {
            BalanceTone::Warning
        } else {
            BalanceTone::Normal
        }
    }

    /// CSSカラー
    pub fn color(&self) -> &'static str {
        match self {
            BalanceTone::Warning => "red",
            BalanceTone::Normal => "#6366f1",
        }
    }
}

fn parse_balance(raw: Option<String>) -> i64 {
    raw.and_then(|raw| raw.trim().parse::<i64>().ok())
        .unwrap_or(INITIAL_CREDITS)
}

/// クレジット残高ストア
///
/// 下限・上限は設けない（失敗時の返金処理で一時的に負になり得る）。
#[derive(Debug)]
pub struct CreditStore<S> {
    storage: S,
    balance: Cell<i64>,
    policy: WritePolicy,
}

impl<S: KeyValueStorage> CreditStore<S> {
    /// ストレージから残高を読み込む（未保存・数値以外は初期値）
    pub fn load(storage: S) -> Result<Self> {
        let balance = parse_balance(storage.get_item(CREDITS_KEY)?);

        tracing::debug!(balance, "クレジット読込");

        Ok(Self {
            storage,
            balance: Cell::new(balance),
            policy: WritePolicy::WriteThrough,
        })
    }

    /// 読み込みに失敗した場合も初期値で起動する
    pub fn load_or_default(storage: S) -> Self {
        let balance = match storage.get_item(CREDITS_KEY) {
            Ok(raw) => parse_balance(raw),
            Err(e) => {
                tracing::warn!(error = %e, "クレジットを読み込めないため初期値を使用");
                INITIAL_CREDITS
            }
        };

        Self {
            storage,
            balance: Cell::new(balance),
            policy: WritePolicy::WriteThrough,
        }
    }

    /// 現在の残高
    pub fn get(&self) -> i64 {
        self.balance.get()
    }

    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    pub fn tone(&self) -> BalanceTone {
        BalanceTone::for_balance(self.get())
    }

    /// 残高を増減して保存し、新しい残高を返す
    ///
    /// 保存に失敗した場合はメモリ上の残高も変更しない。
    pub fn adjust(&self, delta: i64) -> Result<i64> {
        let next = self.balance.get().saturating_add(delta);
        match self.policy {
            WritePolicy::WriteThrough => {
                self.storage.set_item(CREDITS_KEY, &next.to_string())?;
            }
        }
        self.balance.set(next);
        tracing::debug!(delta, balance = next, "クレジット更新");
        Ok(next)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TryOnError;
    use crate::storage::MemoryStorage;

    /// 書き込みが常に失敗するストレージ
    struct ReadOnlyStorage;

    impl KeyValueStorage for ReadOnlyStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Ok(Some("5".into()))
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
            Err(TryOnError::Storage("quota exceeded".into()))
        }
    }

    #[test]
    fn test_load_default_when_absent() {
        let store = CreditStore::load(MemoryStorage::new()).unwrap();
        assert_eq!(store.get(), INITIAL_CREDITS);
    }

    #[test]
    fn test_load_default_when_not_numeric() {
        let store = CreditStore::load(MemoryStorage::with_item(CREDITS_KEY, "abc")).unwrap();
        assert_eq!(store.get(), INITIAL_CREDITS);
    }

    #[test]
    fn test_load_existing_value() {
        let store = CreditStore::load(MemoryStorage::with_item(CREDITS_KEY, "30")).unwrap();
        assert_eq!(store.get(), 30);

        let negative = CreditStore::load(MemoryStorage::with_item(CREDITS_KEY, "-2")).unwrap();
        assert_eq!(negative.get(), -2);
    }

    #[test]
    fn test_adjust_writes_through() {
        let store = CreditStore::load(MemoryStorage::new()).unwrap();
        assert_eq!(store.adjust(-1).unwrap(), 49);
        assert_eq!(store.storage().peek(CREDITS_KEY), Some("49".to_string()));

        assert_eq!(store.adjust(20).unwrap(), 69);
        assert_eq!(store.storage().peek(CREDITS_KEY), Some("69".to_string()));
        assert_eq!(store.policy(), WritePolicy::WriteThrough);
    }

    #[test]
    fn test_adjust_allows_negative() {
        let store = CreditStore::load(MemoryStorage::with_item(CREDITS_KEY, "0")).unwrap();
        assert_eq!(store.adjust(-1).unwrap(), -1);
        assert_eq!(store.tone(), BalanceTone::Warning);
    }

    #[test]
    fn test_adjust_failure_keeps_balance() {
        let store = CreditStore::load(ReadOnlyStorage).unwrap();
        let result = store.adjust(-1);
        assert!(matches!(result, Err(TryOnError::Storage(_))));
        assert_eq!(store.get(), 5);
    }

    #[test]
    fn test_load_or_default_on_read_error() {
        struct BrokenStorage;

        impl KeyValueStorage for BrokenStorage {
            fn get_item(&self, _key: &str) -> Result<Option<String>> {
                Err(TryOnError::Storage("SecurityError".into()))
            }

            fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
                Ok(())
            }
        }

        assert!(CreditStore::load(BrokenStorage).is_err());
        let store = CreditStore::load_or_default(BrokenStorage);
        assert_eq!(store.get(), INITIAL_CREDITS);
    }

    #[test]
    fn test_balance_tone() {
        assert_eq!(BalanceTone::for_balance(0), BalanceTone::Warning);
        assert_eq!(BalanceTone::for_balance(-3), BalanceTone::Warning);
        assert_eq!(BalanceTone::for_balance(1), BalanceTone::Normal);
        assert_eq!(BalanceTone::Warning.color(), "red");
        assert_eq!(BalanceTone::Normal.color(), "#6366f1");
    }
}
