//! キー/バリュー永続化の抽象
//!
//! ブラウザでは localStorage、CLIではJSONファイル、テストではメモリを使う。

use crate::error::Result;
use std::cell::RefCell;
use std::collections::HashMap;

/// 文字列キー/バリューの永続化先
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }
}

/// メモリ上のストレージ
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値を入れた状態で作成
    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.items.borrow_mut().insert(key.to_string(), value.to_string());
        storage
    }

    /// 書き込み済みの値（テスト用の参照）
    pub fn peek(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("credits").unwrap(), None);

        storage.set_item("credits", "42").unwrap();
        assert_eq!(storage.get_item("credits").unwrap(), Some("42".to_string()));
        assert_eq!(storage.peek("credits"), Some("42".to_string()));
    }

    #[test]
    fn test_storage_through_reference() {
        let storage = MemoryStorage::with_item("credits", "7");
        let by_ref = &storage;
        by_ref.set_item("credits", "8").unwrap();
        assert_eq!(storage.peek("credits"), Some("8".to_string()));
    }
}
