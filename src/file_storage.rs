//! JSONファイルによるキー/バリューストレージ
//!
//! ブラウザの localStorage と同じく、値は文字列で保存する。

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use tryon_common::{KeyValueStorage, TryOnError};

#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ファイルがない・壊れている場合は空として扱う
    fn read_all(&self) -> tryon_common::Result<BTreeMap<String, String>> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.storage_error(e)),
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(items) => Ok(items),
            Err(e) if e.is_io() => Err(self.storage_error(e)),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ストレージファイルを読み込めません");
                Ok(BTreeMap::new())
            }
        }
    }

    fn storage_error(&self, e: impl std::fmt::Display) -> TryOnError {
        TryOnError::Storage(format!("{}: {}", self.path.display(), e))
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // 一時ファイルに書いてから置き換える
        let tmp_path = self.path.with_extension("json.tmp");
        {
            let writer = BufWriter::new(File::create(&tmp_path)?);
            serde_json::to_writer_pretty(writer, items)?;
        }
        std::fs::rename(&tmp_path, &self.path)
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> tryon_common::Result<Option<String>> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> tryon_common::Result<()> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items).map_err(|e| self.storage_error(e))
    }
}
