use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tryon_common::{TryOnConfig, DEFAULT_CATEGORY};

const CONFIG_FILE_NAME: &str = "config.json";
const CREDITS_FILE_NAME: &str = "credits.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 外部サービスの接続先
    pub service: TryOnConfig,
    /// `generate` でカテゴリ省略時に使う値
    pub default_category: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: TryOnConfig::default(),
            default_category: DEFAULT_CATEGORY.into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 設定とクレジットを置くディレクトリ
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("tryon"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    pub fn credits_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CREDITS_FILE_NAME))
    }

    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        let trimmed = url.trim();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(CliError::Config(format!("URLは http:// か https:// で始めてください: {}", url)));
        }
        self.service.base_url = trimmed.trim_end_matches('/').to_string();
        self.save()
    }
}
