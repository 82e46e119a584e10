//! 接続先設定
//!
//! ブラウザ版はビルド時の定数のみを使う。CLIは設定ファイルで上書きできる。

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://tryonquimarche-1.onrender.com";
pub const DEFAULT_SECURITY_KEY: &str = "MOT_DE_PASSE_TRES_SECRET_A_METTRE_AUSSI_DANS_BUBBLE";
pub const DEFAULT_CLOUD_NAME: &str = "dbhxjrj8c";
pub const DEFAULT_UPLOAD_PRESET: &str = "tryon_upload";
pub const DEFAULT_UPLOAD_URL: &str = "https://api.cloudinary.com/v1_1/dbhxjrj8c/image/upload";

const GENERATE_PATH: &str = "/api/v1/generate-tryon";
const CHECKOUT_PATH: &str = "/api/v1/create-checkout-session";

/// 外部サービスの接続先
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TryOnConfig {
    /// 生成・決済バックエンドのベースURL
    pub base_url: String,
    /// バックエンドと共有する固定キー
    pub security_key: String,
    /// 画像ホスティングのアカウント名
    pub cloud_name: String,
    /// 画像ホスティングのアップロードプリセット
    pub upload_preset: String,
    /// アップロード先URL
    pub upload_url: String,
}

impl Default for TryOnConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            security_key: DEFAULT_SECURITY_KEY.into(),
            cloud_name: DEFAULT_CLOUD_NAME.into(),
            upload_preset: DEFAULT_UPLOAD_PRESET.into(),
            upload_url: DEFAULT_UPLOAD_URL.into(),
        }
    }
}

impl TryOnConfig {
    pub fn generate_endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), GENERATE_PATH)
    }

    pub fn checkout_endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), CHECKOUT_PATH)
    }

    /// 決済後の戻り先（バックエンドが配信するフロントエンド）
    pub fn return_url(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }

    /// 表示用に伏せ字にした共有キー
    pub fn masked_security_key(&self) -> String {
        let visible: String = self.security_key.chars().take(4).collect();
        if self.security_key.chars().count() <= 4 {
            "****".to_string()
        } else {
            format!("{}****", visible)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_url() {
        let mut config = TryOnConfig::default();
        assert_eq!(config.return_url(), "https://tryonquimarche-1.onrender.com/");

        config.base_url = "http://localhost:8000/".into();
        assert_eq!(config.return_url(), "http://localhost:8000/");
    }

    #[test]
    fn test_default_endpoints() {
        let config = TryOnConfig::default();
        assert_eq!(
            config.generate_endpoint(),
            "https://tryonquimarche-1.onrender.com/api/v1/generate-tryon"
        );
        assert_eq!(
            config.checkout_endpoint(),
            "https://tryonquimarche-1.onrender.com/api/v1/create-checkout-session"
        );
    }

    #[test]
    fn test_endpoints_ignore_trailing_slash() {
        let config = TryOnConfig {
            base_url: "http://localhost:8000/".into(),
            ..Default::default()
        };
        assert_eq!(config.generate_endpoint(), "http://localhost:8000/api/v1/generate-tryon");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TryOnConfig =
            serde_json::from_str(r#"{"base_url": "http://localhost:8000"}"#).unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.upload_preset, DEFAULT_UPLOAD_PRESET);
        assert_eq!(config.cloud_name, DEFAULT_CLOUD_NAME);
    }

    #[test]
    fn test_masked_security_key() {
        let config = TryOnConfig::default();
        assert_eq!(config.masked_security_key(), "MOT_****");

        let short = TryOnConfig { security_key: "abc".into(), ..Default::default() };
        assert_eq!(short.masked_security_key(), "****");
    }
}
