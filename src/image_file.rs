use crate::error::{CliError, Result};
use std::path::Path;

/// アップロードする画像ファイル
///
/// サイズや形式の検証はしない（画像ホスティング側に任せる）。
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn read(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }

        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self { file_name, mime_type, bytes })
    }

    /// 人物画像と衣服画像を読み込む
    ///
    /// 残高がなければ読まずに None を返し、料金表の案内を入力エラーより優先する。
    pub fn read_pair(
        person: Option<&Path>,
        clothing: Option<&Path>,
        balance: i64,
    ) -> Result<(Option<Self>, Option<Self>)> {
        if balance <= 0 {
            return Ok((None, None));
        }

        let person = person.map(Self::read).transpose()?;
        let clothing = clothing.map(Self::read).transpose()?;
        Ok((person, clothing))
    }
}
