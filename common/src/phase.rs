//! 試着処理の状態と表示側インターフェース

use crate::credits::BalanceTone;

/// 試着処理の状態
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Charging,
    Uploading,
    Generating,
    Displaying { result_url: String },
    Refunding { message: String },
}

impl Phase {
    /// 処理中（ローディング表示・ボタン無効化）か
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Phase::Validating
                | Phase::Charging
                | Phase::Uploading
                | Phase::Generating
                | Phase::Refunding { .. }
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Validating => "validating",
            Phase::Charging => "charging",
            Phase::Uploading => "uploading",
            Phase::Generating => "generating",
            Phase::Displaying { .. } => "displaying",
            Phase::Refunding { .. } => "refunding",
        }
    }

    /// ローディング表示の文言
    pub fn status_text(&self) -> &'static str {
        match self {
            Phase::Idle | Phase::Displaying { .. } => "",
            Phase::Validating => "入力を確認中...",
            Phase::Charging => "クレジットを消費中...",
            Phase::Uploading => "画像をアップロード中...",
            Phase::Generating => "試着画像を生成中...",
            Phase::Refunding { .. } => "クレジットを返却中...",
        }
    }
}

/// 表示側（DOM、端末など）
pub trait TryOnView {
    fn set_phase(&mut self, phase: &Phase);
    fn show_balance(&mut self, balance: i64, tone: BalanceTone);
    /// ブロッキングな通知
    fn alert(&mut self, message: &str);
    fn open_pricing(&mut self);
}

/// 試着処理1回の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 生成成功
    Generated { result_url: String },
    /// 残高不足のため料金表を開いた
    PricingRequired,
    /// 課金前に入力エラーで中止
    Rejected { message: String },
    /// 課金後に失敗し返金した
    Refunded { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_phases() {
        assert!(!Phase::Idle.is_busy());
        assert!(Phase::Uploading.is_busy());
        assert!(Phase::Generating.is_busy());
        assert!(Phase::Refunding { message: "x".into() }.is_busy());
        assert!(!Phase::Displaying { result_url: "u".into() }.is_busy());
    }

    #[test]
    fn test_status_text() {
        assert_eq!(Phase::Idle.status_text(), "");
        assert!(Phase::Generating.status_text().contains("生成"));
        assert_eq!(Phase::Uploading.as_str(), "uploading");
    }
}
