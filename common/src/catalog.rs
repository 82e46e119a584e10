//! クレジットパックと衣服カテゴリの一覧

use serde::Serialize;

/// 購入可能なクレジットパック
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreditPack {
    /// 決済バックエンドが解釈するID（そのまま送る）
    pub id: &'static str,
    pub credits: u32,
    pub label: &'static str,
}

pub const CREDIT_PACKS: &[CreditPack] = &[
    CreditPack { id: "pack_10", credits: 10, label: "スターター" },
    CreditPack { id: "pack_30", credits: 30, label: "スタンダード" },
    CreditPack { id: "pack_100", credits: 100, label: "プロ" },
];

pub fn find_pack(id: &str) -> Option<&'static CreditPack> {
    CREDIT_PACKS.iter().find(|p| p.id == id)
}

/// カテゴリ選択肢（値, 表示名）
///
/// 値は検証せず生成APIへそのまま渡す。
pub const GARMENT_CATEGORIES: &[(&str, &str)] = &[
    ("upper_body", "トップス"),
    ("lower_body", "ボトムス"),
    ("dresses", "ワンピース"),
];

pub const DEFAULT_CATEGORY: &str = "upper_body";
