use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tryon")]
#[command(about = "バーチャル試着クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 人物画像と衣服画像から試着画像を生成（1クレジット消費）
    Generate {
        /// 人物画像
        #[arg(short, long)]
        person: Option<PathBuf>,

        /// 衣服画像
        #[arg(short, long)]
        clothing: Option<PathBuf>,

        /// 衣服カテゴリ（upper_body/lower_body/dresses、省略時は設定値）
        #[arg(long)]
        category: Option<String>,

        /// 結果画像の保存先
        #[arg(short = 'o', long)]
        download: Option<PathBuf>,
    },

    /// 残りクレジットを表示
    Credits,

    /// 購入可能なパックを表示
    Packs,

    /// クレジットパックを購入（決済ページのURLを表示）
    Buy {
        /// パックID（省略時は一覧から選択）
        pack: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// バックエンドのベースURLを設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
