//! 端末向けの表示
//!
//! ローディング表示はスピナー、アラートは標準エラー出力に出す。

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tryon_common::{BalanceTone, PageLocation, Phase, TryOnView, CREDIT_PACKS};

#[derive(Default)]
pub struct TerminalView {
    spinner: Option<ProgressBar>,
    result_url: Option<String>,
    pricing_opened: bool,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result_url(&self) -> Option<&str> {
        self.result_url.as_deref()
    }

    pub fn pricing_opened(&self) -> bool {
        self.pricing_opened
    }

    fn spinner(&mut self) -> &ProgressBar {
        self.spinner.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        })
    }

    fn println(&self, line: &str) {
        match &self.spinner {
            Some(pb) => pb.suspend(|| println!("{}", line)),
            None => println!("{}", line),
        }
    }
}

impl TryOnView for TerminalView {
    fn set_phase(&mut self, phase: &Phase) {
        if phase.is_busy() {
            let text = phase.status_text();
            self.spinner().set_message(text);
            return;
        }

        if let Phase::Displaying { result_url } = phase {
            self.result_url = Some(result_url.clone());
        }

        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }

    fn show_balance(&mut self, balance: i64, tone: BalanceTone) {
        let line = match tone {
            BalanceTone::Warning => format!("⚠ 残りクレジット: {}", balance),
            BalanceTone::Normal => format!("残りクレジット: {}", balance),
        };
        self.println(&line);
    }

    fn alert(&mut self, message: &str) {
        match &self.spinner {
            Some(pb) => pb.suspend(|| eprintln!("❌ {}", message)),
            None => eprintln!("❌ {}", message),
        }
    }

    fn open_pricing(&mut self) {
        self.pricing_opened = true;
        self.println("クレジットがありません。パックを購入してください:");
        print_packs();
    }
}

pub fn print_packs() {
    for pack in CREDIT_PACKS {
        println!("  {:<10} {:>4} クレジット  {}", pack.id, pack.credits, pack.label);
    }
    println!("購入: tryon buy <PACK_ID>");
}

/// 端末ではページ遷移の代わりにURLを表示する
#[derive(Debug, Default)]
pub struct TerminalLocation;

impl PageLocation for TerminalLocation {
    fn query(&self) -> String {
        String::new()
    }

    fn strip_query(&self) {}

    fn navigate(&self, url: &str) {
        println!("ブラウザで以下のURLを開いて決済してください:\n  {}", url);
    }
}
