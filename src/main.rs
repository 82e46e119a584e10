use anyhow::{bail, Context};
use clap::Parser;
use dialoguer::Select;
use tracing_subscriber::EnvFilter;
use tryon_common::{
    CancelToken, CreditStore, Outcome, TryOnController, TryOnInput, TryOnView, CREDIT_PACKS,
};
use tryon_rust::cli::{Cli, Commands};
use tryon_rust::config::Config;
use tryon_rust::file_storage::FileStorage;
use tryon_rust::http::{
    download_result, start_checkout, HttpImageHost, HttpTryOnBackend, SystemClock,
};
use tryon_rust::image_file::ImageFile;
use tryon_rust::terminal::{print_packs, TerminalView};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Ctrl+C で中断トークンを立てる（2回目で強制終了）
fn cancel_on_ctrl_c() -> CancelToken {
    let cancel = CancelToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("中断します（もう一度 Ctrl+C で強制終了）");
            token.cancel();
        }
        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });
    cancel
}

fn load_credits() -> anyhow::Result<CreditStore<FileStorage>> {
    let path = Config::credits_path()?;
    let credits = CreditStore::load(FileStorage::new(&path))
        .with_context(|| format!("クレジットの読み込みに失敗: {}", path.display()))?;
    Ok(credits)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load().context("設定ファイルの読み込みに失敗")?;

    match cli.command {
        Commands::Generate { person, clothing, category, download } => {
            println!("👕 tryon - 試着画像生成\n");

            let credits = load_credits()?;
            let (person, clothing) =
                ImageFile::read_pair(person.as_deref(), clothing.as_deref(), credits.get())?;

            let client = reqwest::Client::new();
            let controller = TryOnController::new(
                credits,
                HttpImageHost::new(client.clone(), &config.service),
                HttpTryOnBackend::new(client.clone(), &config.service),
                SystemClock,
                config.service.security_key.clone(),
            );

            let input = TryOnInput {
                person,
                clothing,
                category: category.unwrap_or_else(|| config.default_category.clone()),
            };

            let mut view = TerminalView::new();
            let cancel = cancel_on_ctrl_c();
            match controller.start_try_on(&input, &mut view, &cancel).await {
                Outcome::Generated { result_url } => {
                    println!("✔ 結果画像: {}", result_url);

                    if let Some(output) = download {
                        let size = download_result(&client, &result_url, &output)
                            .await
                            .with_context(|| format!("結果画像の保存に失敗: {}", output.display()))?;
                        println!("✔ 保存しました: {} ({} bytes)", output.display(), size);
                    }

                    println!("\n✅ 完了");
                }
                Outcome::PricingRequired => bail!("クレジットが不足しています"),
                Outcome::Rejected { message } => bail!(message),
                Outcome::Refunded { message } => {
                    bail!("試着画像の生成に失敗しました（クレジットは返却済み）: {}", message)
                }
            }
        }

        Commands::Credits => {
            let credits = load_credits()?;
            let mut view = TerminalView::new();
            view.show_balance(credits.get(), credits.tone());
        }

        Commands::Packs => {
            println!("クレジットパック:");
            print_packs();
        }

        Commands::Buy { pack } => {
            let pack_id = match pack {
                Some(id) => id,
                None => {
                    let items: Vec<String> = CREDIT_PACKS
                        .iter()
                        .map(|p| format!("{} ({} クレジット)", p.label, p.credits))
                        .collect();
                    let index = Select::new()
                        .with_prompt("購入するパックを選択")
                        .items(&items)
                        .default(0)
                        .interact()?;
                    CREDIT_PACKS[index].id.to_string()
                }
            };

            let mut view = TerminalView::new();
            let result = start_checkout(
                reqwest::Client::new(),
                &config.service,
                &pack_id,
                &mut view,
                &CancelToken::new(),
            )
            .await;
            if result.is_err() {
                bail!("決済ページを開けませんでした");
            }
        }

        Commands::Config { set_base_url, show } => {
            let mut config = config;

            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
                println!("✔ ベースURLを設定しました");
            }

            if show {
                println!("設定:");
                println!("  ベースURL: {}", config.service.base_url);
                println!("  生成API: {}", config.service.generate_endpoint());
                println!("  決済API: {}", config.service.checkout_endpoint());
                println!("  共有キー: {}", config.service.masked_security_key());
                println!("  アップロード先: {}", config.service.upload_url);
                println!("  プリセット: {}", config.service.upload_preset);
                println!("  アカウント: {}", config.service.cloud_name);
                println!("  既定カテゴリ: {}", config.default_category);
                println!("  クレジット保存先: {}", Config::credits_path()?.display());
            }
        }
    }

    Ok(())
}
