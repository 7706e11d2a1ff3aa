use clap::Parser;
use item_ai_common::CATEGORIES;
use item_ai_rust::{cli, config, error, form, picker, review, service};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use form::ItemForm;
use picker::{FixedPathPicker, FolderPicker, ImagePicker};
use service::HttpListingService;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("✖ {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    // RUST_LOG があればそちらを優先
    let default_level = if verbose { "item_ai_rust=debug,item_ai=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::New { folder, image, output } => {
            let service = HttpListingService::from_config(&config)?;
            if cli.verbose {
                println!("エンドポイント: {}", service.endpoint());
            }
            let mut form = ItemForm::new(service);

            let preselect = image.is_some();
            let mut picker: Box<dyn ImagePicker> = match image {
                Some(path) => Box::new(FixedPathPicker::new(path)),
                None => Box::new(FolderPicker::new(
                    folder.unwrap_or_else(|| std::path::PathBuf::from(".")),
                )),
            };

            if let Some(record) = review::run_interactive_form(&mut form, picker.as_mut(), preselect).await? {
                println!("{}", serde_json::to_string_pretty(&record)?);
                if let Some(path) = output {
                    review::write_record(&path, &record)?;
                    println!("✔ 保存: {}", path.display());
                }
            }
        }

        Commands::Analyze { image, output } => {
            println!("🔍 item-ai - 画像解析\n");

            let service = HttpListingService::from_config(&config)?;
            let mut form = ItemForm::new(service);

            println!("- 画像を審査・解析中... ({})", image.display());
            let draft = review::analyze_image(&mut form, &image).await?;
            println!("✔ 解析完了\n");

            let json = serde_json::to_string_pretty(&draft)?;
            println!("{}", json);
            if let Some(path) = output {
                std::fs::write(&path, json)?;
                println!("✔ 結果を保存: {}", path.display());
            }
        }

        Commands::Categories => {
            for (i, category) in CATEGORIES.iter().enumerate() {
                println!("{:>2}) {}", i + 1, category);
            }
        }

        Commands::Config { set_endpoint, set_timeout, show } => {
            let mut config = config;
            let changed = set_endpoint.is_some() || set_timeout.is_some();

            if let Some(url) = set_endpoint {
                config.set_endpoint(url)?;
                println!("✔ エンドポイントを設定しました");
            }
            if let Some(seconds) = set_timeout {
                config.set_timeout(seconds)?;
                println!("✔ タイムアウトを設定しました");
            }
            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("設定:");
                println!("  エンドポイント: {}", config.endpoint);
                println!("  実効エンドポイント: {}", config.resolved_endpoint());
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
