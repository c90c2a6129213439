use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fitness_app::config::AppConfig;
use fitness_app::services::AppService;
use fitness_app::ui::ConsoleUi;

#[derive(Parser)]
#[command(name = "fitness-app", version, about = "Console fitness tracker")]
struct Cli {
    /// Configuration file to load
    #[arg(short, long, value_name = "FILE")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_file(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.meta.log_filter.clone())),
        )
        .init();

    info!(app = %config.meta.app_name, "starting");

    let services = AppService::connect(&config).await?;
    ConsoleUi::new(services).run().await
}
