use clap::Parser;
use tracing_subscriber::EnvFilter;

use swatch_cli::{run, Cli};
use swatch_core::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;
    let stdout = std::io::stdout();
    run(cli, &settings, &mut stdout.lock()).await
}
