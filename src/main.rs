use anyhow::Context;
use clap::{Parser, Subcommand};
use rental_scout::{config::Settings, startup};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rental-scout", version, about = "Vacation rental property search service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Replace the stored listings with the sample dataset
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load configuration")?;

    // RUST_LOG overrides the configured level
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.log_level).context("Invalid log level")?,
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🏠 Rental Scout v{}", env!("CARGO_PKG_VERSION"));

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => startup::serve(&settings).await,
        Command::Seed => startup::seed(&settings).await,
    }
}
