use clap::Parser;
use itemstash_backend::cli::{execute_command, Cli};
use itemstash_backend::config::{init_logging, AppSettings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging()?;

    let cli = Cli::parse();

    let settings = AppSettings::from_env()?;
    tracing::debug!("Loaded settings: {:?}", settings);

    execute_command(cli, &settings).await
}
