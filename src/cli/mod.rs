// CLI module: server startup and database maintenance

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppSettings;

/// Itemstash item service
#[derive(Parser, Debug)]
#[command(name = "itemstash")]
#[command(about = "Item CRUD backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Apply migrations and start the HTTP server (default)
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Drop all tables and re-create them from migrations
    Reset {
        /// Confirm that all stored items will be deleted
        #[arg(long)]
        yes: bool,
    },
}

/// Execute CLI command
///
/// Routes the parsed CLI command to the appropriate handler function.
/// No subcommand means `serve`.
///
/// # Returns
/// * `Ok(())` - Command executed successfully
/// * `Err(...)` - Command execution failed
pub async fn execute_command(
    cli: Cli,
    settings: &AppSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_server(settings).await?,
        Commands::Migrate => migrate::run_migrations(settings).await?,
        Commands::Reset { yes } => {
            if !yes {
                return Err("refusing to reset the database without --yes".into());
            }
            migrate::reset(settings).await?;
        }
    }

    Ok(())
}
