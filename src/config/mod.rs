mod database;
mod env_source;
mod logging;
mod settings;

pub use database::{
    begin_transaction, commit_transaction, connect_options, init_database, migrate_database,
    reset_database,
};
pub use env_source::{EnvSource, MapEnv, SystemEnv};
pub use logging::{init_logging, init_logging_with, LoggingConfig, LoggingError};
pub use settings::{AppSettings, SettingsError};
