use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

pub mod database;
pub mod item;

pub use database::DatabaseError;
pub use item::ItemError;

/// Internal error type for store and bootstrap operations
///
/// Infrastructure failures are kept apart from item domain failures.
/// Not exposed via API - endpoints must convert through `ItemApiError`.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Item(#[from] ItemError),
}

impl InternalError {
    pub fn database(operation: &str, source: DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    /// Map a write failure, turning a unique constraint hit on `name` into a domain error
    pub fn from_item_write(operation: &str, name: &str, source: DbErr) -> InternalError {
        match source.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ItemError::DuplicateName {
                name: name.to_string(),
            }
            .into(),
            _ => Self::database(operation, source),
        }
    }
}
