use crate::errors::internal::{DatabaseError, InternalError, ItemError};
use crate::types::dto::common::ErrorDetail;
use poem_openapi::payload::Json;
use std::fmt;

pub const ITEM_NOT_FOUND: &str = "Item not found";
pub const DUPLICATE_NAME: &str = "Item name already exists";
pub const INTERNAL_ERROR: &str = "An internal error occurred";

/// Failures an item endpoint can report to a client
///
/// Each operation's response type converts from this, so handlers can use
/// `?` internally and map once at the end.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemApiError {
    /// No item with the requested id
    NotFound,

    /// Request failed validation before reaching the store
    Unprocessable(String),

    /// Write would violate the unique item name
    DuplicateName,

    /// Anything else; details are logged, never returned
    Internal,
}

impl ItemApiError {
    /// Convert InternalError to ItemApiError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Item(ItemError::DuplicateName { name }) => {
                tracing::warn!("Duplicate item name rejected: {}", name);
                Self::DuplicateName
            }
            InternalError::Database(DatabaseError::Operation { operation, .. }) => {
                tracing::error!("Database error in {}: {}", operation, err);
                Self::Internal
            }
            InternalError::Database(_) => {
                tracing::error!("Database error: {}", err);
                Self::Internal
            }
        }
    }

    /// Convert a poem request parsing failure (bad path id, bad JSON body)
    pub fn from_parse_error(err: poem::Error) -> Self {
        tracing::debug!("Rejected malformed request: {}", err);
        Self::Unprocessable(err.to_string())
    }

    /// Client-facing detail message
    pub fn message(&self) -> String {
        match self {
            ItemApiError::NotFound => ITEM_NOT_FOUND.to_string(),
            ItemApiError::Unprocessable(reason) => reason.clone(),
            ItemApiError::DuplicateName => DUPLICATE_NAME.to_string(),
            ItemApiError::Internal => INTERNAL_ERROR.to_string(),
        }
    }

    /// Response body for this error
    pub fn body(&self) -> Json<ErrorDetail> {
        Json(ErrorDetail::new(self.message()))
    }
}

impl From<InternalError> for ItemApiError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for ItemApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
