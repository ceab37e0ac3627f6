// Errors layer - Error type definitions
pub mod api;
pub mod internal;

pub use api::ItemApiError;
pub use internal::InternalError;
