use poem_openapi::Object;

/// Response model for health check endpoint
#[derive(Object, Debug, Clone, PartialEq)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Human-readable status message
    pub message: String,
}

/// Error body returned by every failing endpoint
#[derive(Object, Debug, Clone, PartialEq)]
pub struct ErrorDetail {
    /// What went wrong
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
