//! Error codes and error bodies.

use serde::{Deserialize, Serialize};

use crate::FieldError;

/// Machine-readable error codes carried in error bodies.
pub mod error_codes {
    /// The request could not be understood.
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    /// One or more fields failed validation.
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    /// The requested resource does not exist.
    pub const RESOURCE_NOT_FOUND: &str = "RESOURCE_NOT_FOUND";
    /// The resource already exists.
    pub const ALREADY_EXISTS: &str = "ALREADY_EXISTS";
    /// A third-party integration is not configured on this server.
    pub const NOT_CONFIGURED: &str = "NOT_CONFIGURED";
    /// Something failed on the server side.
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Error object inside an [`ErrorBody`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Error code from [`error_codes`].
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Per-field validation failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

/// JSON body returned for failed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

impl ErrorBody {
    /// Creates an error body without field errors.
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.to_string(),
                message: message.into(),
                fields: Vec::new(),
            },
        }
    }

    /// Attaches field errors.
    pub fn with_fields(mut self, fields: Vec<FieldError>) -> Self {
        self.error.fields = fields;
        self
    }
}
