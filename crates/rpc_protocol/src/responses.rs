//! Response bodies.

use serde::{Deserialize, Serialize};

use crate::Book;

// ============================================================================
// Auth Responses
// ============================================================================

/// Outcome of a sign-up attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SignUpResponse {
    /// A successful sign-up.
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// A failed sign-up with the reason shown to the user.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(reason.into()),
        }
    }
}

/// Parameters a browser needs to upload straight to the image host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageKitAuthResponse {
    pub token: String,
    pub expire: i64,
    pub signature: String,
}

// ============================================================================
// Book Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookResponse {
    pub book: Book,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetBookResponse {
    pub book: Book,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBooksResponse {
    pub books: Vec<Book>,
    pub total_count: u32,
}
