//! Request bodies.

use secrecy::Secret;
use serde::{Deserialize, Serialize};

// ============================================================================
// Auth Requests
// ============================================================================

/// Account creation form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub full_name: String,
    pub email: String,
    pub university_id: i64,
    pub password: Secret<String>,
    pub university_card: String,
}

// ============================================================================
// Book Requests
// ============================================================================

/// Admin form for adding a book.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub rating: i32,
    pub total_copies: i32,
    pub cover_url: String,
    pub cover_color: String,
    pub description: String,
    pub video_url: String,
    pub summary: String,
}

/// Query string for listing books.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListBooksQuery {
    pub genre: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}
