//! Shared wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalogue book as sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub rating: i32,
    pub cover_url: String,
    pub cover_color: String,
    pub description: String,
    pub total_copies: i32,
    pub available_copies: i32,
    pub video_url: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}
