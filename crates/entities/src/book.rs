//! Book entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A book in the library catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Genre.
    pub genre: String,
    /// Rating from 1 to 5.
    pub rating: i32,
    /// Cover image reference on the image host.
    pub cover_url: String,
    /// Primary cover color as `#RRGGBB`.
    pub cover_color: String,
    /// Long description.
    pub description: String,
    /// Number of copies the library owns.
    pub total_copies: i32,
    /// Number of copies currently on the shelf.
    pub available_copies: i32,
    /// Trailer video reference on the image host.
    pub video_url: String,
    /// Short summary.
    pub summary: String,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when adding a book.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub rating: i32,
    pub cover_url: String,
    pub cover_color: String,
    pub description: String,
    pub total_copies: i32,
    pub video_url: String,
    pub summary: String,
}

impl Book {
    /// Creates a new book with every copy available.
    pub fn new(new_book: NewBook) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: new_book.title,
            author: new_book.author,
            genre: new_book.genre,
            rating: new_book.rating,
            cover_url: new_book.cover_url,
            cover_color: new_book.cover_color,
            description: new_book.description,
            total_copies: new_book.total_copies,
            available_copies: new_book.total_copies,
            video_url: new_book.video_url,
            summary: new_book.summary,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_book_has_all_copies_available() {
        let book = Book::new(NewBook {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            genre: "Science Fiction".to_string(),
            rating: 5,
            cover_url: "books/covers/dune.png".to_string(),
            cover_color: "#c4a35a".to_string(),
            description: "A desert planet and its spice.".to_string(),
            total_copies: 7,
            video_url: "books/videos/dune.mp4".to_string(),
            summary: "Paul Atreides comes of age.".to_string(),
        });

        assert_eq!(book.available_copies, 7);
        assert_eq!(book.total_copies, 7);
    }
}
