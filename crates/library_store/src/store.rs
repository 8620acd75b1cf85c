//! Library store trait definitions.

use async_trait::async_trait;
use entities::{Book, User};
use uuid::Uuid;

use crate::StoreResult;

/// Filter options for listing books.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    /// Filter by exact genre.
    pub genre: Option<String>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset for pagination.
    pub offset: Option<u32>,
}

/// Trait for library storage operations.
#[async_trait]
pub trait LibraryStore: Send + Sync {
    // =========================================================================
    // User operations
    // =========================================================================

    /// Finds users whose email equals `email`, returning at most `limit` rows.
    ///
    /// `email` is compared against the stored, normalized form.
    async fn find_users_by_email(&self, email: &str, limit: u32) -> StoreResult<Vec<User>>;

    /// Inserts a new user.
    ///
    /// Fails with `AlreadyExists` when another user holds the same email.
    async fn create_user(&self, user: User) -> StoreResult<User>;

    /// Gets a user by ID.
    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    // =========================================================================
    // Book operations
    // =========================================================================

    /// Inserts a new book.
    async fn create_book(&self, book: Book) -> StoreResult<Book>;

    /// Gets a book by ID.
    async fn get_book(&self, id: Uuid) -> StoreResult<Option<Book>>;

    /// Lists books, newest first, together with the unpaged total.
    async fn list_books(&self, filter: BookFilter) -> StoreResult<(Vec<Book>, u32)>;
}
