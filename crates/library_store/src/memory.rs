//! In-memory library store implementation for testing.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use entities::{Book, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{BookFilter, LibraryStore, LibraryStoreError, StoreResult};

/// In-memory library store for tests and local runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryLibraryStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    books: Arc<RwLock<HashMap<Uuid, Book>>>,
}

impl MemoryLibraryStore {
    /// Creates a new in-memory library store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored users.
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl LibraryStore for MemoryLibraryStore {
    // =========================================================================
    // User operations
    // =========================================================================

    async fn find_users_by_email(&self, email: &str, limit: u32) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .filter(|u| u.email == email)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn create_user(&self, user: User) -> StoreResult<User> {
        // Uniqueness is checked under the write lock so concurrent inserts
        // of the same email cannot both succeed.
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(LibraryStoreError::already_exists("User", user.id.to_string()));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(LibraryStoreError::already_exists("User", user.email.clone()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    // =========================================================================
    // Book operations
    // =========================================================================

    async fn create_book(&self, book: Book) -> StoreResult<Book> {
        let mut books = self.books.write().await;
        if books.contains_key(&book.id) {
            return Err(LibraryStoreError::already_exists("Book", book.id.to_string()));
        }
        books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn get_book(&self, id: Uuid) -> StoreResult<Option<Book>> {
        let books = self.books.read().await;
        Ok(books.get(&id).cloned())
    }

    async fn list_books(&self, filter: BookFilter) -> StoreResult<(Vec<Book>, u32)> {
        let books = self.books.read().await;
        let mut result: Vec<Book> = books
            .values()
            .filter(|b| filter.genre.as_ref().is_none_or(|genre| &b.genre == genre))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = result.len() as u32;

        if let Some(offset) = filter.offset {
            result = result.into_iter().skip(offset as usize).collect();
        }
        if let Some(limit) = filter.limit {
            result = result.into_iter().take(limit as usize).collect();
        }

        Ok((result, total))
    }
}
