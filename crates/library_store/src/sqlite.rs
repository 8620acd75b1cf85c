//! SQLite library store implementation.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entities::{Book, User, UserRole, UserStatus};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use uuid::Uuid;

use crate::{BookFilter, LibraryStore, LibraryStoreError, StoreResult};

/// SQLite-backed library store.
#[derive(Clone)]
pub struct SqliteLibraryStore {
    pool: Pool<Sqlite>,
}

impl SqliteLibraryStore {
    /// Creates a store over an existing pool.
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Connects to `database_url`, creating the database file if needed.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // Every connection to `:memory:` opens a separate database.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }

    /// Initializes the database tables.
    pub async fn init(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                full_name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                university_id INTEGER NOT NULL,
                password_hash TEXT NOT NULL,
                university_card TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'PENDING',
                role TEXT NOT NULL DEFAULT 'USER',
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS books (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                genre TEXT NOT NULL,
                rating INTEGER NOT NULL,
                cover_url TEXT NOT NULL,
                cover_color TEXT NOT NULL,
                description TEXT NOT NULL,
                total_copies INTEGER NOT NULL DEFAULT 1,
                available_copies INTEGER NOT NULL DEFAULT 0,
                video_url TEXT NOT NULL,
                summary TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_books_genre_created_at
            ON books (genre, created_at)
            "#,
        )
        .execute(&self.pool)
        .await?;

        tracing::debug!("Library store tables initialized");

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    full_name: String,
    email: String,
    university_id: i64,
    password_hash: String,
    university_card: String,
    status: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = LibraryStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| LibraryStoreError::corrupt_row("User", e.to_string()))?;
        let status = UserStatus::parse(&row.status).ok_or_else(|| {
            LibraryStoreError::corrupt_row("User", format!("unknown status {}", row.status))
        })?;
        let role = UserRole::parse(&row.role).ok_or_else(|| {
            LibraryStoreError::corrupt_row("User", format!("unknown role {}", row.role))
        })?;

        Ok(User {
            id,
            full_name: row.full_name,
            email: row.email,
            university_id: row.university_id,
            password_hash: row.password_hash,
            university_card: row.university_card,
            status,
            role,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: String,
    title: String,
    author: String,
    genre: String,
    rating: i32,
    cover_url: String,
    cover_color: String,
    description: String,
    total_copies: i32,
    available_copies: i32,
    video_url: String,
    summary: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookRow> for Book {
    type Error = LibraryStoreError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| LibraryStoreError::corrupt_row("Book", e.to_string()))?;

        Ok(Book {
            id,
            title: row.title,
            author: row.author,
            genre: row.genre,
            rating: row.rating,
            cover_url: row.cover_url,
            cover_color: row.cover_color,
            description: row.description,
            total_copies: row.total_copies,
            available_copies: row.available_copies,
            video_url: row.video_url,
            summary: row.summary,
            created_at: row.created_at,
        })
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

#[async_trait]
impl LibraryStore for SqliteLibraryStore {
    async fn find_users_by_email(&self, email: &str, limit: u32) -> StoreResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, full_name, email, university_id, password_hash, university_card,
                   status, role, created_at
            FROM users
            WHERE email = ?
            LIMIT ?
            "#,
        )
        .bind(email)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn create_user(&self, user: User) -> StoreResult<User> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, full_name, email, university_id, password_hash,
                               university_card, status, role, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(user.university_id)
        .bind(&user.password_hash)
        .bind(&user.university_card)
        .bind(user.status.as_str())
        .bind(user.role.as_str())
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(user),
            Err(e) if is_unique_violation(&e) => {
                Err(LibraryStoreError::already_exists("User", user.email))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, full_name, email, university_id, password_hash, university_card,
                   status, role, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn create_book(&self, book: Book) -> StoreResult<Book> {
        let result = sqlx::query(
            r#"
            INSERT INTO books (id, title, author, genre, rating, cover_url, cover_color,
                               description, total_copies, available_copies, video_url,
                               summary, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(book.id.to_string())
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(book.rating)
        .bind(&book.cover_url)
        .bind(&book.cover_color)
        .bind(&book.description)
        .bind(book.total_copies)
        .bind(book.available_copies)
        .bind(&book.video_url)
        .bind(&book.summary)
        .bind(book.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(book),
            Err(e) if is_unique_violation(&e) => {
                Err(LibraryStoreError::already_exists("Book", book.id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_book(&self, id: Uuid) -> StoreResult<Option<Book>> {
        let row: Option<BookRow> = sqlx::query_as(
            r#"
            SELECT id, title, author, genre, rating, cover_url, cover_color, description,
                   total_copies, available_copies, video_url, summary, created_at
            FROM books
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Book::try_from).transpose()
    }

    async fn list_books(&self, filter: BookFilter) -> StoreResult<(Vec<Book>, u32)> {
        let (total,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM books
            WHERE (?1 IS NULL OR genre = ?1)
            "#,
        )
        .bind(filter.genre.as_deref())
        .fetch_one(&self.pool)
        .await?;

        // SQLite treats a negative LIMIT as "no limit".
        let limit = filter.limit.map(i64::from).unwrap_or(-1);
        let offset = filter.offset.map(i64::from).unwrap_or(0);

        let rows: Vec<BookRow> = sqlx::query_as(
            r#"
            SELECT id, title, author, genre, rating, cover_url, cover_color, description,
                   total_copies, available_copies, video_url, summary, created_at
            FROM books
            WHERE (?1 IS NULL OR genre = ?1)
            ORDER BY created_at DESC
            LIMIT ?2 OFFSET ?3
            "#,
        )
        .bind(filter.genre.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let books = rows
            .into_iter()
            .map(Book::try_from)
            .collect::<StoreResult<Vec<_>>>()?;

        Ok((books, total as u32))
    }
}

#[cfg(test)]
mod tests {
    use entities::NewBook;

    use super::*;

    async fn memory_store() -> SqliteLibraryStore {
        let store = SqliteLibraryStore::connect("sqlite::memory:").await.unwrap();
        store.init().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_user_insert_and_lookup() {
        let store = memory_store().await;

        let user = User::new("Ada Lovelace", "ada@example.com", 7, "$2b$10$hash", "cards/ada.png");
        let created = store.create_user(user).await.unwrap();

        let found = store.find_users_by_email("ada@example.com", 1).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, created.id);
        assert_eq!(found[0].password_hash, "$2b$10$hash");
        assert_eq!(found[0].status, UserStatus::Pending);
        assert_eq!(found[0].role, UserRole::User);

        let fetched = store.get_user(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.university_id, 7);
        assert!(store.get_user(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unique_email_constraint_maps_to_already_exists() {
        let store = memory_store().await;

        let first = User::new("Ada Lovelace", "ada@example.com", 1, "hash", "cards/ada.png");
        store.create_user(first).await.unwrap();

        let second = User::new("Ada Byron", "ada@example.com", 2, "hash", "cards/byron.png");
        let err = store.create_user(second).await.unwrap_err();
        assert!(err.is_already_exists());

        let found = store.find_users_by_email("ada@example.com", 10).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].full_name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_book_listing() {
        let store = memory_store().await;

        for (title, genre) in [
            ("Dune", "Science Fiction"),
            ("Emma", "Classic"),
            ("Hyperion", "Science Fiction"),
        ] {
            let book = Book::new(NewBook {
                title: title.to_string(),
                author: "Some Author".to_string(),
                genre: genre.to_string(),
                rating: 4,
                cover_url: "books/covers/cover.png".to_string(),
                cover_color: "#112233".to_string(),
                description: "A long enough description.".to_string(),
                total_copies: 2,
                video_url: "books/videos/trailer.mp4".to_string(),
                summary: "A long enough summary.".to_string(),
            });
            store.create_book(book).await.unwrap();
        }

        let (books, total) = store.list_books(BookFilter::default()).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(books.len(), 3);

        let filter = BookFilter {
            genre: Some("Science Fiction".to_string()),
            limit: Some(1),
            offset: Some(1),
        };
        let (page, total) = store.list_books(filter).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(page.len(), 1);

        let fetched = store.get_book(books[0].id).await.unwrap().unwrap();
        assert_eq!(fetched.available_copies, 2);
    }
}
