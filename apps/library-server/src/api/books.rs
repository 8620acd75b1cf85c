//! Book management API endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use entities::{Book, NewBook};
use library_store::{BookFilter, LibraryStore};
use rpc_protocol::{requests::*, responses::*};
use uuid::Uuid;

use crate::api::extract::ValidatedJson;
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Largest page a single list request may ask for.
const MAX_PAGE_SIZE: u32 = 100;

/// Converts entity Book to RPC Book.
fn entity_to_rpc_book(book: &Book) -> rpc_protocol::Book {
    rpc_protocol::Book {
        id: book.id.to_string(),
        title: book.title.clone(),
        author: book.author.clone(),
        genre: book.genre.clone(),
        rating: book.rating,
        cover_url: book.cover_url.clone(),
        cover_color: book.cover_color.clone(),
        description: book.description.clone(),
        total_copies: book.total_copies,
        available_copies: book.available_copies,
        video_url: book.video_url.clone(),
        summary: book.summary.clone(),
        created_at: book.created_at,
    }
}

/// Adds a book to the catalogue.
pub async fn create_book<S: LibraryStore>(
    State(state): State<Arc<AppState<S>>>,
    ValidatedJson(request): ValidatedJson<CreateBookRequest>,
) -> ServerResult<(StatusCode, Json<CreateBookResponse>)> {
    let book = Book::new(NewBook {
        title: request.title.trim().to_string(),
        author: request.author.trim().to_string(),
        genre: request.genre.trim().to_string(),
        rating: request.rating,
        cover_url: request.cover_url,
        cover_color: request.cover_color.trim().to_string(),
        description: request.description.trim().to_string(),
        total_copies: request.total_copies,
        video_url: request.video_url,
        summary: request.summary.trim().to_string(),
    });

    let book = state.store.create_book(book).await?;

    tracing::info!(book_id = %book.id, "Book created");

    Ok((
        StatusCode::CREATED,
        Json(CreateBookResponse {
            book: entity_to_rpc_book(&book),
        }),
    ))
}

/// Lists books.
pub async fn list_books<S: LibraryStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<ListBooksQuery>,
) -> ServerResult<Json<ListBooksResponse>> {
    let filter = BookFilter {
        genre: query.genre,
        limit: Some(query.limit.unwrap_or(MAX_PAGE_SIZE).min(MAX_PAGE_SIZE)),
        offset: query.offset,
    };

    let (books, total) = state.store.list_books(filter).await?;

    Ok(Json(ListBooksResponse {
        books: books.iter().map(entity_to_rpc_book).collect(),
        total_count: total,
    }))
}

/// Gets a book.
pub async fn get_book<S: LibraryStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> ServerResult<Json<GetBookResponse>> {
    let book_id: Uuid = id
        .parse()
        .map_err(|_| ServerError::InvalidRequest("Invalid book id".to_string()))?;

    let book = state
        .store
        .get_book(book_id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Book not found".to_string()))?;

    Ok(Json(GetBookResponse {
        book: entity_to_rpc_book(&book),
    }))
}
