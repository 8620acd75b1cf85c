//! API endpoints.

pub mod auth;
pub mod books;
pub mod extract;
pub mod imagekit;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use library_store::LibraryStore;
use rpc_protocol::{ADMIN_BOOKS, BOOK, BOOKS, HEALTH, IMAGEKIT_AUTH, SIGN_UP};

use crate::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router<S: LibraryStore + 'static>() -> Router<Arc<AppState<S>>> {
    Router::new()
        // Auth endpoints
        .route(SIGN_UP, post(auth::sign_up))
        // Upload endpoints
        .route(IMAGEKIT_AUTH, get(imagekit::authentication_parameters))
        // Book endpoints
        .route(ADMIN_BOOKS, post(books::create_book))
        .route(BOOKS, get(books::list_books))
        .route(BOOK, get(books::get_book))
        // Health check
        .route(HEALTH, get(health_check))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
