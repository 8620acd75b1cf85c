//! User and book storage for the library service.
//!
//! This crate provides a storage abstraction for registered users and the
//! book catalogue, with an in-memory backend (tests and local runs) and a
//! SQLite backend.

mod error;
mod memory;
mod sqlite;
mod store;

pub use error::*;
pub use memory::*;
pub use sqlite::*;
pub use store::*;
