//! Core entity definitions for the library service.
//!
//! This crate defines the records shared across the workspace: registered
//! users and the books in the catalogue.

mod book;
mod user;

pub use book::*;
pub use user::*;
