//! HTTP wire types for the library service.
//!
//! This crate defines the JSON bodies exchanged with the library server,
//! the route paths it serves, its error codes, and the declarative
//! validation applied to incoming requests.

mod error;
pub mod requests;
pub mod responses;
mod routes;
mod types;
mod validation;

pub use error::*;
pub use routes::*;
pub use types::*;
pub use validation::*;
