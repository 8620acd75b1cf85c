//! Credential hashing and account registration for the library service.
//!
//! This crate provides:
//! - One-way password hashing with a per-call salt
//! - The duplicate guard that keeps emails unique
//! - The sign-up flow that ties the guard, the hasher and the store together

mod error;
mod password;
mod registration;

pub use error::*;
pub use password::*;
pub use registration::*;

/// Bcrypt cost factor applied to every stored password.
pub const SALT_ROUNDS: u32 = 10;
