//! Clients for third-party services.

pub mod imagekit;
pub mod workflow;
