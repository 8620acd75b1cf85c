//! Application state.

use std::sync::Arc;

use auth::PasswordHasher;
use library_store::LibraryStore;

use crate::services::imagekit::ImageKitAuth;
use crate::services::workflow::WorkflowClient;

/// Shared application state.
///
/// Every collaborator is built once at startup and passed in here, so
/// handlers can be exercised against substitute stores and hashers.
pub struct AppState<S: LibraryStore> {
    /// User and book store.
    pub store: S,
    /// Password hasher.
    pub hasher: Arc<dyn PasswordHasher>,
    /// Image host handle (only when configured).
    pub imagekit: Option<ImageKitAuth>,
    /// Workflow service handle (only when configured).
    pub workflow: Option<WorkflowClient>,
}

impl<S: LibraryStore> AppState<S> {
    /// Creates new application state.
    pub fn new(
        store: S,
        hasher: Arc<dyn PasswordHasher>,
        imagekit: Option<ImageKitAuth>,
        workflow: Option<WorkflowClient>,
    ) -> Self {
        Self {
            store,
            hasher,
            imagekit,
            workflow,
        }
    }
}

/// Type alias for shared state.
pub type SharedState<S> = Arc<AppState<S>>;
