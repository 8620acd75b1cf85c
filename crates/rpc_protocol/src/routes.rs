//! Route paths served by the library server.

/// Account creation.
pub const SIGN_UP: &str = "/api/auth/sign-up";

/// Image-host upload authentication parameters.
pub const IMAGEKIT_AUTH: &str = "/api/imagekit";

/// Book creation from the admin area.
pub const ADMIN_BOOKS: &str = "/api/admin/books";

/// Book catalogue.
pub const BOOKS: &str = "/api/books";

/// A single book, keyed by `:id`.
pub const BOOK: &str = "/api/books/:id";

/// Liveness probe.
pub const HEALTH: &str = "/health";
