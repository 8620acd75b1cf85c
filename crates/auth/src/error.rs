//! Authentication error types.

use library_store::LibraryStoreError;
use thiserror::Error;

use crate::RegistrationStage;

/// Reason reported to the caller when the email is already registered.
pub const USER_ALREADY_EXISTS: &str = "User already Exists";

/// Reason reported to the caller for any other sign-up failure.
pub const SIGN_UP_FAILED: &str = "SignUp error";

/// Errors that can occur during credential operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The hashing library failed.
    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

/// Result type for credential operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors that end a sign-up attempt.
#[derive(Debug, Error)]
pub enum SignUpError {
    /// The email is already registered.
    #[error("User already Exists")]
    DuplicateUser,

    /// The store failed while the flow was at `stage`.
    #[error("Store failure while {stage}: {source}")]
    Store {
        stage: RegistrationStage,
        #[source]
        source: LibraryStoreError,
    },

    /// The password could not be hashed.
    #[error("Sign-up hashing failure: {0}")]
    Hashing(#[source] AuthError),
}

impl SignUpError {
    /// Returns the reason shown to the caller.
    ///
    /// Store and hashing details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::DuplicateUser => USER_ALREADY_EXISTS,
            Self::Store { .. } | Self::Hashing(_) => SIGN_UP_FAILED,
        }
    }

    /// Returns true if the attempt was rejected as a duplicate.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateUser)
    }
}

/// Result type for sign-up attempts.
pub type SignUpResult<T> = Result<T, SignUpError>;
