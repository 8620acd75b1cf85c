//! Account registration.
//!
//! A sign-up walks through three stages: the duplicate check, password
//! hashing and the insert. The flow ends at the first stage that fails;
//! a successful run returns the stored user.

use std::fmt;
use std::sync::Arc;

use entities::{normalize_email, User};
use library_store::{LibraryStore, StoreResult};
use secrecy::{ExposeSecret, Secret};

use crate::{AuthError, PasswordHasher, SignUpError, SignUpResult};

/// Parameters submitted by someone creating an account.
#[derive(Debug)]
pub struct SignUpCredentials {
    /// Display name.
    pub full_name: String,
    /// Email address, the uniqueness key.
    pub email: String,
    /// University-issued identifier.
    pub university_id: i64,
    /// Plaintext password.
    pub password: Secret<String>,
    /// Reference to the uploaded university card.
    pub university_card: String,
}

/// Stage of a sign-up attempt, recorded on failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStage {
    /// Looking for an existing account with the same email.
    CheckingDuplicate,
    /// Deriving the stored password hash.
    Hashing,
    /// Writing the new account.
    Persisting,
}

impl RegistrationStage {
    /// Returns the stage name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckingDuplicate => "checking_duplicate",
            Self::Hashing => "hashing",
            Self::Persisting => "persisting",
        }
    }
}

impl fmt::Display for RegistrationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registers new accounts against a store using a password hasher.
///
/// Hashing runs on the blocking thread pool, so the hasher is shared
/// through an `Arc` rather than borrowed.
pub struct Registrar<'a, S: ?Sized, H: ?Sized> {
    store: &'a S,
    hasher: Arc<H>,
}

impl<'a, S, H> Registrar<'a, S, H>
where
    S: LibraryStore + ?Sized,
    H: PasswordHasher + ?Sized + 'static,
{
    /// Creates a registrar over the given collaborators.
    pub fn new(store: &'a S, hasher: Arc<H>) -> Self {
        Self { store, hasher }
    }

    /// Returns true if an account with this email already exists.
    ///
    /// Store failures are returned as errors, never as "not registered".
    pub async fn is_email_registered(&self, email: &str) -> StoreResult<bool> {
        let existing = self
            .store
            .find_users_by_email(&normalize_email(email), 1)
            .await?;
        Ok(!existing.is_empty())
    }

    /// Creates a new account.
    ///
    /// The insert is awaited before success is reported. A uniqueness
    /// conflict raised by the store at insert time is reported as a
    /// duplicate, the same as one caught by the upfront check.
    pub async fn sign_up(&self, credentials: SignUpCredentials) -> SignUpResult<User> {
        let SignUpCredentials {
            full_name,
            email,
            university_id,
            password,
            university_card,
        } = credentials;

        let registered = self.is_email_registered(&email).await.map_err(|source| {
            let stage = RegistrationStage::CheckingDuplicate;
            tracing::error!(error = %source, stage = %stage, "Sign-up duplicate check failed");
            SignUpError::Store { stage, source }
        })?;
        if registered {
            tracing::info!("Sign-up rejected: email already registered");
            return Err(SignUpError::DuplicateUser);
        }

        // Bcrypt is CPU-bound; keep it off the async worker threads.
        let hasher = Arc::clone(&self.hasher);
        let task = tokio::task::spawn_blocking(move || hasher.hash(password.expose_secret()));
        let hashed = match task.await {
            Ok(result) => result,
            Err(e) => Err(AuthError::Other(format!("Hashing task failed: {}", e))),
        };
        let password_hash = hashed.map_err(|e| {
            let stage = RegistrationStage::Hashing;
            tracing::error!(error = %e, stage = %stage, "Sign-up hashing failed");
            SignUpError::Hashing(e)
        })?;

        let user = User::new(full_name, &email, university_id, password_hash, university_card);

        match self.store.create_user(user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "User signed up");
                Ok(user)
            }
            Err(e) if e.is_already_exists() => {
                tracing::info!("Sign-up rejected: email registered concurrently");
                Err(SignUpError::DuplicateUser)
            }
            Err(source) => {
                let stage = RegistrationStage::Persisting;
                tracing::error!(error = %source, stage = %stage, "SignUp error");
                Err(SignUpError::Store { stage, source })
            }
        }
    }
}
