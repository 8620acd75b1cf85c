//! Password hashing.

use crate::{AuthResult, SALT_ROUNDS};

/// One-way transform of a plaintext secret into its stored form.
pub trait PasswordHasher: Send + Sync {
    /// Hashes `plaintext` with a fresh random salt.
    fn hash(&self, plaintext: &str) -> AuthResult<String>;

    /// Checks `plaintext` against a previously stored hash.
    fn verify(&self, plaintext: &str, hashed: &str) -> AuthResult<bool>;
}

/// Bcrypt password hasher.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Creates a hasher using [`SALT_ROUNDS`].
    pub fn new() -> Self {
        Self { cost: SALT_ROUNDS }
    }

    /// Creates a hasher with a custom cost factor.
    ///
    /// Bcrypt accepts costs from 4 to 31.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Returns the cost factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, plaintext: &str) -> AuthResult<String> {
        Ok(bcrypt::hash(plaintext, self.cost)?)
    }

    fn verify(&self, plaintext: &str, hashed: &str) -> AuthResult<bool> {
        Ok(bcrypt::verify(plaintext, hashed)?)
    }
}
