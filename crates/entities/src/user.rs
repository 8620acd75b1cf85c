//! User-related entity definitions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account approval status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    /// Waiting for an admin to check the university card.
    #[default]
    Pending,
    /// Allowed to borrow books.
    Approved,
    /// Registration was turned down.
    Rejected,
}

impl UserStatus {
    /// Converts the status to a string for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "APPROVED" => Some(Self::Approved),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Role of a user within the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Regular borrower.
    #[default]
    User,
    /// Library administrator.
    Admin,
}

impl UserRole {
    /// Converts the role to a string for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }

    /// Parses a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "USER" => Some(Self::User),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// Normalizes an email address into the form used as the uniqueness key.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// A registered library user.
///
/// `password_hash` only ever holds the one-way hashed credential. It is
/// never serialized and is redacted from `Debug` output.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name.
    pub full_name: String,
    /// Normalized email address, unique across users.
    pub email: String,
    /// University-issued identifier.
    pub university_id: i64,
    /// Hashed password.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Reference to the uploaded university card.
    pub university_card: String,
    /// Approval status.
    pub status: UserStatus,
    /// Role.
    pub role: UserRole,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new pending user with the default role.
    ///
    /// The email is normalized on the way in.
    pub fn new(
        full_name: impl Into<String>,
        email: &str,
        university_id: i64,
        password_hash: impl Into<String>,
        university_card: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name: full_name.into(),
            email: normalize_email(email),
            university_id,
            password_hash: password_hash.into(),
            university_card: university_card.into(),
            status: UserStatus::default(),
            role: UserRole::default(),
            created_at: Utc::now(),
        }
    }

    /// Sets the role.
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("university_id", &self.university_id)
            .field("password_hash", &"[REDACTED]")
            .field("university_card", &self.university_card)
            .field("status", &self.status)
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .finish()
    }
}
