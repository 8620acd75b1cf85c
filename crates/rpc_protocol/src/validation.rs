//! Declarative request validation.
//!
//! Each request type lists its field rules in one place and reports every
//! failing field at once, so a form can show all messages together.

use std::fmt;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::requests::{CreateBookRequest, SignUpRequest};

/// A single failed field rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name of the field.
    pub field: String,
    /// Message suitable for showing next to the field.
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field errors found in one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// Returns the failing fields.
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    /// Returns true if `field` failed.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Consumes the errors.
    pub fn into_fields(self) -> Vec<FieldError> {
        self.0
    }
}

/// Types whose fields carry validation rules.
pub trait Validate {
    /// Checks every rule, returning all failures.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Collects field failures while rules are checked.
#[derive(Default)]
struct Rules {
    errors: Vec<FieldError>,
}

impl Rules {
    fn check(&mut self, ok: bool, field: &str, message: impl Into<String>) {
        if !ok {
            self.errors.push(FieldError::new(field, message));
        }
    }

    fn min_len(&mut self, value: &str, min: usize, field: &str) {
        let len = value.chars().count();
        self.check(
            len >= min,
            field,
            format!("Must contain at least {} character(s)", min),
        );
    }

    fn len_between(&mut self, value: &str, min: usize, max: usize, field: &str) {
        let len = value.chars().count();
        if len < min {
            self.errors.push(FieldError::new(
                field,
                format!("Must contain at least {} character(s)", min),
            ));
        } else if len > max {
            self.errors.push(FieldError::new(
                field,
                format!("Must contain at most {} character(s)", max),
            ));
        }
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

/// Loose structural email check: `local@domain.tld`, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !host.starts_with('.') && tld.len() >= 2
}

/// Checks for `#RRGGBB`, case-insensitive.
pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

impl Validate for SignUpRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut rules = Rules::default();

        rules.min_len(self.full_name.trim(), 3, "fullName");
        rules.check(
            is_valid_email(self.email.trim()),
            "email",
            "Invalid email address",
        );
        rules.check(
            self.university_id > 0,
            "universityId",
            "University ID must be a positive number",
        );
        rules.check(
            !self.university_card.trim().is_empty(),
            "universityCard",
            "University Card is required",
        );
        rules.min_len(self.password.expose_secret(), 8, "password");

        rules.finish()
    }
}

impl Validate for CreateBookRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut rules = Rules::default();

        rules.len_between(self.title.trim(), 2, 100, "title");
        rules.len_between(self.description.trim(), 10, 1000, "description");
        rules.len_between(self.author.trim(), 2, 100, "author");
        rules.len_between(self.genre.trim(), 2, 50, "genre");
        rules.check(
            (1..=5).contains(&self.rating),
            "rating",
            "Rating must be between 1 and 5",
        );
        rules.check(
            (1..=10_000).contains(&self.total_copies),
            "totalCopies",
            "Total copies must be between 1 and 10000",
        );
        rules.check(
            !self.cover_url.trim().is_empty(),
            "coverUrl",
            "Cover image is required",
        );
        rules.check(
            is_hex_color(self.cover_color.trim()),
            "coverColor",
            "Cover color must be a hex color like #A1B2C3",
        );
        rules.check(
            !self.video_url.trim().is_empty(),
            "videoUrl",
            "Video is required",
        );
        rules.min_len(self.summary.trim(), 10, "summary");

        rules.finish()
    }
}
