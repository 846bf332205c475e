//! Student records and creation input

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::{required_text, ValidationError};

/// Student record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Student {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Trimmed, non-empty email address.
///
/// The address shape is not checked; uniqueness is enforced by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// # Example
    /// ```
    /// use coursectl_server::models::Email;
    ///
    /// assert!(Email::new("admin@localhost").is_ok());
    /// assert!(Email::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        Ok(Self(required_text(s, "email")?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Input for creating a student
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub email: Email,
    pub username: String,
}

impl NewStudent {
    /// Validate raw request fields.
    ///
    /// Name is checked before email so a request missing both reports the name.
    pub fn new(email: &str, username: &str) -> Result<Self, ValidationError> {
        let username = required_text(username, "name")?;
        let email = Email::new(email)?;
        Ok(Self { email, username })
    }
}
