//! Domain error taxonomy

use std::fmt;

use crate::db::DbError;
use crate::models::ValidationError;

/// Kind of entity a lookup failed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Student,
    Course,
    Enrollment,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Course => "course",
            Self::Enrollment => "enrollment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from domain operations
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Referenced entity is absent
    #[error("{kind} not found: {key}")]
    NotFound { kind: EntityKind, key: String },

    /// Duplicate enrollment or unique-key violation
    #[error("{message}")]
    Conflict { message: String },

    /// Connectivity or query failure
    #[error(transparent)]
    Storage(DbError),
}

impl DomainError {
    pub(crate) fn not_found(kind: EntityKind, key: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    /// Kind of the missing entity, if this is a not-found error.
    pub fn not_found_kind(&self) -> Option<EntityKind> {
        match self {
            Self::NotFound { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

impl From<DbError> for DomainError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Conflict { .. } => Self::Conflict {
                message: e.to_string(),
            },
            other => Self::Storage(other),
        }
    }
}
