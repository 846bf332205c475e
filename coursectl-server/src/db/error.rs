//! Storage error type

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Query or connection failure, tagged with the operation that ran it
    #[error("{op} failed: {source}")]
    Query {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// Unique constraint violation
    #[error("{resource} '{key}' already exists")]
    Conflict { resource: &'static str, key: String },

    /// Seed batch references a student or course position that doesn't exist
    #[error("invalid seed batch: {0}")]
    InvalidSeed(String),
}

impl DbError {
    /// Wrap a sqlx error with the name of the failing operation.
    pub(crate) fn query(op: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Query { op, source }
    }

    /// Like [`DbError::query`], but unique violations become `Conflict`.
    pub(crate) fn on_insert(
        op: &'static str,
        resource: &'static str,
        key: impl Into<String>,
    ) -> impl FnOnce(sqlx::Error) -> Self {
        let key = key.into();
        move |source| {
            if is_unique_violation(&source) {
                Self::Conflict { resource, key }
            } else {
                Self::Query { op, source }
            }
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
