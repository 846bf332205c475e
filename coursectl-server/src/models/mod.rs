//! Domain models with validation at construction
//!
//! Records (`Student`, `Course`, `Enrollment`) mirror table rows.
//! Inputs (`NewStudent`, `NewCourse`, `SearchKeyword`) are validated when
//! they are built: required fields are trimmed and must not be empty.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod student;
pub mod course;
pub mod enrollment;
pub mod search;

pub use validation::ValidationError;
pub use student::{Email, NewStudent, Student};
pub use course::{Course, NewCourse};
pub use enrollment::{DataStats, Enrollment};
pub use search::SearchKeyword;

/// Trim a required text field, rejecting it when nothing is left.
pub(crate) fn required_text(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    Ok(trimmed.to_owned())
}
