//! Course records and creation input

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::{required_text, ValidationError};

/// Course record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Course {
    pub id: i32,
    pub course_code: String,
    pub course_name: String,
    pub course_description: String,
    pub credits: i32,
    pub instructor: String,
    pub semester: String,
    pub time_slot: String,
    pub course_location: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a course.
///
/// Only `course_code` and `course_name` are required; the remaining
/// labels default to empty strings and credits to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCourse {
    pub course_code: String,
    pub course_name: String,
    pub course_description: String,
    pub credits: i32,
    pub instructor: String,
    pub semester: String,
    pub time_slot: String,
    pub course_location: String,
}

impl NewCourse {
    /// Validate the required fields.
    ///
    /// # Example
    /// ```
    /// use coursectl_server::models::NewCourse;
    ///
    /// let course = NewCourse::new("C1", "N1").unwrap().with_credits(3);
    /// assert_eq!(course.credits, 3);
    /// assert!(NewCourse::new("", "N1").is_err());
    /// ```
    pub fn new(course_code: &str, course_name: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            course_code: required_text(course_code, "course_code")?,
            course_name: required_text(course_name, "course_name")?,
            ..Self::default()
        })
    }

    pub fn with_credits(mut self, credits: i32) -> Self {
        self.credits = credits;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.course_description = description.into();
        self
    }

    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = instructor.into();
        self
    }

    pub fn with_semester(mut self, semester: impl Into<String>) -> Self {
        self.semester = semester.into();
        self
    }

    pub fn with_time_slot(mut self, time_slot: impl Into<String>) -> Self {
        self.time_slot = time_slot.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.course_location = location.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_fields_only() {
        let course = NewCourse::new("COMP1117", "Computer Programming").unwrap();
        assert_eq!(course.course_code, "COMP1117");
        assert_eq!(course.credits, 0);
        assert!(course.instructor.is_empty());
    }

    #[test]
    fn builder_fills_optional_fields() {
        let course = NewCourse::new("COMP3234", "Database Systems")
            .unwrap()
            .with_credits(3)
            .with_instructor("Prof. Wang")
            .with_semester("2024 Spring")
            .with_time_slot("Fri 10:00-13:00")
            .with_location("CYC LT3");
        assert_eq!(course.instructor, "Prof. Wang");
        assert_eq!(course.course_location, "CYC LT3");
    }

    #[test]
    fn rejects_missing_code_or_name() {
        assert!(matches!(
            NewCourse::new(" ", "Name").unwrap_err(),
            ValidationError::Empty { field: "course_code" }
        ));
        assert!(matches!(
            NewCourse::new("C1", "").unwrap_err(),
            ValidationError::Empty { field: "course_name" }
        ));
    }

    #[test]
    fn credits_and_long_codes_are_stored_as_given() {
        let code = "C".repeat(40);
        let course = NewCourse::new(&code, "N1").unwrap().with_credits(-1);
        assert_eq!(course.course_code, code);
        assert_eq!(course.credits, -1);
    }
}
