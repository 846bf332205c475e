//! Enrollment records and aggregate counts

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Enrollment record from database (one row of `student_courses`)
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Enrollment {
    pub id: i32,
    pub student_id: i32,
    pub course_id: i32,
    pub enrolled_at: DateTime<Utc>,
}

/// Row counts per table, for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DataStats {
    pub students: i64,
    pub courses: i64,
    #[serde(rename = "student_courses")]
    pub enrollments: i64,
}

impl DataStats {
    /// True when either the student or the course table has no rows.
    pub fn needs_sample_data(&self) -> bool {
        self.students == 0 || self.courses == 0
    }
}
