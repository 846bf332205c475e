//! Store trait - the persistence seam
//!
//! Handlers and domain operations only see `dyn CourseStore`:
//! - `PgStore` for the real database
//! - `MemoryStore` for tests and database-less runs
//!
//! Lookups return `Ok(None)` for a missing row so "not found" never looks
//! like a query failure.

use async_trait::async_trait;

use super::DbError;
use crate::models::{Course, DataStats, Enrollment, NewCourse, NewStudent, SearchKeyword, Student};

/// Persistence operations for students, courses, and enrollments
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// All students, ordered by name.
    async fn list_students(&self) -> Result<Vec<Student>, DbError>;

    async fn get_student(&self, id: i32) -> Result<Option<Student>, DbError>;

    /// Insert a student. Duplicate email returns `DbError::Conflict`.
    async fn insert_student(&self, student: &NewStudent) -> Result<Student, DbError>;

    async fn student_exists(&self, id: i32) -> Result<bool, DbError>;

    /// All courses, ordered by code then semester.
    async fn list_courses(&self) -> Result<Vec<Course>, DbError>;

    async fn get_course(&self, id: i32) -> Result<Option<Course>, DbError>;

    /// Insert a course. Duplicate course code returns `DbError::Conflict`.
    async fn insert_course(&self, course: &NewCourse) -> Result<Course, DbError>;

    async fn course_exists(&self, id: i32) -> Result<bool, DbError>;

    /// Case-insensitive substring match on name, code, or instructor,
    /// ordered by code.
    async fn search_courses(&self, keyword: &SearchKeyword) -> Result<Vec<Course>, DbError>;

    /// Courses the student is enrolled in, ordered by code then semester.
    async fn student_courses(&self, student_id: i32) -> Result<Vec<Course>, DbError>;

    async fn is_enrolled(&self, student_id: i32, course_id: i32) -> Result<bool, DbError>;

    /// Insert an enrollment row. An existing (student, course) pair returns
    /// `DbError::Conflict`, even when callers already checked.
    async fn insert_enrollment(&self, student_id: i32, course_id: i32)
        -> Result<Enrollment, DbError>;

    /// Delete one enrollment, returning the number of rows removed.
    async fn delete_enrollment(&self, student_id: i32, course_id: i32) -> Result<u64, DbError>;

    /// Delete every enrollment for a course, returning the number removed.
    async fn delete_course_enrollments(&self, course_id: i32) -> Result<u64, DbError>;

    async fn stats(&self) -> Result<DataStats, DbError>;

    /// Insert a whole batch atomically: either every row lands or none does.
    async fn seed(&self, batch: &SeedBatch) -> Result<(), DbError>;

    /// Remove all rows and restart id counters at 1, atomically.
    async fn clear_all(&self) -> Result<(), DbError>;
}

/// A batch of rows inserted together by [`CourseStore::seed`].
///
/// Enrollments are `(student, course)` pairs of 1-based positions into
/// `students` and `courses`, resolved to ids as the rows are inserted.
#[derive(Debug, Clone, Default)]
pub struct SeedBatch {
    pub students: Vec<NewStudent>,
    pub courses: Vec<NewCourse>,
    pub enrollments: Vec<(usize, usize)>,
}

impl SeedBatch {
    /// Check every enrollment position before anything is written.
    pub fn validate(&self) -> Result<(), DbError> {
        for &(student, course) in &self.enrollments {
            if student == 0 || student > self.students.len() {
                return Err(DbError::InvalidSeed(format!(
                    "student position {} out of range 1..={}",
                    student,
                    self.students.len()
                )));
            }
            if course == 0 || course > self.courses.len() {
                return Err(DbError::InvalidSeed(format!(
                    "course position {} out of range 1..={}",
                    course,
                    self.courses.len()
                )));
            }
        }
        Ok(())
    }

    /// Map a 1-based position to the id assigned at insert time.
    pub(crate) fn resolve(ids: &[i32], position: usize) -> Result<i32, DbError> {
        position
            .checked_sub(1)
            .and_then(|i| ids.get(i))
            .copied()
            .ok_or_else(|| DbError::InvalidSeed(format!("position {} has no inserted row", position)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(enrollments: Vec<(usize, usize)>) -> SeedBatch {
        SeedBatch {
            students: vec![NewStudent::new("a@x.com", "A").unwrap()],
            courses: vec![
                NewCourse::new("C1", "N1").unwrap(),
                NewCourse::new("C2", "N2").unwrap(),
            ],
            enrollments,
        }
    }

    #[test]
    fn valid_positions() {
        assert!(batch(vec![(1, 1), (1, 2)]).validate().is_ok());
    }

    #[test]
    fn rejects_zero_and_out_of_range() {
        assert!(batch(vec![(0, 1)]).validate().is_err());
        assert!(batch(vec![(2, 1)]).validate().is_err());
        assert!(batch(vec![(1, 3)]).validate().is_err());
    }

    #[test]
    fn resolve_is_one_based() {
        let ids = [10, 20, 30];
        assert_eq!(SeedBatch::resolve(&ids, 1).unwrap(), 10);
        assert_eq!(SeedBatch::resolve(&ids, 3).unwrap(), 30);
        assert!(SeedBatch::resolve(&ids, 0).is_err());
        assert!(SeedBatch::resolve(&ids, 4).is_err());
    }
}
