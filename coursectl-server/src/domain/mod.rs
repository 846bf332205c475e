//! Domain operations over an injected `CourseStore`
//!
//! - `catalog`: create/list/get/search for students and courses
//! - `enrollment`: enrollment invariants (existence, no duplicates)
//! - `seed`: fixed sample dataset, idempotent initialization, reset

pub mod catalog;
pub mod enrollment;
pub mod error;
pub mod seed;

pub use catalog::{
    create_course, create_student, get_course, get_student, list_courses, list_students,
    search_courses, student_with_courses, StudentWithCourses,
};
pub use enrollment::{
    enroll_student_in_course, remove_all_enrollments_for_course, unenroll_student_from_course,
};
pub use error::{DomainError, EntityKind};
pub use seed::{clear_all_data, initialize_sample_data, reset_sample_data, sample_batch, SeedOutcome};
