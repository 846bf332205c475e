//! Enrollment rules
//!
//! Enrolling checks, in order: student exists, course exists, pair not
//! already enrolled. The order fixes which error a caller sees when more
//! than one check would fail.
//!
//! The duplicate check is a fast path only. Two concurrent requests can both
//! pass it; the UNIQUE (student_id, course_id) constraint rejects the second
//! insert, which is reported as the same `Conflict`.

use crate::db::CourseStore;
use crate::models::Enrollment;

use super::{DomainError, EntityKind};

const ALREADY_ENROLLED: &str = "student is already enrolled in this course";

/// Enroll a student in a course.
pub async fn enroll_student_in_course(
    store: &dyn CourseStore,
    student_id: i32,
    course_id: i32,
) -> Result<Enrollment, DomainError> {
    if !store.student_exists(student_id).await? {
        return Err(DomainError::not_found(EntityKind::Student, student_id));
    }

    if !store.course_exists(course_id).await? {
        return Err(DomainError::not_found(EntityKind::Course, course_id));
    }

    if store.is_enrolled(student_id, course_id).await? {
        return Err(DomainError::Conflict {
            message: ALREADY_ENROLLED.to_owned(),
        });
    }

    let enrollment = store
        .insert_enrollment(student_id, course_id)
        .await
        .map_err(|e| {
            if e.is_conflict() {
                tracing::debug!(student_id, course_id, "lost enrollment race to a concurrent insert");
                DomainError::Conflict {
                    message: ALREADY_ENROLLED.to_owned(),
                }
            } else {
                DomainError::from(e)
            }
        })?;

    tracing::info!(student_id, course_id, "student enrolled");
    Ok(enrollment)
}

/// Remove a single enrollment. Nothing to remove is `NotFound(enrollment)`.
pub async fn unenroll_student_from_course(
    store: &dyn CourseStore,
    student_id: i32,
    course_id: i32,
) -> Result<(), DomainError> {
    let removed = store.delete_enrollment(student_id, course_id).await?;

    if removed == 0 {
        return Err(DomainError::not_found(
            EntityKind::Enrollment,
            format!("student {} in course {}", student_id, course_id),
        ));
    }

    tracing::info!(student_id, course_id, "student unenrolled");
    Ok(())
}

/// Remove every enrollment of an existing course, returning how many went.
///
/// Zero matching rows is still success.
pub async fn remove_all_enrollments_for_course(
    store: &dyn CourseStore,
    course_id: i32,
) -> Result<u64, DomainError> {
    if !store.course_exists(course_id).await? {
        return Err(DomainError::not_found(EntityKind::Course, course_id));
    }

    let removed = store.delete_course_enrollments(course_id).await?;
    tracing::info!(course_id, removed, "course enrollments cleared");
    Ok(removed)
}
