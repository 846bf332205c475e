//! Enrollment endpoints
//!
//! Enroll and unenroll report every rule violation as 400 with the domain
//! message. Clearing a course's enrollments reports a missing course as 404.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, post},
    Json, Router,
};

use super::MessageResponse;
use crate::domain;
use crate::http::error::ApiError;
use crate::http::extractors::{StudentCourseIds, ValidId};
use crate::http::server::AppState;

/// POST /students/{student_id}/courses/{course_id} - enroll
async fn enroll(
    State(state): State<Arc<AppState>>,
    ids: StudentCourseIds,
) -> Result<Json<MessageResponse>, ApiError> {
    domain::enroll_student_in_course(state.store.as_ref(), ids.student_id, ids.course_id)
        .await
        .map_err(ApiError::rejected)?;

    Ok(Json(MessageResponse::new("enrolled successfully")))
}

/// DELETE /students/{student_id}/courses/{course_id} - unenroll
async fn unenroll(
    State(state): State<Arc<AppState>>,
    ids: StudentCourseIds,
) -> Result<Json<MessageResponse>, ApiError> {
    domain::unenroll_student_from_course(state.store.as_ref(), ids.student_id, ids.course_id)
        .await
        .map_err(ApiError::rejected)?;

    Ok(Json(MessageResponse::new("unenrolled successfully")))
}

/// DELETE /courses/{course_id}/students - remove every student from a course
async fn clear_course(
    State(state): State<Arc<AppState>>,
    ValidId(course_id): ValidId,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = domain::remove_all_enrollments_for_course(state.store.as_ref(), course_id).await?;

    Ok(Json(MessageResponse::new(format!(
        "removed {} student(s) from course {}",
        removed, course_id
    ))))
}

/// Enrollment routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/students/{student_id}/courses/{course_id}",
            post(enroll).delete(unenroll),
        )
        .route("/courses/{course_id}/students", delete(clear_course))
}
