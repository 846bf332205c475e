//! Student endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::domain::{self, StudentWithCourses};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::{Course, NewStudent, Student};

/// Create student request
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateStudentRequest {
    pub name: String,
    pub email: String,
}

/// Student response
#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<Student> for StudentResponse {
    fn from(s: Student) -> Self {
        Self {
            id: s.id,
            name: s.username,
            email: s.email,
        }
    }
}

/// One of a student's enrolled courses
#[derive(Debug, Serialize)]
pub struct EnrolledCourse {
    pub course_id: i32,
    pub course_code: String,
    pub course_name: String,
}

impl From<Course> for EnrolledCourse {
    fn from(c: Course) -> Self {
        Self {
            course_id: c.id,
            course_code: c.course_code,
            course_name: c.course_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StudentsResponse {
    pub students: Vec<StudentResponse>,
}

#[derive(Debug, Serialize)]
pub struct StudentCoursesResponse {
    pub student: StudentResponse,
    pub courses: Vec<EnrolledCourse>,
    pub total_count: usize,
}

impl From<StudentWithCourses> for StudentCoursesResponse {
    fn from(detail: StudentWithCourses) -> Self {
        let courses: Vec<EnrolledCourse> = detail.courses.into_iter().map(EnrolledCourse::from).collect();
        Self {
            student: StudentResponse::from(detail.student),
            total_count: courses.len(),
            courses,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateStudentResponse {
    pub student: StudentResponse,
    pub message: &'static str,
}

/// GET /students - list all students
async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StudentsResponse>, ApiError> {
    let students = domain::list_students(state.store.as_ref()).await?;
    Ok(Json(StudentsResponse {
        students: students.into_iter().map(StudentResponse::from).collect(),
    }))
}

/// POST /students - create a student
async fn create_student(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateStudentRequest>,
) -> Result<(StatusCode, Json<CreateStudentResponse>), ApiError> {
    let new_student = NewStudent::new(&req.email, &req.name)?;
    let student = domain::create_student(state.store.as_ref(), new_student).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateStudentResponse {
            student: StudentResponse::from(student),
            message: "student created",
        }),
    ))
}

/// GET /student/{id} - a student and their courses
async fn get_student_courses(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<StudentCoursesResponse>, ApiError> {
    let detail = domain::student_with_courses(state.store.as_ref(), id).await?;
    Ok(Json(StudentCoursesResponse::from(detail)))
}

/// Student routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route("/student/{id}", get(get_student_courses))
}
