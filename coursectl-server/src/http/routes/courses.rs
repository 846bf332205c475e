//! Course endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::domain;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson, ValidQuery};
use crate::http::server::AppState;
use crate::models::{Course, NewCourse, SearchKeyword};

/// Create course request. Only code and name are required.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateCourseRequest {
    pub course_code: String,
    pub course_name: String,
    pub course_description: String,
    pub credits: i32,
    pub instructor: String,
    pub semester: String,
    pub time_slot: String,
    pub course_location: String,
}

impl CreateCourseRequest {
    fn into_new_course(self) -> Result<NewCourse, ApiError> {
        Ok(NewCourse::new(&self.course_code, &self.course_name)?
            .with_credits(self.credits)
            .with_description(self.course_description)
            .with_instructor(self.instructor)
            .with_semester(self.semester)
            .with_time_slot(self.time_slot)
            .with_location(self.course_location))
    }
}

/// Course summary for lists
#[derive(Debug, Serialize)]
pub struct CourseSummary {
    pub id: i32,
    pub course_code: String,
    pub course_name: String,
}

impl From<Course> for CourseSummary {
    fn from(c: Course) -> Self {
        Self {
            id: c.id,
            course_code: c.course_code,
            course_name: c.course_name,
        }
    }
}

/// Full course detail
#[derive(Debug, Serialize)]
pub struct CourseDetail {
    pub id: i32,
    pub course_code: String,
    pub course_name: String,
    pub course_description: String,
    pub credits: i32,
    pub instructor: String,
    pub semester: String,
    pub time_slot: String,
    pub course_location: String,
}

impl From<Course> for CourseDetail {
    fn from(c: Course) -> Self {
        Self {
            id: c.id,
            course_code: c.course_code,
            course_name: c.course_name,
            course_description: c.course_description,
            credits: c.credits,
            instructor: c.instructor,
            semester: c.semester,
            time_slot: c.time_slot,
            course_location: c.course_location,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CoursesResponse {
    pub courses: Vec<CourseSummary>,
}

impl CoursesResponse {
    fn from_courses(courses: Vec<Course>) -> Self {
        Self {
            courses: courses.into_iter().map(CourseSummary::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CourseDetailResponse {
    pub course: CourseDetail,
}

#[derive(Debug, Serialize)]
pub struct CreateCourseResponse {
    pub course: CourseSummary,
    pub message: &'static str,
}

/// Query parameters for search
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub keyword: Option<String>,
}

/// GET /courses - list all courses
async fn list_courses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CoursesResponse>, ApiError> {
    let courses = domain::list_courses(state.store.as_ref()).await?;
    Ok(Json(CoursesResponse::from_courses(courses)))
}

/// POST /courses - create a course
async fn create_course(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CreateCourseResponse>), ApiError> {
    let new_course = req.into_new_course()?;
    let course = domain::create_course(state.store.as_ref(), new_course).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCourseResponse {
            course: CourseSummary::from(course),
            message: "course created",
        }),
    ))
}

/// GET /course/{id} - course detail
async fn get_course(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<CourseDetailResponse>, ApiError> {
    let course = domain::get_course(state.store.as_ref(), id).await?;
    Ok(Json(CourseDetailResponse {
        course: CourseDetail::from(course),
    }))
}

/// GET /course/search?keyword= - substring search on name, code, instructor
async fn search_courses(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<SearchParams>,
) -> Result<Json<CoursesResponse>, ApiError> {
    let keyword = SearchKeyword::new(params.keyword.as_deref().unwrap_or_default())?;
    let courses = domain::search_courses(state.store.as_ref(), &keyword).await?;
    Ok(Json(CoursesResponse::from_courses(courses)))
}

/// Course routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/courses", get(list_courses).post(create_course))
        .route("/course/search", get(search_courses))
        .route("/course/{id}", get(get_course))
}
