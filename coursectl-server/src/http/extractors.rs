//! Custom Axum extractors

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::ValidationError;

fn parse_id(raw: &str, field: &'static str) -> Result<i32, ApiError> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::Validation(ValidationError::InvalidFormat {
            field,
            reason: "must be a positive integer",
        })),
    }
}

/// Extract and validate a single positive integer id from path
pub struct ValidId(pub i32);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        Ok(Self(parse_id(&id, "id")?))
    }
}

/// Extract `/students/{student_id}/courses/{course_id}` style id pairs
pub struct StudentCourseIds {
    pub student_id: i32,
    pub course_id: i32,
}

impl<S> FromRequestParts<S> for StudentCourseIds
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((student, course)): Path<(String, String)> =
            Path::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        Ok(Self {
            student_id: parse_id(&student, "student id")?,
            course_id: parse_id(&course, "course id")?,
        })
    }
}

/// JSON body whose parse failures become JSON validation errors
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e: JsonRejection| {
                tracing::debug!(error = %e, "rejected request body");
                ApiError::Validation(ValidationError::InvalidFormat {
                    field: "body",
                    reason: "request body must be a valid JSON object",
                })
            })?;
        Ok(Self(value))
    }
}

/// Query string whose parse failures become JSON validation errors
pub struct ValidQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e: QueryRejection| {
                tracing::debug!(error = %e, "rejected query string");
                ApiError::Validation(ValidationError::InvalidFormat {
                    field: "query",
                    reason: "query string is malformed",
                })
            })?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_ids() {
        assert_eq!(parse_id("1", "id").unwrap(), 1);
        assert_eq!(parse_id("999999", "id").unwrap(), 999999);
    }

    #[test]
    fn rejects_zero_negative_and_garbage() {
        for raw in ["0", "-3", "abc", "", "1.5", "99999999999"] {
            assert!(parse_id(raw, "id").is_err(), "{raw} should be rejected");
        }
    }
}
