//! Student and course catalog operations

use crate::db::CourseStore;
use crate::models::{Course, NewCourse, NewStudent, SearchKeyword, Student};

use super::{DomainError, EntityKind};

/// A student together with the courses they're enrolled in
#[derive(Debug, Clone)]
pub struct StudentWithCourses {
    pub student: Student,
    pub courses: Vec<Course>,
}

pub async fn list_students(store: &dyn CourseStore) -> Result<Vec<Student>, DomainError> {
    Ok(store.list_students().await?)
}

pub async fn list_courses(store: &dyn CourseStore) -> Result<Vec<Course>, DomainError> {
    Ok(store.list_courses().await?)
}

pub async fn get_student(store: &dyn CourseStore, id: i32) -> Result<Student, DomainError> {
    store
        .get_student(id)
        .await?
        .ok_or_else(|| DomainError::not_found(EntityKind::Student, id))
}

pub async fn get_course(store: &dyn CourseStore, id: i32) -> Result<Course, DomainError> {
    store
        .get_course(id)
        .await?
        .ok_or_else(|| DomainError::not_found(EntityKind::Course, id))
}

/// Create a student. A taken email surfaces as `DomainError::Conflict`.
pub async fn create_student(
    store: &dyn CourseStore,
    student: NewStudent,
) -> Result<Student, DomainError> {
    let created = store.insert_student(&student).await?;
    tracing::info!(student_id = created.id, email = %created.email, "student created");
    Ok(created)
}

/// Create a course. A taken course code surfaces as `DomainError::Conflict`.
pub async fn create_course(
    store: &dyn CourseStore,
    course: NewCourse,
) -> Result<Course, DomainError> {
    let created = store.insert_course(&course).await?;
    tracing::info!(course_id = created.id, code = %created.course_code, "course created");
    Ok(created)
}

pub async fn search_courses(
    store: &dyn CourseStore,
    keyword: &SearchKeyword,
) -> Result<Vec<Course>, DomainError> {
    Ok(store.search_courses(keyword).await?)
}

/// Fetch a student and their enrolled courses.
pub async fn student_with_courses(
    store: &dyn CourseStore,
    student_id: i32,
) -> Result<StudentWithCourses, DomainError> {
    let student = get_student(store, student_id).await?;
    let courses = store.student_courses(student_id).await?;
    Ok(StudentWithCourses { student, courses })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let store = MemoryStore::new();

        let err = get_student(&store, 42).await.unwrap_err();
        assert_eq!(err.not_found_kind(), Some(EntityKind::Student));

        let err = get_course(&store, 42).await.unwrap_err();
        assert_eq!(err.not_found_kind(), Some(EntityKind::Course));

        let err = student_with_courses(&store, 42).await.unwrap_err();
        assert_eq!(err.not_found_kind(), Some(EntityKind::Student));
    }

    #[tokio::test]
    async fn duplicate_student_email_is_conflict() {
        let store = MemoryStore::new();
        let student = NewStudent::new("a@x.com", "A").unwrap();

        create_student(&store, student.clone()).await.unwrap();
        let err = create_student(&store, student).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn created_course_round_trips() {
        let store = MemoryStore::new();
        let created = create_course(
            &store,
            NewCourse::new("C1", "N1").unwrap().with_credits(3),
        )
        .await
        .unwrap();

        let fetched = get_course(&store, created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.credits, 3);
    }

    #[tokio::test]
    async fn student_without_enrollments_has_no_courses() {
        let store = MemoryStore::new();
        let student = create_student(&store, NewStudent::new("a@x.com", "A").unwrap())
            .await
            .unwrap();

        let detail = student_with_courses(&store, student.id).await.unwrap();
        assert_eq!(detail.student.id, student.id);
        assert!(detail.courses.is_empty());
    }
}
