//! In-memory store
//!
//! Same contract as `PgStore`, including the unique keys (email, course
//! code, student/course pair) and all-or-nothing seeding. Used by tests and
//! by `coursectl serve --in-memory`.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{CourseStore, DbError, SeedBatch};
use crate::models::{Course, DataStats, Enrollment, NewCourse, NewStudent, SearchKeyword, Student};

/// Store that keeps every table in process memory
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Counter standing in for a SERIAL sequence
#[derive(Debug, Clone, Default)]
struct Sequence(i32);

impl Sequence {
    fn next(&mut self) -> i32 {
        self.0 += 1;
        self.0
    }
}

#[derive(Debug, Clone, Default)]
struct Tables {
    students: Vec<Student>,
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
    student_seq: Sequence,
    course_seq: Sequence,
    enrollment_seq: Sequence,
}

impl Tables {
    fn insert_student(&mut self, new: &NewStudent) -> Result<Student, DbError> {
        if self.students.iter().any(|s| s.email == new.email.as_str()) {
            return Err(DbError::Conflict {
                resource: "student",
                key: new.email.as_str().to_owned(),
            });
        }

        let student = Student {
            id: self.student_seq.next(),
            email: new.email.as_str().to_owned(),
            username: new.username.clone(),
            created_at: Utc::now(),
        };
        self.students.push(student.clone());
        Ok(student)
    }

    fn insert_course(&mut self, new: &NewCourse) -> Result<Course, DbError> {
        if self.courses.iter().any(|c| c.course_code == new.course_code) {
            return Err(DbError::Conflict {
                resource: "course",
                key: new.course_code.clone(),
            });
        }

        let course = Course {
            id: self.course_seq.next(),
            course_code: new.course_code.clone(),
            course_name: new.course_name.clone(),
            course_description: new.course_description.clone(),
            credits: new.credits,
            instructor: new.instructor.clone(),
            semester: new.semester.clone(),
            time_slot: new.time_slot.clone(),
            course_location: new.course_location.clone(),
            created_at: Utc::now(),
        };
        self.courses.push(course.clone());
        Ok(course)
    }

    fn insert_enrollment(&mut self, student_id: i32, course_id: i32) -> Result<Enrollment, DbError> {
        if self.is_enrolled(student_id, course_id) {
            return Err(DbError::Conflict {
                resource: "enrollment",
                key: format!("student {} in course {}", student_id, course_id),
            });
        }

        let enrollment = Enrollment {
            id: self.enrollment_seq.next(),
            student_id,
            course_id,
            enrolled_at: Utc::now(),
        };
        self.enrollments.push(enrollment.clone());
        Ok(enrollment)
    }

    fn is_enrolled(&self, student_id: i32, course_id: i32) -> bool {
        self.enrollments
            .iter()
            .any(|e| e.student_id == student_id && e.course_id == course_id)
    }
}

fn sort_courses(courses: &mut [Course]) {
    courses.sort_by(|a, b| {
        a.course_code
            .cmp(&b.course_code)
            .then_with(|| a.semester.cmp(&b.semester))
    });
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn list_students(&self) -> Result<Vec<Student>, DbError> {
        let mut students = self.tables.lock().await.students.clone();
        students.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(students)
    }

    async fn get_student(&self, id: i32) -> Result<Option<Student>, DbError> {
        let tables = self.tables.lock().await;
        Ok(tables.students.iter().find(|s| s.id == id).cloned())
    }

    async fn insert_student(&self, student: &NewStudent) -> Result<Student, DbError> {
        self.tables.lock().await.insert_student(student)
    }

    async fn student_exists(&self, id: i32) -> Result<bool, DbError> {
        Ok(self.tables.lock().await.students.iter().any(|s| s.id == id))
    }

    async fn list_courses(&self) -> Result<Vec<Course>, DbError> {
        let mut courses = self.tables.lock().await.courses.clone();
        sort_courses(&mut courses);
        Ok(courses)
    }

    async fn get_course(&self, id: i32) -> Result<Option<Course>, DbError> {
        let tables = self.tables.lock().await;
        Ok(tables.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn insert_course(&self, course: &NewCourse) -> Result<Course, DbError> {
        self.tables.lock().await.insert_course(course)
    }

    async fn course_exists(&self, id: i32) -> Result<bool, DbError> {
        Ok(self.tables.lock().await.courses.iter().any(|c| c.id == id))
    }

    async fn search_courses(&self, keyword: &SearchKeyword) -> Result<Vec<Course>, DbError> {
        let tables = self.tables.lock().await;
        let mut courses: Vec<Course> = tables
            .courses
            .iter()
            .filter(|c| {
                keyword.matches_any(&[
                    c.course_name.as_str(),
                    c.course_code.as_str(),
                    c.instructor.as_str(),
                ])
            })
            .cloned()
            .collect();
        courses.sort_by(|a, b| a.course_code.cmp(&b.course_code));
        Ok(courses)
    }

    async fn student_courses(&self, student_id: i32) -> Result<Vec<Course>, DbError> {
        let tables = self.tables.lock().await;
        let mut courses: Vec<Course> = tables
            .courses
            .iter()
            .filter(|c| tables.is_enrolled(student_id, c.id))
            .cloned()
            .collect();
        sort_courses(&mut courses);
        Ok(courses)
    }

    async fn is_enrolled(&self, student_id: i32, course_id: i32) -> Result<bool, DbError> {
        Ok(self.tables.lock().await.is_enrolled(student_id, course_id))
    }

    async fn insert_enrollment(
        &self,
        student_id: i32,
        course_id: i32,
    ) -> Result<Enrollment, DbError> {
        self.tables.lock().await.insert_enrollment(student_id, course_id)
    }

    async fn delete_enrollment(&self, student_id: i32, course_id: i32) -> Result<u64, DbError> {
        let mut tables = self.tables.lock().await;
        let before = tables.enrollments.len();
        tables
            .enrollments
            .retain(|e| !(e.student_id == student_id && e.course_id == course_id));
        Ok((before - tables.enrollments.len()) as u64)
    }

    async fn delete_course_enrollments(&self, course_id: i32) -> Result<u64, DbError> {
        let mut tables = self.tables.lock().await;
        let before = tables.enrollments.len();
        tables.enrollments.retain(|e| e.course_id != course_id);
        Ok((before - tables.enrollments.len()) as u64)
    }

    async fn stats(&self) -> Result<DataStats, DbError> {
        let tables = self.tables.lock().await;
        Ok(DataStats {
            students: tables.students.len() as i64,
            courses: tables.courses.len() as i64,
            enrollments: tables.enrollments.len() as i64,
        })
    }

    async fn seed(&self, batch: &SeedBatch) -> Result<(), DbError> {
        batch.validate()?;

        let mut tables = self.tables.lock().await;

        // Work on a copy and swap it in only when every insert succeeded
        let mut staged = tables.clone();

        let mut student_ids = Vec::with_capacity(batch.students.len());
        for student in &batch.students {
            student_ids.push(staged.insert_student(student)?.id);
        }

        let mut course_ids = Vec::with_capacity(batch.courses.len());
        for course in &batch.courses {
            course_ids.push(staged.insert_course(course)?.id);
        }

        for &(student, course) in &batch.enrollments {
            let student_id = SeedBatch::resolve(&student_ids, student)?;
            let course_id = SeedBatch::resolve(&course_ids, course)?;
            staged.insert_enrollment(student_id, course_id)?;
        }

        *tables = staged;
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), DbError> {
        *self.tables.lock().await = Tables::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_student(email: &str, name: &str) -> NewStudent {
        NewStudent::new(email, name).unwrap()
    }

    #[tokio::test]
    async fn ids_start_at_one() {
        let store = MemoryStore::new();
        let a = store.insert_student(&new_student("a@x.com", "A")).await.unwrap();
        let b = store.insert_student(&new_student("b@x.com", "B")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let store = MemoryStore::new();
        store.insert_student(&new_student("a@x.com", "A")).await.unwrap();
        let err = store
            .insert_student(&new_student("a@x.com", "Other"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Conflict { resource: "student", .. }));
    }

    #[tokio::test]
    async fn duplicate_course_code_is_conflict() {
        let store = MemoryStore::new();
        let course = NewCourse::new("C1", "N1").unwrap();
        store.insert_course(&course).await.unwrap();
        let err = store.insert_course(&course).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { resource: "course", .. }));
    }

    #[tokio::test]
    async fn enrollment_pair_is_unique() {
        let store = MemoryStore::new();
        store.insert_enrollment(1, 1).await.unwrap();
        let err = store.insert_enrollment(1, 1).await.unwrap_err();
        assert!(err.is_conflict());
        assert!(store.insert_enrollment(1, 2).await.is_ok());
    }

    #[tokio::test]
    async fn students_sorted_by_name() {
        let store = MemoryStore::new();
        store.insert_student(&new_student("c@x.com", "Carol")).await.unwrap();
        store.insert_student(&new_student("a@x.com", "Alice")).await.unwrap();
        store.insert_student(&new_student("b@x.com", "Bob")).await.unwrap();

        let names: Vec<_> = store
            .list_students()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.username)
            .collect();
        assert_eq!(names, ["Alice", "Bob", "Carol"]);
    }

    #[tokio::test]
    async fn search_matches_name_code_and_instructor() {
        let store = MemoryStore::new();
        let courses = [
            NewCourse::new("COMP3234", "Database Systems").unwrap().with_instructor("Prof. Wang"),
            NewCourse::new("MATH1013", "Calculus").unwrap().with_instructor("Prof. Yang"),
            NewCourse::new("COMP1117", "Programming").unwrap().with_instructor("Prof. Chen"),
        ];
        for course in &courses {
            store.insert_course(course).await.unwrap();
        }

        let codes = |found: Vec<Course>| found.into_iter().map(|c| c.course_code).collect::<Vec<_>>();

        let by_code = store.search_courses(&SearchKeyword::new("comp").unwrap()).await.unwrap();
        assert_eq!(codes(by_code), ["COMP1117", "COMP3234"]);

        let by_name = store.search_courses(&SearchKeyword::new("CALC").unwrap()).await.unwrap();
        assert_eq!(codes(by_name), ["MATH1013"]);

        let by_instructor = store.search_courses(&SearchKeyword::new("wang").unwrap()).await.unwrap();
        assert_eq!(codes(by_instructor), ["COMP3234"]);
    }

    #[tokio::test]
    async fn search_wildcards_behave_like_ilike() {
        let store = MemoryStore::new();
        for (code, name) in [("COMP3234", "Database Systems"), ("MATH1013", "Calculus")] {
            store.insert_course(&NewCourse::new(code, name).unwrap()).await.unwrap();
        }

        let everything = store.search_courses(&SearchKeyword::new("%").unwrap()).await.unwrap();
        assert_eq!(everything.len(), 2);

        let one_char = store.search_courses(&SearchKeyword::new("math_0").unwrap()).await.unwrap();
        assert_eq!(one_char.len(), 1);
        assert_eq!(one_char[0].course_code, "MATH1013");
    }

    #[tokio::test]
    async fn failed_seed_keeps_previous_state() {
        let store = MemoryStore::new();
        store.insert_student(&new_student("keep@x.com", "Keep")).await.unwrap();

        let batch = SeedBatch {
            students: vec![new_student("a@x.com", "A"), new_student("keep@x.com", "Dup")],
            courses: vec![NewCourse::new("C1", "N1").unwrap()],
            enrollments: vec![(1, 1)],
        };

        assert!(store.seed(&batch).await.is_err());
        let stats = store.stats().await.unwrap();
        assert_eq!(stats, DataStats { students: 1, courses: 0, enrollments: 0 });
    }

    #[tokio::test]
    async fn clear_all_resets_sequences() {
        let store = MemoryStore::new();
        store.insert_student(&new_student("a@x.com", "A")).await.unwrap();
        store.insert_student(&new_student("b@x.com", "B")).await.unwrap();
        store.clear_all().await.unwrap();

        let again = store.insert_student(&new_student("c@x.com", "C")).await.unwrap();
        assert_eq!(again.id, 1);
        assert_eq!(store.stats().await.unwrap().students, 1);
    }
}
