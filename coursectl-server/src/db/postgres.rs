//! PostgreSQL store
//!
//! All queries are parameterized. Unique violations are reported as
//! `DbError::Conflict`; the (student_id, course_id) constraint rejects the
//! losing side of concurrent enrollments.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{CourseStore, DbError, SeedBatch};
use crate::models::{Course, DataStats, Enrollment, NewCourse, NewStudent, SearchKeyword, Student};

/// Store backed by a sqlx connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CourseStore for PgStore {
    async fn list_students(&self) -> Result<Vec<Student>, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, email, username, created_at
            FROM students
            ORDER BY username
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::query("list students"))
    }

    async fn get_student(&self, id: i32) -> Result<Option<Student>, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, email, username, created_at
            FROM students
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::query("get student"))
    }

    async fn insert_student(&self, student: &NewStudent) -> Result<Student, DbError> {
        sqlx::query_as(
            r#"
            INSERT INTO students (email, username)
            VALUES ($1, $2)
            RETURNING id, email, username, created_at
            "#,
        )
        .bind(student.email.as_str())
        .bind(&student.username)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::on_insert("insert student", "student", student.email.as_str()))
    }

    async fn student_exists(&self, id: i32) -> Result<bool, DbError> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::query("check student exists"))?;
        Ok(exists.0)
    }

    async fn list_courses(&self) -> Result<Vec<Course>, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, course_code, course_name, course_description,
                   credits, instructor, semester, time_slot, course_location, created_at
            FROM courses
            ORDER BY course_code, semester
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::query("list courses"))
    }

    async fn get_course(&self, id: i32) -> Result<Option<Course>, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, course_code, course_name, course_description,
                   credits, instructor, semester, time_slot, course_location, created_at
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::query("get course"))
    }

    async fn insert_course(&self, course: &NewCourse) -> Result<Course, DbError> {
        sqlx::query_as(
            r#"
            INSERT INTO courses (course_code, course_name, course_description, credits,
                                 instructor, semester, time_slot, course_location)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, course_code, course_name, course_description, credits,
                      instructor, semester, time_slot, course_location, created_at
            "#,
        )
        .bind(&course.course_code)
        .bind(&course.course_name)
        .bind(&course.course_description)
        .bind(course.credits)
        .bind(&course.instructor)
        .bind(&course.semester)
        .bind(&course.time_slot)
        .bind(&course.course_location)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::on_insert("insert course", "course", course.course_code.as_str()))
    }

    async fn course_exists(&self, id: i32) -> Result<bool, DbError> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::query("check course exists"))?;
        Ok(exists.0)
    }

    async fn search_courses(&self, keyword: &SearchKeyword) -> Result<Vec<Course>, DbError> {
        // ILIKE wildcards in the keyword are passed through as-is
        sqlx::query_as(
            r#"
            SELECT id, course_code, course_name, course_description,
                   credits, instructor, semester, time_slot, course_location, created_at
            FROM courses
            WHERE course_name ILIKE '%' || $1 || '%'
               OR course_code ILIKE '%' || $1 || '%'
               OR instructor ILIKE '%' || $1 || '%'
            ORDER BY course_code
            "#,
        )
        .bind(keyword.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::query("search courses"))
    }

    async fn student_courses(&self, student_id: i32) -> Result<Vec<Course>, DbError> {
        sqlx::query_as(
            r#"
            SELECT c.id, c.course_code, c.course_name, c.course_description,
                   c.credits, c.instructor, c.semester, c.time_slot, c.course_location, c.created_at
            FROM courses c
            JOIN student_courses sc ON c.id = sc.course_id
            WHERE sc.student_id = $1
            ORDER BY c.course_code, c.semester
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::query("list student courses"))
    }

    async fn is_enrolled(&self, student_id: i32, course_id: i32) -> Result<bool, DbError> {
        let enrolled: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM student_courses WHERE student_id = $1 AND course_id = $2)",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::query("check enrollment"))?;
        Ok(enrolled.0)
    }

    async fn insert_enrollment(
        &self,
        student_id: i32,
        course_id: i32,
    ) -> Result<Enrollment, DbError> {
        sqlx::query_as(
            r#"
            INSERT INTO student_courses (student_id, course_id)
            VALUES ($1, $2)
            RETURNING id, student_id, course_id, enrolled_at
            "#,
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::on_insert(
            "insert enrollment",
            "enrollment",
            format!("student {} in course {}", student_id, course_id),
        ))
    }

    async fn delete_enrollment(&self, student_id: i32, course_id: i32) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM student_courses WHERE student_id = $1 AND course_id = $2")
            .bind(student_id)
            .bind(course_id)
            .execute(&self.pool)
            .await
            .map_err(DbError::query("delete enrollment"))?;
        Ok(result.rows_affected())
    }

    async fn delete_course_enrollments(&self, course_id: i32) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM student_courses WHERE course_id = $1")
            .bind(course_id)
            .execute(&self.pool)
            .await
            .map_err(DbError::query("clear course enrollments"))?;
        Ok(result.rows_affected())
    }

    async fn stats(&self) -> Result<DataStats, DbError> {
        // Single round trip for all three counts
        let (students, courses, enrollments): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM students),
                (SELECT COUNT(*) FROM courses),
                (SELECT COUNT(*) FROM student_courses)
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::query("count rows"))?;

        Ok(DataStats {
            students,
            courses,
            enrollments,
        })
    }

    async fn seed(&self, batch: &SeedBatch) -> Result<(), DbError> {
        batch.validate()?;

        // Dropping the transaction on any early return rolls everything back
        let mut tx = self.pool.begin().await.map_err(DbError::query("begin seed"))?;

        let mut student_ids = Vec::with_capacity(batch.students.len());
        for student in &batch.students {
            let (id,): (i32,) =
                sqlx::query_as("INSERT INTO students (email, username) VALUES ($1, $2) RETURNING id")
                    .bind(student.email.as_str())
                    .bind(&student.username)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(DbError::on_insert("seed student", "student", student.email.as_str()))?;
            student_ids.push(id);
        }

        let mut course_ids = Vec::with_capacity(batch.courses.len());
        for course in &batch.courses {
            let (id,): (i32,) = sqlx::query_as(
                r#"
                INSERT INTO courses (course_code, course_name, course_description, credits,
                                     instructor, semester, time_slot, course_location)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING id
                "#,
            )
            .bind(&course.course_code)
            .bind(&course.course_name)
            .bind(&course.course_description)
            .bind(course.credits)
            .bind(&course.instructor)
            .bind(&course.semester)
            .bind(&course.time_slot)
            .bind(&course.course_location)
            .fetch_one(&mut *tx)
            .await
            .map_err(DbError::on_insert("seed course", "course", course.course_code.as_str()))?;
            course_ids.push(id);
        }

        for &(student, course) in &batch.enrollments {
            let student_id = SeedBatch::resolve(&student_ids, student)?;
            let course_id = SeedBatch::resolve(&course_ids, course)?;

            sqlx::query("INSERT INTO student_courses (student_id, course_id) VALUES ($1, $2)")
                .bind(student_id)
                .bind(course_id)
                .execute(&mut *tx)
                .await
                .map_err(DbError::on_insert(
                    "seed enrollment",
                    "enrollment",
                    format!("student {} in course {}", student_id, course_id),
                ))?;
        }

        tx.commit().await.map_err(DbError::query("commit seed"))?;
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await.map_err(DbError::query("begin clear"))?;

        // Children first, then parents, then sequences
        let statements = [
            "DELETE FROM student_courses",
            "DELETE FROM students",
            "DELETE FROM courses",
            "ALTER SEQUENCE students_id_seq RESTART WITH 1",
            "ALTER SEQUENCE courses_id_seq RESTART WITH 1",
            "ALTER SEQUENCE student_courses_id_seq RESTART WITH 1",
        ];

        for sql in statements {
            sqlx::query(sql)
                .execute(&mut *tx)
                .await
                .map_err(DbError::query("clear all data"))?;
        }

        tx.commit().await.map_err(DbError::query("commit clear"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, schema};

    // Integration tests - run with DATABASE_URL set
    // cargo test -p coursectl-server -- --ignored
    //
    // These tests clear the target database.

    async fn fresh_store() -> PgStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        schema::migrate(&pool).await.expect("migration failed");
        let store = PgStore::new(pool);
        store.clear_all().await.expect("clear failed");
        store
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_email_is_conflict() {
        let store = fresh_store().await;
        let student = NewStudent::new("a@x.com", "A").unwrap();

        store.insert_student(&student).await.unwrap();
        let err = store.insert_student(&student).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn unique_pair_rejects_second_insert() {
        let store = fresh_store().await;
        let student = store
            .insert_student(&NewStudent::new("a@x.com", "A").unwrap())
            .await
            .unwrap();
        let course = store
            .insert_course(&NewCourse::new("C1", "N1").unwrap())
            .await
            .unwrap();

        store.insert_enrollment(student.id, course.id).await.unwrap();
        let err = store.insert_enrollment(student.id, course.id).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn failed_seed_leaves_no_rows() {
        let store = fresh_store().await;
        let batch = SeedBatch {
            students: vec![
                NewStudent::new("a@x.com", "A").unwrap(),
                NewStudent::new("a@x.com", "Duplicate").unwrap(),
            ],
            courses: vec![NewCourse::new("C1", "N1").unwrap()],
            enrollments: vec![(1, 1)],
        };

        assert!(store.seed(&batch).await.is_err());
        assert_eq!(store.stats().await.unwrap(), DataStats::default());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn clear_restarts_ids() {
        let store = fresh_store().await;
        store
            .insert_student(&NewStudent::new("a@x.com", "A").unwrap())
            .await
            .unwrap();
        store.clear_all().await.unwrap();

        let student = store
            .insert_student(&NewStudent::new("b@x.com", "B").unwrap())
            .await
            .unwrap();
        assert_eq!(student.id, 1);
    }
}
