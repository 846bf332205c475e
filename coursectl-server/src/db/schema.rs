//! Schema migrations
//!
//! Every statement is idempotent, so `migrate` runs on each startup.
//! The UNIQUE constraints here are the real guards for email, course code,
//! and (student, course) uniqueness.

use sqlx::PgPool;

use super::DbError;

const STATEMENTS: &[(&str, &str)] = &[
    (
        "create students table",
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id SERIAL PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            username TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "create courses table",
        r#"
        CREATE TABLE IF NOT EXISTS courses (
            id SERIAL PRIMARY KEY,
            course_code TEXT NOT NULL UNIQUE,
            course_name TEXT NOT NULL,
            course_description TEXT NOT NULL DEFAULT '',
            credits INTEGER NOT NULL DEFAULT 0,
            instructor TEXT NOT NULL DEFAULT '',
            semester TEXT NOT NULL DEFAULT '',
            time_slot TEXT NOT NULL DEFAULT '',
            course_location TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "create student_courses table",
        r#"
        CREATE TABLE IF NOT EXISTS student_courses (
            id SERIAL PRIMARY KEY,
            student_id INTEGER NOT NULL REFERENCES students(id) ON DELETE CASCADE,
            course_id INTEGER NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
            enrolled_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            UNIQUE (student_id, course_id)
        )
        "#,
    ),
    (
        "create student_courses student index",
        "CREATE INDEX IF NOT EXISTS idx_student_courses_student ON student_courses(student_id)",
    ),
    (
        "create student_courses course index",
        "CREATE INDEX IF NOT EXISTS idx_student_courses_course ON student_courses(course_id)",
    ),
];

/// Create tables and indexes if they don't exist.
pub async fn migrate(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running schema migrations...");

    for &(op, sql) in STATEMENTS {
        sqlx::query(sql)
            .execute(pool)
            .await
            .map_err(DbError::query(op))?;
    }

    tracing::debug!(statements = STATEMENTS.len(), "schema up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enrollment_pair_is_unique_in_schema() {
        let (_, ddl) = STATEMENTS
            .iter()
            .find(|(op, _)| op.contains("student_courses table"))
            .unwrap();
        assert!(ddl.contains("UNIQUE (student_id, course_id)"));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn migrate_is_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");
        migrate(&pool).await.expect("first migration failed");
        migrate(&pool).await.expect("second migration failed");
    }
}
