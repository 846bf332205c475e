//! Sample data seeding and reset
//!
//! The sample dataset is 6 students, 8 courses, and 27 enrollments.
//! Seeding only runs when the student or course table is empty, and the
//! whole batch is written in one transaction.

use crate::db::{CourseStore, SeedBatch};
use crate::models::{NewCourse, NewStudent, ValidationError};

use super::DomainError;

const SAMPLE_STUDENTS: &[(&str, &str)] = &[
    ("zhang.san@connect.hku.hk", "Zhang San"),
    ("li.si@connect.hku.hk", "Li Si"),
    ("wang.wu@connect.hku.hk", "Wang Wu"),
    ("zhao.liu@connect.hku.hk", "Zhao Liu"),
    ("qian.qi@connect.hku.hk", "Qian Qi"),
    ("sun.ba@connect.hku.hk", "Sun Ba"),
];

struct SampleCourse {
    code: &'static str,
    name: &'static str,
    description: &'static str,
    credits: i32,
    instructor: &'static str,
    time_slot: &'static str,
    location: &'static str,
}

const SAMPLE_SEMESTER: &str = "2024 Spring";

const SAMPLE_COURSES: &[SampleCourse] = &[
    SampleCourse {
        code: "COMP1117",
        name: "Computer Programming",
        description: "Introduction to computer programming using Python",
        credits: 3,
        instructor: "Prof. Chen",
        time_slot: "Mon 9:00-12:00",
        location: "CYC LT1",
    },
    SampleCourse {
        code: "COMP2119",
        name: "Data Structures and Algorithms",
        description: "Fundamental data structures and algorithms",
        credits: 4,
        instructor: "Prof. Li",
        time_slot: "Wed 14:00-17:00",
        location: "CYC LT2",
    },
    SampleCourse {
        code: "COMP3234",
        name: "Database Systems",
        description: "Principles of database design and implementation",
        credits: 3,
        instructor: "Prof. Wang",
        time_slot: "Fri 10:00-13:00",
        location: "CYC LT3",
    },
    SampleCourse {
        code: "COMP3278",
        name: "Web Development",
        description: "Full-stack web development with modern technologies",
        credits: 3,
        instructor: "Prof. Zhang",
        time_slot: "Tue 14:00-17:00",
        location: "Lab 1",
    },
    SampleCourse {
        code: "COMP4331",
        name: "Machine Learning",
        description: "Introduction to machine learning algorithms",
        credits: 4,
        instructor: "Prof. Liu",
        time_slot: "Thu 9:00-12:00",
        location: "CYC LT4",
    },
    SampleCourse {
        code: "COMP3322",
        name: "Software Engineering",
        description: "Software development lifecycle and methodologies",
        credits: 3,
        instructor: "Prof. Zhao",
        time_slot: "Mon 14:00-17:00",
        location: "CYC LT5",
    },
    SampleCourse {
        code: "COMP3297",
        name: "Computer Networks",
        description: "Network protocols and distributed systems",
        credits: 3,
        instructor: "Prof. Wu",
        time_slot: "Wed 10:00-13:00",
        location: "CYC LT6",
    },
    SampleCourse {
        code: "MATH1013",
        name: "Calculus and Linear Algebra",
        description: "Mathematical foundations for computer science",
        credits: 4,
        instructor: "Prof. Yang",
        time_slot: "Fri 9:00-12:00",
        location: "Math Building LT1",
    },
];

/// (student position, course position), both 1-based
const SAMPLE_ENROLLMENTS: &[(usize, usize)] = &[
    (1, 1), (1, 2), (1, 3), (1, 7), (1, 8),
    (2, 1), (2, 4), (2, 5), (2, 8),
    (3, 2), (3, 3), (3, 4), (3, 6), (3, 7), (3, 8),
    (4, 1), (4, 4), (4, 8),
    (5, 2), (5, 5), (5, 6), (5, 7), (5, 8),
    (6, 3), (6, 5), (6, 6), (6, 7),
];

/// Result of [`initialize_sample_data`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store was empty and the sample batch was written
    Seeded {
        students: usize,
        courses: usize,
        enrollments: usize,
    },
    /// Both tables already had rows; nothing was written
    Skipped,
}

/// Build the fixed sample batch.
pub fn sample_batch() -> Result<SeedBatch, ValidationError> {
    let students = SAMPLE_STUDENTS
        .iter()
        .map(|&(email, name)| NewStudent::new(email, name))
        .collect::<Result<Vec<_>, _>>()?;

    let courses = SAMPLE_COURSES
        .iter()
        .map(|c| {
            Ok(NewCourse::new(c.code, c.name)?
                .with_credits(c.credits)
                .with_description(c.description)
                .with_instructor(c.instructor)
                .with_semester(SAMPLE_SEMESTER)
                .with_time_slot(c.time_slot)
                .with_location(c.location))
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    Ok(SeedBatch {
        students,
        courses,
        enrollments: SAMPLE_ENROLLMENTS.to_vec(),
    })
}

/// Seed the sample dataset if the student or course table is empty.
///
/// Running it on a populated store is a no-op. A failure part way through
/// leaves no rows from the batch behind.
pub async fn initialize_sample_data(store: &dyn CourseStore) -> Result<SeedOutcome, DomainError> {
    tracing::info!("Checking whether sample data is needed...");

    let stats = store.stats().await?;
    if !stats.needs_sample_data() {
        tracing::info!(
            students = stats.students,
            courses = stats.courses,
            "store already has data, skipping sample data"
        );
        return Ok(SeedOutcome::Skipped);
    }

    let batch = sample_batch()?;
    store.seed(&batch).await?;

    let outcome = SeedOutcome::Seeded {
        students: batch.students.len(),
        courses: batch.courses.len(),
        enrollments: batch.enrollments.len(),
    };
    tracing::info!(
        students = batch.students.len(),
        courses = batch.courses.len(),
        enrollments = batch.enrollments.len(),
        "sample data inserted"
    );
    Ok(outcome)
}

/// Delete every row and restart id counters, atomically.
pub async fn clear_all_data(store: &dyn CourseStore) -> Result<(), DomainError> {
    tracing::warn!("Clearing all students, courses, and enrollments");
    store.clear_all().await?;
    tracing::info!("all data cleared, id sequences restarted");
    Ok(())
}

/// Clear everything, then seed the sample dataset again.
pub async fn reset_sample_data(store: &dyn CourseStore) -> Result<SeedOutcome, DomainError> {
    clear_all_data(store).await?;
    initialize_sample_data(store).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::{DataStats, NewStudent};

    const SAMPLE_STATS: DataStats = DataStats {
        students: 6,
        courses: 8,
        enrollments: 27,
    };

    #[test]
    fn sample_batch_is_valid() {
        let batch = sample_batch().unwrap();
        assert_eq!(batch.students.len(), 6);
        assert_eq!(batch.courses.len(), 8);
        assert_eq!(batch.enrollments.len(), 27);
        batch.validate().unwrap();
    }

    #[test]
    fn sample_enrollments_have_no_duplicate_pairs() {
        let mut pairs = SAMPLE_ENROLLMENTS.to_vec();
        pairs.sort();
        pairs.dedup();
        assert_eq!(pairs.len(), SAMPLE_ENROLLMENTS.len());
    }

    #[tokio::test]
    async fn seeds_empty_store() {
        let store = MemoryStore::new();
        let outcome = initialize_sample_data(&store).await.unwrap();
        assert_eq!(
            outcome,
            SeedOutcome::Seeded {
                students: 6,
                courses: 8,
                enrollments: 27
            }
        );
        assert_eq!(store.stats().await.unwrap(), SAMPLE_STATS);
    }

    #[tokio::test]
    async fn second_run_is_a_no_op() {
        let store = MemoryStore::new();
        initialize_sample_data(&store).await.unwrap();
        let outcome = initialize_sample_data(&store).await.unwrap();

        assert_eq!(outcome, SeedOutcome::Skipped);
        assert_eq!(store.stats().await.unwrap(), SAMPLE_STATS);
    }

    #[tokio::test]
    async fn clash_with_existing_rows_rolls_back() {
        // Course table empty, so seeding runs, but the first sample email
        // is already taken: nothing from the batch may remain.
        let store = MemoryStore::new();
        store
            .insert_student(&NewStudent::new(SAMPLE_STUDENTS[0].0, "Existing").unwrap())
            .await
            .unwrap();

        let err = initialize_sample_data(&store).await.unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(
            store.stats().await.unwrap(),
            DataStats {
                students: 1,
                courses: 0,
                enrollments: 0
            }
        );
    }

    #[tokio::test]
    async fn reset_reproduces_sample_dataset() {
        let store = MemoryStore::new();
        initialize_sample_data(&store).await.unwrap();
        crate::domain::unenroll_student_from_course(&store, 1, 1).await.unwrap();

        reset_sample_data(&store).await.unwrap();
        assert_eq!(store.stats().await.unwrap(), SAMPLE_STATS);

        // Ids restart at 1 after a reset
        let first = crate::domain::get_student(&store, 1).await.unwrap();
        assert_eq!(first.email, SAMPLE_STUDENTS[0].0);
    }
}
