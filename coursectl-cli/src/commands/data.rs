//! Sample data maintenance: seed, reset, stats

use anyhow::{bail, Context, Result};
use clap::Parser;

use coursectl_server::db::{create_pool, schema, CourseStore, PgStore};
use coursectl_server::domain::{self, SeedOutcome};
use coursectl_server::resolve_database_url;

/// Database connection arguments shared by the data commands
#[derive(Parser, Debug)]
pub struct DataArgs {
    /// Database URL (falls back to DB_HOST/DB_PORT/DB_USER/DB_PASSWORD/DB_NAME/DB_SSLMODE)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ResetArgs {
    #[command(flatten)]
    pub db: DataArgs,

    /// Confirm deleting every student, course, and enrollment
    #[arg(long)]
    pub yes: bool,
}

#[derive(Parser, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub db: DataArgs,

    /// Print counts as JSON
    #[arg(long)]
    pub json: bool,
}

async fn connect(args: &DataArgs) -> Result<PgStore> {
    let database_url = resolve_database_url(args.database_url.as_deref());
    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;
    schema::migrate(&pool)
        .await
        .context("Failed to create database schema")?;
    Ok(PgStore::new(pool))
}

fn describe(outcome: SeedOutcome) -> String {
    match outcome {
        SeedOutcome::Seeded {
            students,
            courses,
            enrollments,
        } => format!(
            "Inserted {} students, {} courses, {} enrollments",
            students, courses, enrollments
        ),
        SeedOutcome::Skipped => "Store already has data, nothing inserted".to_string(),
    }
}

/// Seed the sample dataset if the store is empty
pub async fn run_seed(args: DataArgs) -> Result<()> {
    let store = connect(&args).await?;
    let outcome = domain::initialize_sample_data(&store)
        .await
        .context("Failed to seed sample data")?;
    println!("{}", describe(outcome));
    Ok(())
}

/// Clear everything and reseed
pub async fn run_reset(args: ResetArgs) -> Result<()> {
    if !args.yes {
        bail!("reset deletes all data; re-run with --yes to confirm");
    }

    let store = connect(&args.db).await?;
    let outcome = domain::reset_sample_data(&store)
        .await
        .context("Failed to reset data")?;
    println!("{}", describe(outcome));
    Ok(())
}

/// Print row counts per table
pub async fn run_stats(args: StatsArgs) -> Result<()> {
    let store = connect(&args.db).await?;
    let stats = store.stats().await.context("Failed to read counts")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("students:        {}", stats.students);
        println!("courses:         {}", stats.courses);
        println!("student_courses: {}", stats.enrollments);
    }
    Ok(())
}
