//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. Requests beyond the
//! limit queue for a free connection instead of failing; the acquire
//! timeout only fires when no connection frees up for minutes, which means
//! the database itself is wedged.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 25;

/// Backstop for a queued request; only a stalled database should reach it.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Startup gives up on an unreachable database after this long.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connections older than this are recycled.
const MAX_LIFETIME: Duration = Duration::from_secs(5 * 60);

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/course_management").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a PostgreSQL connection pool with a custom connection limit.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    let pool = pool_options(max_connections).connect_lazy(database_url)?;

    // First connection up front, bounded separately from queued acquires
    let conn = tokio::time::timeout(CONNECT_TIMEOUT, pool.acquire())
        .await
        .map_err(|_| sqlx::Error::PoolTimedOut)??;
    drop(conn);

    tracing::info!(max_connections, "database pool ready");
    Ok(pool)
}

fn pool_options(max_connections: u32) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queued_requests_wait_instead_of_failing_fast() {
        let options = pool_options(DEFAULT_MAX_CONNECTIONS);
        assert_eq!(options.get_max_connections(), 25);
        assert!(options.get_acquire_timeout() >= Duration::from_secs(10 * 60));
    }

    #[test]
    fn zero_connections_is_raised_to_one() {
        assert_eq!(pool_options(0).get_max_connections(), 1);
    }

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p coursectl-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn requests_past_the_limit_wait() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_with_options(&url, 2).await.expect("pool creation failed");

        // 8 tasks over 2 connections: all should finish, none rejected
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    let result: (i32,) = sqlx::query_as("SELECT $1::int FROM pg_sleep(0.05)")
                        .bind(i)
                        .fetch_one(&pool)
                        .await
                        .expect("queued query failed");
                    result.0
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.await.expect("task panicked"), i as i32);
        }
    }
}
