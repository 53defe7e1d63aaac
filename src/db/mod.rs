pub mod repository;

#[cfg(test)]
pub mod mock;

use std::str::FromStr;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub use repository::{CourseChanges, CourseRepository, SqliteCourseRepository};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Opens the pool, creating the database file if needed, and applies migrations.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;
    Ok(pool)
}

/// Single-connection in-memory database with the schema applied.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test db");

    MIGRATOR.run(&pool).await.expect("Failed to run migrations");
    pool
}
