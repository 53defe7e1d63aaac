use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{error, info, warn};

use crate::error::CourseError;
use crate::models::{Course, Filters};

const SELECT_COURSES: &str =
    "SELECT id, name, start_date, end_date, created_at, updated_at FROM courses";

/// Fields to overwrite on an existing course. `None` leaves the column as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseChanges {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Persistence operations the course service depends on.
///
/// Dropping a returned future cancels the underlying query. Any failure other
/// than "no matching record" is reported as `CourseError::Internal`.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create(&self, course: &Course) -> Result<(), CourseError>;
    async fn get(&self, id: &str) -> Result<Course, CourseError>;
    /// Newest-created first.
    async fn list(&self, filters: &Filters, offset: u64, limit: u32) -> Result<Vec<Course>, CourseError>;
    async fn update(&self, id: &str, changes: CourseChanges) -> Result<(), CourseError>;
    async fn delete(&self, id: &str) -> Result<(), CourseError>;
    async fn count(&self, filters: &Filters) -> Result<u64, CourseError>;
}

pub struct SqliteCourseRepository {
    db: SqlitePool,
    query_timeout: Duration,
}

impl SqliteCourseRepository {
    pub fn new(db: SqlitePool, query_timeout: Duration) -> Self {
        Self { db, query_timeout }
    }

    /// Runs a query under the configured deadline.
    async fn run<T, F>(&self, query: F) -> Result<T, CourseError>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                error!("database error: {}", err);
                Err(err.into())
            }
            Err(_) => {
                error!("query exceeded deadline of {:?}", self.query_timeout);
                Err(CourseError::Internal("query timed out".to_string()))
            }
        }
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Folded form of a name as stored in `name_search`.
///
/// SQLite's `lower()` only folds ASCII, so both sides are folded here instead.
fn search_key(name: &str) -> String {
    name.to_lowercase()
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filters: &Filters) {
    if let Some(name) = &filters.name {
        qb.push(" WHERE name_search LIKE ")
            .push_bind(format!("%{}%", escape_like(&search_key(name))))
            .push(" ESCAPE '\\'");
    }
}

#[async_trait]
impl CourseRepository for SqliteCourseRepository {
    async fn create(&self, course: &Course) -> Result<(), CourseError> {
        let query = sqlx::query(
            r#"
            INSERT INTO courses (id, name, name_search, start_date, end_date, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&course.id)
        .bind(&course.name)
        .bind(search_key(&course.name))
        .bind(course.start_date)
        .bind(course.end_date)
        .bind(course.created_at)
        .bind(course.updated_at)
        .execute(&self.db);

        self.run(query).await?;
        info!("course created with id: {}", course.id);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Course, CourseError> {
        let sql = format!("{SELECT_COURSES} WHERE id = ?1");
        let query = sqlx::query_as::<_, Course>(&sql)
            .bind(id)
            .fetch_optional(&self.db);

        match self.run(query).await? {
            Some(course) => Ok(course),
            None => {
                warn!("course with id {} doesn't exist", id);
                Err(CourseError::NotFound { id: id.to_string() })
            }
        }
    }

    async fn list(&self, filters: &Filters, offset: u64, limit: u32) -> Result<Vec<Course>, CourseError> {
        let offset = i64::try_from(offset).map_err(|e| CourseError::Internal(e.to_string()))?;

        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_COURSES);
        push_filters(&mut qb, filters);
        qb.push(" ORDER BY created_at DESC, rowid DESC LIMIT ")
            .push_bind(i64::from(limit))
            .push(" OFFSET ")
            .push_bind(offset);

        let query = qb.build_query_as::<Course>().fetch_all(&self.db);
        self.run(query).await
    }

    async fn update(&self, id: &str, changes: CourseChanges) -> Result<(), CourseError> {
        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE courses SET updated_at = ");
        qb.push_bind(Utc::now());
        if let Some(name) = changes.name {
            qb.push(", name_search = ").push_bind(search_key(&name));
            qb.push(", name = ").push_bind(name);
        }
        if let Some(start_date) = changes.start_date {
            qb.push(", start_date = ").push_bind(start_date);
        }
        if let Some(end_date) = changes.end_date {
            qb.push(", end_date = ").push_bind(end_date);
        }
        qb.push(" WHERE id = ").push_bind(id.to_string());

        let result = self.run(qb.build().execute(&self.db)).await?;
        if result.rows_affected() == 0 {
            warn!("course with id {} doesn't exist", id);
            return Err(CourseError::NotFound { id: id.to_string() });
        }

        info!("course updated with id: {}", id);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), CourseError> {
        let query = sqlx::query("DELETE FROM courses WHERE id = ?1")
            .bind(id)
            .execute(&self.db);

        let result = self.run(query).await?;
        if result.rows_affected() == 0 {
            warn!("course with id {} doesn't exist", id);
            return Err(CourseError::NotFound { id: id.to_string() });
        }

        info!("course deleted with id: {}", id);
        Ok(())
    }

    async fn count(&self, filters: &Filters) -> Result<u64, CourseError> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM courses");
        push_filters(&mut qb, filters);

        let query = qb.build_query_scalar::<i64>().fetch_one(&self.db);
        let count = self.run(query).await?;
        u64::try_from(count).map_err(|e| CourseError::Internal(e.to_string()))
    }
}
