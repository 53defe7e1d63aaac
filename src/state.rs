use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use crate::db::SqliteCourseRepository;
use crate::endpoint::{CourseEndpoints, EndpointConfig};
use crate::services::CourseService;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub courses: CourseEndpoints,
}

impl AppState {
    /// Wires the SQLite repository, service and endpoints together.
    pub fn new(db: SqlitePool, query_timeout: Duration, default_page_limit: u32) -> Self {
        let repository = Arc::new(SqliteCourseRepository::new(db.clone(), query_timeout));
        let service = CourseService::new(repository);
        let courses = CourseEndpoints::new(service, EndpointConfig { default_page_limit });

        Self { db, courses }
    }
}
