use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::db::{CourseChanges, CourseRepository};
use crate::error::CourseError;
use crate::models::{Course, Filters};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a strict `YYYY-MM-DD` date.
fn parse_date(text: &str) -> Option<NaiveDate> {
    // chrono alone also accepts unpadded, space-padded and signed fields
    let well_formed = text.len() == 10
        && text.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

fn parse_start_date(text: &str) -> Result<NaiveDate, CourseError> {
    parse_date(text).ok_or_else(|| {
        warn!("invalid start date: {:?}", text);
        CourseError::InvalidStartDate
    })
}

fn parse_end_date(text: &str) -> Result<NaiveDate, CourseError> {
    parse_date(text).ok_or_else(|| {
        warn!("invalid end date: {:?}", text);
        CourseError::InvalidEndDate
    })
}

fn ensure_ordered(start_date: NaiveDate, end_date: NaiveDate) -> Result<(), CourseError> {
    if end_date < start_date {
        warn!("end date {} is before start date {}", end_date, start_date);
        return Err(CourseError::EndBeforeStart);
    }
    Ok(())
}

#[derive(Clone)]
pub struct CourseService {
    repository: Arc<dyn CourseRepository>,
}

impl CourseService {
    pub fn new(repository: Arc<dyn CourseRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, name: &str, start_date: &str, end_date: &str) -> Result<Course, CourseError> {
        debug!("create course service");

        let start_date = parse_start_date(start_date)?;
        let end_date = parse_end_date(end_date)?;
        ensure_ordered(start_date, end_date)?;

        let course = Course::new(name.to_string(), start_date, end_date);
        self.repository.create(&course).await?;
        Ok(course)
    }

    pub async fn get(&self, id: &str) -> Result<Course, CourseError> {
        debug!("get course service");
        self.repository.get(id).await
    }

    pub async fn list(&self, filters: &Filters, offset: u64, limit: u32) -> Result<Vec<Course>, CourseError> {
        debug!("get all courses service");
        self.repository.list(filters, offset, limit).await
    }

    /// Applies only the supplied fields.
    ///
    /// When a date is supplied, the stored record is read first so the
    /// resulting start/end pair can be checked for ordering.
    pub async fn update(
        &self,
        id: &str,
        name: Option<String>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<(), CourseError> {
        debug!("update course service");

        let start_date = start_date.map(parse_start_date).transpose()?;
        let end_date = end_date.map(parse_end_date).transpose()?;

        if start_date.is_some() || end_date.is_some() {
            let current = self.repository.get(id).await?;
            ensure_ordered(
                start_date.unwrap_or(current.start_date),
                end_date.unwrap_or(current.end_date),
            )?;
        }

        let changes = CourseChanges { name, start_date, end_date };
        self.repository.update(id, changes).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), CourseError> {
        debug!("delete course service");
        self.repository.delete(id).await
    }

    pub async fn count(&self, filters: &Filters) -> Result<u64, CourseError> {
        debug!("count course service");
        self.repository.count(filters).await
    }
}
