use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// A fresh course with a newly assigned id.
    pub fn new(name: String, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            start_date,
            end_date,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Narrows list and count queries. An empty `name` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub name: Option<String>,
}

impl Filters {
    pub fn by_name(name: Option<String>) -> Self {
        Self {
            name: name.filter(|n| !n.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCourseRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

#[derive(Debug, Clone)]
pub struct GetCourseRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default)]
pub struct GetAllCoursesRequest {
    pub name: Option<String>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

/// Partial update. `None` leaves the field untouched; `Some("")` is rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCourseRequest {
    #[serde(skip)]
    pub id: String,
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DeleteCourseRequest {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_course_gets_unique_id() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let a = Course::new("Algebra".to_string(), start, end);
        let b = Course::new("Algebra".to_string(), start, end);

        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
    }

    #[test]
    fn update_request_distinguishes_absent_from_empty() {
        let req: UpdateCourseRequest =
            serde_json::from_str(r#"{"name": "", "end_date": "2024-06-01"}"#).unwrap();

        assert_eq!(req.name.as_deref(), Some(""));
        assert_eq!(req.start_date, None);
        assert_eq!(req.end_date.as_deref(), Some("2024-06-01"));
    }

    #[test]
    fn empty_name_filter_matches_everything() {
        assert_eq!(Filters::by_name(Some(String::new())), Filters::default());
    }
}
