//! In-memory repository for service and controller tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::db::{CourseChanges, CourseRepository};
use crate::error::CourseError;
use crate::models::{Course, Filters};

#[derive(Clone, Default)]
pub struct MockCourseRepository {
    courses: Arc<Mutex<Vec<Course>>>,
    calls: Arc<AtomicUsize>,
    failure: Arc<Mutex<Option<CourseError>>>,
}

impl MockCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_course(&self, course: Course) {
        self.courses.lock().unwrap().push(course);
    }

    pub fn courses(&self) -> Vec<Course> {
        self.courses.lock().unwrap().clone()
    }

    /// Number of repository calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Makes every subsequent call fail with `err`.
    pub fn fail_with(&self, err: CourseError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    fn enter(&self) -> Result<(), CourseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn matching(&self, filters: &Filters) -> Vec<Course> {
        let needle = filters.name.as_ref().map(|n| n.to_lowercase());
        self.courses
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|c| match &needle {
                Some(n) => c.name.to_lowercase().contains(n),
                None => true,
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CourseRepository for MockCourseRepository {
    async fn create(&self, course: &Course) -> Result<(), CourseError> {
        self.enter()?;
        self.add_course(course.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Course, CourseError> {
        self.enter()?;
        self.courses
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| CourseError::NotFound { id: id.to_string() })
    }

    async fn list(&self, filters: &Filters, offset: u64, limit: u32) -> Result<Vec<Course>, CourseError> {
        self.enter()?;
        Ok(self
            .matching(filters)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn update(&self, id: &str, changes: CourseChanges) -> Result<(), CourseError> {
        self.enter()?;
        let mut courses = self.courses.lock().unwrap();
        let course = courses
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| CourseError::NotFound { id: id.to_string() })?;

        if let Some(name) = changes.name {
            course.name = name;
        }
        if let Some(start_date) = changes.start_date {
            course.start_date = start_date;
        }
        if let Some(end_date) = changes.end_date {
            course.end_date = end_date;
        }
        course.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), CourseError> {
        self.enter()?;
        let mut courses = self.courses.lock().unwrap();
        let before = courses.len();
        courses.retain(|c| c.id != id);
        if courses.len() == before {
            return Err(CourseError::NotFound { id: id.to_string() });
        }
        Ok(())
    }

    async fn count(&self, filters: &Filters) -> Result<u64, CourseError> {
        self.enter()?;
        Ok(self.matching(filters).len() as u64)
    }
}
