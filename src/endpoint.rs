//! Per-operation controllers.
//!
//! Each controller validates an already decoded request, calls the service and
//! turns any `CourseError` into the `AppError` category clients should see.
//! The mapping differs per operation, so it is spelled out in each controller.

use tracing::error;

use crate::error::{AppError, CourseError};
use crate::models::{
    Course, CreateCourseRequest, DeleteCourseRequest, Filters, GetAllCoursesRequest,
    GetCourseRequest, UpdateCourseRequest,
};
use crate::pagination::Meta;
use crate::response::ApiResponse;
use crate::services::CourseService;

#[derive(Debug, Clone, Copy)]
pub struct EndpointConfig {
    pub default_page_limit: u32,
}

#[derive(Clone)]
pub struct CourseEndpoints {
    service: CourseService,
    config: EndpointConfig,
}

fn internal(err: CourseError) -> AppError {
    error!("course operation failed: {}", err);
    AppError::InternalServerError
}

/// Present-but-empty fields are rejected; absent ones mean "no change".
fn reject_empty(value: Option<&str>, err: CourseError) -> Result<(), AppError> {
    match value {
        Some("") => Err(AppError::BadRequest(err.to_string())),
        _ => Ok(()),
    }
}

impl CourseEndpoints {
    pub fn new(service: CourseService, config: EndpointConfig) -> Self {
        Self { service, config }
    }

    pub async fn create(&self, req: CreateCourseRequest) -> Result<ApiResponse<Course>, AppError> {
        if req.name.is_empty() {
            return Err(AppError::BadRequest(CourseError::NameRequired.to_string()));
        }
        if req.start_date.is_empty() {
            return Err(AppError::BadRequest(CourseError::StartDateRequired.to_string()));
        }
        if req.end_date.is_empty() {
            return Err(AppError::BadRequest(CourseError::EndDateRequired.to_string()));
        }

        match self.service.create(&req.name, &req.start_date, &req.end_date).await {
            Ok(course) => Ok(ApiResponse::created("success", course)),
            Err(
                err @ (CourseError::InvalidStartDate
                | CourseError::InvalidEndDate
                | CourseError::EndBeforeStart),
            ) => Err(AppError::BadRequest(err.to_string())),
            Err(err) => Err(internal(err)),
        }
    }

    pub async fn get(&self, req: GetCourseRequest) -> Result<ApiResponse<Course>, AppError> {
        match self.service.get(&req.id).await {
            Ok(course) => Ok(ApiResponse::ok("success", course)),
            Err(err @ CourseError::NotFound { .. }) => Err(AppError::NotFound(err.to_string())),
            Err(err) => Err(internal(err)),
        }
    }

    pub async fn get_all(&self, req: GetAllCoursesRequest) -> Result<ApiResponse<Vec<Course>>, AppError> {
        let filters = Filters::by_name(req.name);

        let total = self.service.count(&filters).await.map_err(internal)?;
        let meta = Meta::new(req.page, req.limit, total, self.config.default_page_limit);

        let courses = self
            .service
            .list(&filters, meta.offset(), meta.limit())
            .await
            .map_err(internal)?;

        Ok(ApiResponse::paginated("success", courses, meta))
    }

    pub async fn update(&self, req: UpdateCourseRequest) -> Result<ApiResponse<()>, AppError> {
        reject_empty(req.name.as_deref(), CourseError::NameRequired)?;
        reject_empty(req.start_date.as_deref(), CourseError::StartDateRequired)?;
        reject_empty(req.end_date.as_deref(), CourseError::EndDateRequired)?;

        let result = self
            .service
            .update(&req.id, req.name, req.start_date.as_deref(), req.end_date.as_deref())
            .await;

        match result {
            Ok(()) => Ok(ApiResponse::message("course updated successfully")),
            Err(
                err @ (CourseError::InvalidStartDate
                | CourseError::InvalidEndDate
                | CourseError::EndBeforeStart),
            ) => Err(AppError::BadRequest(err.to_string())),
            Err(err @ CourseError::NotFound { .. }) => Err(AppError::NotFound(err.to_string())),
            Err(err) => Err(internal(err)),
        }
    }

    pub async fn delete(&self, req: DeleteCourseRequest) -> Result<ApiResponse<()>, AppError> {
        match self.service.delete(&req.id).await {
            Ok(()) => Ok(ApiResponse::message("course deleted successfully")),
            Err(err @ CourseError::NotFound { .. }) => Err(AppError::NotFound(err.to_string())),
            Err(err) => Err(internal(err)),
        }
    }
}
