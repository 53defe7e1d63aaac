use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::http::{Method, header};
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::AppError;
use crate::models::*;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
struct CourseQueryParams {
    name: Option<String>,
    limit: Option<String>,
    page: Option<String>,
}

impl From<CourseQueryParams> for GetAllCoursesRequest {
    // Unparseable numbers count as absent and fall back to the defaults.
    fn from(params: CourseQueryParams) -> Self {
        Self {
            name: params.name,
            limit: params.limit.and_then(|v| v.parse().ok()),
            page: params.page.and_then(|v| v.parse().ok()),
        }
    }
}

fn invalid_format(reason: impl std::fmt::Display) -> AppError {
    AppError::BadRequest(format!("invalid request format: '{}'", reason))
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
            Method::HEAD,
        ])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CACHE_CONTROL,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/{id}",
            get(get_course).patch(update_course).delete(delete_course),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("select 1").execute(&state.db).await {
        Ok(_) => StatusCode::OK,
        Err(err) => {
            error!("health check failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

async fn create_course(
    State(state): State<AppState>,
    payload: Result<Json<CreateCourseRequest>, JsonRejection>,
) -> Result<ApiResponse<Course>, AppError> {
    let Json(req) = payload.map_err(|e| invalid_format(e.body_text()))?;
    state.courses.create(req).await
}

async fn list_courses(
    State(state): State<AppState>,
    params: Result<Query<CourseQueryParams>, QueryRejection>,
) -> Result<ApiResponse<Vec<Course>>, AppError> {
    let Query(params) = params.map_err(|e| invalid_format(e.body_text()))?;
    state.courses.get_all(params.into()).await
}

async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Course>, AppError> {
    state.courses.get(GetCourseRequest { id }).await
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCourseRequest>, JsonRejection>,
) -> Result<ApiResponse<()>, AppError> {
    let Json(mut req) = payload.map_err(|e| invalid_format(e.body_text()))?;
    req.id = id;
    state.courses.update(req).await
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, AppError> {
    state.courses.delete(DeleteCourseRequest { id }).await
}
