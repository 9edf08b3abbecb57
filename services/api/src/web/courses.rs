//! services/api/src/web/courses.rs
//!
//! Axum handlers for the course endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use all_islam_core::domain::{Course, CoursePatch, NewCourse};

use crate::web::error::{parse_id, ApiJson, WebError};
use crate::web::state::AppState;

/// Query parameters for the course listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListCoursesParams {
    /// When true, list only archived courses; the default listing excludes
    /// them.
    #[serde(default)]
    pub archived: bool,
}

/// List courses, filtered on the archive flag.
#[utoipa::path(
    get,
    path = "/api/courses",
    params(ListCoursesParams),
    responses(
        (status = 200, description = "Courses matching the archive filter", body = [Course])
    )
)]
pub async fn list_courses_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListCoursesParams>,
) -> Result<Json<Vec<Course>>, WebError> {
    let courses = state.store.list_courses(params.archived).await?;
    Ok(Json(courses))
}

/// Look a course up by its slug.
#[utoipa::path(
    get,
    path = "/api/courses/slug/{slug}",
    params(("slug" = String, Path, description = "URL-safe course identifier")),
    responses(
        (status = 200, description = "The course", body = Course),
        (status = 404, description = "No course with that slug")
    )
)]
pub async fn get_course_by_slug_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Course>, WebError> {
    let course = state.store.get_course_by_slug(&slug).await?;
    Ok(Json(course))
}

/// Look a course up by its numeric id.
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "The course", body = Course),
        (status = 400, description = "Non-numeric id"),
        (status = 404, description = "No course with that id")
    )
)]
pub async fn get_course_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Course>, WebError> {
    let id = parse_id(&id)?;
    let course = state.store.get_course(id).await?;
    Ok(Json(course))
}

/// Create a course. The slug is derived from the title when absent.
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = NewCourse,
    responses(
        (status = 200, description = "The created course", body = Course),
        (status = 400, description = "Invalid course data"),
        (status = 409, description = "Slug already in use")
    )
)]
pub async fn create_course_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(new): ApiJson<NewCourse>,
) -> Result<Json<Course>, WebError> {
    let course = state.store.create_course(new).await?;
    Ok(Json(course))
}

/// Apply a partial update to a course.
#[utoipa::path(
    patch,
    path = "/api/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    request_body = CoursePatch,
    responses(
        (status = 200, description = "The updated course", body = Course),
        (status = 400, description = "Non-numeric id or invalid body"),
        (status = 404, description = "No course with that id"),
        (status = 409, description = "Slug already in use")
    )
)]
pub async fn update_course_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<CoursePatch>,
) -> Result<Json<Course>, WebError> {
    let id = parse_id(&id)?;
    let course = state.store.update_course(id, patch).await?;
    Ok(Json(course))
}

/// Physically delete a course and its lessons.
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 400, description = "Non-numeric id"),
        (status = 404, description = "No course with that id")
    )
)]
pub async fn delete_course_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, WebError> {
    let id = parse_id(&id)?;
    state.store.delete_course(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
