//! services/api/src/web/lessons.rs
//!
//! Axum handlers for the lesson endpoints. Lessons are created and listed
//! through their parent course; updates and deletes address the lesson id
//! directly.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use all_islam_core::domain::{Lesson, LessonPatch, NewLesson};

use crate::web::error::{parse_id, ApiJson, WebError};
use crate::web::state::AppState;

/// List a course's lessons in display order.
#[utoipa::path(
    get,
    path = "/api/courses/{id}/lessons",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Lessons ordered by position", body = [Lesson]),
        (status = 400, description = "Non-numeric id")
    )
)]
pub async fn list_lessons_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Lesson>>, WebError> {
    let course_id = parse_id(&id)?;
    let lessons = state.store.list_lessons(course_id).await?;
    Ok(Json(lessons))
}

/// Add a lesson to a course. The path id is authoritative; a `courseId` in
/// the body is ignored.
#[utoipa::path(
    post,
    path = "/api/courses/{id}/lessons",
    params(("id" = String, Path, description = "Course id")),
    request_body = NewLesson,
    responses(
        (status = 200, description = "The created lesson", body = Lesson),
        (status = 400, description = "Non-numeric id or invalid body"),
        (status = 404, description = "No course with that id")
    )
)]
pub async fn create_lesson_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(mut new): ApiJson<NewLesson>,
) -> Result<Json<Lesson>, WebError> {
    new.course_id = parse_id(&id)?;
    let lesson = state.store.create_lesson(new).await?;
    Ok(Json(lesson))
}

/// Apply a partial update to a lesson.
#[utoipa::path(
    patch,
    path = "/api/lessons/{id}",
    params(("id" = String, Path, description = "Lesson id")),
    request_body = LessonPatch,
    responses(
        (status = 200, description = "The updated lesson", body = Lesson),
        (status = 400, description = "Non-numeric id or invalid body"),
        (status = 404, description = "No lesson with that id")
    )
)]
pub async fn update_lesson_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<LessonPatch>,
) -> Result<Json<Lesson>, WebError> {
    let id = parse_id(&id)?;
    let lesson = state.store.update_lesson(id, patch).await?;
    Ok(Json(lesson))
}

/// Delete a lesson.
#[utoipa::path(
    delete,
    path = "/api/lessons/{id}",
    params(("id" = String, Path, description = "Lesson id")),
    responses(
        (status = 204, description = "Lesson deleted"),
        (status = 400, description = "Non-numeric id"),
        (status = 404, description = "No lesson with that id")
    )
)]
pub async fn delete_lesson_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, WebError> {
    let id = parse_id(&id)?;
    state.store.delete_lesson(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
