//! services/api/src/web/mod.rs
//!
//! The HTTP surface: route table, shared state, error mapping, and the
//! master OpenAPI definition.

pub mod books;
pub mod courses;
pub mod error;
pub mod lessons;
pub mod state;
pub mod upload;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};
use tower_http::services::ServeDir;
use utoipa::OpenApi;

use all_islam_core::domain::{
    Book, BookPatch, Course, CoursePatch, Lesson, LessonPatch, NewBook, NewCourse, NewLesson,
    StoredFile,
};

use crate::adapters::uploads::UPLOADS_URL_PREFIX;
pub use error::{ErrorBody, WebError};
pub use state::AppState;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        courses::list_courses_handler,
        courses::get_course_by_slug_handler,
        courses::get_course_handler,
        courses::create_course_handler,
        courses::update_course_handler,
        courses::delete_course_handler,
        lessons::list_lessons_handler,
        lessons::create_lesson_handler,
        lessons::update_lesson_handler,
        lessons::delete_lesson_handler,
        books::list_books_handler,
        books::get_book_handler,
        books::create_book_handler,
        books::update_book_handler,
        books::delete_book_handler,
        upload::upload_handler,
    ),
    components(schemas(
        Course,
        NewCourse,
        CoursePatch,
        Lesson,
        NewLesson,
        LessonPatch,
        Book,
        NewBook,
        BookPatch,
        StoredFile,
        ErrorBody,
    )),
    tags(
        (name = "all-Islam API", description = "Course, lesson and book catalog with file uploads.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Router
//=========================================================================================

/// Builds the application router: the `/api` routes, static serving of the
/// upload directory, and the request body cap.
pub fn router(state: Arc<AppState>) -> Router {
    // The slug route is registered ahead of the `{id}` route; a non-numeric
    // id must 400 on the id route, never fall through to a slug lookup.
    let api = Router::new()
        .route(
            "/courses",
            get(courses::list_courses_handler).post(courses::create_course_handler),
        )
        .route(
            "/courses/slug/{slug}",
            get(courses::get_course_by_slug_handler),
        )
        .route(
            "/courses/{id}",
            get(courses::get_course_handler)
                .patch(courses::update_course_handler)
                .delete(courses::delete_course_handler),
        )
        .route(
            "/courses/{id}/lessons",
            get(lessons::list_lessons_handler).post(lessons::create_lesson_handler),
        )
        .route(
            "/lessons/{id}",
            patch(lessons::update_lesson_handler).delete(lessons::delete_lesson_handler),
        )
        .route(
            "/books",
            get(books::list_books_handler).post(books::create_book_handler),
        )
        .route(
            "/books/{id}",
            get(books::get_book_handler)
                .patch(books::update_book_handler)
                .delete(books::delete_book_handler),
        )
        .route("/upload", post(upload::upload_handler));

    Router::new()
        .nest("/api", api)
        .nest_service(
            UPLOADS_URL_PREFIX,
            ServeDir::new(&state.config.uploads_dir),
        )
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .with_state(state)
}
