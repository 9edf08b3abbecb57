//! crates/all_islam_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of specific external implementations like databases
//! or disk storage.

use async_trait::async_trait;

use crate::domain::{
    Book, BookPatch, Course, CoursePatch, Lesson, LessonPatch, NewBook, NewCourse, NewLesson,
    NewUser, StoredFile, User,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g.
/// database, filesystem).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    /// A unique-index violation, e.g. a duplicate course slug or username.
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Typed CRUD over the catalog's relational store. The sole component
/// permitted to issue data-layer queries.
#[async_trait]
pub trait ContentStore: Send + Sync {
    // --- Courses ---

    /// Lists courses. The default listing excludes archived rows;
    /// `archived_only` flips the filter to return only archived ones.
    async fn list_courses(&self, archived_only: bool) -> PortResult<Vec<Course>>;

    async fn get_course(&self, id: i64) -> PortResult<Course>;

    async fn get_course_by_slug(&self, slug: &str) -> PortResult<Course>;

    /// Inserts a course, deriving the slug from the title when absent.
    /// A colliding slug reports [`PortError::Conflict`].
    async fn create_course(&self, new: NewCourse) -> PortResult<Course>;

    /// Applies only the patch's supplied fields. Concurrent patches to the
    /// same id are last-write-wins.
    async fn update_course(&self, id: i64, patch: CoursePatch) -> PortResult<Course>;

    /// Physical removal. Deleting a missing id is an error, not a silent
    /// success. Lessons of the course are removed with it.
    async fn delete_course(&self, id: i64) -> PortResult<()>;

    // --- Lessons ---

    /// Lists a course's lessons ordered by position.
    async fn list_lessons(&self, course_id: i64) -> PortResult<Vec<Lesson>>;

    /// Inserts a lesson; a missing parent course reports
    /// [`PortError::NotFound`].
    async fn create_lesson(&self, new: NewLesson) -> PortResult<Lesson>;

    async fn update_lesson(&self, id: i64, patch: LessonPatch) -> PortResult<Lesson>;

    async fn delete_lesson(&self, id: i64) -> PortResult<()>;

    // --- Books ---

    async fn list_books(&self) -> PortResult<Vec<Book>>;

    async fn get_book(&self, id: i64) -> PortResult<Book>;

    async fn create_book(&self, new: NewBook) -> PortResult<Book>;

    async fn update_book(&self, id: i64, patch: BookPatch) -> PortResult<Book>;

    async fn delete_book(&self, id: i64) -> PortResult<()>;

    // --- Users ---

    /// Inserts a user, storing a salted hash of the password. A duplicate
    /// username reports [`PortError::Conflict`].
    async fn create_user(&self, new: NewUser) -> PortResult<User>;

    async fn get_user_by_username(&self, username: &str) -> PortResult<User>;
}

/// Blob storage for uploaded files. Implementations never overwrite and
/// never delete prior uploads.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Persists one file under a collision-resistant generated name and
    /// returns its servable URL together with the original filename.
    async fn save(&self, original_name: &str, bytes: &[u8]) -> PortResult<StoredFile>;
}
