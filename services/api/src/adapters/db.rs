//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete
//! implementation of the `ContentStore` port from the `core` crate. It
//! handles all interactions with the SQLite database using `sqlx`.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use async_trait::async_trait;
use sqlx::{error::ErrorKind, FromRow, SqlitePool};

use all_islam_core::domain::{
    Book, BookPatch, Course, CoursePatch, Lesson, LessonPatch, NewBook, NewCourse, NewLesson,
    NewUser, User,
};
use all_islam_core::ports::{ContentStore, PortError, PortResult};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `ContentStore` port.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a new `SqliteStore`.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

/// Maps an sqlx error onto the port's taxonomy. Unique-index violations
/// become conflicts; everything else is unexpected.
fn map_db_err(e: sqlx::Error, what: &str) -> PortError {
    if let sqlx::Error::Database(db_err) = &e {
        if matches!(db_err.kind(), ErrorKind::UniqueViolation) {
            return PortError::Conflict(format!("{} already exists", what));
        }
    }
    PortError::Unexpected(e.to_string())
}

/// Hashes a plaintext password with argon2 and a fresh salt. Plaintext is
/// never written to the database.
fn hash_password(password: &str) -> PortResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| PortError::Unexpected(format!("Failed to hash password: {}", e)))
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct CourseRecord {
    id: i64,
    title: String,
    description: String,
    slug: String,
    cover_image: Option<String>,
    youtube_url: Option<String>,
    duration: Option<String>,
    lessons: i64,
    is_archived: bool,
}
impl CourseRecord {
    fn to_domain(self) -> Course {
        Course {
            id: self.id,
            title: self.title,
            description: self.description,
            slug: self.slug,
            cover_image: self.cover_image,
            youtube_url: self.youtube_url,
            duration: self.duration,
            lessons: self.lessons,
            is_archived: self.is_archived,
        }
    }
}

#[derive(FromRow)]
struct LessonRecord {
    id: i64,
    course_id: i64,
    title: String,
    youtube_url: String,
    position: i64,
}
impl LessonRecord {
    fn to_domain(self) -> Lesson {
        Lesson {
            id: self.id,
            course_id: self.course_id,
            title: self.title,
            youtube_url: self.youtube_url,
            position: self.position,
        }
    }
}

#[derive(FromRow)]
struct BookRecord {
    id: i64,
    title: String,
    author: String,
    description: Option<String>,
    cover_url: Option<String>,
    file_url: Option<String>,
    file_name: Option<String>,
    category: Option<String>,
    level: Option<String>,
}
impl BookRecord {
    fn to_domain(self) -> Book {
        Book {
            id: self.id,
            title: self.title,
            author: self.author,
            description: self.description,
            cover_url: self.cover_url,
            file_url: self.file_url,
            file_name: self.file_name,
            category: self.category,
            level: self.level,
        }
    }
}

#[derive(FromRow)]
struct UserRecord {
    id: i64,
    username: String,
    password_hash: String,
}
impl UserRecord {
    fn to_domain(self) -> User {
        User {
            id: self.id,
            username: self.username,
            password_hash: self.password_hash,
        }
    }
}

const COURSE_COLUMNS: &str =
    "id, title, description, slug, cover_image, youtube_url, duration, lessons, is_archived";
const LESSON_COLUMNS: &str = "id, course_id, title, youtube_url, position";
const BOOK_COLUMNS: &str =
    "id, title, author, description, cover_url, file_url, file_name, category, level";

//=========================================================================================
// `ContentStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl ContentStore for SqliteStore {
    // --- Courses ---

    async fn list_courses(&self, archived_only: bool) -> PortResult<Vec<Course>> {
        let records = sqlx::query_as::<_, CourseRecord>(&format!(
            "SELECT {} FROM courses WHERE is_archived = ? ORDER BY id ASC",
            COURSE_COLUMNS
        ))
        .bind(archived_only)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "Course"))?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn get_course(&self, id: i64) -> PortResult<Course> {
        let record = sqlx::query_as::<_, CourseRecord>(&format!(
            "SELECT {} FROM courses WHERE id = ?",
            COURSE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "Course"))?
        .ok_or_else(|| PortError::NotFound(format!("Course {} not found", id)))?;

        Ok(record.to_domain())
    }

    async fn get_course_by_slug(&self, slug: &str) -> PortResult<Course> {
        let record = sqlx::query_as::<_, CourseRecord>(&format!(
            "SELECT {} FROM courses WHERE slug = ?",
            COURSE_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "Course"))?
        .ok_or_else(|| PortError::NotFound(format!("Course '{}' not found", slug)))?;

        Ok(record.to_domain())
    }

    async fn create_course(&self, new: NewCourse) -> PortResult<Course> {
        let slug = new.slug_or_derived();
        let record = sqlx::query_as::<_, CourseRecord>(&format!(
            "INSERT INTO courses (title, description, slug, cover_image, youtube_url, duration, lessons, is_archived)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {}",
            COURSE_COLUMNS
        ))
        .bind(&new.title)
        .bind(&new.description)
        .bind(&slug)
        .bind(&new.cover_image)
        .bind(&new.youtube_url)
        .bind(&new.duration)
        .bind(new.lessons.unwrap_or(0))
        .bind(new.is_archived.unwrap_or(false))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "Course slug"))?;

        tracing::debug!(slug = %slug, "Created course");
        Ok(record.to_domain())
    }

    async fn update_course(&self, id: i64, patch: CoursePatch) -> PortResult<Course> {
        // Read-merge-write keeps partial-update semantics in one place
        // (Course::apply). Concurrent patches race last-write-wins.
        let merged = self.get_course(id).await?.apply(patch);

        let record = sqlx::query_as::<_, CourseRecord>(&format!(
            "UPDATE courses
             SET title = ?, description = ?, slug = ?, cover_image = ?, youtube_url = ?,
                 duration = ?, lessons = ?, is_archived = ?
             WHERE id = ?
             RETURNING {}",
            COURSE_COLUMNS
        ))
        .bind(&merged.title)
        .bind(&merged.description)
        .bind(&merged.slug)
        .bind(&merged.cover_image)
        .bind(&merged.youtube_url)
        .bind(&merged.duration)
        .bind(merged.lessons)
        .bind(merged.is_archived)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "Course slug"))?;

        Ok(record.to_domain())
    }

    async fn delete_course(&self, id: i64) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_err(e, "Course"))?;

        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("Course {} not found", id)));
        }
        Ok(())
    }

    // --- Lessons ---

    async fn list_lessons(&self, course_id: i64) -> PortResult<Vec<Lesson>> {
        let records = sqlx::query_as::<_, LessonRecord>(&format!(
            "SELECT {} FROM lessons WHERE course_id = ? ORDER BY position ASC, id ASC",
            LESSON_COLUMNS
        ))
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "Lesson"))?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn create_lesson(&self, new: NewLesson) -> PortResult<Lesson> {
        // Surface a missing parent as NotFound instead of a raw FK failure.
        self.get_course(new.course_id).await?;

        let record = sqlx::query_as::<_, LessonRecord>(&format!(
            "INSERT INTO lessons (course_id, title, youtube_url, position)
             VALUES (?, ?, ?, ?)
             RETURNING {}",
            LESSON_COLUMNS
        ))
        .bind(new.course_id)
        .bind(&new.title)
        .bind(&new.youtube_url)
        .bind(new.position)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "Lesson"))?;

        Ok(record.to_domain())
    }

    async fn update_lesson(&self, id: i64, patch: LessonPatch) -> PortResult<Lesson> {
        let existing = sqlx::query_as::<_, LessonRecord>(&format!(
            "SELECT {} FROM lessons WHERE id = ?",
            LESSON_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "Lesson"))?
        .ok_or_else(|| PortError::NotFound(format!("Lesson {} not found", id)))?;

        let merged = existing.to_domain().apply(patch);

        let record = sqlx::query_as::<_, LessonRecord>(&format!(
            "UPDATE lessons SET title = ?, youtube_url = ?, position = ?
             WHERE id = ?
             RETURNING {}",
            LESSON_COLUMNS
        ))
        .bind(&merged.title)
        .bind(&merged.youtube_url)
        .bind(merged.position)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "Lesson"))?;

        Ok(record.to_domain())
    }

    async fn delete_lesson(&self, id: i64) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM lessons WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_err(e, "Lesson"))?;

        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("Lesson {} not found", id)));
        }
        Ok(())
    }

    // --- Books ---

    async fn list_books(&self) -> PortResult<Vec<Book>> {
        let records = sqlx::query_as::<_, BookRecord>(&format!(
            "SELECT {} FROM books ORDER BY id ASC",
            BOOK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "Book"))?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn get_book(&self, id: i64) -> PortResult<Book> {
        let record = sqlx::query_as::<_, BookRecord>(&format!(
            "SELECT {} FROM books WHERE id = ?",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "Book"))?
        .ok_or_else(|| PortError::NotFound(format!("Book {} not found", id)))?;

        Ok(record.to_domain())
    }

    async fn create_book(&self, new: NewBook) -> PortResult<Book> {
        let record = sqlx::query_as::<_, BookRecord>(&format!(
            "INSERT INTO books (title, author, description, cover_url, file_url, file_name, category, level)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {}",
            BOOK_COLUMNS
        ))
        .bind(&new.title)
        .bind(&new.author)
        .bind(&new.description)
        .bind(&new.cover_url)
        .bind(&new.file_url)
        .bind(&new.file_name)
        .bind(&new.category)
        .bind(&new.level)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "Book"))?;

        Ok(record.to_domain())
    }

    async fn update_book(&self, id: i64, patch: BookPatch) -> PortResult<Book> {
        let merged = self.get_book(id).await?.apply(patch);

        let record = sqlx::query_as::<_, BookRecord>(&format!(
            "UPDATE books
             SET title = ?, author = ?, description = ?, cover_url = ?, file_url = ?,
                 file_name = ?, category = ?, level = ?
             WHERE id = ?
             RETURNING {}",
            BOOK_COLUMNS
        ))
        .bind(&merged.title)
        .bind(&merged.author)
        .bind(&merged.description)
        .bind(&merged.cover_url)
        .bind(&merged.file_url)
        .bind(&merged.file_name)
        .bind(&merged.category)
        .bind(&merged.level)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "Book"))?;

        Ok(record.to_domain())
    }

    async fn delete_book(&self, id: i64) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_err(e, "Book"))?;

        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }

    // --- Users ---

    async fn create_user(&self, new: NewUser) -> PortResult<User> {
        let password_hash = hash_password(&new.password)?;

        let record = sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (username, password_hash) VALUES (?, ?)
             RETURNING id, username, password_hash",
        )
        .bind(&new.username)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "Username"))?;

        Ok(record.to_domain())
    }

    async fn get_user_by_username(&self, username: &str) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT id, username, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_err(e, "User"))?
        .ok_or_else(|| PortError::NotFound(format!("User '{}' not found", username)))?;

        Ok(record.to_domain())
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{password_hash::PasswordHash, PasswordVerifier};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_store() -> SqliteStore {
        // A single connection keeps every query on the same in-memory
        // database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        let store = SqliteStore::new(pool);
        store.run_migrations().await.unwrap();
        store
    }

    fn new_course(title: &str, slug: Option<&str>) -> NewCourse {
        NewCourse {
            title: title.to_string(),
            description: "A test course".to_string(),
            slug: slug.map(str::to_string),
            cover_image: None,
            youtube_url: None,
            duration: None,
            lessons: None,
            is_archived: None,
        }
    }

    fn new_lesson(course_id: i64, title: &str, position: i64) -> NewLesson {
        NewLesson {
            course_id,
            title: title.to_string(),
            youtube_url: "https://youtu.be/x".to_string(),
            position,
        }
    }

    fn new_book(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Imam Nawawi".to_string(),
            description: None,
            cover_url: None,
            file_url: None,
            file_name: None,
            category: Some("Hadith".to_string()),
            level: Some("Beginner".to_string()),
        }
    }

    #[tokio::test]
    async fn create_course_applies_defaults_and_derives_slug() {
        let store = create_test_store().await;

        let course = store
            .create_course(new_course("Prayer Guide", None))
            .await
            .unwrap();

        assert_eq!(course.slug, "prayer-guide");
        assert_eq!(course.lessons, 0);
        assert!(!course.is_archived);

        let fetched = store.get_course(course.id).await.unwrap();
        assert_eq!(fetched, course);
        let by_slug = store.get_course_by_slug("prayer-guide").await.unwrap();
        assert_eq!(by_slug.id, course.id);
    }

    #[tokio::test]
    async fn duplicate_slug_is_a_conflict() {
        let store = create_test_store().await;
        store
            .create_course(new_course("First", Some("same-slug")))
            .await
            .unwrap();

        let err = store
            .create_course(new_course("Second", Some("same-slug")))
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Conflict(_)));
    }

    #[tokio::test]
    async fn listing_filters_on_the_archive_flag() {
        let store = create_test_store().await;
        let active = store.create_course(new_course("Active", None)).await.unwrap();
        let mut archived = new_course("Archived", None);
        archived.is_archived = Some(true);
        let archived = store.create_course(archived).await.unwrap();

        let default_list = store.list_courses(false).await.unwrap();
        assert_eq!(default_list.len(), 1);
        assert_eq!(default_list[0].id, active.id);

        let archived_list = store.list_courses(true).await.unwrap();
        assert_eq!(archived_list.len(), 1);
        assert_eq!(archived_list[0].id, archived.id);
    }

    #[tokio::test]
    async fn partial_update_leaves_other_fields_untouched() {
        let store = create_test_store().await;
        let mut new = new_course("Prayer Guide", Some("prayer-guide"));
        new.lessons = Some(8);
        let course = store.create_course(new).await.unwrap();

        let updated = store
            .update_course(
                course.id,
                CoursePatch {
                    description: Some("Updated".to_string()),
                    ..CoursePatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.description, "Updated");
        assert_eq!(updated.title, "Prayer Guide");
        assert_eq!(updated.slug, "prayer-guide");
        assert_eq!(updated.lessons, 8);
    }

    #[tokio::test]
    async fn archiving_hides_a_course_from_the_default_listing() {
        let store = create_test_store().await;
        let mut new = new_course("Prayer Guide", Some("prayer-guide"));
        new.lessons = Some(8);
        let course = store.create_course(new).await.unwrap();

        store
            .update_course(
                course.id,
                CoursePatch {
                    is_archived: Some(true),
                    ..CoursePatch::default()
                },
            )
            .await
            .unwrap();

        assert!(store.list_courses(false).await.unwrap().is_empty());
        let archived = store.list_courses(true).await.unwrap();
        assert_eq!(archived.len(), 1);
        assert_eq!(archived[0].lessons, 8);
    }

    #[tokio::test]
    async fn operations_on_missing_ids_report_not_found() {
        let store = create_test_store().await;

        assert!(matches!(
            store.get_course(99).await.unwrap_err(),
            PortError::NotFound(_)
        ));
        assert!(matches!(
            store.update_course(99, CoursePatch::default()).await.unwrap_err(),
            PortError::NotFound(_)
        ));
        assert!(matches!(
            store.delete_course(99).await.unwrap_err(),
            PortError::NotFound(_)
        ));
        assert!(matches!(
            store.get_course_by_slug("nope").await.unwrap_err(),
            PortError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn deleted_course_is_gone() {
        let store = create_test_store().await;
        let course = store.create_course(new_course("Gone", None)).await.unwrap();

        store.delete_course(course.id).await.unwrap();
        assert!(matches!(
            store.get_course(course.id).await.unwrap_err(),
            PortError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn lessons_list_in_position_order() {
        let store = create_test_store().await;
        let course = store.create_course(new_course("Tajweed", None)).await.unwrap();

        store.create_lesson(new_lesson(course.id, "Second", 1)).await.unwrap();
        store.create_lesson(new_lesson(course.id, "First", 0)).await.unwrap();

        let lessons = store.list_lessons(course.id).await.unwrap();
        assert_eq!(lessons.len(), 2);
        assert_eq!(lessons[0].title, "First");
        assert_eq!(lessons[1].title, "Second");
    }

    #[tokio::test]
    async fn lesson_requires_an_existing_course() {
        let store = create_test_store().await;
        let err = store.create_lesson(new_lesson(42, "Orphan", 0)).await.unwrap_err();
        assert!(matches!(err, PortError::NotFound(_)));
    }

    #[tokio::test]
    async fn deleting_a_course_cascades_to_its_lessons() {
        let store = create_test_store().await;
        let course = store.create_course(new_course("Seerah", None)).await.unwrap();
        let lesson = store
            .create_lesson(new_lesson(course.id, "Mecca", 0))
            .await
            .unwrap();

        store.delete_course(course.id).await.unwrap();

        assert!(store.list_lessons(course.id).await.unwrap().is_empty());
        assert!(matches!(
            store.delete_lesson(lesson.id).await.unwrap_err(),
            PortError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn lesson_patch_updates_position() {
        let store = create_test_store().await;
        let course = store.create_course(new_course("Fiqh", None)).await.unwrap();
        let lesson = store
            .create_lesson(new_lesson(course.id, "Wudu", 0))
            .await
            .unwrap();

        let updated = store
            .update_lesson(
                lesson.id,
                LessonPatch {
                    position: Some(5),
                    ..LessonPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.position, 5);
        assert_eq!(updated.title, "Wudu");
    }

    #[tokio::test]
    async fn book_crud_round_trip() {
        let store = create_test_store().await;

        let book = store.create_book(new_book("Riyad as-Salihin")).await.unwrap();
        assert_eq!(store.list_books().await.unwrap().len(), 1);

        let updated = store
            .update_book(
                book.id,
                BookPatch {
                    file_url: Some("/uploads/riyad.pdf".to_string()),
                    file_name: Some("riyad.pdf".to_string()),
                    ..BookPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Riyad as-Salihin");
        assert_eq!(updated.file_url.as_deref(), Some("/uploads/riyad.pdf"));

        store.delete_book(book.id).await.unwrap();
        assert!(store.list_books().await.unwrap().is_empty());
        assert!(matches!(
            store.delete_book(book.id).await.unwrap_err(),
            PortError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn user_passwords_are_stored_as_verifiable_hashes() {
        let store = create_test_store().await;

        let user = store
            .create_user(NewUser {
                username: "admin".to_string(),
                password: "correct horse".to_string(),
            })
            .await
            .unwrap();

        assert_ne!(user.password_hash, "correct horse");
        let parsed = PasswordHash::new(&user.password_hash).unwrap();
        assert!(Argon2::default()
            .verify_password(b"correct horse", &parsed)
            .is_ok());

        let fetched = store.get_user_by_username("admin").await.unwrap();
        assert_eq!(fetched.id, user.id);
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let store = create_test_store().await;
        let new = || NewUser {
            username: "admin".to_string(),
            password: "pw".to_string(),
        };
        store.create_user(new()).await.unwrap();
        assert!(matches!(
            store.create_user(new()).await.unwrap_err(),
            PortError::Conflict(_)
        ));
    }
}
