//! crates/all_islam_core/src/domain.rs
//!
//! Defines the core data structures for the content catalog: full records,
//! their insert shapes (fields a client may supply on create) and their
//! patch shapes (every insert field made optional).
//!
//! Wire names are camelCase to match the original JSON format, so the
//! structs derive their serde representation here rather than in the web
//! layer.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

//=========================================================================================
// Course
//=========================================================================================

/// A course in the catalog. Archived courses stay queryable but are hidden
/// from default listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// URL-safe unique identifier, derived from the title when not supplied.
    pub slug: String,
    pub cover_image: Option<String>,
    pub youtube_url: Option<String>,
    /// Free-form display text, e.g. "4h 30m".
    pub duration: Option<String>,
    /// Stored lesson count shown on course cards. Not recomputed from the
    /// lessons table, so it can drift from the real number of rows.
    pub lessons: i64,
    pub is_archived: bool,
}

/// The insert shape for [`Course`]. `slug` may be omitted; the store derives
/// it from the title via [`slugify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub lessons: Option<i64>,
    #[serde(default)]
    pub is_archived: Option<bool>,
}

impl NewCourse {
    /// The slug to persist: the caller's slug when present, otherwise one
    /// derived from the title.
    pub fn slug_or_derived(&self) -> String {
        match &self.slug {
            Some(slug) if !slug.is_empty() => slug.clone(),
            _ => slugify(&self.title),
        }
    }
}

/// Partial update for [`Course`]. Omitted fields are left untouched; the
/// empty patch is legal and a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoursePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub lessons: Option<i64>,
    #[serde(default)]
    pub is_archived: Option<bool>,
}

impl Course {
    /// Returns this record with the patch's supplied fields applied.
    pub fn apply(mut self, patch: CoursePatch) -> Course {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(slug) = patch.slug {
            self.slug = slug;
        }
        if let Some(cover_image) = patch.cover_image {
            self.cover_image = Some(cover_image);
        }
        if let Some(youtube_url) = patch.youtube_url {
            self.youtube_url = Some(youtube_url);
        }
        if let Some(duration) = patch.duration {
            self.duration = Some(duration);
        }
        if let Some(lessons) = patch.lessons {
            self.lessons = lessons;
        }
        if let Some(is_archived) = patch.is_archived {
            self.is_archived = is_archived;
        }
        self
    }
}

//=========================================================================================
// Lesson
//=========================================================================================

/// A single lesson within a course. `position` (wire name `order`) controls
/// the display sequence and need not be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub youtube_url: String,
    #[serde(rename = "order")]
    pub position: i64,
}

/// The insert shape for [`Lesson`]. The parent course id comes from the
/// request path, so a `courseId` in the body is optional and overridden by
/// the handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewLesson {
    #[serde(default)]
    pub course_id: i64,
    pub title: String,
    pub youtube_url: String,
    #[serde(rename = "order", default)]
    pub position: i64,
}

/// Partial update for [`Lesson`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub youtube_url: Option<String>,
    #[serde(rename = "order", default)]
    pub position: Option<i64>,
}

impl Lesson {
    /// Returns this record with the patch's supplied fields applied.
    pub fn apply(mut self, patch: LessonPatch) -> Lesson {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(youtube_url) = patch.youtube_url {
            self.youtube_url = youtube_url;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        self
    }
}

//=========================================================================================
// Book
//=========================================================================================

/// A book in the library. Books are deleted physically; there is no archive
/// flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    /// Path/URL to an uploaded PDF, usually produced by the upload endpoint.
    pub file_url: Option<String>,
    /// Original filename of the upload, kept for display.
    pub file_name: Option<String>,
    /// Open set: Quran, Hadith, Fiqh, Aqeedah, Seerah, General, ...
    pub category: Option<String>,
    /// Beginner, Intermediate, Advanced or All Levels.
    pub level: Option<String>,
}

/// The insert shape for [`Book`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

/// Partial update for [`Book`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

impl Book {
    /// Returns this record with the patch's supplied fields applied.
    pub fn apply(mut self, patch: BookPatch) -> Book {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(cover_url) = patch.cover_url {
            self.cover_url = Some(cover_url);
        }
        if let Some(file_url) = patch.file_url {
            self.file_url = Some(file_url);
        }
        if let Some(file_name) = patch.file_name {
            self.file_name = Some(file_name);
        }
        if let Some(category) = patch.category {
            self.category = Some(category);
        }
        if let Some(level) = patch.level {
            self.level = Some(level);
        }
        self
    }
}

//=========================================================================================
// User
//=========================================================================================

/// A registered user. Only the password hash is stored; the plaintext never
/// leaves the store's create path.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

/// The insert shape for [`User`]. The store hashes `password` before insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

//=========================================================================================
// Uploads
//=========================================================================================

/// The result of persisting an uploaded file: a servable URL plus the
/// client's original filename for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub url: String,
    pub file_name: String,
}

//=========================================================================================
// Slug derivation
//=========================================================================================

/// Derives a URL-safe slug from a human-readable title: lowercase, every run
/// of non-alphanumeric characters collapsed to a single `-`, leading and
/// trailing `-` trimmed.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

//=========================================================================================
// Tests
//=========================================================================================
