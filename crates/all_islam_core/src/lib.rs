pub mod domain;
pub mod ports;
pub mod script;

pub use domain::{
    slugify, Book, BookPatch, Course, CoursePatch, Lesson, LessonPatch, NewBook, NewCourse,
    NewLesson, NewUser, StoredFile, User,
};
pub use ports::{ContentStore, FileStore, PortError, PortResult};
pub use script::{MessageContent, MultiLangText, Role, Script, ScriptPlayer, ScriptStep};
