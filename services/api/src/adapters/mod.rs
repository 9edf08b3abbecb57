pub mod db;
pub mod uploads;

pub use db::SqliteStore;
pub use uploads::DiskFileStore;
