//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use std::sync::Arc;

use all_islam_core::ports::{ContentStore, FileStore};

use crate::config::Config;

/// The shared application state, created once at startup and passed to all
/// handlers. Requests share nothing mutable beyond the store itself.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub files: Arc<dyn FileStore>,
    pub config: Arc<Config>,
}
