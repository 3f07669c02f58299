/// State management module
///
/// This module holds all application state that is independent of the UI:
/// - Persisted settings and the recognized extensions (config.rs)
/// - Shared data structures handed to the view (data.rs)
/// - Folder/media navigation over the filesystem (navigator.rs)

pub mod config;
pub mod data;
pub mod navigator;
