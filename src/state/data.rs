/// Shared data structures for the application state
///
/// These structs are the read-only view of navigation state that flows
/// from the navigator to the UI layer.
use std::path::PathBuf;

use super::config::VIDEO_EXTENSIONS;
use crate::files::scanner::has_extension;

/// How the current media item is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Decoded and shown in the preview pane
    Image,
    /// Shown as a placeholder, played in the default application
    Video,
    /// Nothing selected
    None,
}

impl MediaKind {
    /// Classify a filename; anything that isn't a known video is an image
    pub fn from_filename(name: &str) -> Self {
        if has_extension(name, VIDEO_EXTENSIONS) {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

/// The selected folder
#[derive(Debug, Clone, PartialEq)]
pub struct FolderView {
    pub name: String,
    /// 1-based position in the folder list
    pub position: usize,
    pub total: usize,
}

impl FolderView {
    pub fn label(&self) -> String {
        format!("{} ({}/{})", self.name, self.position, self.total)
    }
}

/// The selected media file
#[derive(Debug, Clone, PartialEq)]
pub struct MediaView {
    pub name: String,
    pub path: PathBuf,
    pub kind: MediaKind,
    /// 1-based position in the media list
    pub position: usize,
    pub total: usize,
}

impl MediaView {
    pub fn label(&self) -> String {
        format!("{} ({}/{})", self.name, self.position, self.total)
    }
}

/// Everything the view needs to render navigation controls
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationSnapshot {
    pub folder: Option<FolderView>,
    pub media: Option<MediaView>,
    pub can_prev_folder: bool,
    pub can_next_folder: bool,
    pub can_delete_folder: bool,
    pub can_prev_media: bool,
    pub can_next_media: bool,
    pub can_delete_media: bool,
    /// Only videos are played
    pub can_play: bool,
}

impl NavigationSnapshot {
    pub fn folder_label(&self) -> String {
        self.folder
            .as_ref()
            .map(FolderView::label)
            .unwrap_or_else(|| "No folders found".to_string())
    }

    pub fn media_label(&self) -> String {
        self.media
            .as_ref()
            .map(MediaView::label)
            .unwrap_or_else(|| "No media files".to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Critical,
}

/// A message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Notice {
            severity: Severity::Info,
            text: text.into(),
        }
    }

    pub fn critical(text: impl Into<String>) -> Self {
        Notice {
            severity: Severity::Critical,
            text: text.into(),
        }
    }
}
