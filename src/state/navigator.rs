use std::path::{Path, PathBuf};
use thiserror::Error;

use super::config::{supported_extensions, ConfigStore, Settings};
use super::data::{FolderView, MediaKind, MediaView, NavigationSnapshot};
use crate::files::{DiskOps, FileOps, FsError};

#[derive(Debug, Error)]
pub enum NavError {
    #[error("Please select a folder first")]
    NoRootSelected,
    #[error("Failed to delete folder: {name}")]
    DeleteFolder {
        name: String,
        #[source]
        source: FsError,
    },
    #[error("Failed to delete: {name}")]
    DeleteMedia {
        name: String,
        #[source]
        source: FsError,
    },
    #[error("Failed to play video")]
    Play {
        #[source]
        source: FsError,
    },
}

/// The Navigator walks two nested cursors: one over the scanned folders,
/// one over the media files of the selected folder.
///
/// Both cursors stay inside their lists while the lists are non-empty. An
/// empty list leaves its cursor at 0 and it is never dereferenced. Every
/// failed operation leaves the state exactly as it was.
pub struct Navigator<F: FileOps = DiskOps> {
    config: ConfigStore,
    ops: F,
    extensions: Vec<&'static str>,
    folders: Vec<PathBuf>,
    folder_index: usize,
    media: Vec<String>,
    media_index: usize,
}

impl Navigator<DiskOps> {
    pub fn new(config: ConfigStore) -> Self {
        Self::with_ops(config, DiskOps)
    }
}

impl<F: FileOps> Navigator<F> {
    pub fn with_ops(config: ConfigStore, ops: F) -> Self {
        Navigator {
            config,
            ops,
            extensions: supported_extensions(),
            folders: Vec::new(),
            folder_index: 0,
            media: Vec::new(),
            media_index: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        self.config.settings()
    }

    /// Remember a new root folder. The folder list is untouched until the
    /// next rescan.
    pub fn select_root(&mut self, folder: PathBuf) {
        tracing::info!("Root folder set to {}", folder.display());
        self.config.set_root_folder(folder);
    }

    pub fn set_recursive(&mut self, recursive: bool) {
        self.config.set_recursive(recursive);
    }

    pub fn set_skip_confirmation(&mut self, skip: bool) {
        self.config.set_skip_delete_confirmation(skip);
    }

    /// Whether deletions should be confirmed by the user first
    pub fn needs_confirmation(&self) -> bool {
        !self.config.settings().skip_delete_confirmation
    }

    /// Scan the root again, select the first folder and load its media.
    /// Returns the number of folders found.
    pub fn rescan(&mut self, recursive: bool) -> Result<usize, NavError> {
        let root = self
            .config
            .settings()
            .root_folder()
            .ok_or(NavError::NoRootSelected)?
            .to_path_buf();

        tracing::info!(
            "Scanning {} ({})",
            root.display(),
            if recursive { "recursive" } else { "top level" }
        );

        self.folders = self.ops.scan_folders(&root, recursive);
        self.folder_index = 0;
        self.load_current_folder();

        tracing::info!("Found {} folders", self.folders.len());
        Ok(self.folders.len())
    }

    #[cfg(test)]
    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    #[cfg(test)]
    pub fn folder_index(&self) -> usize {
        self.folder_index
    }

    #[cfg(test)]
    pub fn media(&self) -> &[String] {
        &self.media
    }

    #[cfg(test)]
    pub fn media_index(&self) -> usize {
        self.media_index
    }

    pub fn current_folder(&self) -> Option<&Path> {
        self.folders.get(self.folder_index).map(PathBuf::as_path)
    }

    pub fn current_media_name(&self) -> Option<&str> {
        self.media.get(self.media_index).map(String::as_str)
    }

    pub fn current_media_path(&self) -> Option<PathBuf> {
        Some(self.current_folder()?.join(self.current_media_name()?))
    }

    /// Move to the next folder. Returns false at the last folder.
    pub fn next_folder(&mut self) -> bool {
        if self.folder_index + 1 >= self.folders.len() {
            return false;
        }
        self.folder_index += 1;
        self.load_current_folder();
        true
    }

    /// Move to the previous folder. Returns false at the first folder.
    pub fn prev_folder(&mut self) -> bool {
        if self.folder_index == 0 || self.folders.is_empty() {
            return false;
        }
        self.folder_index -= 1;
        self.load_current_folder();
        true
    }

    /// Delete the selected folder and everything in it. Folders listed
    /// below it by a recursive scan go with it.
    ///
    /// Returns the deleted folder's name, or `None` when there is nothing to
    /// delete.
    pub fn delete_current_folder(&mut self) -> Result<Option<String>, NavError> {
        let Some(folder) = self.current_folder().map(Path::to_path_buf) else {
            return Ok(None);
        };
        let name = display_name(&folder);

        self.ops
            .delete_folder(&folder)
            .map_err(|source| NavError::DeleteFolder {
                name: name.clone(),
                source,
            })?;

        tracing::info!("Deleted folder {}", folder.display());
        // Pre-order keeps a recursive scan's descendants right after their
        // parent, so the cursor still lands on the next surviving folder.
        let before = self.folders.len();
        self.folders.retain(|entry| !entry.starts_with(&folder));
        let dropped = before - self.folders.len() - 1;
        if dropped > 0 {
            tracing::debug!("Dropped {} folders inside {}", dropped, folder.display());
        }
        self.folder_index = clamp_index(self.folder_index, self.folders.len());
        self.load_current_folder();
        Ok(Some(name))
    }

    /// Move to the next media file. Returns false at the last file.
    pub fn next_media(&mut self) -> bool {
        if self.media_index + 1 >= self.media.len() {
            return false;
        }
        self.media_index += 1;
        true
    }

    /// Move to the previous media file. Returns false at the first file.
    pub fn prev_media(&mut self) -> bool {
        if self.media_index == 0 || self.media.is_empty() {
            return false;
        }
        self.media_index -= 1;
        true
    }

    /// Delete the selected media file.
    ///
    /// Returns the deleted file's name, or `None` when there is nothing to
    /// delete.
    pub fn delete_current_media(&mut self) -> Result<Option<String>, NavError> {
        let Some(path) = self.current_media_path() else {
            return Ok(None);
        };
        let name = self.media[self.media_index].clone();

        self.ops
            .delete_file(&path)
            .map_err(|source| NavError::DeleteMedia {
                name: name.clone(),
                source,
            })?;

        tracing::info!("Deleted {}", path.display());
        self.media.remove(self.media_index);
        self.media_index = clamp_index(self.media_index, self.media.len());
        Ok(Some(name))
    }

    /// Open the selected media file with the default application.
    /// Returns false when there is nothing to open.
    pub fn play_current_media(&self) -> Result<bool, NavError> {
        let Some(path) = self.current_media_path() else {
            return Ok(false);
        };

        tracing::info!("Opening {}", path.display());
        self.ops
            .open_file(&path)
            .map_err(|source| NavError::Play { source })?;
        Ok(true)
    }

    pub fn classify_current(&self) -> MediaKind {
        self.current_media_name()
            .map(MediaKind::from_filename)
            .unwrap_or(MediaKind::None)
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        let folder = self.current_folder().map(|path| FolderView {
            name: display_name(path),
            position: self.folder_index + 1,
            total: self.folders.len(),
        });

        let media = self
            .current_media_name()
            .zip(self.current_media_path())
            .map(|(name, path)| MediaView {
                name: name.to_string(),
                path,
                kind: MediaKind::from_filename(name),
                position: self.media_index + 1,
                total: self.media.len(),
            });

        let has_folders = !self.folders.is_empty();
        let has_media = !self.media.is_empty();

        NavigationSnapshot {
            can_prev_folder: has_folders && self.folder_index > 0,
            can_next_folder: has_folders && self.folder_index + 1 < self.folders.len(),
            can_delete_folder: has_folders,
            can_prev_media: has_media && self.media_index > 0,
            can_next_media: has_media && self.media_index + 1 < self.media.len(),
            can_delete_media: has_media,
            can_play: media.as_ref().is_some_and(|m| m.kind == MediaKind::Video),
            folder,
            media,
        }
    }

    /// Recompute the media list for the selected folder
    fn load_current_folder(&mut self) {
        self.media = match self.current_folder() {
            Some(folder) => {
                let files = self.ops.list_media_files(folder, &self.extensions);
                tracing::debug!("{} media files in {}", files.len(), folder.display());
                files
            }
            None => Vec::new(),
        };
        self.media_index = 0;
    }
}

impl<F: FileOps> std::fmt::Debug for Navigator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("folders", &self.folders.len())
            .field("folder_index", &self.folder_index)
            .field("media", &self.media.len())
            .field("media_index", &self.media_index)
            .finish()
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}

/// Last path component, or the whole path for roots like `/`
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
