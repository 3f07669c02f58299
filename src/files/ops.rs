use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::scanner;

/// Failures of the destructive and external filesystem operations.
/// Enumeration never fails; it degrades to an empty listing instead.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("Failed to delete file {}: {source}", .path.display())]
    DeleteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to delete folder {}: {source}", .path.display())]
    DeleteFolder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to open {} with the default application: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The filesystem operations the navigator depends on
pub trait FileOps {
    fn scan_folders(&self, root: &Path, recursive: bool) -> Vec<PathBuf>;
    fn list_media_files(&self, folder: &Path, extensions: &[&str]) -> Vec<String>;
    fn delete_file(&self, path: &Path) -> Result<(), FsError>;
    /// Removes the folder and everything below it. There is no trash.
    fn delete_folder(&self, path: &Path) -> Result<(), FsError>;
    /// Succeeds once the request is handed to the OS; the launched
    /// application's own outcome is not observed.
    fn open_file(&self, path: &Path) -> Result<(), FsError>;
}

/// Real disk access
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskOps;

impl FileOps for DiskOps {
    fn scan_folders(&self, root: &Path, recursive: bool) -> Vec<PathBuf> {
        scanner::scan_folders(root, recursive)
    }

    fn list_media_files(&self, folder: &Path, extensions: &[&str]) -> Vec<String> {
        scanner::list_media_files(folder, extensions)
    }

    fn delete_file(&self, path: &Path) -> Result<(), FsError> {
        std::fs::remove_file(path).map_err(|source| FsError::DeleteFile {
            path: path.to_path_buf(),
            source,
        })
    }

    fn delete_folder(&self, path: &Path) -> Result<(), FsError> {
        std::fs::remove_dir_all(path).map_err(|source| FsError::DeleteFolder {
            path: path.to_path_buf(),
            source,
        })
    }

    fn open_file(&self, path: &Path) -> Result<(), FsError> {
        open::that_detached(path).map_err(|source| FsError::Open {
            path: path.to_path_buf(),
            source,
        })
    }
}
