/// Folder and media enumeration
///
/// Listing is best-effort: a missing or unreadable root yields an empty list,
/// and entries that cannot be read are skipped rather than reported.
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Sibling order: case-insensitive by name, ties broken by the raw name
fn by_name(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_name = a.file_name().to_string_lossy().to_lowercase();
    let b_name = b.file_name().to_string_lossy().to_lowercase();
    a_name
        .cmp(&b_name)
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn readable(entry: walkdir::Result<DirEntry>) -> Option<DirEntry> {
    match entry {
        Ok(entry) => Some(entry),
        Err(err) => {
            tracing::warn!("Skipping unreadable entry: {}", err);
            None
        }
    }
}

/// Enumerate the folders under `root`.
///
/// Non-recursive scans return the immediate subdirectories only. Recursive
/// scans return `root` itself first, followed by every descendant directory
/// in pre-order. Symbolic links are followed; walkdir reports loops as
/// errors, which are skipped like any other unreadable entry.
pub fn scan_folders(root: &Path, recursive: bool) -> Vec<PathBuf> {
    if !root.is_dir() {
        tracing::warn!("Scan root is not a readable directory: {}", root.display());
        return Vec::new();
    }

    let walker = WalkDir::new(root).follow_links(true).sort_by(by_name);
    let walker = if recursive {
        walker
    } else {
        walker.min_depth(1).max_depth(1)
    };

    walker
        .into_iter()
        .filter_map(readable)
        .filter(|entry| entry.file_type().is_dir())
        .map(DirEntry::into_path)
        .collect()
}

/// List the files directly inside `folder` whose extension is in `extensions`.
///
/// Returns bare filenames, not paths. Names that are not valid UTF-8 are
/// skipped.
pub fn list_media_files(folder: &Path, extensions: &[&str]) -> Vec<String> {
    WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by(by_name)
        .into_iter()
        .filter_map(readable)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| match entry.file_name().to_str() {
            Some(name) => Some(name.to_owned()),
            None => {
                tracing::debug!("Skipping non UTF-8 filename: {:?}", entry.file_name());
                None
            }
        })
        .filter(|name| has_extension(name, extensions))
        .collect()
}

/// Lowercase extension with its leading dot (`"Photo.JPG"` gives `".jpg"`)
pub fn dotted_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

/// Check whether `name` carries one of the dotted `extensions`
pub fn has_extension(name: &str, extensions: &[&str]) -> bool {
    dotted_extension(name).is_some_and(|ext| extensions.contains(&ext.as_str()))
}
