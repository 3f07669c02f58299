/// Filesystem access
///
/// Everything the organizer does to the disk goes through here:
/// - Folder and media enumeration (scanner.rs)
/// - Deleting, and opening files with the default application (ops.rs)

pub mod ops;
pub mod scanner;

pub use ops::{DiskOps, FileOps, FsError};
