/// Preview pane
///
/// Images are decoded off the UI thread and handed to iced as RGBA pixels.
/// Videos never get decoded; they show a placeholder and are played in the
/// default application instead.
use iced::widget::image::Handle;
use image::imageops::FilterType;
use std::path::{Path, PathBuf};

use crate::state::data::{MediaKind, MediaView};

/// Longest edge of a decoded preview; larger images are scaled down
const MAX_PREVIEW_EDGE: u32 = 2048;

/// What the preview pane currently shows
#[derive(Debug, Clone, Default)]
pub enum Preview {
    #[default]
    Empty,
    Loading {
        path: PathBuf,
        name: String,
    },
    Image {
        handle: Handle,
    },
    Failed {
        name: String,
    },
    Video {
        name: String,
    },
}

impl Preview {
    /// Start showing `media`. Images come back as `Loading` and need
    /// [`load_preview`] to run for their `pending_path`.
    pub fn begin(media: Option<&MediaView>) -> Self {
        match media {
            None => Preview::Empty,
            Some(media) if media.kind == MediaKind::Video => Preview::Video {
                name: media.name.clone(),
            },
            Some(media) => Preview::Loading {
                path: media.path.clone(),
                name: media.name.clone(),
            },
        }
    }

    pub fn pending_path(&self) -> Option<&Path> {
        match self {
            Preview::Loading { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Apply a finished decode. Results for anything other than the image
    /// being loaded are stale and dropped; returns whether it was applied.
    pub fn resolve(&mut self, path: &Path, result: Result<Handle, String>) -> bool {
        let Preview::Loading { path: pending, name } = self else {
            return false;
        };
        if pending.as_path() != path {
            return false;
        }
        let name = name.clone();

        *self = match result {
            Ok(handle) => Preview::Image { handle },
            Err(err) => {
                tracing::warn!("Failed to load image {}: {}", path.display(), err);
                Preview::Failed { name }
            }
        };
        true
    }

    /// Text shown in place of (or while waiting for) an image
    pub fn caption(&self) -> String {
        match self {
            Preview::Empty => "No media selected".to_string(),
            Preview::Loading { name, .. } => format!("Loading {}...", name),
            Preview::Image { .. } => String::new(),
            Preview::Failed { name } => format!("Failed to load image: {}", name),
            Preview::Video { name } => format!("Video: {}\n\nClick to play", name),
        }
    }
}

/// Decoded RGBA pixels, ready for the image widget
#[derive(Debug, Clone)]
pub struct DecodedPreview {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decode an image file, scaling it down to fit the preview bound
pub fn decode_preview(path: &Path) -> Result<DecodedPreview, image::ImageError> {
    let img = image::open(path)?;

    let img = if img.width() > MAX_PREVIEW_EDGE || img.height() > MAX_PREVIEW_EDGE {
        img.resize(MAX_PREVIEW_EDGE, MAX_PREVIEW_EDGE, FilterType::Triangle)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    Ok(DecodedPreview {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

/// Decode an image on the blocking pool
pub async fn load_preview(path: PathBuf) -> Result<Handle, String> {
    let decoded = tokio::task::spawn_blocking(move || decode_preview(&path))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
        .map_err(|e| e.to_string())?;

    Ok(Handle::from_rgba(decoded.width, decoded.height, decoded.pixels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn media(name: &str, kind: MediaKind) -> MediaView {
        MediaView {
            name: name.to_string(),
            path: PathBuf::from("/media/A").join(name),
            kind,
            position: 1,
            total: 1,
        }
    }

    #[test]
    fn test_begin_picks_display_mode() {
        assert!(matches!(Preview::begin(None), Preview::Empty));
        assert!(matches!(
            Preview::begin(Some(&media("clip.mp4", MediaKind::Video))),
            Preview::Video { .. }
        ));

        let loading = Preview::begin(Some(&media("photo.jpg", MediaKind::Image)));
        assert_eq!(loading.pending_path(), Some(Path::new("/media/A/photo.jpg")));
    }

    #[test]
    fn test_stale_result_is_dropped() {
        let mut preview = Preview::begin(Some(&media("new.jpg", MediaKind::Image)));

        let applied = preview.resolve(Path::new("/media/A/old.jpg"), Err("boom".to_string()));

        assert!(!applied);
        assert!(matches!(preview, Preview::Loading { .. }));
    }

    #[test]
    fn test_failed_decode_shows_message() {
        let mut preview = Preview::begin(Some(&media("broken.jpg", MediaKind::Image)));

        assert!(preview.resolve(Path::new("/media/A/broken.jpg"), Err("bad data".to_string())));

        assert_eq!(preview.caption(), "Failed to load image: broken.jpg");
    }

    #[test]
    fn test_captions() {
        assert_eq!(Preview::Empty.caption(), "No media selected");
        assert_eq!(
            Preview::begin(Some(&media("clip.mov", MediaKind::Video))).caption(),
            "Video: clip.mov\n\nClick to play"
        );
    }

    #[test]
    fn test_decode_small_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dot.png");
        image::RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let decoded = decode_preview(&path).unwrap();

        assert_eq!((decoded.width, decoded.height), (3, 2));
        assert_eq!(decoded.pixels.len(), 3 * 2 * 4);
        assert_eq!(&decoded.pixels[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_large_image_is_bounded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wide.png");
        image::RgbaImage::new(MAX_PREVIEW_EDGE * 2, 10).save(&path).unwrap();

        let decoded = decode_preview(&path).unwrap();

        assert_eq!(decoded.width, MAX_PREVIEW_EDGE);
        assert!(decoded.height <= 10);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fake.jpg");
        std::fs::write(&path, b"not an image").unwrap();

        assert!(decode_preview(&path).is_err());
    }
}
