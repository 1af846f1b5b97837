//! Image loading for the "Custom Image" background.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// An image that was found and read successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Loads background images for the rendering collaborator.
pub trait ImageLoader {
    /// Returns the image at `path`, or `None` if it cannot be used.
    fn load(&self, path: &Path) -> Option<LoadedImage>;
}

/// Image file extensions the background renderer understands.
const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "heic", "gif", "tiff", "bmp"];

/// Reads images from the local file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsImageLoader;

impl ImageLoader for FsImageLoader {
    fn load(&self, path: &Path) -> Option<LoadedImage> {
        let supported = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()));
        if !supported {
            tracing::debug!(path = %path.display(), "Unsupported image extension");
            return None;
        }

        match std::fs::read(path) {
            Ok(bytes) if !bytes.is_empty() => Some(LoadedImage {
                path: path.to_path_buf(),
                bytes,
            }),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Failed to read image");
                None
            }
        }
    }
}

/// Image loader that serves registered paths from memory.
#[derive(Debug, Default)]
pub struct MockImageLoader {
    available: Mutex<Vec<PathBuf>>,
    load_calls: Mutex<Vec<PathBuf>>,
}

impl MockImageLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `path` loadable.
    pub fn add_image(&self, path: impl Into<PathBuf>) {
        self.available.lock().unwrap().push(path.into());
    }

    #[must_use]
    pub fn load_count(&self) -> usize {
        self.load_calls.lock().unwrap().len()
    }
}

impl ImageLoader for MockImageLoader {
    fn load(&self, path: &Path) -> Option<LoadedImage> {
        self.load_calls.lock().unwrap().push(path.to_path_buf());
        self.available
            .lock()
            .unwrap()
            .iter()
            .any(|p| p == path)
            .then(|| LoadedImage {
                path: path.to_path_buf(),
                bytes: Vec::new(),
            })
    }
}
