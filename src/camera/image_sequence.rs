use super::{Camera, Frame, Resolution};
use crate::{Error, Result};
use log::{debug, info};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Replays image files from a directory in lexical order
pub struct ImageSequenceCamera {
    pending: VecDeque<PathBuf>,
    resolution: Resolution,
}

impl ImageSequenceCamera {
    /// Collect the frames of `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Device`] if the directory cannot be read or holds no images.
    pub fn open<P: AsRef<Path>>(dir: P, resolution: Resolution) -> Result<Self> {
        let dir = dir.as_ref();
        info!("Opening frame directory: {}", dir.display());

        let entries = std::fs::read_dir(dir)
            .map_err(|e| Error::Device(format!("Cannot read frame directory {}: {e}", dir.display())))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_image = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()));
            if is_image {
                paths.push(path);
            }
        }
        if paths.is_empty() {
            return Err(Error::Device(format!("No image files in {}", dir.display())));
        }
        paths.sort();

        info!("Replaying {} frames at nominal {}", paths.len(), resolution);
        Ok(Self {
            pending: paths.into(),
            resolution,
        })
    }

    /// Frames not yet returned
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl Camera for ImageSequenceCamera {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        let Some(path) = self.pending.pop_front() else {
            return Ok(None);
        };
        debug!("Loading frame {}", path.display());
        Ok(Some(image::open(&path)?.to_rgb8()))
    }

    fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }

    fn resolution(&self) -> Resolution {
        self.resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_replays_in_lexical_order() {
        let dir = tempfile::tempdir().unwrap();
        RgbImage::new(2, 2).save(dir.path().join("frame_001.png")).unwrap();
        RgbImage::new(3, 3).save(dir.path().join("frame_000.png")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();

        let mut camera = ImageSequenceCamera::open(dir.path(), Resolution::new(3, 3)).unwrap();
        assert_eq!(camera.remaining(), 2);
        assert!(!camera.is_finished());

        assert_eq!(camera.next_frame().unwrap().unwrap().dimensions(), (3, 3));
        assert_eq!(camera.next_frame().unwrap().unwrap().dimensions(), (2, 2));
        assert!(camera.is_finished());
        assert!(camera.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_empty_directory_is_a_device_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ImageSequenceCamera::open(dir.path(), Resolution::new(640, 480));
        assert!(matches!(result, Err(Error::Device(_))));
    }
}
