//! Frame sources.
//!
//! A [`Camera`] is owned by the stream loop and released when dropped. `next_frame` returning
//! `Ok(None)` means no image is available yet; the loop retries immediately.

/// Replay of image files from a directory
pub mod image_sequence;

/// `OpenCV` `VideoCapture` device source
#[cfg(feature = "opencv")]
pub mod opencv;

use crate::{Error, Result};
use image::{imageops, RgbImage};
use serde::{Deserialize, Serialize};

pub use image_sequence::ImageSequenceCamera;

/// One RGB camera frame
pub type Frame = RgbImage;

/// Camera resolution in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl From<[u32; 2]> for Resolution {
    fn from([width, height]: [u32; 2]) -> Self {
        Self { width, height }
    }
}

impl From<Resolution> for [u32; 2] {
    fn from(resolution: Resolution) -> Self {
        [resolution.width, resolution.height]
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A source of camera frames
pub trait Camera: Send {
    /// Fetch the next frame, or `None` if no frame is ready yet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Device`] (or a backend error) when the device fails irrecoverably.
    fn next_frame(&mut self) -> Result<Option<Frame>>;

    /// `true` once a finite source has no more frames
    fn is_finished(&self) -> bool {
        false
    }

    /// Nominal resolution of the produced frames
    fn resolution(&self) -> Resolution;
}

/// Rotate a frame clockwise by a multiple of 90 degrees.
///
/// Negative angles rotate counter-clockwise.
///
/// # Errors
///
/// Returns an error if `degrees` is not a multiple of 90.
pub fn rotate(frame: &Frame, degrees: i32) -> Result<Frame> {
    match degrees.rem_euclid(360) {
        0 => Ok(frame.clone()),
        90 => Ok(imageops::rotate90(frame)),
        180 => Ok(imageops::rotate180(frame)),
        270 => Ok(imageops::rotate270(frame)),
        _ => Err(Error::InvalidInput(format!(
            "Rotation angle must be a multiple of 90 degrees, got {degrees}"
        ))),
    }
}
