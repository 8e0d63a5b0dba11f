//! Detector-space hand landmarks.
//!
//! Landmarks follow the MediaPipe hand topology: 21 points with x and y normalized to the image
//! size and a relative depth z that the pipeline discards.

use crate::constants::NUM_HAND_LANDMARKS;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Names for the 21 hand landmarks, in detector order.
///
/// - **CMC**: carpometacarpal joint, the lowest joint of the thumb.
/// - **MCP**: metacarpophalangeal joint, the knuckle.
/// - **PIP** / **DIP**: proximal and distal interphalangeal joints.
/// - **Tip**: placed on the tip of the finger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkIdx {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexFingerMcp,
    IndexFingerPip,
    IndexFingerDip,
    IndexFingerTip,
    MiddleFingerMcp,
    MiddleFingerPip,
    MiddleFingerDip,
    MiddleFingerTip,
    RingFingerMcp,
    RingFingerPip,
    RingFingerDip,
    RingFingerTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl LandmarkIdx {
    /// Index of this landmark in the detector output
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A single detector landmark
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// X coordinate (0.0 to 1.0, normalized to image width)
    pub x: f32,
    /// Y coordinate (0.0 to 1.0, normalized to image height)
    pub y: f32,
    /// Depth relative to the wrist; unused by the pipeline
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// One detected hand
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    landmarks: [Landmark; NUM_HAND_LANDMARKS],
    /// Detection confidence (0.0 to 1.0)
    pub confidence: f32,
    /// Handedness label reported by the detector ("Left" or "Right")
    pub handedness: String,
}

impl HandLandmarks {
    /// Build a hand from exactly 21 landmarks.
    ///
    /// # Errors
    ///
    /// Returns an error if the slice does not hold exactly 21 landmarks.
    pub fn from_slice(landmarks: &[Landmark], confidence: f32, handedness: impl Into<String>) -> Result<Self> {
        let landmarks: [Landmark; NUM_HAND_LANDMARKS] = landmarks.try_into().map_err(|_| {
            Error::InvalidInput(format!(
                "Expected {} hand landmarks, got {}",
                NUM_HAND_LANDMARKS,
                landmarks.len()
            ))
        })?;

        Ok(Self {
            landmarks,
            confidence,
            handedness: handedness.into(),
        })
    }

    /// Returns the landmark at a detector index, if it exists
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.landmarks.get(index)
    }

    #[must_use]
    pub fn landmark(&self, idx: LandmarkIdx) -> &Landmark {
        &self.landmarks[idx.index()]
    }

    #[must_use]
    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }
}
