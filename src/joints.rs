//! Selection of the eleven teleoperation joints from detector landmarks.
//!
//! The transform works on six anchors (wrist and the five knuckles) followed by the five
//! fingertips. Which detector landmark feeds each joint is configurable through [`JointIndices`];
//! the defaults follow the MediaPipe hand topology.

use crate::{
    camera::Resolution,
    constants::{NUM_ANCHORS, NUM_FINGERTIPS, NUM_HAND_LANDMARKS, NUM_JOINTS},
    landmarks::{HandLandmarks, LandmarkIdx},
    Error, Result,
};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Anchor joints, in transform order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Wrist,
    ThumbKnuckle,
    IndexKnuckle,
    MiddleKnuckle,
    RingKnuckle,
    PinkyKnuckle,
}

impl Anchor {
    pub const ALL: [Anchor; NUM_ANCHORS] = [
        Anchor::Wrist,
        Anchor::ThumbKnuckle,
        Anchor::IndexKnuckle,
        Anchor::MiddleKnuckle,
        Anchor::RingKnuckle,
        Anchor::PinkyKnuckle,
    ];
}

/// Fingertips, in transform order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fingertip {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Fingertip {
    pub const ALL: [Fingertip; NUM_FINGERTIPS] = [
        Fingertip::Thumb,
        Fingertip::Index,
        Fingertip::Middle,
        Fingertip::Ring,
        Fingertip::Pinky,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Fingertip::Thumb => "thumb",
            Fingertip::Index => "index",
            Fingertip::Middle => "middle",
            Fingertip::Ring => "ring",
            Fingertip::Pinky => "pinky",
        }
    }
}

/// Six anchors plus five fingertips, in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointSet {
    anchors: [Point2<f64>; NUM_ANCHORS],
    fingertips: [Point2<f64>; NUM_FINGERTIPS],
}

impl JointSet {
    /// Anchors must be ordered as [`Anchor::ALL`], fingertips as [`Fingertip::ALL`].
    #[must_use]
    pub fn new(anchors: [Point2<f64>; NUM_ANCHORS], fingertips: [Point2<f64>; NUM_FINGERTIPS]) -> Self {
        Self { anchors, fingertips }
    }

    #[must_use]
    pub fn anchor(&self, anchor: Anchor) -> Point2<f64> {
        self.anchors[anchor as usize]
    }

    #[must_use]
    pub fn fingertip(&self, tip: Fingertip) -> Point2<f64> {
        self.fingertips[tip as usize]
    }

    /// Fingertip positions keyed by name, in fixed order
    pub fn fingertips(&self) -> impl Iterator<Item = (Fingertip, Point2<f64>)> + '_ {
        Fingertip::ALL.iter().map(move |&tip| (tip, self.fingertip(tip)))
    }

    /// All eleven points: anchors first, then fingertips
    #[must_use]
    pub fn points(&self) -> [Point2<f64>; NUM_JOINTS] {
        let mut points = [Point2::origin(); NUM_JOINTS];
        points[..NUM_ANCHORS].copy_from_slice(&self.anchors);
        points[NUM_ANCHORS..].copy_from_slice(&self.fingertips);
        points
    }

    /// Returns a copy with every point moved by `f`
    #[must_use]
    pub fn map_points(&self, f: impl Fn(Point2<f64>) -> Point2<f64>) -> Self {
        Self {
            anchors: self.anchors.map(&f),
            fingertips: self.fingertips.map(&f),
        }
    }
}

/// Detector landmark index of every joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JointIndices {
    pub wrist: usize,
    pub thumb_knuckle: usize,
    pub index_knuckle: usize,
    pub middle_knuckle: usize,
    pub ring_knuckle: usize,
    pub pinky_knuckle: usize,
    pub thumb_tip: usize,
    pub index_tip: usize,
    pub middle_tip: usize,
    pub ring_tip: usize,
    pub pinky_tip: usize,
}

impl Default for JointIndices {
    fn default() -> Self {
        Self {
            wrist: LandmarkIdx::Wrist.index(),
            thumb_knuckle: LandmarkIdx::ThumbMcp.index(),
            index_knuckle: LandmarkIdx::IndexFingerMcp.index(),
            middle_knuckle: LandmarkIdx::MiddleFingerMcp.index(),
            ring_knuckle: LandmarkIdx::RingFingerMcp.index(),
            pinky_knuckle: LandmarkIdx::PinkyMcp.index(),
            thumb_tip: LandmarkIdx::ThumbTip.index(),
            index_tip: LandmarkIdx::IndexFingerTip.index(),
            middle_tip: LandmarkIdx::MiddleFingerTip.index(),
            ring_tip: LandmarkIdx::RingFingerTip.index(),
            pinky_tip: LandmarkIdx::PinkyTip.index(),
        }
    }
}

impl JointIndices {
    #[must_use]
    pub fn anchors(&self) -> [usize; NUM_ANCHORS] {
        [
            self.wrist,
            self.thumb_knuckle,
            self.index_knuckle,
            self.middle_knuckle,
            self.ring_knuckle,
            self.pinky_knuckle,
        ]
    }

    #[must_use]
    pub fn fingertips(&self) -> [usize; NUM_FINGERTIPS] {
        [self.thumb_tip, self.index_tip, self.middle_tip, self.ring_tip, self.pinky_tip]
    }

    /// Check that every index exists in the detector output.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for out-of-range indices, or when the wrist and middle
    /// knuckle share a landmark (every frame would be degenerate).
    pub fn validate(&self) -> Result<()> {
        for index in self.anchors().into_iter().chain(self.fingertips()) {
            if index >= NUM_HAND_LANDMARKS {
                return Err(Error::ConfigError(format!(
                    "Landmark index {index} out of range (detector reports {NUM_HAND_LANDMARKS} landmarks)"
                )));
            }
        }
        if self.wrist == self.middle_knuckle {
            return Err(Error::ConfigError(
                "Wrist and middle knuckle must use different landmarks".to_string(),
            ));
        }
        Ok(())
    }
}

/// Maps detector landmarks to a [`JointSet`] in pixel coordinates
#[derive(Debug, Clone)]
pub struct JointExtractor {
    resolution: Resolution,
    indices: JointIndices,
}

impl JointExtractor {
    #[must_use]
    pub fn new(resolution: Resolution, indices: JointIndices) -> Self {
        Self { resolution, indices }
    }

    /// Resolution the joints are scaled by
    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Select the eleven joints and scale them by the camera resolution.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured index is missing from the detector output.
    pub fn extract(&self, hand: &HandLandmarks) -> Result<JointSet> {
        extract(hand, self.resolution, &self.indices)
    }
}

/// Select the eleven joints from `hand` and denormalize them by `resolution`.
///
/// # Errors
///
/// Returns an error if one of the `indices` does not exist in `hand`.
pub fn extract(hand: &HandLandmarks, resolution: Resolution, indices: &JointIndices) -> Result<JointSet> {
    let width = f64::from(resolution.width);
    let height = f64::from(resolution.height);

    let position = |index: usize| -> Result<Point2<f64>> {
        let landmark = hand
            .get(index)
            .ok_or_else(|| Error::InvalidInput(format!("Landmark {index} missing from detector output")))?;
        Ok(Point2::new(f64::from(landmark.x) * width, f64::from(landmark.y) * height))
    };

    let mut anchors = [Point2::origin(); NUM_ANCHORS];
    for (slot, index) in anchors.iter_mut().zip(indices.anchors()) {
        *slot = position(index)?;
    }
    let mut fingertips = [Point2::origin(); NUM_FINGERTIPS];
    for (slot, index) in fingertips.iter_mut().zip(indices.fingertips()) {
        *slot = position(index)?;
    }

    Ok(JointSet::new(anchors, fingertips))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::Landmark;

    fn hand() -> HandLandmarks {
        let landmarks: Vec<Landmark> = (0..21)
            .map(|i| Landmark::new(i as f32 * 0.04, 1.0 - i as f32 * 0.04, 0.3))
            .collect();
        HandLandmarks::from_slice(&landmarks, 0.99, "Left").unwrap()
    }

    #[test]
    fn test_extract_denormalizes_by_resolution() {
        let resolution = Resolution::new(640, 480);
        let joints = extract(&hand(), resolution, &JointIndices::default()).unwrap();

        let wrist = joints.anchor(Anchor::Wrist);
        assert!((wrist.x - 0.0).abs() < 1e-4);
        assert!((wrist.y - 480.0).abs() < 1e-4);

        // Middle knuckle is detector landmark 9
        let middle = joints.anchor(Anchor::MiddleKnuckle);
        assert!((middle.x - 9.0 * 0.04 * 640.0).abs() < 1e-3);
        assert!((middle.y - (1.0 - 9.0 * 0.04) * 480.0).abs() < 1e-3);

        // Pinky tip is detector landmark 20
        let pinky = joints.fingertip(Fingertip::Pinky);
        assert!((pinky.x - 20.0 * 0.04 * 640.0).abs() < 1e-3);
    }

    #[test]
    fn test_points_order_anchors_then_fingertips() {
        let joints = extract(&hand(), Resolution::new(100, 100), &JointIndices::default()).unwrap();
        let points = joints.points();
        assert_eq!(points.len(), 11);
        assert_eq!(points[0], joints.anchor(Anchor::Wrist));
        assert_eq!(points[3], joints.anchor(Anchor::MiddleKnuckle));
        assert_eq!(points[6], joints.fingertip(Fingertip::Thumb));
        assert_eq!(points[10], joints.fingertip(Fingertip::Pinky));

        let names: Vec<&str> = joints.fingertips().map(|(tip, _)| tip.name()).collect();
        assert_eq!(names, vec!["thumb", "index", "middle", "ring", "pinky"]);
    }

    #[test]
    fn test_joint_indices_validation() {
        assert!(JointIndices::default().validate().is_ok());

        let out_of_range = JointIndices {
            pinky_tip: 21,
            ..JointIndices::default()
        };
        assert!(out_of_range.validate().is_err());

        let same_origin = JointIndices {
            middle_knuckle: 0,
            ..JointIndices::default()
        };
        assert!(same_origin.validate().is_err());
    }
}
