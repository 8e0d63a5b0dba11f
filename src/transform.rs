//! Wrist-anchored canonical frame for hand joints.
//!
//! Every frame the eleven joints are lifted into 3D with a zero Z, translated so the wrist is the
//! origin, and rotated so the wrist→middle-knuckle direction lies on the canonical Y axis. The
//! rotation is the transposed solution of `original_frame · R = I`, where the rows of
//! `original_frame` are the cross, direction and normal axes of the hand. The canonical Z column is
//! dropped from the result.

use crate::{
    constants::{FLAT_COORDS_LEN, MIDDLE_KNUCKLE_ROW, NUM_JOINTS, WRIST_ROW},
    joints::JointSet,
    Error, Result,
};
use nalgebra::{Matrix3, Point2, SMatrix, Vector3};
use serde::{Serialize, Serializer};

/// Joint cloud with a zero Z appended to every point
pub type PointCloud3D = SMatrix<f64, NUM_JOINTS, 3>;

/// How the local frame is scaled before the rotation solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationMode {
    /// Direction and normal keep the wrist→middle-knuckle length, which cancels in the solve:
    /// the middle knuckle always lands at (0, 1).
    ScaledFrame,
    /// Unit direction and normal; output keeps pixel distances.
    UnitFrame,
}

impl NormalizationMode {
    #[must_use]
    pub fn from_flag(normalize: bool) -> Self {
        if normalize {
            Self::ScaledFrame
        } else {
            Self::UnitFrame
        }
    }
}

/// Transformed joint coordinates, one row per joint in [`JointSet::points`] order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandCoords(SMatrix<f64, NUM_JOINTS, 2>);

impl HandCoords {
    #[must_use]
    pub fn from_matrix(matrix: SMatrix<f64, NUM_JOINTS, 2>) -> Self {
        Self(matrix)
    }

    #[must_use]
    pub fn zeros() -> Self {
        Self(SMatrix::zeros())
    }

    #[must_use]
    pub fn matrix(&self) -> &SMatrix<f64, NUM_JOINTS, 2> {
        &self.0
    }

    #[must_use]
    pub fn point(&self, row: usize) -> Point2<f64> {
        Point2::new(self.0[(row, 0)], self.0[(row, 1)])
    }

    pub fn points(&self) -> impl Iterator<Item = Point2<f64>> + '_ {
        (0..NUM_JOINTS).map(|row| self.point(row))
    }

    /// Row-major flattening: X then Y for each joint, 22 values
    #[must_use]
    pub fn to_flat(&self) -> Vec<f64> {
        let mut flat = Vec::with_capacity(FLAT_COORDS_LEN);
        for point in self.points() {
            flat.push(point.x);
            flat.push(point.y);
        }
        flat
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl Serialize for HandCoords {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_flat().serialize(serializer)
    }
}

/// The per-frame canonicalization
#[derive(Debug, Clone, Copy)]
pub struct FrameTransform {
    mode: NormalizationMode,
    mirror: bool,
}

impl Default for FrameTransform {
    fn default() -> Self {
        Self::new(NormalizationMode::ScaledFrame, true)
    }
}

impl FrameTransform {
    #[must_use]
    pub fn new(mode: NormalizationMode, mirror: bool) -> Self {
        Self { mode, mirror }
    }

    #[must_use]
    pub fn mode(&self) -> NormalizationMode {
        self.mode
    }

    #[must_use]
    pub fn mirror(&self) -> bool {
        self.mirror
    }

    /// Canonicalize one hand.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateFrame`] when the wrist and middle knuckle coincide, and
    /// [`Error::SingularFrame`] when the rotation cannot be solved or produces non-finite values.
    pub fn apply(&self, joints: &JointSet) -> Result<HandCoords> {
        let translated = translate_to_wrist(&point_cloud(joints));
        let rotation = self.rotation_matrix(&translated)?;

        let mut transformed: PointCloud3D = (rotation * translated.transpose()).transpose();
        if self.mirror {
            for row in 0..NUM_JOINTS {
                transformed[(row, 0)] = -transformed[(row, 0)];
            }
        }

        let coords = HandCoords::from_matrix(SMatrix::from_fn(|row, col| transformed[(row, col)]));
        if !coords.is_finite() {
            return Err(Error::SingularFrame("Transformed coordinates are not finite".to_string()));
        }
        Ok(coords)
    }

    /// Rotation taking the hand's local frame onto the canonical axes.
    ///
    /// `translated` must already have the wrist at the origin.
    ///
    /// # Errors
    ///
    /// See [`FrameTransform::apply`].
    pub fn rotation_matrix(&self, translated: &PointCloud3D) -> Result<Matrix3<f64>> {
        let original_frame = self.local_frame(translated)?;

        let solved = original_frame
            .lu()
            .solve(&Matrix3::identity())
            .ok_or_else(|| Error::SingularFrame(format!("Cannot solve local frame {original_frame:?}")))?;
        if solved.iter().any(|v| !v.is_finite()) {
            return Err(Error::SingularFrame("Rotation solve produced non-finite values".to_string()));
        }

        Ok(solved.transpose())
    }

    /// Rows are the cross, direction and normal axes
    fn local_frame(&self, translated: &PointCloud3D) -> Result<Matrix3<f64>> {
        let direction = Vector3::new(
            translated[(MIDDLE_KNUCKLE_ROW, 0)],
            translated[(MIDDLE_KNUCKLE_ROW, 1)],
            translated[(MIDDLE_KNUCKLE_ROW, 2)],
        );
        let norm = direction.norm();
        if norm == 0.0 || !norm.is_finite() {
            return Err(Error::DegenerateFrame(format!(
                "Wrist to middle knuckle distance is {norm}"
            )));
        }

        let (cross, direction, normal) = match self.mode {
            NormalizationMode::ScaledFrame => {
                let normal = Vector3::new(0.0, 0.0, norm);
                let cross = (direction / norm).cross(&(normal / norm)) * norm;
                (cross, direction, normal)
            }
            NormalizationMode::UnitFrame => {
                let direction = direction / norm;
                let normal = Vector3::z();
                (direction.cross(&normal), direction, normal)
            }
        };

        Ok(Matrix3::from_rows(&[
            cross.transpose(),
            direction.transpose(),
            normal.transpose(),
        ]))
    }
}

/// Stack anchors then fingertips and append a zero Z
#[must_use]
pub fn point_cloud(joints: &JointSet) -> PointCloud3D {
    let points = joints.points();
    PointCloud3D::from_fn(|row, col| match col {
        0 => points[row].x,
        1 => points[row].y,
        _ => 0.0,
    })
}

/// Subtract the wrist row from every row
#[must_use]
pub fn translate_to_wrist(cloud: &PointCloud3D) -> PointCloud3D {
    PointCloud3D::from_fn(|row, col| cloud[(row, col)] - cloud[(WRIST_ROW, col)])
}
