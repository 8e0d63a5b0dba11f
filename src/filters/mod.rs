//! Temporal smoothing of transformed hand coordinates.
//!
//! The stream loop owns exactly one [`CoordinateFilter`], chosen at construction: either
//! [`NoFilter`] to publish each transform directly, or [`MovingAverageFilter`] to publish the mean
//! of the recent frames.

/// Moving average filter for simple smoothing
pub mod moving_average;

use crate::transform::HandCoords;

/// Trait for all coordinate filters
pub trait CoordinateFilter: Send {
    /// Feed one frame and return the value to publish
    fn apply(&mut self, coords: &HandCoords) -> HandCoords;

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes through values unchanged
pub struct NoFilter;

impl CoordinateFilter for NoFilter {
    fn apply(&mut self, coords: &HandCoords) -> HandCoords {
        *coords
    }

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Filter for the `moving_average` pipeline flag
///
/// # Panics
///
/// Panics if `moving_average` is set and `window` is 0.
#[must_use]
pub fn smoothing_filter(moving_average: bool, window: usize) -> Box<dyn CoordinateFilter> {
    if moving_average {
        Box::new(moving_average::MovingAverageFilter::new(window))
    } else {
        Box::new(NoFilter)
    }
}
