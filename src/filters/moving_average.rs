use super::CoordinateFilter;
use crate::{constants::NUM_JOINTS, transform::HandCoords};
use nalgebra::SMatrix;
use std::collections::VecDeque;

/// Moving average over the last `window_size` frames
pub struct MovingAverageFilter {
    window_size: usize,
    buffer: VecDeque<HandCoords>,
}

impl MovingAverageFilter {
    /// # Panics
    ///
    /// Panics if `window_size` is 0.
    #[must_use]
    pub fn new(window_size: usize) -> Self {
        assert!(window_size > 0, "Window size must be greater than 0");
        Self {
            window_size,
            buffer: VecDeque::with_capacity(window_size + 1),
        }
    }

    #[must_use]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Number of frames currently averaged
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl CoordinateFilter for MovingAverageFilter {
    fn apply(&mut self, coords: &HandCoords) -> HandCoords {
        self.buffer.push_back(*coords);
        if self.buffer.len() > self.window_size {
            self.buffer.pop_front();
        }

        let sum = self
            .buffer
            .iter()
            .fold(SMatrix::<f64, NUM_JOINTS, 2>::zeros(), |acc, frame| acc + frame.matrix());
        HandCoords::from_matrix(sum / self.buffer.len() as f64)
    }

    fn name(&self) -> &str {
        "MovingAverageFilter"
    }
}
