//! Utility functions for pixel coordinates and image conversions.

pub mod safe_cast;

#[cfg(feature = "opencv")]
pub mod image_conversion;
