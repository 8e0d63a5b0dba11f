//! Error types for the hand teleoperation pipeline.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or encoding failed
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `OpenCV` operation failed
    #[cfg(feature = "opencv")]
    #[error("OpenCV error: {0}")]
    OpenCV(#[from] opencv::Error),

    /// Redis client operation failed
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Wrist and middle knuckle coincide, so no local frame can be built
    #[error("Degenerate hand frame: {0}")]
    DegenerateFrame(String),

    /// The local frame matrix could not be solved for a rotation
    #[error("Singular hand frame: {0}")]
    SingularFrame(String),

    /// Camera could not be opened or failed irrecoverably
    #[error("Device error: {0}")]
    Device(String),

    /// Landmark detector failed or returned malformed output
    #[error("Detector error: {0}")]
    Detector(String),

    /// Coordinates could not be delivered to the sink
    #[error("Publish error: {0}")]
    Publish(String),

    /// Buffered recording could not be written
    #[error("Recording error: {0}")]
    Recording(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl Error {
    /// Returns `true` for errors that only invalidate the current frame.
    ///
    /// The stream loop skips such frames instead of terminating.
    #[must_use]
    pub fn is_frame_error(&self) -> bool {
        matches!(self, Self::DegenerateFrame(_) | Self::SingularFrame(_))
    }
}

/// Application-specific error type (alias for main Error type)
pub type AppError = Error;

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
