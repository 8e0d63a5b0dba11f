//! Delivery of transformed coordinates to downstream consumers.
//!
//! Every publisher preserves the joint order produced by the transform: wrist, the four other
//! knuckles, then the five fingertips.

/// JSON lines on any writer
pub mod json_lines;

/// In-process channel hand-off
pub mod queue;

/// Redis pub/sub message bus
#[cfg(feature = "redis")]
pub mod redis;

use crate::{transform::HandCoords, Result};

pub use json_lines::JsonLinesPublisher;
pub use queue::QueuePublisher;

/// A sink for transformed coordinates
pub trait Publisher: Send {
    /// Deliver one frame of coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Publish`] (or a transport error) when delivery fails.
    fn publish(&mut self, coords: &HandCoords) -> Result<()>;

    /// Get publisher name
    fn name(&self) -> &str;
}

/// Drops every frame; used when nothing consumes the coordinates
pub struct DiscardPublisher;

impl Publisher for DiscardPublisher {
    fn publish(&mut self, _coords: &HandCoords) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "DiscardPublisher"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discard_publisher_accepts_everything() {
        let mut publisher = DiscardPublisher;
        assert!(publisher.publish(&HandCoords::zeros()).is_ok());
        assert_eq!(publisher.name(), "DiscardPublisher");
    }
}
