use super::Publisher;
use crate::{transform::HandCoords, Error, Result};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

/// Hands coordinates to a consumer thread over a channel
///
/// With a bounded channel `publish` blocks while the queue is full.
pub struct QueuePublisher {
    sender: Sender<HandCoords>,
}

impl QueuePublisher {
    /// Create a publisher and the receiving end for the consumer.
    ///
    /// `capacity` of `None` creates an unbounded queue.
    #[must_use]
    pub fn channel(capacity: Option<usize>) -> (Self, Receiver<HandCoords>) {
        let (sender, receiver) = match capacity {
            Some(capacity) => bounded(capacity),
            None => unbounded(),
        };
        (Self { sender }, receiver)
    }
}

impl Publisher for QueuePublisher {
    fn publish(&mut self, coords: &HandCoords) -> Result<()> {
        self.sender
            .send(*coords)
            .map_err(|_| Error::Publish("Coordinate queue consumer disconnected".to_string()))
    }

    fn name(&self) -> &str {
        "QueuePublisher"
    }
}
