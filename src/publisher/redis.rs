use super::Publisher;
use crate::{transform::HandCoords, Result};
use log::info;
use redis::Commands;

/// Publishes the flattened coordinates on a Redis pub/sub channel
///
/// Each message is a JSON array of 22 numbers, X then Y per joint.
pub struct RedisPublisher {
    connection: redis::Connection,
    channel: String,
}

impl RedisPublisher {
    /// Connect to the server at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the server cannot be reached.
    pub fn connect(url: &str, channel: impl Into<String>) -> Result<Self> {
        let channel = channel.into();
        info!("Connecting to message bus {} (channel {})", url, channel);

        let client = redis::Client::open(url)?;
        let connection = client.get_connection()?;
        Ok(Self { connection, channel })
    }
}

impl Publisher for RedisPublisher {
    fn publish(&mut self, coords: &HandCoords) -> Result<()> {
        let payload = serde_json::to_string(coords)?;
        let _receivers: i64 = self.connection.publish(&self.channel, payload)?;
        Ok(())
    }

    fn name(&self) -> &str {
        "RedisPublisher"
    }
}
