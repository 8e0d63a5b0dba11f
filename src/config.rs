//! Configuration management for the hand teleoperation pipeline

use crate::{
    camera::Resolution,
    constants::{
        DEFAULT_DETECTION_CONFIDENCE, DEFAULT_FPS, DEFAULT_MOVING_AVERAGE_WINDOW, DEFAULT_RESOLUTION,
        DEFAULT_TRACKING_CONFIDENCE, POSE_COORD_TOPIC,
    },
    detector::DetectionThresholds,
    filters::{smoothing_filter, CoordinateFilter},
    joints::{JointExtractor, JointIndices},
    publisher::{DiscardPublisher, JsonLinesPublisher, Publisher},
    transform::{FrameTransform, NormalizationMode},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Camera configuration
    pub camera: CameraConfig,

    /// Hand detector configuration
    pub detection: DetectionConfig,

    /// Landmark indices of the tracked joints
    pub mediapipe: JointIndices,

    /// Transform and smoothing configuration
    pub pipeline: PipelineConfig,

    /// Output sink configuration
    pub publisher: PublisherConfig,

    /// Session recording configuration
    pub recording: RecordingConfig,
}

/// Camera parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Device serial numbers or paths; the first one is opened
    pub serial_numbers: Vec<String>,

    /// Capture resolution [width, height]
    pub resolution: Resolution,

    /// Capture framerate
    pub fps: u32,

    /// Replay a directory of images instead of opening a device
    pub frames_dir: Option<PathBuf>,
}

/// Hand detector parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Command line of the detector helper process
    pub command: Vec<String>,

    /// Minimum hand detection confidence (0.0-1.0)
    pub min_detection_confidence: f32,

    /// Minimum landmark tracking confidence (0.0-1.0)
    pub min_tracking_confidence: f32,

    /// Maximum number of hands to detect (only 1 is supported)
    pub max_num_hands: usize,
}

/// Transform and smoothing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Clockwise image rotation in degrees (multiple of 90)
    pub rotation_angle: i32,

    /// Smooth the coordinates with a moving average
    pub moving_average: bool,

    /// Moving average window size
    pub moving_average_window: usize,

    /// Scale the hand frame by the wrist to middle knuckle distance
    pub normalize: bool,

    /// Negate X of the output
    pub mirror: bool,
}

/// Output sink kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Drop all coordinates
    Discard,
    /// One JSON array per line on stdout
    Stdout,
    /// Redis pub/sub channel
    Redis,
}

/// Output sink parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublisherConfig {
    /// Where coordinates go
    pub sink: SinkKind,

    /// Redis server URL
    pub redis_url: String,

    /// Channel the coordinates are published on
    pub topic: String,
}

/// Session recording parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingConfig {
    /// Record raw and marked frames
    pub enabled: bool,

    /// Parent directory of the timestamped session directories
    pub output_dir: PathBuf,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            serial_numbers: vec!["0".to_string()],
            resolution: Resolution::from(DEFAULT_RESOLUTION),
            fps: DEFAULT_FPS,
            frames_dir: None,
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            command: vec!["hand-landmark-detector".to_string()],
            min_detection_confidence: DEFAULT_DETECTION_CONFIDENCE,
            min_tracking_confidence: DEFAULT_TRACKING_CONFIDENCE,
            max_num_hands: 1,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rotation_angle: 0,
            moving_average: true,
            moving_average_window: DEFAULT_MOVING_AVERAGE_WINDOW,
            normalize: true,
            mirror: true,
        }
    }
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            sink: SinkKind::Discard,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            topic: POSE_COORD_TOPIC.to_string(),
        }
    }
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            output_dir: PathBuf::from("recordings"),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file. Missing sections and fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::ConfigError`] if it is not
    /// valid YAML for this structure. The result is not validated; call [`Config::validate`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if serialization fails and [`Error::Io`] if the file cannot
    /// be written.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Create the smoothing filter from configuration
    #[must_use]
    pub fn create_filter(&self) -> Box<dyn CoordinateFilter> {
        smoothing_filter(self.pipeline.moving_average, self.pipeline.moving_average_window)
    }

    /// Create the hand frame transform from configuration
    #[must_use]
    pub fn frame_transform(&self) -> FrameTransform {
        FrameTransform::new(NormalizationMode::from_flag(self.pipeline.normalize), self.pipeline.mirror)
    }

    /// Create the joint extractor from configuration
    #[must_use]
    pub fn joint_extractor(&self) -> JointExtractor {
        JointExtractor::new(self.camera.resolution, self.mediapipe)
    }

    #[must_use]
    pub fn detection_thresholds(&self) -> DetectionThresholds {
        DetectionThresholds {
            min_detection_confidence: self.detection.min_detection_confidence,
            min_tracking_confidence: self.detection.min_tracking_confidence,
        }
    }

    /// Create the output sink from configuration
    pub fn create_publisher(&self) -> Result<Box<dyn Publisher>> {
        match self.publisher.sink {
            SinkKind::Discard => Ok(Box::new(DiscardPublisher)),
            SinkKind::Stdout => Ok(Box::new(JsonLinesPublisher::stdout())),
            #[cfg(feature = "redis")]
            SinkKind::Redis => Ok(Box::new(crate::publisher::redis::RedisPublisher::connect(
                &self.publisher.redis_url,
                self.publisher.topic.clone(),
            )?)),
            #[cfg(not(feature = "redis"))]
            SinkKind::Redis => Err(redis_unavailable()),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        // Validate thresholds
        if !(0.0..=1.0).contains(&self.detection.min_detection_confidence) {
            return Err(Error::ConfigError(
                "Detection confidence must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.detection.min_tracking_confidence) {
            return Err(Error::ConfigError(
                "Tracking confidence must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.detection.max_num_hands != 1 {
            return Err(Error::ConfigError(format!(
                "Only single hand tracking is supported, got max_num_hands = {}",
                self.detection.max_num_hands
            )));
        }
        if self.detection.command.is_empty() {
            return Err(Error::ConfigError("Detector command must not be empty".to_string()));
        }

        // Validate pipeline parameters
        if self.pipeline.moving_average_window == 0 {
            return Err(Error::ConfigError(
                "Moving average window size must be greater than 0".to_string(),
            ));
        }
        if self.pipeline.rotation_angle % 90 != 0 {
            return Err(Error::ConfigError(format!(
                "Rotation angle must be a multiple of 90 degrees, got {}",
                self.pipeline.rotation_angle
            )));
        }
        self.mediapipe.validate()?;

        // Validate camera settings
        if self.camera.fps == 0 {
            return Err(Error::ConfigError("Camera FPS must be greater than 0".to_string()));
        }
        if self.camera.resolution.width == 0 || self.camera.resolution.height == 0 {
            return Err(Error::ConfigError(format!(
                "Camera resolution must be non-zero, got {}",
                self.camera.resolution
            )));
        }
        if self.camera.frames_dir.is_none() && self.camera.serial_numbers.is_empty() {
            return Err(Error::ConfigError(
                "Either camera.serial_numbers or camera.frames_dir must be set".to_string(),
            ));
        }

        // Validate publisher
        if self.publisher.sink == SinkKind::Redis {
            if cfg!(not(feature = "redis")) {
                return Err(redis_unavailable());
            }
            if self.publisher.topic.is_empty() {
                return Err(Error::ConfigError("Publisher topic must not be empty".to_string()));
            }
        }

        Ok(())
    }
}

fn redis_unavailable() -> Error {
    Error::ConfigError("Redis sink requested but this build lacks the 'redis' feature".to_string())
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Hand Teleoperation Configuration

# Camera settings
camera:
  serial_numbers: ["0"]
  resolution: [640, 480]
  fps: 30
  # frames_dir: "captures/session1"

# Hand detector helper process
detection:
  command: ["hand-landmark-detector"]
  min_detection_confidence: 0.95
  min_tracking_confidence: 0.95
  max_num_hands: 1

# Detector landmark indices of the tracked joints
mediapipe:
  wrist: 0
  thumb_knuckle: 2
  index_knuckle: 5
  middle_knuckle: 9
  ring_knuckle: 13
  pinky_knuckle: 17
  thumb_tip: 4
  index_tip: 8
  middle_tip: 12
  ring_tip: 16
  pinky_tip: 20

# Transform and smoothing
pipeline:
  rotation_angle: 0
  moving_average: true
  moving_average_window: 10
  normalize: true
  mirror: true

# Output sink: discard, stdout or redis
publisher:
  sink: discard
  redis_url: "redis://127.0.0.1:6379"
  topic: "/mediapipe_joint_coords"

# Session recording
recording:
  enabled: false
  output_dir: "recordings"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_matches_defaults() {
        let config: Config = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_yaml::from_str("pipeline:\n  mirror: false\n").unwrap();
        assert!(!config.pipeline.mirror);
        assert!(config.pipeline.moving_average);
        assert_eq!(config.pipeline.moving_average_window, 10);
        assert_eq!(config.publisher.topic, POSE_COORD_TOPIC);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let mut config = Config::default();
        config.pipeline.rotation_angle = 270;
        config.camera.resolution = Resolution::new(1280, 720);
        config.publisher.sink = SinkKind::Stdout;
        config.to_file(&path).unwrap();

        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.detection.min_detection_confidence = 1.5;
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));

        let mut config = Config::default();
        config.detection.max_num_hands = 2;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.pipeline.moving_average_window = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.pipeline.rotation_angle = 45;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.camera.fps = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.mediapipe.pinky_tip = 21;
        assert!(config.validate().is_err());
    }

    #[cfg(not(feature = "redis"))]
    #[test]
    fn test_redis_sink_needs_feature() {
        let mut config = Config::default();
        config.publisher.sink = SinkKind::Redis;
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
        assert!(matches!(config.create_publisher(), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_pipeline_components_follow_config() {
        let mut config = Config::default();
        config.pipeline.normalize = false;
        config.pipeline.mirror = false;
        let transform = config.frame_transform();
        assert_eq!(transform.mode(), NormalizationMode::UnitFrame);
        assert!(!transform.mirror());

        assert_eq!(config.create_filter().name(), "MovingAverageFilter");
        config.pipeline.moving_average = false;
        assert_eq!(config.create_filter().name(), "NoFilter");

        assert_eq!(config.create_publisher().unwrap().name(), "DiscardPublisher");
    }
}
