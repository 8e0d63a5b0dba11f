//! Hand tracking front end for robotic teleoperation.
//!
//! Each camera frame goes through the same pipeline:
//! 1. An external landmark detector finds one hand and reports 21 normalized landmarks
//! 2. Eleven joints (wrist, five knuckles, five fingertips) are selected and scaled to pixels
//! 3. The joints are moved into a wrist-anchored frame whose Y axis points at the middle knuckle,
//!    which removes translation and in-plane rotation of the hand
//! 4. A moving average smooths the result over the last few frames
//! 5. The 11×2 coordinates are published to the configured sink
//!
//! # Examples
//!
//! ## Transforming one hand
//!
//! ```no_run
//! use hand_teleop::{
//!     camera::Resolution,
//!     joints::{JointExtractor, JointIndices},
//!     landmarks::{HandLandmarks, Landmark},
//!     transform::FrameTransform,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let detected = vec![Landmark::new(0.5, 0.5, 0.0); 21];
//! let hand = HandLandmarks::from_slice(&detected, 0.97, "Right")?;
//! let extractor = JointExtractor::new(Resolution::new(640, 480), JointIndices::default());
//! let joints = extractor.extract(&hand)?;
//!
//! let coords = FrameTransform::default().apply(&joints)?;
//! println!("{:?}", coords.to_flat());
//! # Ok(())
//! # }
//! ```
//!
//! ## Running the stream loop
//!
//! ```no_run
//! use hand_teleop::{
//!     camera::ImageSequenceCamera, config::Config, detector::SubprocessDetector,
//!     publisher::QueuePublisher, stream_loop::StreamLoop,
//! };
//! use std::sync::atomic::AtomicBool;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let camera = ImageSequenceCamera::open("captures", config.camera.resolution)?;
//! let detector = SubprocessDetector::spawn(&config.detection.command, config.detection_thresholds())?;
//! let (publisher, receiver) = QueuePublisher::channel(Some(64));
//!
//! let stream = StreamLoop::new(
//!     Box::new(camera),
//!     Box::new(detector),
//!     config.joint_extractor(),
//!     config.frame_transform(),
//!     config.create_filter(),
//!     Box::new(publisher),
//! );
//! std::thread::spawn(move || {
//!     for coords in receiver {
//!         println!("{:?}", coords.to_flat());
//!     }
//! });
//! let stats = stream.run(&AtomicBool::new(false))?;
//! println!("published {} frames", stats.published);
//! # Ok(())
//! # }
//! ```

/// Frame sources and image rotation
pub mod camera;

/// Configuration management
pub mod config;

/// Application constants
pub mod constants;

/// Hand landmark detection
pub mod detector;

/// Error types
pub mod error;

/// Temporal smoothing filters
pub mod filters;

/// Joint selection
pub mod joints;

/// Detector landmark types
pub mod landmarks;

/// Coordinate sinks
pub mod publisher;

/// Session recording
pub mod recording;

/// Per-frame processing loop
pub mod stream_loop;

/// Wrist-anchored coordinate transform
pub mod transform;

/// Utility functions
pub mod utils;

pub use error::{AppError, Error, Result};
