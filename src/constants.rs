//! Constants used throughout the application

/// Number of landmarks reported by the hand detector
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Number of anchor joints (wrist plus five knuckles)
pub const NUM_ANCHORS: usize = 6;

/// Number of fingertips
pub const NUM_FINGERTIPS: usize = 5;

/// Total number of joints fed into the transform (6 anchors + 5 fingertips)
pub const NUM_JOINTS: usize = NUM_ANCHORS + NUM_FINGERTIPS;

/// Length of a flattened coordinate message (X then Y per joint)
pub const FLAT_COORDS_LEN: usize = NUM_JOINTS * 2;

/// Row of the wrist in the joint cloud; becomes the origin
pub const WRIST_ROW: usize = 0;

/// Row of the middle knuckle in the joint cloud; defines the direction axis
pub const MIDDLE_KNUCKLE_ROW: usize = 3;

/// Message bus topic carrying the flattened coordinates
pub const POSE_COORD_TOPIC: &str = "/mediapipe_joint_coords";

/// Default moving average window (frames)
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 10;

/// Default detector confidence thresholds
pub const DEFAULT_DETECTION_CONFIDENCE: f32 = 0.95;
pub const DEFAULT_TRACKING_CONFIDENCE: f32 = 0.95;

/// Default camera settings
pub const DEFAULT_RESOLUTION: [u32; 2] = [640, 480];
pub const DEFAULT_FPS: u32 = 30;

/// Ready line printed by the detector helper once its model is loaded
pub const DETECTOR_READY_LINE: &str = "READY";

/// Half size in pixels of the cross drawn for each joint on marked frames
pub const MARKER_HALF_SIZE: i32 = 4;

