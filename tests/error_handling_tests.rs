//! Error handling tests for all modules


use hand_teleop::{
    camera::{rotate, Frame, ImageSequenceCamera, Resolution},
    config::Config,
    error::{AppError, Result},
    joints::{extract, JointIndices},
    landmarks::{HandLandmarks, Landmark},
    utils::safe_cast::*,
};
use test_helpers::{hand_in_frame, TEST_RESOLUTION};

#[test]
fn test_frame_error_classification() {
    assert!(AppError::DegenerateFrame("zero".to_string()).is_frame_error());
    assert!(AppError::SingularFrame("nan".to_string()).is_frame_error());

    assert!(!AppError::Device("gone".to_string()).is_frame_error());
    assert!(!AppError::Detector("crashed".to_string()).is_frame_error());
    assert!(!AppError::Publish("closed".to_string()).is_frame_error());
    assert!(!AppError::ConfigError("bad".to_string()).is_frame_error());
}

#[test]
fn test_error_messages() {
    let err = AppError::DegenerateFrame("Wrist to middle knuckle distance is 0".to_string());
    assert_eq!(err.to_string(), "Degenerate hand frame: Wrist to middle knuckle distance is 0");

    let io: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
    assert!(matches!(io, AppError::Io(_)));
}

#[test]
fn test_landmark_count_errors() {
    let too_few = vec![Landmark::default(); 20];
    assert!(matches!(
        HandLandmarks::from_slice(&too_few, 0.99, "Left"),
        Err(AppError::InvalidInput(_))
    ));
}

#[test]
fn test_extraction_with_out_of_range_index() {
    let indices = JointIndices {
        pinky_tip: 42,
        ..JointIndices::default()
    };
    assert!(indices.validate().is_err());
    assert!(extract(&hand_in_frame(), TEST_RESOLUTION, &indices).is_err());
}

#[test]
fn test_invalid_rotation_angles() {
    let frame = Frame::new(4, 4);
    for angle in [45, 1, -30, 181] {
        match rotate(&frame, angle) {
            Err(AppError::InvalidInput(msg)) => assert!(msg.contains("multiple of 90")),
            other => panic!("Expected InvalidInput for {angle}, got {other:?}"),
        }
    }
}

#[test]
fn test_frame_directory_errors() {
    let missing = ImageSequenceCamera::open("/nonexistent/frames", Resolution::new(640, 480));
    assert!(matches!(missing, Err(AppError::Device(_))));

    let empty = tempfile::tempdir().unwrap();
    std::fs::write(empty.path().join("notes.txt"), "not an image").unwrap();
    let result = ImageSequenceCamera::open(empty.path(), Resolution::new(640, 480));
    assert!(matches!(result, Err(AppError::Device(_))));
}

#[test]
fn test_config_file_errors() {
    assert!(matches!(Config::from_file("/nonexistent/config.yaml"), Err(AppError::Io(_))));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "pipeline: [not, a, map]").unwrap();
    match Config::from_file(&path) {
        Err(AppError::ConfigError(msg)) => assert!(msg.contains("Failed to parse config")),
        other => panic!("Expected ConfigError, got {other:?}"),
    }

    let unwritable = dir.path().join("missing").join("config.yaml");
    assert!(matches!(Config::default().to_file(&unwritable), Err(AppError::Io(_))));
}

#[test]
fn test_safe_cast_errors() -> Result<()> {
    assert_eq!(u32_to_i32(640)?, 640);
    assert!(u32_to_i32(u32::MAX).is_err());
    assert_eq!(i32_to_u32(480)?, 480);
    assert!(i32_to_u32(-1).is_err());

    assert_eq!(f64_to_i32_clamp(f64::NAN, 0, 10), 0);
    assert_eq!(f64_to_i32_clamp(1e12, 0, 10), 10);
    assert_eq!(f64_to_i32_clamp(4.6, 0, 10), 5);
    Ok(())
}
