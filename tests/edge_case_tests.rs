//! Edge case tests for extraction, smoothing, and other components


use hand_teleop::{
    camera::Resolution,
    filters::smoothing_filter,
    joints::{Fingertip, JointExtractor, JointIndices},
    landmarks::{HandLandmarks, Landmark, LandmarkIdx},
    transform::{FrameTransform, HandCoords},
};
use nalgebra::SMatrix;
use test_helpers::{landmarks_for, synthetic_joints};

#[test]
fn test_filter_extreme_values() {
    for (moving_average, window) in [(false, 10), (true, 1), (true, 5)] {
        let mut filter = smoothing_filter(moving_average, window);

        for value in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN, f64::MAX, 1e100, 0.0] {
            // Values only need to pass through without panicking
            let _ = filter.apply(&HandCoords::from_matrix(SMatrix::from_element(value)));
        }
    }
}

#[test]
fn test_window_of_one_tracks_input() {
    let mut filter = smoothing_filter(true, 1);
    for value in [1.0, -4.0, 9.5] {
        let coords = HandCoords::from_matrix(SMatrix::from_element(value));
        assert_eq!(filter.apply(&coords), coords);
    }
}

#[test]
fn test_extraction_denormalizes_by_resolution() {
    let mut landmarks = vec![Landmark::default(); 21];
    landmarks[LandmarkIdx::MiddleFingerMcp.index()] = Landmark::new(0.5, 0.25, 0.7);
    landmarks[LandmarkIdx::PinkyTip.index()] = Landmark::new(1.0, 1.0, -0.3);
    let hand = HandLandmarks::from_slice(&landmarks, 0.99, "Left").unwrap();

    let joints = JointExtractor::new(Resolution::new(1280, 720), JointIndices::default())
        .extract(&hand)
        .unwrap();
    let points = joints.points();
    assert_eq!((points[3].x, points[3].y), (640.0, 180.0));
    assert_eq!(joints.fingertip(Fingertip::Pinky).x, 1280.0);
    assert_eq!(joints.fingertip(Fingertip::Pinky).y, 720.0);
    assert_eq!((points[0].x, points[0].y), (0.0, 0.0));
}

#[test]
fn test_custom_joint_indices() {
    let resolution = Resolution::new(100, 100);
    let hand = landmarks_for(&synthetic_joints().map_points(|p| p * 10.0 + nalgebra::Vector2::new(50.0, 20.0)), resolution);

    // Point the direction axis at the middle PIP instead of the knuckle
    let indices = JointIndices {
        middle_knuckle: LandmarkIdx::MiddleFingerPip.index(),
        ..JointIndices::default()
    };
    assert!(indices.validate().is_ok());
    let joints = JointExtractor::new(resolution, indices).extract(&hand).unwrap();
    // landmarks_for leaves untracked landmarks on the wrist, so the frame collapses
    assert!(FrameTransform::default().apply(&joints).is_err());
}

#[test]
fn test_fingertips_keep_name_order() {
    let joints = synthetic_joints();
    let names: Vec<&str> = joints.fingertips().map(|(tip, _)| tip.name()).collect();
    assert_eq!(names, vec!["thumb", "index", "middle", "ring", "pinky"]);
}
