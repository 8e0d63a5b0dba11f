//! Tests for smoothing output accuracy comparing with expected values

use hand_teleop::{
    filters::{moving_average::MovingAverageFilter, smoothing_filter, CoordinateFilter},
    transform::HandCoords,
};
use nalgebra::SMatrix;

/// Frame whose every element is `value`
fn constant(value: f64) -> HandCoords {
    HandCoords::from_matrix(SMatrix::from_element(value))
}

/// Frame with a distinct value per element, offset by `frame`
fn ramp(frame: usize) -> HandCoords {
    HandCoords::from_matrix(SMatrix::from_fn(|row, col| (frame * 100 + row * 2 + col) as f64))
}

#[test]
fn test_moving_average_output_accuracy() {
    let mut filter = MovingAverageFilter::new(3);

    assert_eq!(filter.apply(&constant(3.0)), constant(3.0), "First value should pass through");
    assert_eq!(filter.apply(&constant(6.0)), constant(4.5), "Average of [3, 6]");
    assert_eq!(filter.apply(&constant(9.0)), constant(6.0), "Average of [3, 6, 9]");
    assert_eq!(filter.apply(&constant(12.0)), constant(9.0), "Average of [6, 9, 12]");
}

#[test]
fn test_window_of_ten_keeps_last_ten_frames() {
    let mut filter = MovingAverageFilter::new(10);
    let mut last = HandCoords::zeros();
    for frame in 0..12 {
        last = filter.apply(&ramp(frame));
    }
    assert_eq!(filter.len(), 10);

    // Frames 2..=11 remain, their mean offset is 650
    let expected = HandCoords::from_matrix(SMatrix::from_fn(|row, col| (650 + row * 2 + col) as f64));
    let diff = (last.matrix() - expected.matrix()).abs().max();
    assert!(diff < 1e-9, "max deviation {diff}");
}

#[test]
fn test_single_frame_is_unchanged() {
    let mut filter = smoothing_filter(true, 10);
    assert_eq!(filter.apply(&ramp(7)), ramp(7));
}

#[test]
fn test_elementwise_mean() {
    let mut filter = MovingAverageFilter::new(2);
    let a = HandCoords::from_matrix(SMatrix::from_fn(|row, col| if col == 0 { row as f64 } else { -1.0 }));
    let b = HandCoords::from_matrix(SMatrix::from_fn(|row, col| if col == 0 { 0.0 } else { row as f64 + 1.0 }));

    filter.apply(&a);
    let mean = filter.apply(&b);
    for row in 0..11 {
        assert!((mean.point(row).x - row as f64 / 2.0).abs() < 1e-12);
        assert!((mean.point(row).y - row as f64 / 2.0).abs() < 1e-12);
    }
}

#[test]
fn test_passthrough_when_disabled() {
    let mut filter = smoothing_filter(false, 10);
    assert_eq!(filter.name(), "NoFilter");
    for frame in 0..5 {
        assert_eq!(filter.apply(&ramp(frame)), ramp(frame));
    }
}

#[test]
fn test_smoothing_converges_on_constant_input() {
    let mut filter = smoothing_filter(true, 4);
    filter.apply(&constant(100.0));
    let mut output = HandCoords::zeros();
    for _ in 0..4 {
        output = filter.apply(&constant(-2.0));
    }
    assert_eq!(output, constant(-2.0));
}
