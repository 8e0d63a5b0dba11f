//! Conversions between `OpenCV` BGR `Mat`s and RGB frames.

use crate::{
    camera::Frame,
    utils::safe_cast::{i32_to_u32, u32_to_i32},
    Error, Result,
};
use opencv::core::{Mat, MatTrait, MatTraitConst, Scalar, Vec3b, CV_8UC3};

/// Convert an 8-bit, 3-channel BGR Mat to an RGB frame
///
/// # Errors
/// * Returns error if the Mat is empty or not 3-channel
/// * Returns error if Mat data cannot be accessed
pub fn mat_to_frame(mat: &Mat) -> Result<Frame> {
    let rows = mat.rows();
    let cols = mat.cols();
    let channels = mat.channels();

    if rows <= 0 || cols <= 0 || channels != 3 {
        return Err(Error::InvalidInput(format!(
            "Invalid Mat dimensions: {rows}x{cols}x{channels}"
        )));
    }

    let mut frame = Frame::new(i32_to_u32(cols)?, i32_to_u32(rows)?);
    for row in 0..rows {
        for col in 0..cols {
            let bgr = mat.at_2d::<Vec3b>(row, col)?;
            frame.put_pixel(i32_to_u32(col)?, i32_to_u32(row)?, image::Rgb([bgr[2], bgr[1], bgr[0]]));
        }
    }

    Ok(frame)
}

/// Convert an RGB frame to an 8-bit, 3-channel BGR Mat
///
/// # Errors
/// * Returns error if the frame dimensions exceed `i32`
/// * Returns error if Mat creation fails
pub fn frame_to_mat(frame: &Frame) -> Result<Mat> {
    let height = u32_to_i32(frame.height())?;
    let width = u32_to_i32(frame.width())?;

    let mut mat = Mat::new_rows_cols_with_default(height, width, CV_8UC3, Scalar::default())?;
    for (x, y, pixel) in frame.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        *mat.at_2d_mut::<Vec3b>(u32_to_i32(y)?, u32_to_i32(x)?)? = Vec3b::from([b, g, r]);
    }

    Ok(mat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_mat_to_frame_swaps_channels() {
        let mat = Mat::new_rows_cols_with_default(2, 3, CV_8UC3, Scalar::new(10.0, 20.0, 30.0, 0.0)).unwrap();

        let frame = mat_to_frame(&mat).unwrap();
        assert_eq!(frame.dimensions(), (3, 2));
        assert_eq!(frame.get_pixel(0, 0), &Rgb([30, 20, 10]));
    }

    #[test]
    fn test_frame_to_mat_dimensions() {
        let mut frame = Frame::new(4, 5);
        frame.put_pixel(1, 2, Rgb([1, 2, 3]));

        let mat = frame_to_mat(&frame).unwrap();
        assert_eq!(mat.rows(), 5);
        assert_eq!(mat.cols(), 4);
        assert_eq!(*mat.at_2d::<Vec3b>(2, 1).unwrap(), Vec3b::from([3, 2, 1]));
    }
}
