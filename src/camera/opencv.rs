use super::{Camera, Frame, Resolution};
use crate::{utils::image_conversion::mat_to_frame, Error, Result};
use log::{info, warn};
use opencv::{
    core::Mat,
    prelude::*,
    videoio::{self, VideoCapture, CAP_PROP_BUFFERSIZE, CAP_PROP_FPS, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH},
};

/// Camera backed by an `OpenCV` `VideoCapture`
pub struct OpenCvCamera {
    capture: VideoCapture,
    resolution: Resolution,
}

impl OpenCvCamera {
    /// Open a capture device.
    ///
    /// `device` is either a numeric camera index or a device path such as `/dev/video2`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Device`] if the device cannot be opened.
    pub fn open(device: &str, resolution: Resolution, fps: u32) -> Result<Self> {
        info!("Opening camera {} at {} @ {} fps", device, resolution, fps);

        let mut capture = match device.parse::<i32>() {
            Ok(index) => VideoCapture::new(index, videoio::CAP_ANY)?,
            Err(_) => VideoCapture::from_file(device, videoio::CAP_ANY)?,
        };
        if !capture.is_opened()? {
            return Err(Error::Device(format!("Cannot open camera '{device}'")));
        }

        capture.set(CAP_PROP_FRAME_WIDTH, f64::from(resolution.width))?;
        capture.set(CAP_PROP_FRAME_HEIGHT, f64::from(resolution.height))?;
        capture.set(CAP_PROP_FPS, f64::from(fps))?;

        // Reduce buffer size for lower latency
        capture.set(CAP_PROP_BUFFERSIZE, 1.0)?;

        Ok(Self { capture, resolution })
    }
}

impl Camera for OpenCvCamera {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        let mut mat = Mat::default();
        if !self.capture.read(&mut mat)? || mat.empty() {
            return Ok(None);
        }
        mat_to_frame(&mat).map(Some)
    }

    fn resolution(&self) -> Resolution {
        self.resolution
    }
}

impl Drop for OpenCvCamera {
    fn drop(&mut self) {
        info!("Releasing camera");
        if let Err(e) = self.capture.release() {
            warn!("Failed to release camera: {}", e);
        }
    }
}
