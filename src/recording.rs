//! Session recording of the processed camera stream.
//!
//! Frames are buffered in memory while the loop runs and written out once on shutdown. With the
//! `opencv` feature the buffers become `orig.mp4` and `demo.mp4`, otherwise numbered PNG files in
//! `orig/` and `demo/`.

use crate::{
    camera::{Frame, Resolution},
    constants::MARKER_HALF_SIZE,
    joints::JointSet,
    utils::safe_cast::{f64_to_i32_clamp, i32_to_u32, u32_to_i32},
    Error, Result,
};
use chrono::{DateTime, Local};
use image::Rgb;
use log::info;
use std::path::{Path, PathBuf};

/// Color of the joint markers
const MARKER_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Directory name of a recording session started at `time`, e.g. `demo_Oct_19_14_05`
#[must_use]
pub fn session_dir_name(time: &DateTime<Local>) -> String {
    format!("demo_{}", time.format("%b_%d_%H_%M"))
}

/// Copy of `frame` with a cross drawn at every joint
///
/// `scaled_by` is the resolution the joints were denormalized with. Joints are rescaled to the
/// frame's own dimensions, which differ from it once the frame has been rotated by 90 or 270
/// degrees. Joints outside the frame are clipped.
#[must_use]
pub fn mark_joints(frame: &Frame, joints: &JointSet, scaled_by: Resolution) -> Frame {
    let mut marked = frame.clone();
    let (width, height) = marked.dimensions();
    let max_x = u32_to_i32(width).unwrap_or(i32::MAX);
    let max_y = u32_to_i32(height).unwrap_or(i32::MAX);
    let scale_x = f64::from(width) / f64::from(scaled_by.width.max(1));
    let scale_y = f64::from(height) / f64::from(scaled_by.height.max(1));

    for point in joints.points() {
        let low = -MARKER_HALF_SIZE - 1;
        let cx = f64_to_i32_clamp(point.x * scale_x, low, max_x.saturating_add(MARKER_HALF_SIZE));
        let cy = f64_to_i32_clamp(point.y * scale_y, low, max_y.saturating_add(MARKER_HALF_SIZE));

        for offset in -MARKER_HALF_SIZE..=MARKER_HALF_SIZE {
            for (x, y) in [(cx + offset, cy), (cx, cy + offset)] {
                if let (Ok(x), Ok(y)) = (i32_to_u32(x), i32_to_u32(y)) {
                    if x < width && y < height {
                        marked.put_pixel(x, y, MARKER_COLOR);
                    }
                }
            }
        }
    }

    marked
}

/// Buffers raw and marked frames of one session
pub struct Recorder {
    dir: PathBuf,
    fps: u32,
    raw: Vec<Frame>,
    marked: Vec<Frame>,
}

impl Recorder {
    /// Create the timestamped session directory under `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    pub fn create<P: AsRef<Path>>(output_dir: P, fps: u32) -> Result<Self> {
        Self::create_at(output_dir, fps, &Local::now())
    }

    /// Like [`Recorder::create`] with an explicit session start time.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    pub fn create_at<P: AsRef<Path>>(output_dir: P, fps: u32, started: &DateTime<Local>) -> Result<Self> {
        if fps == 0 {
            return Err(Error::Recording("Recording fps must be greater than 0".to_string()));
        }

        let dir = output_dir.as_ref().join(session_dir_name(started));
        std::fs::create_dir_all(&dir)?;
        info!("Recording session to {}", dir.display());

        Ok(Self {
            dir,
            fps,
            raw: Vec::new(),
            marked: Vec::new(),
        })
    }

    /// Buffer `frame` as-is and with `joints` marked on it
    pub fn record(&mut self, frame: &Frame, joints: &JointSet, scaled_by: Resolution) {
        self.marked.push(mark_joints(frame, joints, scaled_by));
        self.raw.push(frame.clone());
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Write both buffers to the session directory and return it.
    ///
    /// # Errors
    ///
    /// Returns an error if any output file cannot be written.
    pub fn finish(self) -> Result<PathBuf> {
        info!("Writing {} recorded frames to {}", self.raw.len(), self.dir.display());
        write_stream(&self.dir, "orig", &self.raw, self.fps)?;
        write_stream(&self.dir, "demo", &self.marked, self.fps)?;
        Ok(self.dir)
    }
}

#[cfg(feature = "opencv")]
fn write_stream(dir: &Path, name: &str, frames: &[Frame], fps: u32) -> Result<()> {
    use crate::utils::image_conversion::frame_to_mat;
    use opencv::{core::Size, prelude::*, videoio::VideoWriter};

    let Some(first) = frames.first() else {
        return Ok(());
    };

    let path = dir.join(format!("{name}.mp4"));
    let path_str = path
        .to_str()
        .ok_or_else(|| Error::Recording(format!("Non UTF-8 recording path: {}", path.display())))?;

    let (width, height) = first.dimensions();
    let size = Size::new(u32_to_i32(width)?, u32_to_i32(height)?);
    let fourcc = VideoWriter::fourcc('m', 'p', '4', 'v')?;
    let mut writer = VideoWriter::new(path_str, fourcc, f64::from(fps), size, true)?;
    if !writer.is_opened()? {
        return Err(Error::Recording(format!("Failed to open video writer for {path_str}")));
    }

    for frame in frames {
        writer.write(&frame_to_mat(frame)?)?;
    }
    writer.release()?;
    Ok(())
}

#[cfg(not(feature = "opencv"))]
fn write_stream(dir: &Path, name: &str, frames: &[Frame], _fps: u32) -> Result<()> {
    if frames.is_empty() {
        return Ok(());
    }

    let stream_dir = dir.join(name);
    std::fs::create_dir_all(&stream_dir)?;
    for (index, frame) in frames.iter().enumerate() {
        frame.save(stream_dir.join(format!("frame_{index:06}.png")))?;
    }
    Ok(())
}
