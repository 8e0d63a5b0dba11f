//! The per-frame processing loop.
//!
//! Each iteration pulls an image, rotates it, detects a hand, extracts the joints, transforms them
//! into the wrist frame, smooths them and publishes the result. Frames without a hand, or whose
//! hand frame is degenerate, are skipped without publishing.

use crate::{
    camera::{rotate, Camera},
    detector::HandDetector,
    filters::CoordinateFilter,
    joints::JointExtractor,
    publisher::Publisher,
    recording::Recorder,
    transform::{FrameTransform, HandCoords},
    Result,
};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// What happened to a single iteration of the loop
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// The camera had no image ready
    NoImage,
    /// No hand passed the detector's threshold
    NoHand,
    /// The hand frame could not be built; nothing was published
    Skipped,
    /// Coordinates were smoothed and handed to the publisher
    Published(HandCoords),
}

/// Counters accumulated over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Images received from the camera
    pub frames: u64,
    /// Polls that returned no image
    pub empty_polls: u64,
    /// Images without a detected hand
    pub no_hand: u64,
    /// Images dropped because of a degenerate or singular hand frame
    pub skipped: u64,
    /// Coordinate messages published
    pub published: u64,
}

/// Single-threaded camera to publisher pipeline
pub struct StreamLoop {
    camera: Box<dyn Camera>,
    detector: Box<dyn HandDetector>,
    extractor: JointExtractor,
    transform: FrameTransform,
    filter: Box<dyn CoordinateFilter>,
    publisher: Box<dyn Publisher>,
    rotation_angle: i32,
    recorder: Option<Recorder>,
    stats: LoopStats,
}

impl StreamLoop {
    pub fn new(
        camera: Box<dyn Camera>,
        detector: Box<dyn HandDetector>,
        extractor: JointExtractor,
        transform: FrameTransform,
        filter: Box<dyn CoordinateFilter>,
        publisher: Box<dyn Publisher>,
    ) -> Self {
        Self {
            camera,
            detector,
            extractor,
            transform,
            filter,
            publisher,
            rotation_angle: 0,
            recorder: None,
            stats: LoopStats::default(),
        }
    }

    /// Rotate every image clockwise by `degrees` (a multiple of 90) before detection
    #[must_use]
    pub fn with_rotation(mut self, degrees: i32) -> Self {
        self.rotation_angle = degrees;
        self
    }

    /// Buffer every frame with a detected hand into `recorder`
    #[must_use]
    pub fn with_recorder(mut self, recorder: Recorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    #[must_use]
    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// Process one image.
    ///
    /// # Errors
    ///
    /// Returns camera, detector, extraction and publish failures. Degenerate and singular hand
    /// frames are not errors here; they yield [`FrameOutcome::Skipped`].
    pub fn step(&mut self) -> Result<FrameOutcome> {
        let Some(frame) = self.camera.next_frame()? else {
            debug!("No image from camera");
            self.stats.empty_polls += 1;
            return Ok(FrameOutcome::NoImage);
        };
        self.stats.frames += 1;

        let frame = rotate(&frame, self.rotation_angle)?;

        let Some(hand) = self.detector.detect(&frame)? else {
            debug!("No hand detected");
            self.stats.no_hand += 1;
            return Ok(FrameOutcome::NoHand);
        };

        let joints = self.extractor.extract(&hand)?;
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.record(&frame, &joints, self.extractor.resolution());
        }

        let coords = match self.transform.apply(&joints) {
            Ok(coords) => coords,
            Err(e) if e.is_frame_error() => {
                warn!("Skipping frame: {}", e);
                self.stats.skipped += 1;
                return Ok(FrameOutcome::Skipped);
            }
            Err(e) => return Err(e),
        };

        let smoothed = self.filter.apply(&coords);
        self.publisher.publish(&smoothed)?;
        self.stats.published += 1;

        Ok(FrameOutcome::Published(smoothed))
    }

    /// Run until `stop` is set, the camera runs out of frames, or a fatal error occurs.
    ///
    /// The loop is consumed, so the camera and detector are released on every exit. A pending
    /// recording is flushed afterwards; a flush failure is logged and does not replace the loop
    /// result.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error raised by [`StreamLoop::step`].
    pub fn run(mut self, stop: &AtomicBool) -> Result<LoopStats> {
        info!(
            "Starting stream loop ({} camera, filter: {}, publisher: {}, rotation: {})",
            self.camera.resolution(),
            self.filter.name(),
            self.publisher.name(),
            self.rotation_angle
        );

        let result = self.drive(stop);
        let recorder = self.recorder.take();
        let stats = self.stats;
        drop(self);

        match &result {
            Ok(()) => info!("Stream loop finished: {} frames, {} published", stats.frames, stats.published),
            Err(e) => warn!("Stream loop terminated: {}", e),
        }

        if let Some(recorder) = recorder {
            match recorder.finish() {
                Ok(dir) => info!("Recording saved to {}", dir.display()),
                Err(e) => warn!("Failed to save recording: {}", e),
            }
        }

        result.map(|()| stats)
    }

    fn drive(&mut self, stop: &AtomicBool) -> Result<()> {
        let mut last_report = Instant::now();
        let mut reported = self.stats;

        loop {
            if stop.load(Ordering::SeqCst) {
                info!("Stop requested");
                return Ok(());
            }
            if self.camera.is_finished() {
                info!("End of frame source reached");
                return Ok(());
            }

            self.step()?;

            let elapsed = last_report.elapsed();
            if elapsed >= Duration::from_secs(1) {
                let fps = (self.stats.frames - reported.frames) as f64 / elapsed.as_secs_f64();
                info!(
                    "{:.1} fps, {} published, {} skipped, {} without hand",
                    fps,
                    self.stats.published - reported.published,
                    self.stats.skipped - reported.skipped,
                    self.stats.no_hand - reported.no_hand
                );
                reported = self.stats;
                last_report = Instant::now();
            }
        }
    }
}
