//! Hand landmark detection.
//!
//! The landmark model itself lives outside this crate. [`SubprocessDetector`] drives it through a
//! helper process speaking a small line protocol:
//!
//! 1. The helper is started with `--max-num-hands`, `--min-detection-confidence` and
//!    `--min-tracking-confidence` and prints `READY` once its model is loaded.
//! 2. For every frame the detector writes `width`, `height` and `channels` as little-endian `u32`
//!    followed by the raw RGB bytes.
//! 3. The helper answers with one JSON line:
//!    `{"hands":[{"handedness":"Left","score":0.98,"landmarks":[{"x":..,"y":..,"z":..}, ...]}],"error":null}`

use crate::{
    camera::Frame,
    constants::{DETECTOR_READY_LINE, NUM_HAND_LANDMARKS},
    landmarks::{HandLandmarks, Landmark},
    Error, Result,
};
use log::{debug, info, warn};
use serde::Deserialize;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// Detects at most one hand per frame
pub trait HandDetector: Send {
    /// Returns the hand in `frame`, or `None` when no hand passes the confidence threshold.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Detector`] when the detector itself fails.
    fn detect(&mut self, frame: &Frame) -> Result<Option<HandLandmarks>>;
}

/// Detection thresholds handed to the landmark model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionThresholds {
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    #[serde(default)]
    handedness: String,
    score: f32,
    landmarks: Vec<Landmark>,
}

#[derive(Deserialize, Debug)]
struct DetectionResponse {
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// Landmark detector running as a child process
pub struct SubprocessDetector {
    process: Child,
    stdin: ChildStdin,
    stdout_reader: BufReader<ChildStdout>,
    thresholds: DetectionThresholds,
}

impl SubprocessDetector {
    /// Start the helper process and wait for its ready line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Detector`] if the command is empty, cannot be started, or does not
    /// report ready.
    pub fn spawn(command: &[String], thresholds: DetectionThresholds) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| Error::Detector("Detector command is empty".to_string()))?;

        info!("Starting hand detector: {}", command.join(" "));

        let mut process = Command::new(program)
            .args(args)
            .arg("--max-num-hands")
            .arg("1")
            .arg("--min-detection-confidence")
            .arg(thresholds.min_detection_confidence.to_string())
            .arg("--min-tracking-confidence")
            .arg(thresholds.min_tracking_confidence.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::Detector(format!("Failed to start '{program}': {e}")))?;

        let stdin = process
            .stdin
            .take()
            .ok_or_else(|| Error::Detector("Failed to get detector stdin".to_string()))?;
        let stdout = process
            .stdout
            .take()
            .ok_or_else(|| Error::Detector("Failed to get detector stdout".to_string()))?;
        let mut stdout_reader = BufReader::new(stdout);

        let mut ready_line = String::new();
        stdout_reader.read_line(&mut ready_line)?;
        if ready_line.trim() != DETECTOR_READY_LINE {
            let _ = process.kill();
            return Err(Error::Detector(format!(
                "Detector did not signal ready, got: {:?}",
                ready_line.trim()
            )));
        }

        info!("Hand detector ready");
        Ok(Self {
            process,
            stdin,
            stdout_reader,
            thresholds,
        })
    }

    fn send_frame(&mut self, frame: &Frame) -> Result<()> {
        let (width, height) = frame.dimensions();
        self.stdin.write_all(&width.to_le_bytes())?;
        self.stdin.write_all(&height.to_le_bytes())?;
        self.stdin.write_all(&3u32.to_le_bytes())?;
        self.stdin.write_all(frame.as_raw())?;
        self.stdin.flush()?;
        Ok(())
    }

    fn read_response(&mut self) -> Result<DetectionResponse> {
        let mut response = String::new();
        if self.stdout_reader.read_line(&mut response)? == 0 {
            return Err(Error::Detector("Detector process closed its output".to_string()));
        }
        serde_json::from_str(&response)
            .map_err(|e| Error::Detector(format!("Failed to parse detector response {:?}: {e}", response.trim())))
    }
}

impl HandDetector for SubprocessDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Option<HandLandmarks>> {
        self.send_frame(frame)?;
        let response = self.read_response()?;
        select_hand(response, self.thresholds.min_detection_confidence)
    }
}

impl Drop for SubprocessDetector {
    fn drop(&mut self) {
        // Kill the helper when the detector is dropped
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

/// First hand at or above `min_confidence` with a full landmark set
fn select_hand(response: DetectionResponse, min_confidence: f32) -> Result<Option<HandLandmarks>> {
    if let Some(error) = response.error {
        warn!("Detector reported error: {}", error);
        return Ok(None);
    }

    for hand in response.hands {
        if hand.score < min_confidence {
            debug!("Ignoring hand with confidence {:.2}", hand.score);
            continue;
        }
        if hand.landmarks.len() != NUM_HAND_LANDMARKS {
            warn!("Expected {} landmarks, got {}", NUM_HAND_LANDMARKS, hand.landmarks.len());
            continue;
        }
        return HandLandmarks::from_slice(&hand.landmarks, hand.score, hand.handedness).map(Some);
    }

    Ok(None)
}
