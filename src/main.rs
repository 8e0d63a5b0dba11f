//! Hand tracking teleoperation front end: camera to wrist-frame coordinates.

use anyhow::{bail, Context, Result};
use clap::Parser;
use hand_teleop::{
    camera::{Camera, ImageSequenceCamera},
    config::{Config, SinkKind},
    detector::SubprocessDetector,
    recording::Recorder,
    stream_loop::StreamLoop,
};
use log::info;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

static STOP_REQUESTED: AtomicBool = AtomicBool::new(false);

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Camera serial number or device path (overrides config)
    #[arg(long)]
    cam_serial: Option<String>,

    /// Replay images from this directory instead of a camera
    #[arg(long)]
    frames: Option<PathBuf>,

    /// Clockwise image rotation in degrees (multiple of 90)
    #[arg(long, allow_hyphen_values = true)]
    rotation_angle: Option<i32>,

    /// Disable moving average smoothing
    #[arg(long)]
    no_moving_average: bool,

    /// Moving average window size
    #[arg(short, long)]
    window: Option<usize>,

    /// Keep the unit-length hand frame instead of scaling by hand size
    #[arg(long)]
    no_normalize: bool,

    /// Do not negate X of the output
    #[arg(long)]
    no_mirror: bool,

    /// Output sink
    #[arg(short, long, value_enum)]
    sink: Option<SinkKind>,

    /// Record raw and marked frames to this directory
    #[arg(short, long)]
    record: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(serial) = &self.cam_serial {
            config.camera.serial_numbers = vec![serial.clone()];
        }
        if let Some(frames) = &self.frames {
            config.camera.frames_dir = Some(frames.clone());
        }
        if let Some(angle) = self.rotation_angle {
            config.pipeline.rotation_angle = angle;
        }
        if self.no_moving_average {
            config.pipeline.moving_average = false;
        }
        if let Some(window) = self.window {
            config.pipeline.moving_average_window = window;
        }
        if self.no_normalize {
            config.pipeline.normalize = false;
        }
        if self.no_mirror {
            config.pipeline.mirror = false;
        }
        if let Some(sink) = self.sink {
            config.publisher.sink = sink;
        }
        if let Some(dir) = &self.record {
            config.recording.enabled = true;
            config.recording.output_dir = dir.clone();
        }
    }
}

/// Install signal handlers for graceful shutdown (SIGTERM, SIGINT).
fn install_signal_handlers() {
    unsafe {
        let handler = signal_handler as extern "C" fn(libc::c_int) as libc::sighandler_t;
        libc::signal(libc::SIGTERM, handler);
        libc::signal(libc::SIGINT, handler);
    }
}

extern "C" fn signal_handler(_sig: libc::c_int) {
    STOP_REQUESTED.store(true, Ordering::SeqCst);
}

fn open_camera(config: &Config) -> Result<Box<dyn Camera>> {
    if let Some(dir) = &config.camera.frames_dir {
        info!("Replaying frames from {}", dir.display());
        return Ok(Box::new(ImageSequenceCamera::open(dir, config.camera.resolution)?));
    }

    let Some(serial) = config.camera.serial_numbers.first() else {
        bail!("No camera configured");
    };
    open_device(serial, config)
}

#[cfg(feature = "opencv")]
fn open_device(serial: &str, config: &Config) -> Result<Box<dyn Camera>> {
    use hand_teleop::camera::opencv::OpenCvCamera;

    let camera = OpenCvCamera::open(serial, config.camera.resolution, config.camera.fps)?;
    Ok(Box::new(camera))
}

#[cfg(not(feature = "opencv"))]
fn open_device(serial: &str, _config: &Config) -> Result<Box<dyn Camera>> {
    bail!("Camera '{serial}' requested but this build lacks the 'opencv' feature; use --frames to replay images")
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Hand Teleop - wrist frame coordinate stream");

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Config::from_file(path).with_context(|| format!("Failed to load {}", path.display()))?
        }
        None => Config::default(),
    };
    args.apply_overrides(&mut config);
    config.validate()?;

    if args.print_config {
        print!("{}", serde_yaml::to_string(&config)?);
        return Ok(());
    }

    install_signal_handlers();

    let camera = open_camera(&config)?;
    let detector = SubprocessDetector::spawn(&config.detection.command, config.detection_thresholds())?;
    let publisher = config.create_publisher()?;

    let mut stream = StreamLoop::new(
        camera,
        Box::new(detector),
        config.joint_extractor(),
        config.frame_transform(),
        config.create_filter(),
        publisher,
    )
    .with_rotation(config.pipeline.rotation_angle);

    if config.recording.enabled {
        stream = stream.with_recorder(Recorder::create(&config.recording.output_dir, config.camera.fps)?);
    }

    let stats = stream.run(&STOP_REQUESTED)?;
    info!(
        "Processed {} frames: {} published, {} skipped, {} without hand",
        stats.frames, stats.published, stats.skipped, stats.no_hand
    );

    Ok(())
}
