//! Seams to the host camera, colour-conversion and recording services.
//!
//! The source only sequences calls into these traits. Sensor access,
//! conversion kernels and encoders live behind them.

use std::path::PathBuf;

use vision_base::Size;

use crate::VideoSourceError;

/// Which way a camera lens points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LensFacing {
    Front,
    Back,
    External,
}

/// Static description of one camera, as reported by the host.
#[derive(Debug, Clone)]
pub struct CameraInfo {
    pub id: String,
    pub facing: LensFacing,
    /// Sizes the camera can stream to a preview surface.
    pub output_sizes: Vec<Size>,
    /// Clockwise rotation of the sensor relative to the device, in degrees.
    pub sensor_orientation: u32,
    /// Available focal lengths in millimeters.
    pub focal_lengths: Vec<f32>,
    /// Physical sensor size in millimeters (width, height), if known.
    pub sensor_size: Option<(f32, f32)>,
}

/// Pixel layout of a raw camera frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Packed YUV 4:2:2, `[Y0, U, Y1, V]`.
    Yuyv,
    /// Planar YUV 4:2:0: Y plane, then U, then V.
    I420,
    /// Semi-planar YUV 4:2:0: Y plane, then interleaved UV.
    Nv12,
    Rgba,
}

/// One frame as delivered by the camera, borrowed from the device.
#[derive(Debug, Clone, Copy)]
pub struct RawFrame<'a> {
    pub format: PixelFormat,
    pub size: Size,
    pub data: &'a [u8],
}

/// Settings applied to the recorder before each segment.
#[derive(Debug, Clone)]
pub struct RecorderSettings {
    pub path: PathBuf,
    pub size: Size,
    pub bit_rate: u32,
    pub frame_rate: u32,
    /// Rotation the player should apply, in degrees.
    pub orientation_hint: Option<u32>,
}

/// An opened camera device.
pub trait CameraDevice: Send {
    fn id(&self) -> &str;

    /// Configure the capture session and start streaming at `size`.
    fn start_preview(&mut self, size: Size) -> Result<(), VideoSourceError>;

    /// Block until the next frame is available.
    fn next_frame(&mut self) -> Result<RawFrame<'_>, VideoSourceError>;

    /// Stop streaming and release the device. Safe to call more than once.
    fn close(&mut self);
}

/// Converts raw camera frames into RGBA8888.
pub trait FrameConverter: Send {
    /// Convert `frame` into `rgba`, which holds exactly `width * height * 4` bytes.
    fn convert(&mut self, frame: &RawFrame<'_>, rgba: &mut [u8]) -> Result<(), VideoSourceError>;

    fn release(&mut self) {}
}

/// Encodes frames into a file.
///
/// Lifecycle: `setup` → `start` → `write_frame`* → `stop` → `reset`, repeated
/// per segment; `release` once at the end.
pub trait Recorder: Send {
    /// Extension of the files this recorder produces.
    fn file_extension(&self) -> &str {
        "mp4"
    }

    fn setup(&mut self, settings: &RecorderSettings) -> Result<(), VideoSourceError>;

    fn start(&mut self) -> Result<(), VideoSourceError>;

    fn write_frame(&mut self, rgba: &[u8]) -> Result<(), VideoSourceError>;

    fn stop(&mut self) -> Result<(), VideoSourceError>;

    /// Return to the idle state, discarding any setup.
    fn reset(&mut self);

    fn release(&mut self);
}

/// Host services the video source is built on.
pub trait Platform: Send + Sync + 'static {
    fn cameras(&self) -> Result<Vec<CameraInfo>, VideoSourceError>;

    fn open_camera(&self, id: &str) -> Result<Box<dyn CameraDevice>, VideoSourceError>;

    fn create_converter(&self, size: Size) -> Result<Box<dyn FrameConverter>, VideoSourceError>;

    fn create_recorder(&self) -> Result<Box<dyn Recorder>, VideoSourceError>;
}
