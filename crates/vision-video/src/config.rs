use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::orientation::Rotation;

/// Configuration for a camera video source.
#[derive(Clone, Debug)]
pub struct CameraSourceConfig {
    width: u32,
    height: u32,
    buffer_dir: PathBuf,
    lock_timeout: Duration,
    bit_rate: u32,
    frame_rate: u32,
    display_rotation: Rotation,
    thread_name: String,
}

impl Default for CameraSourceConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            buffer_dir: PathBuf::from("buffers"),
            lock_timeout: Duration::from_millis(2500),
            bit_rate: 6_000_000,
            frame_rate: 10,
            display_rotation: Rotation::Deg0,
            thread_name: "CameraBackground".to_string(),
        }
    }
}

impl CameraSourceConfig {
    /// Set the desired preview width in pixels.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the desired preview height in pixels.
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    /// Set the directory holding the rotating recording files.
    pub fn with_buffer_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.buffer_dir = dir.into();
        self
    }

    /// Set how long `attach` waits for the open/close lock.
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Set the recorder bit rate in bits per second.
    pub fn with_bit_rate(mut self, bit_rate: u32) -> Self {
        self.bit_rate = bit_rate;
        self
    }

    /// Set the recorder frame rate.
    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Set the current display rotation, used for the recording orientation hint.
    pub fn with_display_rotation(mut self, rotation: Rotation) -> Self {
        self.display_rotation = rotation;
        self
    }

    /// Set the name of the background callback thread.
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    // Getters
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn buffer_dir(&self) -> &Path {
        &self.buffer_dir
    }

    pub fn lock_timeout(&self) -> Duration {
        self.lock_timeout
    }

    pub fn bit_rate(&self) -> u32 {
        self.bit_rate
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    pub fn display_rotation(&self) -> Rotation {
        self.display_rotation
    }

    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }
}
