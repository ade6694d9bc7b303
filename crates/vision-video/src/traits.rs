use std::path::Path;
use std::sync::Arc;

use crate::{CameraParams, VideoSourceError};

/// Receives everything a video source produces.
///
/// Frame and parameter callbacks run on the source's background thread,
/// so implementations should return quickly.
pub trait VideoSourceListener: Send + Sync {
    /// A new RGBA8888 frame. The slice is reused for the next frame.
    fn on_new_frame(&self, rgba: &[u8]);

    fn on_new_camera_params(&self, params: &CameraParams);

    /// A recording segment was completed and written to `path`.
    fn on_file_recorded(&self, path: &Path);
}

/// A source of frames for the vision pipeline.
pub trait VideoSource {
    /// Width of the active preview resolution, once a camera has been chosen.
    fn source_width(&self) -> Option<u32>;

    /// Height of the active preview resolution, once a camera has been chosen.
    fn source_height(&self) -> Option<u32>;

    fn is_attached(&self) -> bool;

    /// Register `listener` and start producing frames.
    fn attach(&mut self, listener: Arc<dyn VideoSourceListener>) -> Result<(), VideoSourceError>;

    /// Stop producing frames, close the camera and forget the listener.
    ///
    /// No frame callbacks are delivered after this returns.
    fn detach(&mut self);

    /// Release all platform resources. Only valid while detached.
    fn release(&mut self) -> Result<(), VideoSourceError>;

    /// Begin recording into the next buffer file.
    fn start_video_recording(&mut self) -> Result<(), VideoSourceError>;

    /// Finish the current recording and report its file to the listener.
    fn stop_video_recording(&mut self);
}
