use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use vision_base::init_stdout_logger;
use vision_video::{
    CameraParams, CameraSourceConfig, CameraVideoSource, V4l2Platform, VideoSource,
    VideoSourceListener,
};

const SEGMENTS: usize = 4;
const SEGMENT_SECONDS: u64 = 3;

#[derive(Default)]
struct Counter {
    frames: AtomicU64,
}

impl VideoSourceListener for Counter {
    fn on_new_frame(&self, _rgba: &[u8]) {
        self.frames.fetch_add(1, Ordering::Relaxed);
    }

    fn on_new_camera_params(&self, params: &CameraParams) {
        log::info!("camera params: {:?}", params);
    }

    fn on_file_recorded(&self, path: &Path) {
        log::info!("recorded {}", path.display());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_stdout_logger();

    let buffer_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "buffers".to_string());
    let config = CameraSourceConfig::default()
        .with_width(640)
        .with_height(480)
        .with_buffer_dir(buffer_dir);

    let mut source = CameraVideoSource::new(V4l2Platform::new(), config)?;
    let counter = Arc::new(Counter::default());
    source.attach(counter.clone())?;
    log::info!(
        "streaming {}x{}",
        source.source_width().unwrap_or(0),
        source.source_height().unwrap_or(0)
    );

    // attach starts the first segment
    for segment in 0..SEGMENTS {
        std::thread::sleep(Duration::from_secs(SEGMENT_SECONDS));
        source.stop_video_recording();
        if segment + 1 < SEGMENTS {
            source.start_video_recording()?;
        }
    }

    source.detach();
    source.release()?;
    log::info!("{} frames delivered", counter.frames.load(Ordering::Relaxed));
    Ok(())
}
