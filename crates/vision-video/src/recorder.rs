use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::{Duration, Instant};

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

use crate::platform::{Recorder, RecorderSettings};
use crate::VideoSourceError;

enum State {
    Idle,
    Prepared(RecorderSettings),
    Recording {
        settings: RecorderSettings,
        writer: BufWriter<File>,
        interval: Duration,
        last_frame: Option<Instant>,
        rgb: Vec<u8>,
    },
}

/// Records segments as concatenated JPEG images (Motion JPEG).
///
/// Frames arriving faster than the configured frame rate are skipped.
pub struct MjpegRecorder {
    state: State,
    frames_written: u64,
}

impl std::fmt::Debug for MjpegRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            State::Idle => "idle",
            State::Prepared(_) => "prepared",
            State::Recording { .. } => "recording",
        };
        f.debug_struct("MjpegRecorder")
            .field("state", &state)
            .field("frames_written", &self.frames_written)
            .finish()
    }
}

impl Default for MjpegRecorder {
    fn default() -> Self {
        Self::new()
    }
}

// Map the encoder bit rate onto a JPEG quality; 6 Mbit/s lands at 60.
fn quality_for(bit_rate: u32) -> u8 {
    (bit_rate / 100_000).clamp(30, 95) as u8
}

impl MjpegRecorder {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            frames_written: 0,
        }
    }

    /// Frames written to the current (or last) segment.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, State::Recording { .. })
    }
}

impl Recorder for MjpegRecorder {
    fn file_extension(&self) -> &str {
        "mjpeg"
    }

    fn setup(&mut self, settings: &RecorderSettings) -> Result<(), VideoSourceError> {
        if self.is_recording() {
            return Err(VideoSourceError::Recorder(
                "setup called while recording".to_string(),
            ));
        }
        if let Some(hint) = settings.orientation_hint {
            log::debug!("MJPEG cannot carry an orientation hint ({hint} degrees)");
        }
        self.state = State::Prepared(settings.clone());
        Ok(())
    }

    fn start(&mut self) -> Result<(), VideoSourceError> {
        let State::Prepared(settings) = &self.state else {
            return Err(VideoSourceError::Recorder(
                "start called before setup".to_string(),
            ));
        };
        let settings = settings.clone();

        let writer = BufWriter::new(File::create(&settings.path)?);
        let interval = if settings.frame_rate > 0 {
            Duration::from_secs(1) / settings.frame_rate
        } else {
            Duration::ZERO
        };
        let rgb = Vec::with_capacity(settings.size.width as usize * settings.size.height as usize * 3);
        log::info!("recording {} to {}", settings.size, settings.path.display());

        self.frames_written = 0;
        self.state = State::Recording {
            settings,
            writer,
            interval,
            last_frame: None,
            rgb,
        };
        Ok(())
    }

    fn write_frame(&mut self, rgba: &[u8]) -> Result<(), VideoSourceError> {
        let State::Recording {
            settings,
            writer,
            interval,
            last_frame,
            rgb,
        } = &mut self.state
        else {
            return Err(VideoSourceError::Recorder(
                "write_frame called while not recording".to_string(),
            ));
        };

        let now = Instant::now();
        if let Some(last) = *last_frame {
            if now.duration_since(last) < *interval {
                return Ok(());
            }
        }

        let size = settings.size;
        if rgba.len() != size.rgba_len() {
            return Err(VideoSourceError::Recorder(format!(
                "frame has {} bytes, {} needs {}",
                rgba.len(),
                size,
                size.rgba_len()
            )));
        }

        rgb.clear();
        for pixel in rgba.chunks_exact(4) {
            rgb.extend_from_slice(&pixel[..3]);
        }

        JpegEncoder::new_with_quality(&mut *writer, quality_for(settings.bit_rate)).encode(
            rgb.as_slice(),
            size.width,
            size.height,
            ExtendedColorType::Rgb8,
        )?;

        *last_frame = Some(now);
        self.frames_written += 1;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), VideoSourceError> {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Recording {
                settings,
                mut writer,
                ..
            } => {
                writer.flush()?;
                log::info!(
                    "recorded {} frames to {}",
                    self.frames_written,
                    settings.path.display()
                );
                Ok(())
            }
            other => {
                self.state = other;
                Err(VideoSourceError::Recorder(
                    "stop called while not recording".to_string(),
                ))
            }
        }
    }

    fn reset(&mut self) {
        self.state = State::Idle;
    }

    fn release(&mut self) {
        self.state = State::Idle;
    }
}
