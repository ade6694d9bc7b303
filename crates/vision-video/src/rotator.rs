use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Number of recording slots reused in turn.
pub const VIDEO_BUFFERS_NUMBER: usize = 3;

/// Hands out recording file paths, cycling through a fixed set of slots.
///
/// A path stays pending until [`BufferRotator::take_pending`] consumes it,
/// so asking again before a recording completes returns the same file.
#[derive(Debug)]
pub struct BufferRotator {
    dir: PathBuf,
    extension: String,
    current: usize,
    pending: Option<PathBuf>,
}

impl BufferRotator {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
            current: 0,
            pending: None,
        }
    }

    /// File name of slot `index` (0-based), e.g. `video1.mp4`.
    pub fn slot_name(&self, index: usize) -> String {
        format!("video{}.{}", index % VIDEO_BUFFERS_NUMBER + 1, self.extension)
    }

    /// Index of the slot the next new path will use.
    pub fn current_slot(&self) -> usize {
        self.current
    }

    pub fn pending(&self) -> Option<&Path> {
        self.pending.as_deref()
    }

    /// Path for the next recording segment.
    ///
    /// When nothing is pending, the current slot's old file is deleted and
    /// the slot index advances.
    pub fn next_path(&mut self) -> io::Result<PathBuf> {
        if let Some(path) = &self.pending {
            return Ok(path.clone());
        }

        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(self.slot_name(self.current));
        match fs::remove_file(&path) {
            Ok(()) => log::debug!("removed stale buffer file {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }

        self.current = (self.current + 1) % VIDEO_BUFFERS_NUMBER;
        self.pending = Some(path.clone());
        Ok(path)
    }

    /// Consume the pending path once its recording has completed.
    pub fn take_pending(&mut self) -> Option<PathBuf> {
        self.pending.take()
    }
}
