use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;

use crate::{CameraParams, VideoSourceListener};

/// Something a video source produced.
#[derive(Debug, Clone)]
pub enum SourceEvent {
    Frame(Vec<u8>),
    CameraParams(CameraParams),
    FileRecorded(PathBuf),
}

/// Listener that forwards events into an async channel.
///
/// Sending never blocks the source's background thread: when the receiver
/// falls behind, events are dropped and counted.
#[derive(Debug)]
pub struct ChannelListener {
    sender: mpsc::Sender<SourceEvent>,
    dropped: AtomicU64,
}

/// Receiving half of a [`ChannelListener`].
#[derive(Debug)]
pub struct EventReceiver {
    receiver: mpsc::Receiver<SourceEvent>,
}

impl ChannelListener {
    pub fn new(capacity: usize) -> (Self, EventReceiver) {
        let (sender, receiver) = mpsc::channel(capacity);
        (
            Self {
                sender,
                dropped: AtomicU64::new(0),
            },
            EventReceiver { receiver },
        )
    }

    /// Number of events dropped because the channel was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn forward(&self, event: SourceEvent) {
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                log::debug!("event receiver dropped");
            }
        }
    }
}

impl VideoSourceListener for ChannelListener {
    fn on_new_frame(&self, rgba: &[u8]) {
        // skip the copy if there is no room for it
        if self.sender.capacity() == 0 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return;
        }
        self.forward(SourceEvent::Frame(rgba.to_vec()));
    }

    fn on_new_camera_params(&self, params: &CameraParams) {
        self.forward(SourceEvent::CameraParams(*params));
    }

    fn on_file_recorded(&self, path: &Path) {
        self.forward(SourceEvent::FileRecorded(path.to_path_buf()));
    }
}

impl EventReceiver {
    /// Wait for the next event. Returns `None` once the listener is gone.
    pub async fn recv(&mut self) -> Option<SourceEvent> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Option<SourceEvent> {
        self.receiver.try_recv().ok()
    }
}
