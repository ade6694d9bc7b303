use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use vision_base::Size;

use crate::lock::{OpenCloseLock, OpenClosePermit};
use crate::orientation::orientation_hint;
use crate::platform::{
    CameraDevice, CameraInfo, FrameConverter, LensFacing, Platform, Recorder, RecorderSettings,
};
use crate::resolution::choose_optimal_resolution;
use crate::rotator::BufferRotator;
use crate::{CameraParams, CameraSourceConfig, VideoSource, VideoSourceError, VideoSourceListener};

/// Lifecycle of the camera behind a [`CameraVideoSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    Detached,
    /// Waiting for the device to open and the capture session to be configured.
    Opening,
    Streaming,
    /// The device failed; the background thread is shutting down.
    Error,
}

struct Recording {
    recorder: Box<dyn Recorder>,
    rotator: BufferRotator,
    // size, rates and orientation for the current attach; path is filled per segment
    template: Option<RecorderSettings>,
    active: bool,
}

impl Recording {
    /// Point the recorder at the next buffer file.
    fn prepare(&mut self) -> Result<(), VideoSourceError> {
        let template = self.template.as_ref().ok_or(VideoSourceError::NotAttached)?;
        let path = self.rotator.next_path()?;
        let settings = RecorderSettings {
            path,
            ..template.clone()
        };
        self.recorder.setup(&settings)
    }

    fn begin(&mut self) -> Result<(), VideoSourceError> {
        self.recorder.start()?;
        self.active = true;
        Ok(())
    }

    /// Stop the current segment and hand back its file, if one was recording.
    fn finish(&mut self) -> Option<PathBuf> {
        if !self.active {
            return None;
        }
        if let Err(e) = self.recorder.stop() {
            log::error!("failed to stop recorder: {}", e);
        }
        self.recorder.reset();
        self.active = false;
        self.rotator
            .take_pending()
            .filter(|path| !path.as_os_str().is_empty())
    }
}

/// State touched by both the caller's thread and the background thread.
struct Shared {
    lock: Arc<OpenCloseLock>,
    cancel: AtomicBool,
    state: Mutex<SourceState>,
    recording: Mutex<Recording>,
}

impl Shared {
    fn state(&self) -> SourceState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_state(&self, state: SourceState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = state;
    }

    fn recording(&self) -> MutexGuard<'_, Recording> {
        self.recording.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }
}

/// Everything the background thread owns while a camera is attached.
struct Worker<P: Platform> {
    platform: Arc<P>,
    shared: Arc<Shared>,
    listener: Arc<dyn VideoSourceListener>,
    camera_id: String,
    preview: Size,
    params: CameraParams,
    converter: Box<dyn FrameConverter>,
    // taken by attach, dropped once the device has opened (or on unwind)
    permit: Option<OpenClosePermit>,
}

impl<P: Platform> Worker<P> {
    /// Open, configure, stream until cancelled or failed, then close.
    ///
    /// Hands the converter back so the source can release it later.
    fn run(mut self) -> Box<dyn FrameConverter> {
        let mut device = match self.platform.open_camera(&self.camera_id) {
            Ok(device) => device,
            Err(e) => {
                log::error!("failed to open camera {}: {}", self.camera_id, e);
                self.shared.set_state(SourceState::Error);
                self.permit.take();
                self.shared.set_state(SourceState::Detached);
                return self.converter;
            }
        };
        log::info!("camera {} opened", self.camera_id);

        self.listener.on_new_camera_params(&self.params);
        let session = self.create_session(device.as_mut());
        self.permit.take();

        if let Err(e) = session {
            log::error!("failed to configure capture session: {}", e);
            self.shutdown(device.as_mut(), SourceState::Error);
            return self.converter;
        }

        if !self.configure() {
            self.shutdown(device.as_mut(), SourceState::Detached);
            return self.converter;
        }

        let state = self.stream(device.as_mut());
        self.shutdown(device.as_mut(), state);
        self.converter
    }

    fn create_session(&mut self, device: &mut dyn CameraDevice) -> Result<(), VideoSourceError> {
        if let Err(e) = self.shared.recording().prepare() {
            log::warn!("recorder setup failed, continuing without recording: {}", e);
        }
        device.start_preview(self.preview)
    }

    /// Runs once the session is up. Returns false if a detach got there first.
    fn configure(&mut self) -> bool {
        let _permit = match self.shared.lock.acquire() {
            Ok(permit) => permit,
            Err(e) => {
                log::error!("{}", e);
                return false;
            }
        };
        if self.shared.cancelled() {
            return false;
        }

        {
            let mut recording = self.shared.recording();
            if !recording.active {
                if let Err(e) = recording.begin() {
                    log::warn!("failed to start recording: {}", e);
                }
            }
        }
        self.shared.set_state(SourceState::Streaming);
        true
    }

    fn stream(&mut self, device: &mut dyn CameraDevice) -> SourceState {
        let id = device.id().to_string();
        let mut rgba = vec![0u8; self.preview.rgba_len()];
        let mut frames: u64 = 0;

        while !self.shared.cancelled() {
            let frame = match device.next_frame() {
                Ok(frame) => frame,
                Err(e) => {
                    log::error!("camera {} failed: {}", id, e);
                    return SourceState::Error;
                }
            };

            if let Err(e) = self.converter.convert(&frame, &mut rgba) {
                log::warn!("dropping frame: {}", e);
                continue;
            }

            {
                let mut recording = self.shared.recording();
                if recording.active {
                    if let Err(e) = recording.recorder.write_frame(&rgba) {
                        log::warn!("failed to record frame: {}", e);
                    }
                }
            }

            self.listener.on_new_frame(&rgba);
            frames += 1;
        }

        log::debug!("camera {} delivered {} frames", id, frames);
        SourceState::Streaming
    }

    fn shutdown(&self, device: &mut dyn CameraDevice, state: SourceState) {
        if state == SourceState::Error {
            self.shared.set_state(SourceState::Error);
        }
        device.close();
        log::info!("camera {} closed", self.camera_id);
        if state == SourceState::Error {
            self.shared.set_state(SourceState::Detached);
        }
    }
}

/// [`VideoSource`] backed by a platform camera, converter and recorder.
///
/// Host callbacks (device opened, session configured, frame available) are
/// all handled on one background thread that lives from `attach` to `detach`.
pub struct CameraVideoSource<P: Platform> {
    config: CameraSourceConfig,
    platform: Arc<P>,
    shared: Arc<Shared>,
    listener: Option<Arc<dyn VideoSourceListener>>,
    camera: Option<CameraInfo>,
    preview_size: Option<Size>,
    converter: Option<Box<dyn FrameConverter>>,
    thread_handle: Option<JoinHandle<Box<dyn FrameConverter>>>,
}

impl<P: Platform> std::fmt::Debug for CameraVideoSource<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraVideoSource")
            .field("config", &self.config)
            .field("state", &self.shared.state())
            .field("listener", &self.listener.is_some())
            .field("camera", &self.camera.as_ref().map(|c| &c.id))
            .field("preview_size", &self.preview_size)
            .field("thread_handle", &self.thread_handle.is_some())
            .finish()
    }
}

impl<P: Platform> CameraVideoSource<P> {
    /// Create a source on `platform`. The recorder is created up front and
    /// lives until [`VideoSource::release`].
    pub fn new(platform: P, config: CameraSourceConfig) -> Result<Self, VideoSourceError> {
        let recorder = platform.create_recorder()?;
        let rotator = BufferRotator::new(config.buffer_dir(), recorder.file_extension());

        Ok(Self {
            config,
            platform: Arc::new(platform),
            shared: Arc::new(Shared {
                lock: OpenCloseLock::new(),
                cancel: AtomicBool::new(false),
                state: Mutex::new(SourceState::Detached),
                recording: Mutex::new(Recording {
                    recorder,
                    rotator,
                    template: None,
                    active: false,
                }),
            }),
            listener: None,
            camera: None,
            preview_size: None,
            converter: None,
            thread_handle: None,
        })
    }

    pub fn config(&self) -> &CameraSourceConfig {
        &self.config
    }

    pub fn state(&self) -> SourceState {
        self.shared.state()
    }

    /// Lock serializing camera open and close.
    ///
    /// A host holding a permit keeps `attach` from opening the camera (it
    /// fails after the configured lock timeout) and makes `detach` wait.
    pub fn open_close_lock(&self) -> Arc<OpenCloseLock> {
        Arc::clone(&self.shared.lock)
    }

    /// Preview size chosen on the last attach.
    pub fn preview_size(&self) -> Option<Size> {
        self.preview_size
    }

    /// Camera chosen on the last attach.
    pub fn camera(&self) -> Option<&CameraInfo> {
        self.camera.as_ref()
    }

    pub fn is_recording(&self) -> bool {
        self.shared.recording().active
    }

    /// First camera that is not front-facing and can stream at some size.
    fn select_camera(&self) -> Result<CameraInfo, VideoSourceError> {
        self.platform
            .cameras()?
            .into_iter()
            .filter(|camera| camera.facing != LensFacing::Front)
            .find(|camera| !camera.output_sizes.is_empty())
            .ok_or(VideoSourceError::NoCamera)
    }
}

impl<P: Platform> VideoSource for CameraVideoSource<P> {
    fn source_width(&self) -> Option<u32> {
        self.preview_size.map(|size| size.width)
    }

    fn source_height(&self) -> Option<u32> {
        self.preview_size.map(|size| size.height)
    }

    fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    fn attach(&mut self, listener: Arc<dyn VideoSourceListener>) -> Result<(), VideoSourceError> {
        if self.listener.is_some() {
            return Err(VideoSourceError::AlreadyAttached);
        }

        let camera = self.select_camera()?;
        let desired = Size::new(self.config.width(), self.config.height());
        let preview = choose_optimal_resolution(&camera.output_sizes, desired)
            .ok_or(VideoSourceError::NoCamera)?;
        log::info!(
            "camera {} selected, preview {} (desired {})",
            camera.id,
            preview,
            desired
        );

        // released by the background thread once the device has opened
        let permit = self
            .shared
            .lock
            .try_acquire_for(self.config.lock_timeout())?
            .ok_or_else(|| {
                VideoSourceError::Lock("Time out waiting to lock camera opening.".to_string())
            })?;

        let converter = self.platform.create_converter(preview)?;
        if let Some(mut old) = self.converter.take() {
            old.release();
        }

        self.shared.recording().template = Some(RecorderSettings {
            path: PathBuf::new(),
            size: preview,
            bit_rate: self.config.bit_rate(),
            frame_rate: self.config.frame_rate(),
            orientation_hint: orientation_hint(
                camera.sensor_orientation,
                self.config.display_rotation(),
            ),
        });
        self.preview_size = Some(preview);
        let params = CameraParams::from_camera(&camera, preview);

        self.shared.cancel.store(false, Ordering::Release);
        self.shared.set_state(SourceState::Opening);

        let worker = Worker {
            platform: Arc::clone(&self.platform),
            shared: Arc::clone(&self.shared),
            listener: Arc::clone(&listener),
            camera_id: camera.id.clone(),
            preview,
            params,
            converter,
            permit: Some(permit),
        };
        let handle = thread::Builder::new()
            .name(self.config.thread_name().to_string())
            .spawn(move || worker.run());

        match handle {
            Ok(handle) => {
                self.thread_handle = Some(handle);
                self.listener = Some(listener);
                self.camera = Some(camera);
                Ok(())
            }
            Err(e) => {
                // the worker, permit included, was dropped with the failed spawn
                self.shared.set_state(SourceState::Detached);
                Err(VideoSourceError::Device(format!(
                    "failed to start camera thread: {e}"
                )))
            }
        }
    }

    fn detach(&mut self) {
        if self.listener.is_none() && self.thread_handle.is_none() {
            return;
        }

        // wait out any open in flight before cancelling
        match self.shared.lock.acquire() {
            Ok(_permit) => {
                self.shared.cancel.store(true, Ordering::Release);
            }
            Err(e) => {
                log::error!("{}, cancelling anyway", e);
                self.shared.cancel.store(true, Ordering::Release);
            }
        }

        if let Some(handle) = self.thread_handle.take() {
            match handle.join() {
                Ok(converter) => self.converter = Some(converter),
                Err(_) => log::error!("camera thread panicked"),
            }
        }

        self.stop_video_recording();
        self.listener = None;
        self.shared.set_state(SourceState::Detached);
    }

    fn release(&mut self) -> Result<(), VideoSourceError> {
        if self.is_attached() {
            return Err(VideoSourceError::StillAttached);
        }
        if let Some(mut converter) = self.converter.take() {
            converter.release();
        }
        let mut recording = self.shared.recording();
        recording.template = None;
        recording.recorder.release();
        Ok(())
    }

    fn start_video_recording(&mut self) -> Result<(), VideoSourceError> {
        if self.listener.is_none() {
            return Err(VideoSourceError::NotAttached);
        }
        let mut recording = self.shared.recording();
        if recording.active {
            log::debug!("already recording");
            return Ok(());
        }
        recording.prepare()?;
        recording.begin()
    }

    fn stop_video_recording(&mut self) {
        let path = self.shared.recording().finish();
        if let (Some(path), Some(listener)) = (path, &self.listener) {
            listener.on_file_recorded(&path);
        }
    }
}

impl<P: Platform> Drop for CameraVideoSource<P> {
    fn drop(&mut self) {
        self.detach();
    }
}
