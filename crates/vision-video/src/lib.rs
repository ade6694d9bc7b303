//! Camera video source for the vision pipeline.
//!
//! `CameraVideoSource` sequences a platform camera, a colour converter and a
//! recorder behind the `VideoSource` trait. The host services themselves sit
//! behind the traits in [`platform`]; the crate only owns resolution
//! selection, buffer file rotation and the open/close lifecycle.

pub mod config;
pub mod convert;
pub mod error;
pub mod listener;
pub mod lock;
pub mod orientation;
pub mod params;
pub mod platform;
pub mod recorder;
pub mod resolution;
pub mod rotator;
pub mod source;
pub mod traits;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use config::CameraSourceConfig;
pub use convert::CpuConverter;
pub use error::VideoSourceError;
pub use listener::{ChannelListener, EventReceiver, SourceEvent};
pub use lock::{OpenCloseLock, OpenClosePermit};
pub use orientation::Rotation;
pub use params::CameraParams;
pub use platform::{
    CameraDevice, CameraInfo, FrameConverter, LensFacing, PixelFormat, Platform, RawFrame,
    Recorder, RecorderSettings,
};
pub use recorder::MjpegRecorder;
pub use resolution::choose_optimal_resolution;
pub use rotator::BufferRotator;
pub use source::{CameraVideoSource, SourceState};
pub use traits::{VideoSource, VideoSourceListener};

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Platform;

pub use vision_base::Size;
