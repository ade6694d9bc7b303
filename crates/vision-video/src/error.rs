use std::fmt;

#[derive(Debug)]
pub enum VideoSourceError {
    /// Camera device could not be enumerated, opened or read.
    Device(String),
    /// Capture session could not be configured.
    Session(String),
    /// Raw frame could not be converted to RGBA.
    Convert(String),
    Recorder(String),
    /// Open/close lock timed out or was poisoned.
    Lock(String),
    Io(std::io::Error),
    NoCamera,
    NotAttached,
    AlreadyAttached,
    StillAttached,
}

impl fmt::Display for VideoSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoSourceError::Device(msg) => write!(f, "device error: {msg}"),
            VideoSourceError::Session(msg) => write!(f, "session error: {msg}"),
            VideoSourceError::Convert(msg) => write!(f, "convert error: {msg}"),
            VideoSourceError::Recorder(msg) => write!(f, "recorder error: {msg}"),
            VideoSourceError::Lock(msg) => write!(f, "lock error: {msg}"),
            VideoSourceError::Io(err) => write!(f, "io error: {err}"),
            VideoSourceError::NoCamera => write!(f, "no back-facing camera with output sizes found"),
            VideoSourceError::NotAttached => write!(f, "video source is not attached"),
            VideoSourceError::AlreadyAttached => write!(f, "video source is already attached"),
            VideoSourceError::StillAttached => write!(f, "video source must be detached before release"),
        }
    }
}

impl std::error::Error for VideoSourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VideoSourceError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VideoSourceError {
    fn from(err: std::io::Error) -> Self {
        VideoSourceError::Io(err)
    }
}

impl From<image::ImageError> for VideoSourceError {
    fn from(err: image::ImageError) -> Self {
        VideoSourceError::Recorder(err.to_string())
    }
}
