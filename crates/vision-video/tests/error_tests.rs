use std::error::Error;
use std::io;

use vision_video::VideoSourceError;

#[test]
fn test_from_io_error() {
    let err: VideoSourceError = io::Error::new(io::ErrorKind::PermissionDenied, "buffers").into();
    match &err {
        VideoSourceError::Io(inner) => assert_eq!(inner.kind(), io::ErrorKind::PermissionDenied),
        other => panic!("Expected VideoSourceError::Io, got {:?}", other),
    }
    assert!(err.source().is_some());
}

#[test]
fn test_from_image_error() {
    let image_err = image::ImageError::IoError(io::Error::other("disk full"));
    let err: VideoSourceError = image_err.into();
    assert!(matches!(err, VideoSourceError::Recorder(msg) if msg.contains("disk full")));
}

#[test]
fn test_error_display() {
    assert!(VideoSourceError::Device("camera in use".to_string())
        .to_string()
        .contains("camera in use"));
    assert!(VideoSourceError::Lock("Time out waiting to lock camera opening.".to_string())
        .to_string()
        .starts_with("lock error"));
    assert_eq!(
        VideoSourceError::NotAttached.to_string(),
        "video source is not attached"
    );
    assert!(VideoSourceError::NoCamera.source().is_none());
}
