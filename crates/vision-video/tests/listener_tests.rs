use std::path::{Path, PathBuf};

use vision_video::{CameraParams, ChannelListener, SourceEvent, VideoSourceListener};

fn params() -> CameraParams {
    CameraParams {
        width: 640,
        height: 480,
        focal_length: 4.0,
        sensor_width: 6.4,
        sensor_height: 4.8,
        focal_in_pixels: 400.0,
    }
}

#[tokio::test]
async fn test_events_forwarded_in_order() {
    let (listener, mut events) = ChannelListener::new(8);
    listener.on_new_camera_params(&params());
    listener.on_new_frame(&[1, 2, 3, 4]);
    listener.on_file_recorded(Path::new("/tmp/video1.mp4"));

    assert!(matches!(events.recv().await, Some(SourceEvent::CameraParams(p)) if p == params()));
    match events.recv().await {
        Some(SourceEvent::Frame(rgba)) => assert_eq!(rgba, vec![1, 2, 3, 4]),
        other => panic!("Expected SourceEvent::Frame, got {:?}", other),
    }
    match events.recv().await {
        Some(SourceEvent::FileRecorded(path)) => assert_eq!(path, PathBuf::from("/tmp/video1.mp4")),
        other => panic!("Expected SourceEvent::FileRecorded, got {:?}", other),
    }
}

#[tokio::test]
async fn test_full_channel_drops_instead_of_blocking() {
    let (listener, mut events) = ChannelListener::new(2);
    for value in 0..5u8 {
        listener.on_new_frame(&[value]);
    }
    assert_eq!(listener.dropped(), 3);

    assert!(matches!(events.recv().await, Some(SourceEvent::Frame(f)) if f == vec![0]));
    assert!(matches!(events.recv().await, Some(SourceEvent::Frame(f)) if f == vec![1]));
    assert!(events.try_recv().is_none());
}

#[tokio::test]
async fn test_receiver_ends_when_listener_dropped() {
    let (listener, mut events) = ChannelListener::new(1);
    drop(listener);
    assert!(events.recv().await.is_none());
}

#[test]
fn test_closed_receiver_does_not_panic() {
    let (listener, events) = ChannelListener::new(1);
    drop(events);
    listener.on_new_frame(&[0]);
    listener.on_file_recorded(Path::new("video2.mp4"));
}
