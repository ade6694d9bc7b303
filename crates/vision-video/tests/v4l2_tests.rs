#[cfg(feature = "v4l2")]
mod v4l2_tests {
    use vision_video::{Platform, V4l2Platform, VideoSourceError};

    #[test]
    fn test_open_missing_device() {
        let platform = V4l2Platform::new();
        match platform.open_camera("/dev/nonexistent_camera") {
            Err(VideoSourceError::Device(msg)) => assert!(msg.contains("/dev/nonexistent_camera")),
            Err(other) => panic!("Expected VideoSourceError::Device, got {:?}", other),
            Ok(_) => panic!("Expected opening a missing device to fail"),
        }
    }

    #[test]
    fn test_enumeration_reports_external_cameras() {
        // hosts without cameras simply report none
        let cameras = V4l2Platform::new().cameras().unwrap();
        assert!(cameras
            .iter()
            .all(|c| c.facing == vision_video::LensFacing::External));
    }
}
