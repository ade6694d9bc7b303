use vision_video::orientation::orientation_hint;
use vision_video::{CameraInfo, CameraParams, LensFacing, Rotation, Size};

fn info(focal_lengths: Vec<f32>, sensor_size: Option<(f32, f32)>) -> CameraInfo {
    CameraInfo {
        id: "0".to_string(),
        facing: LensFacing::Back,
        output_sizes: vec![Size::new(1280, 720)],
        sensor_orientation: 90,
        focal_lengths,
        sensor_size,
    }
}

#[test]
fn test_params_from_camera() {
    let params = CameraParams::from_camera(&info(vec![4.25, 6.0], Some((5.6, 4.2))), Size::new(1280, 720));
    assert_eq!(params.width, 1280);
    assert_eq!(params.height, 720);
    assert_eq!(params.focal_length, 4.25);
    assert_eq!((params.sensor_width, params.sensor_height), (5.6, 4.2));
    assert!((params.focal_in_pixels - 4.25 * 1280.0 / 5.6).abs() < 1e-3);
}

#[test]
fn test_params_without_optics() {
    let params = CameraParams::from_camera(&info(vec![], None), Size::new(640, 480));
    assert_eq!(params.focal_length, 0.0);
    assert_eq!(params.sensor_width, 0.0);
    assert_eq!(params.focal_in_pixels, 0.0);
}

#[test]
fn test_orientation_hint_default_sensor() {
    assert_eq!(orientation_hint(90, Rotation::Deg0), Some(90));
    assert_eq!(orientation_hint(90, Rotation::Deg90), Some(0));
    assert_eq!(orientation_hint(90, Rotation::Deg180), Some(270));
    assert_eq!(orientation_hint(90, Rotation::Deg270), Some(180));
}

#[test]
fn test_orientation_hint_inverse_sensor() {
    assert_eq!(orientation_hint(270, Rotation::Deg0), Some(270));
    assert_eq!(orientation_hint(270, Rotation::Deg90), Some(180));
    assert_eq!(orientation_hint(270, Rotation::Deg180), Some(90));
    assert_eq!(orientation_hint(270, Rotation::Deg270), Some(0));
}

#[test]
fn test_orientation_hint_other_sensor() {
    assert_eq!(orientation_hint(0, Rotation::Deg0), None);
    assert_eq!(orientation_hint(180, Rotation::Deg90), None);
}
