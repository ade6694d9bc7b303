use vision_base::Size;

use crate::platform::CameraInfo;

/// Camera intrinsics handed to the vision pipeline alongside frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams {
    pub width: u32,
    pub height: u32,
    /// Focal length in millimeters, 0 if the camera does not report one.
    pub focal_length: f32,
    /// Physical sensor size in millimeters, 0 if unknown.
    pub sensor_width: f32,
    pub sensor_height: f32,
    /// Focal length expressed in preview pixels, 0 if it cannot be derived.
    pub focal_in_pixels: f32,
}

impl CameraParams {
    pub fn from_camera(info: &CameraInfo, preview: Size) -> Self {
        let focal_length = info.focal_lengths.first().copied().unwrap_or(0.0);
        let (sensor_width, sensor_height) = info.sensor_size.unwrap_or((0.0, 0.0));
        let focal_in_pixels = if sensor_width > 0.0 {
            focal_length * preview.width as f32 / sensor_width
        } else {
            0.0
        };
        Self {
            width: preview.width,
            height: preview.height,
            focal_length,
            sensor_width,
            sensor_height,
            focal_in_pixels,
        }
    }
}
