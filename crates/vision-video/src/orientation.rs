/// Display rotation, in 90 degree steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

const SENSOR_ORIENTATION_DEFAULT_DEGREES: u32 = 90;
const SENSOR_ORIENTATION_INVERSE_DEGREES: u32 = 270;

/// Orientation hint (degrees) for the recorder, given how the sensor is
/// mounted and how the display is currently rotated.
///
/// Only sensors mounted at 90 or 270 degrees get a hint.
pub fn orientation_hint(sensor_orientation: u32, rotation: Rotation) -> Option<u32> {
    match sensor_orientation {
        SENSOR_ORIENTATION_DEFAULT_DEGREES => Some(match rotation {
            Rotation::Deg0 => 90,
            Rotation::Deg90 => 0,
            Rotation::Deg180 => 270,
            Rotation::Deg270 => 180,
        }),
        SENSOR_ORIENTATION_INVERSE_DEGREES => Some(match rotation {
            Rotation::Deg0 => 270,
            Rotation::Deg90 => 180,
            Rotation::Deg180 => 90,
            Rotation::Deg270 => 0,
        }),
        _ => None,
    }
}
