use std::fmt;

/// Width and height of an image or camera output, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel count, widened so large sensors cannot overflow.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// The smaller of the two dimensions.
    pub fn min_dimension(&self) -> u32 {
        self.width.min(self.height)
    }

    /// Bytes needed to hold one RGBA8888 image of this size.
    pub fn rgba_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
