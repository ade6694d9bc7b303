//! CPU colour conversion into RGBA8888.
//!
//! All conversions use BT.601 coefficients:
//! - R = Y + 1.402 * (V - 128)
//! - G = Y - 0.344 * (U - 128) - 0.714 * (V - 128)
//! - B = Y + 1.772 * (U - 128)

use vision_base::Size;

use crate::platform::{FrameConverter, PixelFormat, RawFrame};
use crate::VideoSourceError;

#[inline]
fn yuv_to_rgba(y: u8, u: u8, v: u8, out: &mut [u8]) {
    let y = y as f32;
    let u = u as f32 - 128.0;
    let v = v as f32 - 128.0;
    out[0] = (y + 1.402 * v).clamp(0.0, 255.0) as u8;
    out[1] = (y - 0.344 * u - 0.714 * v).clamp(0.0, 255.0) as u8;
    out[2] = (y + 1.772 * u).clamp(0.0, 255.0) as u8;
    out[3] = 255;
}

fn check_lengths(
    name: &str,
    data: &[u8],
    expected: usize,
    rgba: &[u8],
    size: Size,
) -> Result<(), VideoSourceError> {
    if data.len() < expected {
        return Err(VideoSourceError::Convert(format!(
            "{name} frame {size} needs {expected} bytes, got {}",
            data.len()
        )));
    }
    if rgba.len() != size.rgba_len() {
        return Err(VideoSourceError::Convert(format!(
            "RGBA buffer for {size} needs {} bytes, got {}",
            size.rgba_len(),
            rgba.len()
        )));
    }
    Ok(())
}

/// Packed YUYV (4:2:2) to RGBA. Each pair of pixels shares U and V.
pub fn yuyv_to_rgba(data: &[u8], size: Size, rgba: &mut [u8]) -> Result<(), VideoSourceError> {
    // a macropixel carries two luma samples
    if size.width % 2 != 0 {
        return Err(VideoSourceError::Convert(format!(
            "YUYV frame {size} has an odd width"
        )));
    }
    let expected = size.width as usize * size.height as usize * 2;
    check_lengths("YUYV", data, expected, rgba, size)?;

    for (chunk, out) in data[..expected]
        .chunks_exact(4)
        .zip(rgba.chunks_exact_mut(8))
    {
        let (y0, u, y1, v) = (chunk[0], chunk[1], chunk[2], chunk[3]);
        yuv_to_rgba(y0, u, v, &mut out[..4]);
        yuv_to_rgba(y1, u, v, &mut out[4..]);
    }
    Ok(())
}

fn chroma_size(size: Size) -> (usize, usize) {
    (
        (size.width as usize).div_ceil(2),
        (size.height as usize).div_ceil(2),
    )
}

/// Planar I420 (4:2:0) to RGBA: full Y plane, then quarter-size U and V planes.
pub fn i420_to_rgba(data: &[u8], size: Size, rgba: &mut [u8]) -> Result<(), VideoSourceError> {
    let width = size.width as usize;
    let height = size.height as usize;
    let (cw, ch) = chroma_size(size);
    let luma_len = width * height;
    let expected = luma_len + 2 * cw * ch;
    check_lengths("I420", data, expected, rgba, size)?;

    let (luma, chroma) = data.split_at(luma_len);
    let (u_plane, v_plane) = chroma.split_at(cw * ch);

    for row in 0..height {
        for col in 0..width {
            let c = (row / 2) * cw + col / 2;
            let i = row * width + col;
            yuv_to_rgba(luma[i], u_plane[c], v_plane[c], &mut rgba[i * 4..i * 4 + 4]);
        }
    }
    Ok(())
}

/// Semi-planar NV12 (4:2:0) to RGBA: full Y plane, then interleaved UV.
pub fn nv12_to_rgba(data: &[u8], size: Size, rgba: &mut [u8]) -> Result<(), VideoSourceError> {
    let width = size.width as usize;
    let height = size.height as usize;
    let (cw, ch) = chroma_size(size);
    let luma_len = width * height;
    let expected = luma_len + 2 * cw * ch;
    check_lengths("NV12", data, expected, rgba, size)?;

    let (luma, uv) = data.split_at(luma_len);

    for row in 0..height {
        for col in 0..width {
            let c = ((row / 2) * cw + col / 2) * 2;
            let i = row * width + col;
            yuv_to_rgba(luma[i], uv[c], uv[c + 1], &mut rgba[i * 4..i * 4 + 4]);
        }
    }
    Ok(())
}

/// Converts on the CPU, for hosts without a conversion service.
#[derive(Debug)]
pub struct CpuConverter {
    size: Size,
}

impl CpuConverter {
    pub fn new(size: Size) -> Self {
        Self { size }
    }
}

impl FrameConverter for CpuConverter {
    fn convert(&mut self, frame: &RawFrame<'_>, rgba: &mut [u8]) -> Result<(), VideoSourceError> {
        if frame.size != self.size {
            return Err(VideoSourceError::Convert(format!(
                "frame is {}, converter expects {}",
                frame.size, self.size
            )));
        }
        match frame.format {
            PixelFormat::Yuyv => yuyv_to_rgba(frame.data, frame.size, rgba),
            PixelFormat::I420 => i420_to_rgba(frame.data, frame.size, rgba),
            PixelFormat::Nv12 => nv12_to_rgba(frame.data, frame.size, rgba),
            PixelFormat::Rgba => {
                let len = self.size.rgba_len();
                check_lengths("RGBA", frame.data, len, rgba, self.size)?;
                rgba.copy_from_slice(&frame.data[..len]);
                Ok(())
            }
        }
    }
}
