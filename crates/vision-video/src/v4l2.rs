use v4l::buffer::Type;
use v4l::framesize::FrameSizeEnum;
use v4l::io::mmap::Stream as MmapStream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, Format, FourCC};

use vision_base::Size;

use crate::platform::{
    CameraDevice, CameraInfo, FrameConverter, LensFacing, PixelFormat, Platform, RawFrame,
    Recorder,
};
use crate::{CpuConverter, MjpegRecorder, VideoSourceError};

const YUYV: &[u8; 4] = b"YUYV";

// number of mmap buffers queued with the driver
const BUFFER_COUNT: u32 = 4;

/// V4L2 cameras, converted on the CPU and recorded as MJPEG.
///
/// Every `/dev/video*` node that streams YUYV is reported as an external camera.
#[derive(Debug, Default)]
pub struct V4l2Platform;

impl V4l2Platform {
    pub fn new() -> Self {
        Self
    }
}

fn yuyv_sizes(device: &Device) -> Result<Vec<Size>, VideoSourceError> {
    let mut sizes = Vec::new();
    for framesize in Capture::enum_framesizes(device, FourCC::new(YUYV))? {
        match framesize.size {
            FrameSizeEnum::Discrete(discrete) => {
                sizes.push(Size::new(discrete.width, discrete.height));
            }
            FrameSizeEnum::Stepwise(stepwise) => {
                sizes.push(Size::new(stepwise.max_width, stepwise.max_height));
                sizes.push(Size::new(stepwise.min_width, stepwise.min_height));
            }
        }
    }
    Ok(sizes)
}

impl Platform for V4l2Platform {
    fn cameras(&self) -> Result<Vec<CameraInfo>, VideoSourceError> {
        let mut cameras = Vec::new();
        for node in v4l::context::enum_devices() {
            let id = node.path().to_string_lossy().to_string();
            let device = match Device::with_path(node.path()) {
                Ok(device) => device,
                Err(e) => {
                    log::debug!("skipping {}: {}", id, e);
                    continue;
                }
            };
            let output_sizes = match yuyv_sizes(&device) {
                Ok(sizes) => sizes,
                Err(e) => {
                    log::debug!("skipping {}: {}", id, e);
                    continue;
                }
            };
            cameras.push(CameraInfo {
                id,
                facing: LensFacing::External,
                output_sizes,
                sensor_orientation: 0,
                focal_lengths: Vec::new(),
                sensor_size: None,
            });
        }
        cameras.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(cameras)
    }

    fn open_camera(&self, id: &str) -> Result<Box<dyn CameraDevice>, VideoSourceError> {
        let device = Device::with_path(id)
            .map_err(|e| VideoSourceError::Device(format!("{id}: {e}")))?;
        Ok(Box::new(V4l2Device {
            id: id.to_string(),
            device: Some(device),
            stream: None,
            size: Size::default(),
        }))
    }

    fn create_converter(&self, size: Size) -> Result<Box<dyn FrameConverter>, VideoSourceError> {
        Ok(Box::new(CpuConverter::new(size)))
    }

    fn create_recorder(&self) -> Result<Box<dyn Recorder>, VideoSourceError> {
        Ok(Box::new(MjpegRecorder::new()))
    }
}

/// An opened V4L2 capture device.
pub struct V4l2Device {
    id: String,
    device: Option<Device>,
    stream: Option<MmapStream<'static>>,
    size: Size,
}

impl std::fmt::Debug for V4l2Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Device")
            .field("id", &self.id)
            .field("device", &self.device.is_some())
            .field("stream", &self.stream.is_some())
            .field("size", &self.size)
            .finish()
    }
}

impl CameraDevice for V4l2Device {
    fn id(&self) -> &str {
        &self.id
    }

    fn start_preview(&mut self, size: Size) -> Result<(), VideoSourceError> {
        let device = self
            .device
            .as_ref()
            .ok_or_else(|| VideoSourceError::Session(format!("{} is closed", self.id)))?;

        let actual = Capture::set_format(
            device,
            &Format::new(size.width, size.height, FourCC::new(YUYV)),
        )?;
        if actual.fourcc != FourCC::new(YUYV) {
            return Err(VideoSourceError::Session(format!(
                "{} refused YUYV, offered {}",
                self.id, actual.fourcc
            )));
        }
        let actual_size = Size::new(actual.width, actual.height);
        if actual_size != size {
            return Err(VideoSourceError::Session(format!(
                "{} adjusted {} to {}",
                self.id, size, actual_size
            )));
        }

        let stream = MmapStream::with_buffers(device, Type::VideoCapture, BUFFER_COUNT)
            .map_err(|e| VideoSourceError::Session(e.to_string()))?;
        self.stream = Some(stream);
        self.size = size;
        Ok(())
    }

    fn next_frame(&mut self) -> Result<RawFrame<'_>, VideoSourceError> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| VideoSourceError::Device("preview not started".to_string()))?;
        let (data, metadata) = CaptureStream::next(stream)
            .map_err(|e| VideoSourceError::Device(e.to_string()))?;
        let used = (metadata.bytesused as usize).min(data.len());
        Ok(RawFrame {
            format: PixelFormat::Yuyv,
            size: self.size,
            data: &data[..used],
        })
    }

    fn close(&mut self) {
        self.stream.take();
        self.device.take();
    }
}
