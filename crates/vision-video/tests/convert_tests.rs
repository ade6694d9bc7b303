use vision_video::convert::{i420_to_rgba, nv12_to_rgba, yuyv_to_rgba};
use vision_video::{CpuConverter, FrameConverter, PixelFormat, RawFrame, Size, VideoSourceError};

#[test]
fn test_yuyv_grey_pixels() {
    // neutral chroma keeps Y as grey
    let data = [100u8, 128, 200, 128];
    let mut rgba = [0u8; 8];
    yuyv_to_rgba(&data, Size::new(2, 1), &mut rgba).unwrap();
    assert_eq!(rgba, [100, 100, 100, 255, 200, 200, 200, 255]);
}

#[test]
fn test_yuyv_red_bias() {
    // high V pushes red up and green down
    let data = [128u8, 128, 128, 255];
    let mut rgba = [0u8; 8];
    yuyv_to_rgba(&data, Size::new(2, 1), &mut rgba).unwrap();
    assert_eq!(rgba[0], 255);
    assert!(rgba[1] < 128);
    assert_eq!(rgba[2], 128);
    assert_eq!(rgba[3], 255);
}

#[test]
fn test_yuyv_short_input_rejected() {
    let mut rgba = [0u8; 16];
    let result = yuyv_to_rgba(&[0u8; 4], Size::new(2, 2), &mut rgba);
    assert!(matches!(result, Err(VideoSourceError::Convert(_))));
}

#[test]
fn test_yuyv_odd_width_rejected() {
    // 3x1 would leave the last pixel unconverted
    let mut rgba = [7u8; 12];
    let result = yuyv_to_rgba(&[128u8; 8], Size::new(3, 1), &mut rgba);
    assert!(matches!(result, Err(VideoSourceError::Convert(_))));
    assert_eq!(rgba, [7u8; 12]);
}

#[test]
fn test_wrong_output_buffer_rejected() {
    let mut rgba = [0u8; 7];
    let result = yuyv_to_rgba(&[0u8; 4], Size::new(2, 1), &mut rgba);
    assert!(matches!(result, Err(VideoSourceError::Convert(_))));
}

#[test]
fn test_i420_chroma_shared_by_block() {
    // 2x2 luma, one U and one V sample
    let data = [10u8, 20, 30, 40, 128, 128];
    let mut rgba = [0u8; 16];
    i420_to_rgba(&data, Size::new(2, 2), &mut rgba).unwrap();
    let greys: Vec<u8> = rgba.chunks_exact(4).map(|p| p[0]).collect();
    assert_eq!(greys, vec![10, 20, 30, 40]);
    assert!(rgba.chunks_exact(4).all(|p| p[0] == p[1] && p[1] == p[2] && p[3] == 255));
}

#[test]
fn test_i420_and_nv12_agree() {
    let size = Size::new(4, 2);
    let luma: Vec<u8> = (0..8).map(|i| 40 + i * 20).collect();
    let (u, v) = ([90u8, 160], [200u8, 60]);

    let mut i420 = luma.clone();
    i420.extend_from_slice(&u);
    i420.extend_from_slice(&v);

    let mut nv12 = luma.clone();
    nv12.extend_from_slice(&[u[0], v[0], u[1], v[1]]);

    let mut from_i420 = vec![0u8; size.rgba_len()];
    let mut from_nv12 = vec![0u8; size.rgba_len()];
    i420_to_rgba(&i420, size, &mut from_i420).unwrap();
    nv12_to_rgba(&nv12, size, &mut from_nv12).unwrap();
    assert_eq!(from_i420, from_nv12);
}

#[test]
fn test_odd_dimensions_round_chroma_up() {
    let size = Size::new(3, 3);
    // 9 luma + 2x2 U + 2x2 V
    let data = vec![128u8; 9 + 4 + 4];
    let mut rgba = vec![0u8; size.rgba_len()];
    i420_to_rgba(&data, size, &mut rgba).unwrap();
    assert!(rgba.chunks_exact(4).all(|p| p == [128, 128, 128, 255]));
}

#[test]
fn test_cpu_converter_passes_rgba_through() {
    let size = Size::new(2, 1);
    let data = [1u8, 2, 3, 4, 5, 6, 7, 8];
    let frame = RawFrame {
        format: PixelFormat::Rgba,
        size,
        data: &data,
    };
    let mut rgba = [0u8; 8];
    CpuConverter::new(size).convert(&frame, &mut rgba).unwrap();
    assert_eq!(rgba, data);
}

#[test]
fn test_cpu_converter_rejects_other_sizes() {
    let data = [0u8; 8];
    let frame = RawFrame {
        format: PixelFormat::Yuyv,
        size: Size::new(2, 2),
        data: &data,
    };
    let mut rgba = [0u8; 16];
    let result = CpuConverter::new(Size::new(4, 1)).convert(&frame, &mut rgba);
    assert!(matches!(result, Err(VideoSourceError::Convert(_))));
}
