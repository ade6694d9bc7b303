use vision_base::Size;

#[test]
fn test_area_does_not_overflow() {
    let size = Size::new(u32::MAX, 2);
    assert_eq!(size.area(), u32::MAX as u64 * 2);
}

#[test]
fn test_min_dimension() {
    assert_eq!(Size::new(1920, 1080).min_dimension(), 1080);
    assert_eq!(Size::new(480, 640).min_dimension(), 480);
}

#[test]
fn test_rgba_len() {
    assert_eq!(Size::new(4, 3).rgba_len(), 48);
    assert_eq!(Size::default().rgba_len(), 0);
}

#[test]
fn test_display() {
    assert_eq!(Size::new(1280, 720).to_string(), "1280x720");
}
