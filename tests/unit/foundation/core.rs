use super::*;

#[test]
fn hex_parses_with_and_without_hash() {
    assert_eq!(Rgb8::from_hex("#2dd4bf").unwrap(), Rgb8::new(0x2d, 0xd4, 0xbf));
    assert_eq!(Rgb8::from_hex("EAF1FF").unwrap(), Rgb8::new(234, 241, 255));
    assert!(Rgb8::from_hex("#12345").is_err());
    assert!(Rgb8::from_hex("#zz0000").is_err());
    assert!(Rgb8::from_hex("#ééé").is_err());
}

#[test]
fn rgb8_serializes_as_hex_string() {
    let c = Rgb8::new(45, 212, 191);
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(json, "\"#2dd4bf\"");
    let back: Rgb8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);
    assert!(serde_json::from_str::<Rgb8>("\"nope\"").is_err());
}

#[test]
fn viewport_rejects_zero_and_reports_center() {
    assert!(Viewport::new(0, 10).is_err());
    let v = Viewport::new(800, 600).unwrap();
    assert_eq!(v.center(), Point::new(400.0, 300.0));
}

#[test]
fn fps_frames_secs_roundtrip_floor() {
    let fps = Fps::new(30000, 1001).unwrap();
    let secs = fps.frames_to_secs(123);
    assert_eq!(fps.secs_to_frames_floor(secs), 123);
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}
