use super::*;

fn cfg(width: u32, height: u32, fps: u32, format: VideoFormat) -> EncodeConfig {
    EncodeConfig {
        width,
        height,
        fps,
        format,
        out_path: PathBuf::from("target/out.mp4"),
        overwrite: true,
    }
}

#[test]
fn config_validation_catches_bad_values() {
    assert!(cfg(0, 10, 30, VideoFormat::Mp4).validate().is_err());
    assert!(cfg(11, 10, 30, VideoFormat::Mp4).validate().is_err());
    assert!(cfg(11, 10, 30, VideoFormat::Webm).validate().is_err());
    assert!(cfg(10, 10, 0, VideoFormat::Mp4).validate().is_err());
    assert!(cfg(10, 10, 30, VideoFormat::Mp4).validate().is_ok());
}

#[test]
fn gif_accepts_odd_dimensions() {
    assert!(cfg(11, 9, 12, VideoFormat::Gif).validate().is_ok());
}

#[test]
fn format_is_inferred_from_extension() {
    assert_eq!(
        VideoFormat::from_path(Path::new("a/b.MP4")).unwrap(),
        VideoFormat::Mp4
    );
    assert_eq!(
        VideoFormat::from_path(Path::new("clip.webm")).unwrap(),
        VideoFormat::Webm
    );
    assert_eq!(
        VideoFormat::from_path(Path::new("loop.gif")).unwrap(),
        VideoFormat::Gif
    );
    assert!(VideoFormat::from_path(Path::new("x.avi")).is_err());
    assert!(VideoFormat::from_path(Path::new("noext")).is_err());
}

#[test]
fn flatten_premul_over_black_produces_expected_rgb() {
    // Premultiplied red @ 50% alpha => rgb is 128,0,0 when premul.
    let src = vec![128u8, 0u8, 0u8, 128u8];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, vec![128u8, 0u8, 0u8, 255u8]);
}

#[test]
fn flatten_straight_over_black_produces_expected_rgb() {
    let src = vec![255u8, 0u8, 0u8, 128u8];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, false, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, vec![128u8, 0u8, 0u8, 255u8]);
}

#[test]
fn flatten_transparent_shows_background() {
    let src = vec![0u8; 8];
    let mut dst = vec![0u8; 8];
    flatten_to_opaque_rgba8(&mut dst, &src, true, [7, 8, 9, 255]).unwrap();
    assert_eq!(dst, vec![7, 8, 9, 255, 7, 8, 9, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 4];
    assert!(flatten_to_opaque_rgba8(&mut dst, &[0u8; 8], true, [0, 0, 0, 255]).is_err());
}
