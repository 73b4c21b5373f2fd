use super::*;

fn config(fov: f64) -> ProjectionConfig {
    ProjectionConfig {
        field_of_view: fov,
        scale: 1.0,
        viewport: Viewport {
            width: 640,
            height: 480,
        },
    }
}

#[test]
fn zero_depth_offset_is_identity_plus_center() {
    for fov in [0.5, 1.0, 700.0, 12_345.0] {
        let p = perspective(Vec3::new(37.5, -12.0, 0.0), &config(fov));
        assert!((p.point.x - (37.5 + 320.0)).abs() < 1e-9);
        assert!((p.point.y - (-12.0 + 240.0)).abs() < 1e-9);
        assert_eq!(p.depth, fov);
        assert!(!p.clamped);
    }
}

#[test]
fn origin_lands_on_viewport_center() {
    let p = perspective(Vec3::ZERO, &config(700.0));
    assert_eq!(p.point, Point::new(320.0, 240.0));
    assert_eq!(p.depth, 700.0);
}

#[test]
fn farther_points_shrink_toward_center() {
    let near = perspective(Vec3::new(100.0, 0.0, 0.0), &config(700.0));
    let far = perspective(Vec3::new(100.0, 0.0, 700.0), &config(700.0));
    assert!((far.point.x - 320.0) < (near.point.x - 320.0));
    assert!((far.point.x - (320.0 + 50.0)).abs() < 1e-9);
}

#[test]
fn behind_camera_is_clamped_not_inverted() {
    let cfg = config(700.0);
    let p = perspective(Vec3::new(10.0, 10.0, -700.0), &cfg);
    assert!(p.clamped);
    assert_eq!(p.depth, min_depth(700.0));
    assert!(p.point.x.is_finite() && p.point.y.is_finite());
    // Sign is preserved: a point right of center stays right of center.
    assert!(p.point.x > 320.0);

    assert!(matches!(
        perspective_strict(Vec3::new(0.0, 0.0, -900.0), &cfg),
        Err(ArchimedesError::DegenerateProjection(_))
    ));
    assert!(perspective_strict(Vec3::new(0.0, 0.0, 10.0), &cfg).is_ok());
}

#[test]
fn small_fov_in_front_of_camera_is_not_clamped() {
    let cfg = config(0.5);
    let p = perspective(Vec3::new(10.0, 20.0, 0.0), &cfg);
    assert!(!p.clamped);
    assert!((p.point.x - 330.0).abs() < 1e-9);
    assert!((p.point.y - 260.0).abs() < 1e-9);
    assert!(perspective_strict(Vec3::new(10.0, 20.0, 0.0), &cfg).is_ok());

    // Just in front of the camera still projects; exactly at it is pinned.
    assert!(!perspective(Vec3::new(1.0, 0.0, -0.4), &cfg).clamped);
    let at_camera = perspective(Vec3::new(1.0, 0.0, -0.5), &cfg);
    assert!(at_camera.clamped);
    assert_eq!(at_camera.depth, min_depth(0.5));
}

#[test]
fn scale_multiplies_offsets() {
    let cfg = ProjectionConfig {
        scale: 2.0,
        ..config(700.0)
    };
    let p = perspective(Vec3::new(5.0, 0.0, 0.0), &cfg);
    assert!((p.point.x - 330.0).abs() < 1e-9);
}

#[test]
fn validate_rejects_bad_fov_and_viewport() {
    assert!(config(700.0).validate().is_ok());
    assert!(config(0.0).validate().is_err());
    assert!(config(-5.0).validate().is_err());
    assert!(config(f64::NAN).validate().is_err());
    let mut cfg = config(700.0);
    cfg.viewport.width = 0;
    assert!(cfg.validate().is_err());
}
