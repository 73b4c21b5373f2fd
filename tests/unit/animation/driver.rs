use super::*;

#[test]
fn tick_accumulates_rotation_and_time() {
    let mut d = AnimationDriver::new(AnimationConfig::default()).unwrap();
    for _ in 0..10 {
        d.tick(0.1).unwrap();
    }
    assert!((d.elapsed_secs() - 1.0).abs() < 1e-12);
    assert!((d.rotation().rot_y - 20.0).abs() < 1e-9);
    assert_eq!(d.rotation().rot_x, 0.0);
    assert!((d.view().angle_2d - 0.6).abs() < 1e-12);
}

#[test]
fn paused_driver_holds_at_zero() {
    let cfg = AnimationConfig {
        animate: false,
        ..AnimationConfig::default()
    };
    let mut d = AnimationDriver::new(cfg).unwrap();
    d.tick(5.0).unwrap();
    assert_eq!(d.elapsed_secs(), 0.0);
    assert_eq!(d.view().rotation, RotationState::default());
    assert_eq!(d.view().angle_2d, 0.0);
}

#[test]
fn toggling_animation_restarts() {
    let mut d = AnimationDriver::at_time(AnimationConfig::default(), 3.0).unwrap();
    assert!(d.elapsed_secs() > 0.0);
    d.set_animate(false);
    assert_eq!(d.elapsed_secs(), 0.0);
    d.set_animate(true);
    d.tick(0.5).unwrap();
    assert!((d.rotation().rot_y - 10.0).abs() < 1e-9);
}

#[test]
fn set_config_keeps_rotation_unless_toggled() {
    let mut d = AnimationDriver::at_time(AnimationConfig::default(), 1.0).unwrap();
    d.set_config(AnimationConfig {
        speed_y: 90.0,
        z_offset_deg: 15.0,
        ..AnimationConfig::default()
    })
    .unwrap();
    assert!((d.rotation().rot_y - 20.0).abs() < 1e-9);
    assert_eq!(d.view().z_offset_deg, 15.0);
}

#[test]
fn rejects_bad_inputs() {
    let bad = AnimationConfig {
        speed_x: f64::NAN,
        ..AnimationConfig::default()
    };
    assert!(AnimationDriver::new(bad).is_err());

    let mut d = AnimationDriver::new(AnimationConfig::default()).unwrap();
    assert!(d.tick(-1.0).is_err());
    assert!(d.tick(f64::INFINITY).is_err());
}
