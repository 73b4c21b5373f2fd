use super::*;
use crate::{
    foundation::core::Viewport,
    geometry::{params::SpiralParameters, sampler::sample},
    project::gradient::LIGHT_TARGET,
};

fn config() -> ProjectionConfig {
    ProjectionConfig {
        field_of_view: 700.0,
        scale: 1.0,
        viewport: Viewport {
            width: 800,
            height: 600,
        },
    }
}

fn spiral() -> SampleSet {
    sample(&SpiralParameters {
        turns: 4,
        angular_step: 0.05,
        ..SpiralParameters::default()
    })
    .unwrap()
}

#[test]
fn empty_set_projects_to_empty_frame() {
    for mode in [RenderMode::Flat, RenderMode::Perspective] {
        let frame = project_frame(
            &SampleSet::empty(),
            &ViewState::default(),
            &config(),
            mode,
            &StyleConfig::default(),
        )
        .unwrap();
        assert!(frame.is_empty());
        assert!(frame.ensure_nondegenerate().is_ok());
    }
}

#[test]
fn origin_projects_to_center_in_3d() {
    let set = spiral();
    let frame = project_frame(
        &set,
        &ViewState::default(),
        &config(),
        RenderMode::Perspective,
        &StyleConfig::default(),
    )
    .unwrap();
    assert_eq!(frame.len(), set.len());
    assert_eq!(frame.points[0].point, Point::new(400.0, 300.0));
}

#[test]
fn flat_mode_rotation_preserves_distance_from_center() {
    let set = spiral();
    let view = ViewState {
        angle_2d: 1.234,
        ..ViewState::default()
    };
    let frame = project_frame(
        &set,
        &view,
        &config(),
        RenderMode::Flat,
        &StyleConfig::default(),
    )
    .unwrap();
    let c = Point::new(400.0, 300.0);
    for (s, p) in set.iter().zip(&frame.points) {
        let d = (p.point - c).hypot();
        assert!((d - s.radius_2d()).abs() < 1e-9);
    }
}

#[test]
fn flat_mode_without_rotation_translates_only() {
    let set = spiral();
    let frame = project_frame(
        &set,
        &ViewState::default(),
        &config(),
        RenderMode::Flat,
        &StyleConfig::default(),
    )
    .unwrap();
    let s = set.samples()[17];
    let p = frame.points[17].point;
    assert!((p.x - (s.x + 400.0)).abs() < 1e-9);
    assert!((p.y - (s.y + 300.0)).abs() < 1e-9);
}

#[test]
fn no_gradient_uses_base_color_everywhere() {
    let style = StyleConfig::default();
    let frame = project_frame(
        &spiral(),
        &ViewState::default(),
        &config(),
        RenderMode::Flat,
        &style,
    )
    .unwrap();
    assert!(frame.points.iter().all(|p| p.color == style.color));
}

#[test]
fn angle_gradient_starts_at_base_and_never_hits_target() {
    let style = StyleConfig {
        color: Rgb8::new(0, 0, 0),
        gradient: GradientMode::Angle,
        ..StyleConfig::default()
    };
    let frame = project_frame(
        &spiral(),
        &ViewState::default(),
        &config(),
        RenderMode::Flat,
        &style,
    )
    .unwrap();
    assert_eq!(frame.points[0].color, style.color);
    let last = frame.points.last().unwrap().color;
    assert_ne!(last, LIGHT_TARGET);
    assert!(last.r > 0 && last.r < LIGHT_TARGET.r);
}

#[test]
fn radius_gradient_brightens_outward() {
    let style = StyleConfig {
        color: Rgb8::new(10, 20, 30),
        gradient: GradientMode::Radius,
        ..StyleConfig::default()
    };
    let frame = project_frame(
        &spiral(),
        &ViewState::default(),
        &config(),
        RenderMode::Perspective,
        &style,
    )
    .unwrap();
    let first = frame.points.first().unwrap().color;
    let last = frame.points.last().unwrap().color;
    assert_eq!(first, style.color);
    assert!(last.r > first.r && last.g > first.g && last.b > first.b);
}

#[test]
fn depth_gradient_is_inert_in_flat_mode() {
    let style = StyleConfig {
        gradient: GradientMode::Depth,
        ..StyleConfig::default()
    };
    let frame = project_frame(
        &spiral(),
        &ViewState::default(),
        &config(),
        RenderMode::Flat,
        &style,
    )
    .unwrap();
    assert!(frame.points.iter().all(|p| p.color == style.color));

    let frame3d = project_frame(
        &spiral(),
        &ViewState::default(),
        &config(),
        RenderMode::Perspective,
        &style,
    )
    .unwrap();
    // Depth at the origin is fov, so f = 0.5 there.
    assert_eq!(
        frame3d.points[0].color,
        mix_toward_light(style.color, 0.5)
    );
}

#[test]
fn points_behind_camera_are_counted() {
    let set = sample(&SpiralParameters {
        turns: 3,
        z_per_turn: -600.0,
        angular_step: 0.05,
        ..SpiralParameters::default()
    })
    .unwrap();
    let frame = project_frame(
        &set,
        &ViewState::default(),
        &config(),
        RenderMode::Perspective,
        &StyleConfig::default(),
    )
    .unwrap();
    assert!(frame.clamped_points > 0);
    assert!(frame.points.iter().all(|p| p.point.x.is_finite()));
    assert!(matches!(
        frame.ensure_nondegenerate(),
        Err(ArchimedesError::DegenerateProjection(_))
    ));
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = ProjectionConfig {
        field_of_view: 0.0,
        ..config()
    };
    assert!(
        project_frame(
            &spiral(),
            &ViewState::default(),
            &cfg,
            RenderMode::Perspective,
            &StyleConfig::default(),
        )
        .is_err()
    );
}

#[test]
fn render_mode_serde_uses_2d_3d() {
    assert_eq!(serde_json::to_string(&RenderMode::Flat).unwrap(), "\"2d\"");
    assert_eq!(
        serde_json::from_str::<RenderMode>("\"3d\"").unwrap(),
        RenderMode::Perspective
    );
    assert_eq!("3D".parse::<RenderMode>().unwrap(), RenderMode::Perspective);
}
