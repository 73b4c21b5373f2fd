use super::*;
use crate::{
    foundation::core::Viewport, geometry::params::QualityTier, project::gradient::GradientMode,
    render::svg::SvgSurface,
};

fn small_scene() -> Scene {
    let mut scene = Scene::default();
    scene.params.turns = 2;
    scene.projection.viewport = Viewport {
        width: 120,
        height: 90,
    };
    scene
}

#[test]
fn new_samples_the_scene() {
    let session = SpiralSession::new(small_scene()).unwrap();
    assert!(session.samples().len() > 1);
    assert_eq!(session.driver().elapsed_secs(), 0.0);
}

#[test]
fn rejected_parameters_keep_previous_samples() {
    let mut session = SpiralSession::new(small_scene()).unwrap();
    let before = session.samples().len();

    let mut bad = session.scene().params;
    bad.angular_step = 0.0;
    assert!(session.set_parameters(bad).is_err());
    assert_eq!(session.samples().len(), before);
    assert_eq!(session.scene().params.turns, 2);
}

#[test]
fn accepted_parameters_resample() {
    let mut session = SpiralSession::new(small_scene()).unwrap();
    let before = session.samples().len();

    let mut params = session.scene().params;
    params.turns = 4;
    params.quality = QualityTier::High;
    let after = session.set_parameters(params).unwrap().len();
    assert!(after > before);
    assert_eq!(session.scene().params.turns, 4);
}

#[test]
fn invalid_style_is_rejected_without_side_effects() {
    let mut session = SpiralSession::new(small_scene()).unwrap();
    let mut style = session.scene().style;
    style.line_width = f64::NAN;
    assert!(session.set_style(style).is_err());
    assert_eq!(session.scene().style.line_width, 2.0);

    style.line_width = 3.0;
    style.gradient = GradientMode::Radius;
    session.set_style(style).unwrap();
    assert_eq!(session.scene().style.gradient, GradientMode::Radius);
}

#[test]
fn tick_moves_the_view() {
    let mut session = SpiralSession::new(small_scene()).unwrap();
    let a = session.project().unwrap();
    session.tick(0.5).unwrap();
    let b = session.project().unwrap();
    assert_eq!(a.len(), b.len());
    assert_ne!(a.points[1].point, b.points[1].point);
    assert!(session.tick(-1.0).is_err());
}

#[test]
fn apply_scene_restarts_animation() {
    let mut session = SpiralSession::new(small_scene()).unwrap();
    session.tick(1.0).unwrap();

    let mut next = small_scene();
    next.mode = RenderMode::Perspective;
    next.params.turns = 3;
    session.apply_scene(next).unwrap();
    assert_eq!(session.scene().mode, RenderMode::Perspective);
    assert_eq!(session.driver().elapsed_secs(), 0.0);
}

#[test]
fn render_to_svg_surface_draws_the_spiral() {
    let session = SpiralSession::new(small_scene()).unwrap();
    let mut surface = SvgSurface::new(session.scene().projection.viewport, None);
    session.render_to(&mut surface).unwrap();
    assert!(surface.to_svg_string().contains("<polyline"));
}
