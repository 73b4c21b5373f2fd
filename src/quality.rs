use std::time::{Duration, Instant};

use crate::{
    animation::driver::AnimationDriver,
    foundation::error::{ArchimedesError, ArchimedesResult},
    geometry::params::QualityTier,
    geometry::sampler::sample,
    project::frame::project_frame,
    render::cpu::CpuSurface,
    render::surface::draw_frame,
    scene::Scene,
};

/// Outcome of [`probe_quality`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct QualityProbe {
    pub frames: u64,
    pub elapsed_secs: f64,
    pub fps: f64,
    pub tier: QualityTier,
}

/// Render the scene's animation on the CPU for roughly `budget` and pick the tier
/// the measured frame rate supports.
///
/// The scene is sampled once at its own quality tier, the same way an interactive
/// session would. At least one frame is always rendered.
#[tracing::instrument(skip(scene))]
pub fn probe_quality(scene: &Scene, budget: Duration) -> ArchimedesResult<QualityProbe> {
    if budget.is_zero() {
        return Err(ArchimedesError::invalid_parameter(
            "quality probe duration must be > 0",
        ));
    }
    scene.validate()?;
    let samples = sample(&scene.params)?;
    let mut driver = AnimationDriver::new(scene.animation)?;
    let mut surface = CpuSurface::new(scene.projection.viewport, None)?;

    let start = Instant::now();
    let mut last = start;
    let mut frames = 0u64;
    loop {
        let frame = project_frame(
            &samples,
            &driver.view(),
            &scene.projection,
            scene.mode,
            &scene.style,
        )?;
        draw_frame(&mut surface, &frame, &scene.style)?;
        surface.finish()?;
        frames += 1;

        let now = Instant::now();
        driver.tick(now.duration_since(last).as_secs_f64())?;
        last = now;
        if now.duration_since(start) >= budget {
            break;
        }
    }

    let elapsed_secs = start.elapsed().as_secs_f64().max(f64::EPSILON);
    let fps = frames as f64 / elapsed_secs;
    let tier = QualityTier::from_fps(fps);
    tracing::info!(frames, fps, tier = tier.as_str(), "quality probe finished");
    Ok(QualityProbe {
        frames,
        elapsed_secs,
        fps,
        tier,
    })
}

#[cfg(test)]
#[path = "../tests/unit/quality.rs"]
mod tests;
