use crate::{
    animation::driver::{AnimationConfig, AnimationDriver},
    foundation::error::ArchimedesResult,
    geometry::params::SpiralParameters,
    geometry::sampler::{SampleSet, sample},
    project::frame::{ProjectedFrame, RenderMode, StyleConfig, project_frame},
    project::projection::ProjectionConfig,
    render::surface::{DrawSurface, draw_frame},
    scene::Scene,
};

/// Live state behind an interactive spiral view.
///
/// Geometry-affecting changes re-sample immediately; a rejected change leaves the
/// previous parameters and sample set in place so rendering carries on.
#[derive(Clone, Debug)]
pub struct SpiralSession {
    scene: Scene,
    samples: SampleSet,
    driver: AnimationDriver,
}

impl SpiralSession {
    pub fn new(scene: Scene) -> ArchimedesResult<Self> {
        scene.validate()?;
        let samples = sample(&scene.params)?;
        let driver = AnimationDriver::new(scene.animation)?;
        Ok(Self {
            scene,
            samples,
            driver,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn samples(&self) -> &SampleSet {
        &self.samples
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    /// Re-sample with new parameters. On error the previous state is kept.
    pub fn set_parameters(&mut self, params: SpiralParameters) -> ArchimedesResult<&SampleSet> {
        match sample(&params) {
            Ok(samples) => {
                self.scene.params = params;
                self.samples = samples;
                Ok(&self.samples)
            }
            Err(err) => {
                tracing::warn!(%err, "rejected spiral parameters; keeping previous samples");
                Err(err)
            }
        }
    }

    pub fn set_style(&mut self, style: StyleConfig) -> ArchimedesResult<()> {
        style.validate()?;
        self.scene.style = style;
        Ok(())
    }

    pub fn set_projection(&mut self, projection: ProjectionConfig) -> ArchimedesResult<()> {
        projection.validate()?;
        self.scene.projection = projection;
        Ok(())
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        self.scene.mode = mode;
    }

    pub fn set_animation(&mut self, animation: AnimationConfig) -> ArchimedesResult<()> {
        self.driver.set_config(animation)?;
        self.scene.animation = animation;
        Ok(())
    }

    /// Replace the whole scene (e.g. when a preset is applied).
    pub fn apply_scene(&mut self, scene: Scene) -> ArchimedesResult<()> {
        scene.validate()?;
        let samples = sample(&scene.params)?;
        self.driver.set_config(scene.animation)?;
        self.driver.restart();
        self.samples = samples;
        self.scene = scene;
        Ok(())
    }

    pub fn tick(&mut self, dt_secs: f64) -> ArchimedesResult<()> {
        self.driver.tick(dt_secs)
    }

    pub fn project(&self) -> ArchimedesResult<ProjectedFrame> {
        project_frame(
            &self.samples,
            &self.driver.view(),
            &self.scene.projection,
            self.scene.mode,
            &self.scene.style,
        )
    }

    /// Project the current state and paint it onto `surface`.
    pub fn render_to<S: DrawSurface + ?Sized>(&self, surface: &mut S) -> ArchimedesResult<()> {
        let frame = self.project()?;
        draw_frame(surface, &frame, &self.scene.style)
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
