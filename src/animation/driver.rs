use crate::{
    foundation::error::{ArchimedesError, ArchimedesResult},
    project::frame::ViewState,
    project::rotation::RotationState,
};

/// Time-stepped animation settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub animate: bool,
    /// Per-axis 3D rotation speeds in degrees per second.
    pub speed_x: f64,
    pub speed_y: f64,
    pub speed_z: f64,
    /// Static Z rotation added on top of the animated one, in degrees.
    pub z_offset_deg: f64,
    /// Flat-mode spin in radians per second.
    pub angular_velocity_2d: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            animate: true,
            speed_x: 0.0,
            speed_y: 20.0,
            speed_z: 0.0,
            z_offset_deg: 0.0,
            angular_velocity_2d: 0.6,
        }
    }
}

impl AnimationConfig {
    pub fn validate(&self) -> ArchimedesResult<()> {
        for (name, v) in [
            ("speed_x", self.speed_x),
            ("speed_y", self.speed_y),
            ("speed_z", self.speed_z),
            ("z_offset_deg", self.z_offset_deg),
            ("angular_velocity_2d", self.angular_velocity_2d),
        ] {
            if !v.is_finite() {
                return Err(ArchimedesError::invalid_parameter(format!(
                    "{name} must be finite (got {v})"
                )));
            }
        }
        Ok(())
    }

    pub fn speeds(&self) -> [f64; 3] {
        [self.speed_x, self.speed_y, self.speed_z]
    }
}

/// Owns the rotation state and elapsed time between frames.
///
/// When animation is off the driver holds at `t = 0`, so every frame shows the
/// unrotated spiral.
#[derive(Clone, Debug, Default)]
pub struct AnimationDriver {
    config: AnimationConfig,
    rotation: RotationState,
    elapsed_secs: f64,
}

impl AnimationDriver {
    pub fn new(config: AnimationConfig) -> ArchimedesResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rotation: RotationState::default(),
            elapsed_secs: 0.0,
        })
    }

    /// Driver state after `secs` of continuous animation from a fresh start.
    pub fn at_time(config: AnimationConfig, secs: f64) -> ArchimedesResult<Self> {
        let mut d = Self::new(config)?;
        d.tick(secs)?;
        Ok(d)
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// Advance by `dt_secs`. No-op while animation is off.
    pub fn tick(&mut self, dt_secs: f64) -> ArchimedesResult<()> {
        if !dt_secs.is_finite() || dt_secs < 0.0 {
            return Err(ArchimedesError::invalid_parameter(format!(
                "tick dt must be finite and >= 0 (got {dt_secs})"
            )));
        }
        if !self.config.animate {
            return Ok(());
        }
        self.elapsed_secs += dt_secs;
        self.rotation.advance(self.config.speeds(), dt_secs);
        Ok(())
    }

    pub fn restart(&mut self) {
        self.rotation = RotationState::default();
        self.elapsed_secs = 0.0;
    }

    /// Toggling animation either way restarts the clock.
    pub fn set_animate(&mut self, animate: bool) {
        self.config.animate = animate;
        self.restart();
    }

    /// Replace speeds/offsets without resetting the accumulated rotation.
    pub fn set_config(&mut self, config: AnimationConfig) -> ArchimedesResult<()> {
        config.validate()?;
        let toggled = config.animate != self.config.animate;
        self.config = config;
        if toggled {
            self.restart();
        }
        Ok(())
    }

    pub fn view(&self) -> ViewState {
        ViewState {
            rotation: self.rotation,
            z_offset_deg: self.config.z_offset_deg,
            angle_2d: self.elapsed_secs * self.config.angular_velocity_2d,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/driver.rs"]
mod tests;
