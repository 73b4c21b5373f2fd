use std::f64::consts::TAU;

use crate::foundation::error::{ArchimedesError, ArchimedesResult};

/// Named fidelity setting selecting the maximum sample budget.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Low,
    #[default]
    Med,
    High,
}

impl QualityTier {
    pub const ALL: [QualityTier; 3] = [Self::Low, Self::Med, Self::High];

    /// Maximum number of sampling steps for this tier. Strictly increasing with tier.
    pub fn budget(self) -> usize {
        match self {
            Self::Low => 6_000,
            Self::Med => 12_000,
            Self::High => 24_000,
        }
    }

    /// Map a measured frame rate to the tier the machine can sustain.
    pub fn from_fps(fps: f64) -> Self {
        if fps >= 55.0 {
            Self::High
        } else if fps >= 28.0 {
            Self::Med
        } else {
            Self::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Med => "med",
            Self::High => "high",
        }
    }
}

impl std::str::FromStr for QualityTier {
    type Err = ArchimedesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "med" | "medium" => Ok(Self::Med),
            "high" => Ok(Self::High),
            other => Err(ArchimedesError::invalid_parameter(format!(
                "unknown quality tier '{other}' (expected low|med|high)"
            ))),
        }
    }
}

/// Inputs of one sampling pass. Immutable for the duration of the pass.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpiralParameters {
    /// Radius at `t = 0` (`a`).
    pub inner_radius: f64,
    /// Radius growth per radian (`b`).
    pub growth_rate: f64,
    /// Full revolutions to sample.
    pub turns: u32,
    /// Requested sampling increment in radians. A floor, never a target.
    pub angular_step: f64,
    /// Object-space depth advance per full turn (3D only).
    pub z_per_turn: f64,
    pub quality: QualityTier,
}

impl Default for SpiralParameters {
    fn default() -> Self {
        Self {
            inner_radius: 0.0,
            growth_rate: 6.0,
            turns: 12,
            angular_step: 0.003,
            z_per_turn: 140.0,
            quality: QualityTier::Med,
        }
    }
}

impl SpiralParameters {
    pub fn validate(&self) -> ArchimedesResult<()> {
        for (name, v) in [
            ("inner_radius", self.inner_radius),
            ("growth_rate", self.growth_rate),
            ("angular_step", self.angular_step),
            ("z_per_turn", self.z_per_turn),
        ] {
            if !v.is_finite() {
                return Err(ArchimedesError::invalid_parameter(format!(
                    "{name} must be finite (got {v})"
                )));
            }
        }
        if self.angular_step <= 0.0 {
            return Err(ArchimedesError::invalid_parameter(format!(
                "angular_step must be > 0 (got {})",
                self.angular_step
            )));
        }
        Ok(())
    }

    /// Upper bound of the curve parameter: `turns * 2π`.
    pub fn t_max(&self) -> f64 {
        f64::from(self.turns) * TAU
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/params.rs"]
mod tests;
