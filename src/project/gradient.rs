use crate::foundation::{core::Rgb8, math::lerp};

/// Light color every gradient blends toward.
pub const LIGHT_TARGET: Rgb8 = Rgb8::new(234, 241, 255);

/// Upper bound on the radius/angle blend factor so the far end keeps some contrast.
pub const GRADIENT_CAP: f64 = 0.9;

/// Which per-point scalar drives the color blend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientMode {
    #[default]
    None,
    Radius,
    Angle,
    /// Projected depth; only meaningful in 3D.
    Depth,
}

impl std::str::FromStr for GradientMode {
    type Err = crate::foundation::error::ArchimedesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "radius" => Ok(Self::Radius),
            "angle" => Ok(Self::Angle),
            "depth" => Ok(Self::Depth),
            other => Err(crate::foundation::error::ArchimedesError::invalid_parameter(
                format!("unknown gradient mode '{other}' (expected none|radius|angle|depth)"),
            )),
        }
    }
}

/// Per-channel blend from `base` toward `target` at `f` (clamped to `[0, 1]`).
pub fn mix_toward(base: Rgb8, target: Rgb8, f: f64) -> Rgb8 {
    let f = if f.is_nan() { 0.0 } else { f.clamp(0.0, 1.0) };
    let b = base.to_f64();
    let t = target.to_f64();
    Rgb8::from_f64([lerp(b[0], t[0], f), lerp(b[1], t[1], f), lerp(b[2], t[2], f)])
}

pub fn mix_toward_light(base: Rgb8, f: f64) -> Rgb8 {
    mix_toward(base, LIGHT_TARGET, f)
}

/// `radius / max_radius`, clamped and capped at [`GRADIENT_CAP`].
pub fn radius_factor(radius: f64, max_radius: f64) -> f64 {
    if max_radius <= 0.0 {
        return 0.0;
    }
    (radius / max_radius).clamp(0.0, 1.0) * GRADIENT_CAP
}

/// `index / (count - 1)`, capped at [`GRADIENT_CAP`]. A single point gets 0.
pub fn angle_factor(index: usize, count: usize) -> f64 {
    if count < 2 {
        return 0.0;
    }
    (index as f64 / (count - 1) as f64).clamp(0.0, 1.0) * GRADIENT_CAP
}

/// `depth / (2 * field_of_view)`, clamped to `[0, 1]`.
pub fn depth_factor(depth: f64, field_of_view: f64) -> f64 {
    if field_of_view <= 0.0 {
        return 0.0;
    }
    (depth / (2.0 * field_of_view)).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/project/gradient.rs"]
mod tests;
