use crate::{
    foundation::core::{Point, Viewport},
    foundation::error::{ArchimedesError, ArchimedesResult},
    project::rotation::Vec3,
};

/// Fraction of `field_of_view` that non-positive depths are pinned to.
///
/// Points whose `z + field_of_view` is `<= 0` (or NaN) are pinned so a frame always
/// renders; the frame reports how many points were pinned.
pub const MIN_DEPTH_RATIO: f64 = 1e-3;

/// Depth a point at or behind the camera is pinned to.
pub fn min_depth(field_of_view: f64) -> f64 {
    field_of_view * MIN_DEPTH_RATIO
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Virtual camera distance. Must be finite and > 0.
    pub field_of_view: f64,
    /// Uniform object-space scale applied before projection.
    pub scale: f64,
    pub viewport: Viewport,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            field_of_view: 700.0,
            scale: 1.0,
            viewport: Viewport::default(),
        }
    }
}

impl ProjectionConfig {
    pub fn validate(&self) -> ArchimedesResult<()> {
        if !self.field_of_view.is_finite() || self.field_of_view <= 0.0 {
            return Err(ArchimedesError::invalid_parameter(format!(
                "field_of_view must be finite and > 0 (got {})",
                self.field_of_view
            )));
        }
        if !self.scale.is_finite() {
            return Err(ArchimedesError::invalid_parameter(format!(
                "scale must be finite (got {})",
                self.scale
            )));
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(ArchimedesError::invalid_parameter(
                "viewport width/height must be > 0",
            ));
        }
        Ok(())
    }
}

/// Result of projecting one view-space point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub point: Point,
    /// Depth actually divided by (after clamping).
    pub depth: f64,
    /// `true` when the raw depth was `<= 0` and got pinned to [`min_depth`].
    pub clamped: bool,
}

/// Pinhole perspective: `screen = (v * scale * fov) / (z + fov) + center`.
pub fn perspective(v: Vec3, config: &ProjectionConfig) -> Projected {
    let fov = config.field_of_view;
    let raw_depth = v.z * config.scale + fov;
    let clamped = raw_depth.is_nan() || raw_depth <= 0.0;
    let depth = if clamped { min_depth(fov) } else { raw_depth };
    let center = config.viewport.center();
    Projected {
        point: Point::new(
            (v.x * config.scale * fov) / depth + center.x,
            (v.y * config.scale * fov) / depth + center.y,
        ),
        depth,
        clamped,
    }
}

/// Like [`perspective`] but refuses points at or behind the camera.
pub fn perspective_strict(v: Vec3, config: &ProjectionConfig) -> ArchimedesResult<Projected> {
    let p = perspective(v, config);
    if p.clamped {
        return Err(ArchimedesError::degenerate_projection(format!(
            "depth {} is at or behind the camera",
            v.z * config.scale + config.field_of_view
        )));
    }
    Ok(p)
}

#[cfg(test)]
#[path = "../../tests/unit/project/projection.rs"]
mod tests;
