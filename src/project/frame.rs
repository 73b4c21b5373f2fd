use rayon::prelude::*;

use crate::{
    foundation::core::{Point, Rgb8},
    foundation::error::{ArchimedesError, ArchimedesResult},
    geometry::sampler::{Sample, SampleSet},
    project::gradient::{
        GradientMode, angle_factor, depth_factor, mix_toward_light, radius_factor,
    },
    project::projection::{ProjectionConfig, perspective},
    project::rotation::{RotationState, Vec3, rotate_2d},
};

const PARALLEL_PROJECT_THRESHOLD: usize = 16_384;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum RenderMode {
    #[default]
    #[serde(rename = "2d")]
    Flat,
    #[serde(rename = "3d")]
    Perspective,
}

impl std::str::FromStr for RenderMode {
    type Err = ArchimedesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2d" | "flat" => Ok(Self::Flat),
            "3d" | "perspective" => Ok(Self::Perspective),
            other => Err(ArchimedesError::invalid_parameter(format!(
                "unknown render mode '{other}' (expected 2d|3d)"
            ))),
        }
    }
}

/// How the projected points are painted.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub line_width: f64,
    pub color: Rgb8,
    /// Square markers instead of a polyline.
    pub points: bool,
    pub gradient: GradientMode,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            line_width: 2.0,
            color: Rgb8::new(0x2d, 0xd4, 0xbf),
            points: false,
            gradient: GradientMode::None,
        }
    }
}

impl StyleConfig {
    pub fn validate(&self) -> ArchimedesResult<()> {
        if !self.line_width.is_finite() || self.line_width < 0.0 {
            return Err(ArchimedesError::invalid_parameter(format!(
                "line_width must be finite and >= 0 (got {})",
                self.line_width
            )));
        }
        Ok(())
    }

    /// Stroke width / marker side actually painted (at least one pixel).
    pub fn effective_width(&self) -> f64 {
        self.line_width.max(1.0)
    }
}

/// Time-dependent view inputs for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewState {
    /// 3D viewer rotation.
    pub rotation: RotationState,
    /// Extra Z rotation in degrees, set from the UI rather than animated.
    pub z_offset_deg: f64,
    /// In-plane rotation in radians used by the flat mode.
    pub angle_2d: f64,
}

/// One device-space point with its resolved color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DevicePoint {
    pub point: Point,
    pub color: Rgb8,
}

/// Output of [`project_frame`], in sample order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectedFrame {
    pub points: Vec<DevicePoint>,
    /// Points whose depth was pinned to the projection epsilon.
    pub clamped_points: usize,
}

impl ProjectedFrame {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Reject frames where any point crossed behind the camera.
    pub fn ensure_nondegenerate(&self) -> ArchimedesResult<()> {
        if self.clamped_points > 0 {
            return Err(ArchimedesError::degenerate_projection(format!(
                "{} of {} points had depth clamped",
                self.clamped_points,
                self.points.len()
            )));
        }
        Ok(())
    }
}

/// Project a sample set to device space and resolve per-point colors.
///
/// Pure; safe to call once per display tick. An empty set yields an empty frame.
#[tracing::instrument(skip_all, fields(count = samples.len(), mode = ?mode))]
pub fn project_frame(
    samples: &SampleSet,
    view: &ViewState,
    config: &ProjectionConfig,
    mode: RenderMode,
    style: &StyleConfig,
) -> ArchimedesResult<ProjectedFrame> {
    config.validate()?;
    style.validate()?;

    if samples.is_empty() {
        return Ok(ProjectedFrame::default());
    }

    let count = samples.len();
    let max_radius = match style.gradient {
        GradientMode::Radius => samples.max_radius().max(1.0),
        _ => 1.0,
    };

    let project_one = |(i, s): (usize, &Sample)| -> (DevicePoint, bool) {
        let (point, depth, clamped) = match mode {
            RenderMode::Flat => {
                let (x, y) = rotate_2d(s.x, s.y, view.angle_2d);
                let center = config.viewport.center();
                let p = Point::new(x * config.scale + center.x, y * config.scale + center.y);
                (p, None, false)
            }
            RenderMode::Perspective => {
                let v = view
                    .rotation
                    .apply(Vec3::new(s.x, s.y, s.z), view.z_offset_deg);
                let p = perspective(v, config);
                (p.point, Some(p.depth), p.clamped)
            }
        };

        let f = match (style.gradient, depth) {
            (GradientMode::None, _) => 0.0,
            (GradientMode::Radius, _) => radius_factor(s.radius_2d(), max_radius),
            (GradientMode::Angle, _) => angle_factor(i, count),
            (GradientMode::Depth, Some(d)) => depth_factor(d, config.field_of_view),
            (GradientMode::Depth, None) => 0.0,
        };

        let color = if f == 0.0 {
            style.color
        } else {
            mix_toward_light(style.color, f)
        };
        (DevicePoint { point, color }, clamped)
    };

    let (points, clamped): (Vec<DevicePoint>, Vec<bool>) = if count >= PARALLEL_PROJECT_THRESHOLD
    {
        samples
            .samples()
            .par_iter()
            .enumerate()
            .map(project_one)
            .unzip()
    } else {
        samples.iter().enumerate().map(project_one).unzip()
    };

    let clamped_points = clamped.iter().filter(|&&c| c).count();
    if clamped_points > 0 {
        tracing::warn!(
            clamped_points,
            count,
            "projection depth clamped for points behind the camera"
        );
    }

    Ok(ProjectedFrame {
        points,
        clamped_points,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/project/frame.rs"]
mod tests;
