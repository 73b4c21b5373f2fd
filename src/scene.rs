use std::path::Path;

use anyhow::Context as _;

use crate::{
    animation::driver::AnimationConfig,
    foundation::error::{ArchimedesError, ArchimedesResult},
    geometry::params::SpiralParameters,
    project::frame::{RenderMode, StyleConfig},
    project::projection::ProjectionConfig,
};

/// Everything needed to render a spiral, as one serializable document.
///
/// Missing fields fall back to their defaults, so `{}` is a valid scene.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Scene {
    pub params: SpiralParameters,
    pub style: StyleConfig,
    pub mode: RenderMode,
    pub projection: ProjectionConfig,
    pub animation: AnimationConfig,
}

impl Scene {
    pub fn validate(&self) -> ArchimedesResult<()> {
        self.params.validate()?;
        self.style.validate()?;
        self.projection.validate()?;
        self.animation.validate()?;
        Ok(())
    }

    pub fn from_json_str(s: &str) -> ArchimedesResult<Self> {
        let scene: Self = serde_json::from_str(s)
            .map_err(|e| ArchimedesError::serde(format!("invalid scene json: {e}")))?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn from_path(path: &Path) -> ArchimedesResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> ArchimedesResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ArchimedesError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../tests/unit/scene.rs"]
mod tests;
