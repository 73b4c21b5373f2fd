/// Convenience result type used across Archimedes.
pub type ArchimedesResult<T> = Result<T, ArchimedesError>;

/// Top-level error taxonomy used by the sampling, projection and export APIs.
#[derive(thiserror::Error, Debug)]
pub enum ArchimedesError {
    /// A spiral, style or projection parameter is non-finite, out of range, or would
    /// produce an ill-defined sampling step.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A projected point landed at or behind the virtual camera.
    #[error("degenerate projection: {0}")]
    DegenerateProjection(String),

    /// Drawing surface or rasterizer failures.
    #[error("render error: {0}")]
    Render(String),

    /// PNG, SVG or video export failures.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing scenes and presets.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ArchimedesError {
    /// Build an [`ArchimedesError::InvalidParameter`] value.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Build an [`ArchimedesError::DegenerateProjection`] value.
    pub fn degenerate_projection(msg: impl Into<String>) -> Self {
        Self::DegenerateProjection(msg.into())
    }

    /// Build an [`ArchimedesError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build an [`ArchimedesError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build an [`ArchimedesError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
