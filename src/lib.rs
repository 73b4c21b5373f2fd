//! Archimedes renders animated Archimedean spirals.
//!
//! The pipeline runs in four stages:
//!
//! - Sample the spiral `r = a + b·t` under a quality-tier budget ([`sample`])
//! - Rotate and project each sample, flat or in perspective ([`project_frame`])
//! - Color points by radius, angle or depth toward a fixed light tint
//! - Paint through a [`DrawSurface`]: CPU raster, SVG, PNG sequences or `ffmpeg` video
//!
//! [`SpiralSession`] holds the live state for interactive use; [`Scene`] is the
//! serializable document the CLI and presets work with.
#![forbid(unsafe_code)]

pub mod animation;
pub mod encode;
pub mod foundation;
pub mod geometry;
pub mod presets;
pub mod project;
pub mod quality;
pub mod render;
pub mod scene;
pub mod session;

pub use crate::foundation::core::{Fps, Point, Rgb8, Vec2, Viewport};
pub use crate::foundation::error::{ArchimedesError, ArchimedesResult};

pub use crate::animation::driver::{AnimationConfig, AnimationDriver};
pub use crate::encode::ffmpeg::{EncodeConfig, FfmpegEncoder, VideoFormat, is_ffmpeg_on_path};
pub use crate::encode::png::write_png;
pub use crate::geometry::params::{QualityTier, SpiralParameters};
pub use crate::geometry::sampler::{Sample, SampleSet, sample};
pub use crate::presets::store::{Preset, PresetStore, builtin_presets};
pub use crate::project::frame::{
    DevicePoint, ProjectedFrame, RenderMode, StyleConfig, ViewState, project_frame,
};
pub use crate::project::gradient::GradientMode;
pub use crate::project::projection::{ProjectionConfig, perspective};
pub use crate::project::rotation::{RotationState, Vec3};
pub use crate::quality::{QualityProbe, probe_quality};
pub use crate::render::cpu::CpuSurface;
pub use crate::render::pipeline::{
    RenderStats, RenderThreading, RenderToVideoOpts, render_frame, render_frames_with_stats,
    render_png_sequence, render_svg, render_to_video, write_svg,
};
pub use crate::render::surface::{DrawSurface, FrameRGBA, draw_frame};
pub use crate::render::svg::SvgSurface;
pub use crate::scene::Scene;
pub use crate::session::SpiralSession;
