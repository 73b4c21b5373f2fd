//! Painting projected frames: the surface seam, the CPU rasterizer, and SVG output.

/// CPU raster surface built on `vello_cpu`.
pub mod cpu;
/// Batch rendering of frames, sequences and videos.
pub mod pipeline;
/// Surface trait and the polyline/marker painter.
pub mod surface;
/// Vector surface producing SVG documents.
pub mod svg;
