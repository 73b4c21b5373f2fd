//! Frame encoders.

/// `ffmpeg`-based video output (MP4/WebM/GIF via system `ffmpeg`).
pub mod ffmpeg;
/// PNG stills and numbered sequences.
pub mod png;
