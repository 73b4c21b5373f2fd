//! From 3D samples to colored device-space points.

pub mod frame;
pub mod gradient;
pub mod projection;
pub mod rotation;
