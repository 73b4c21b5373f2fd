//! Archimedean spiral parameters and budgeted sampling.

/// Spiral parameters and quality tiers.
pub mod params;
/// Parametric sampler producing an ordered [`sampler::SampleSet`].
pub mod sampler;
