use std::f64::consts::TAU;

use rayon::prelude::*;

use crate::{
    foundation::error::{ArchimedesError, ArchimedesResult},
    geometry::params::SpiralParameters,
};

// Above this many samples the per-point loop is split across the rayon pool.
const PARALLEL_SAMPLE_THRESHOLD: usize = 16_384;

// Absorbs rounding in `t_max / step` so a budget-derived step never adds a sample.
const COUNT_EPSILON: f64 = 1e-9;

/// One point along the curve in object space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sample {
    pub t: f64,
    pub r: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Sample {
    /// Evaluate the spiral at parameter `t`.
    pub fn at(params: &SpiralParameters, t: f64) -> Self {
        let r = params.inner_radius + params.growth_rate * t;
        let (sin, cos) = t.sin_cos();
        Self {
            t,
            r,
            x: r * cos,
            y: -r * sin,
            z: params.z_per_turn * t / TAU,
        }
    }

    /// Planar distance from the spiral origin.
    pub fn radius_2d(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Ordered samples produced by one [`sample`] pass.
///
/// Monotonically increasing in `t`, starting at 0 and never past `turns * 2π`. The set
/// is immutable once built; a parameter change produces a new set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleSet {
    samples: Vec<Sample>,
    effective_step: f64,
    t_max: f64,
}

impl SampleSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Step actually used between consecutive samples (0 for an empty set).
    pub fn effective_step(&self) -> f64 {
        self.effective_step
    }

    pub fn t_max(&self) -> f64 {
        self.t_max
    }

    /// Largest planar radius in the set, O(n).
    pub fn max_radius(&self) -> f64 {
        self.samples
            .iter()
            .map(Sample::radius_2d)
            .fold(0.0, f64::max)
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// `max(angular_step, t_max / budget)`: the requested step is a floor, the quality
/// budget a ceiling on the sample count.
pub fn effective_step(params: &SpiralParameters) -> f64 {
    let budget = params.quality.budget() as f64;
    params.angular_step.max(params.t_max() / budget)
}

/// `ceil(t_max / step) + 1`; the final sample is pinned to `t_max`.
fn sample_count(t_max: f64, step: f64) -> usize {
    (t_max / step - COUNT_EPSILON).ceil() as usize + 1
}

/// Sample the spiral into at most `budget + 1` points.
///
/// `turns == 0` yields an empty set. Non-finite inputs or a non-positive step are
/// rejected with [`ArchimedesError::InvalidParameter`].
#[tracing::instrument(skip(params), fields(turns = params.turns, quality = params.quality.as_str()))]
pub fn sample(params: &SpiralParameters) -> ArchimedesResult<SampleSet> {
    params.validate()?;

    let t_max = params.t_max();
    if params.turns == 0 {
        return Ok(SampleSet::empty());
    }

    let step = effective_step(params);
    if !step.is_finite() || step <= 0.0 {
        return Err(ArchimedesError::invalid_parameter(format!(
            "effective sampling step is ill-defined ({step})"
        )));
    }

    let count = sample_count(t_max, step);
    let last = count - 1;
    let at = |i: usize| {
        let t = if i == last {
            t_max
        } else {
            (i as f64 * step).min(t_max)
        };
        Sample::at(params, t)
    };
    let samples: Vec<Sample> = if count >= PARALLEL_SAMPLE_THRESHOLD {
        (0..count).into_par_iter().map(at).collect()
    } else {
        (0..count).map(at).collect()
    };

    tracing::debug!(count, step, t_max, "sampled spiral");

    Ok(SampleSet {
        samples,
        effective_step: step,
        t_max,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/sampler.rs"]
mod tests;
