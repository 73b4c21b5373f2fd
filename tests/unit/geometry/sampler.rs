use super::*;
use crate::geometry::params::QualityTier;

fn params(turns: u32, step: f64, quality: QualityTier) -> SpiralParameters {
    SpiralParameters {
        inner_radius: 0.0,
        growth_rate: 6.0,
        turns,
        angular_step: step,
        z_per_turn: 140.0,
        quality,
    }
}

#[test]
fn reference_scenario_count_and_endpoints() {
    let p = params(10, 0.01, QualityTier::Med);
    let set = sample(&p).unwrap();

    let t_max = 10.0 * TAU;
    let step = 0.01f64.max(t_max / 12_000.0);
    assert_eq!(set.effective_step(), step);
    assert_eq!(set.len(), (t_max / step).ceil() as usize + 1);
    assert_eq!(set.len(), 6285);

    let first = set.first().unwrap();
    assert_eq!((first.t, first.r, first.x, first.y), (0.0, 0.0, 0.0, 0.0));
    assert_eq!(first.y, 0.0);

    let last = set.last().unwrap();
    assert_eq!(last.t, t_max);
    assert!(last.t >= t_max - step);
}

#[test]
fn budget_derived_step_hits_budget_plus_one_exactly() {
    for tier in QualityTier::ALL {
        let set = sample(&params(40, 1e-9, tier)).unwrap();
        assert_eq!(set.len(), tier.budget() + 1);
        assert_eq!(set.last().unwrap().t, set.t_max());
    }
}

#[test]
fn zero_turns_is_empty_not_an_error() {
    let set = sample(&params(0, 0.01, QualityTier::High)).unwrap();
    assert!(set.is_empty());
    assert_eq!(set.max_radius(), 0.0);
}

#[test]
fn count_stays_within_budget_for_tiny_steps() {
    for tier in QualityTier::ALL {
        for turns in [1, 7, 40, 500] {
            let set = sample(&params(turns, 1e-9, tier)).unwrap();
            assert!(!set.is_empty());
            assert!(
                set.len() <= tier.budget() + 1,
                "{turns} turns at {tier:?}: {} samples",
                set.len()
            );
        }
    }
}

#[test]
fn requested_step_is_a_floor_for_short_curves() {
    let p = params(1, 0.05, QualityTier::High);
    assert!(p.t_max() / QualityTier::High.budget() as f64 <= 0.05);
    let set = sample(&p).unwrap();
    assert_eq!(set.effective_step(), 0.05);
    let gaps: Vec<f64> = set.samples().windows(2).map(|w| w[1].t - w[0].t).collect();
    let (last_gap, full) = gaps.split_last().unwrap();
    assert!(full.iter().all(|&g| g >= 0.05 - 1e-12));
    // Only the closing gap up to t_max may be shorter.
    assert!(*last_gap > 0.0 && *last_gap <= 0.05 + 1e-12);
}

#[test]
fn tiers_yield_non_decreasing_counts() {
    let counts: Vec<usize> = QualityTier::ALL
        .iter()
        .map(|&q| sample(&params(60, 0.001, q)).unwrap().len())
        .collect();
    assert!(counts.windows(2).all(|w| w[0] <= w[1]), "{counts:?}");
}

#[test]
fn samples_satisfy_curve_equations() {
    let p = SpiralParameters {
        inner_radius: 12.5,
        growth_rate: 3.25,
        z_per_turn: -80.0,
        ..params(5, 0.02, QualityTier::Low)
    };
    let set = sample(&p).unwrap();
    for s in &set {
        assert!((s.r - (p.inner_radius + p.growth_rate * s.t)).abs() < 1e-9);
        assert!((s.x - s.r * s.t.cos()).abs() < 1e-9);
        assert!((s.y + s.r * s.t.sin()).abs() < 1e-9);
        assert!((s.x * s.x + s.y * s.y - s.r * s.r).abs() < 1e-6);
        assert!((s.z - p.z_per_turn * s.t / TAU).abs() < 1e-9);
    }
}

#[test]
fn t_is_strictly_increasing() {
    let set = sample(&params(20, 0.003, QualityTier::High)).unwrap();
    assert!(set.samples().windows(2).all(|w| w[0].t < w[1].t));
}

#[test]
fn parallel_path_matches_sequential_definition() {
    // 400 turns at high quality crosses the parallel threshold.
    let p = params(400, 0.0001, QualityTier::High);
    let set = sample(&p).unwrap();
    assert!(set.len() >= PARALLEL_SAMPLE_THRESHOLD);
    let step = set.effective_step();
    for (i, s) in set.iter().enumerate().step_by(997) {
        assert_eq!(*s, Sample::at(&p, (i as f64 * step).min(p.t_max())));
    }
}

#[test]
fn invalid_parameters_fail_fast() {
    let p = SpiralParameters {
        z_per_turn: f64::INFINITY,
        ..params(3, 0.01, QualityTier::Med)
    };
    assert!(matches!(
        sample(&p),
        Err(ArchimedesError::InvalidParameter(_))
    ));
    assert!(sample(&params(3, 0.0, QualityTier::Med)).is_err());
}
