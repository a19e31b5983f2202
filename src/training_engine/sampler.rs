//! Distribution sampler: turns a distribution spec into chart-ready points.
//!
//! Every function here is pure: identical input gives identical output, and
//! nothing is mutated. Out-of-contract input never errors; it yields an empty
//! series, which the renderer treats as "draw nothing".
//!
//! ## Sampling grids
//!
//! | Family   | Positions                                        | Value |
//! |----------|--------------------------------------------------|-------|
//! | Normal   | 101 evenly spaced x over `μ ± 4σ`                | density, 4 dp |
//! | Binomial | `k = 0..=n`                                      | `C(n,k)·p^k·(1-p)^(n-k)`, 4 dp |
//! | Poisson  | `k = 0..=max(10, ⌈λ + 4√λ⌉)`                     | `e^-λ·λ^k / k!`, 4 dp |
//!
//! Normal positions are emitted at 2 dp. Rounding is applied only to the
//! emitted numbers; region tagging uses the unrounded position.

use std::f64::consts::PI;

use crate::training_engine::{
    combinatorics::{binomial_coefficient, ln_factorial, ln_factorial_table},
    models::{
        Comparison, DistParams, DistributionKind, DistributionSpec, RegionFilter, SamplePoint,
        SamplePosition, SampleSeries,
    },
    region::in_region,
};

/// Intervals across the Normal grid (101 points).
pub const NORMAL_STEPS: u32 = 100;
/// Half-width of the Normal grid in standard deviations.
pub const NORMAL_SPAN_SIGMAS: f64 = 4.0;
/// Smallest upper bound of the Poisson grid.
pub const POISSON_MIN_MAX_K: u32 = 10;
/// Discrete grids longer than this are not rendered.
pub const MAX_DISCRETE_POINTS: u32 = 100_000;

const POSITION_DP: i32 = 2;
const VALUE_DP: i32 = 4;

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// Gaussian density at `x`.
pub fn normal_density(x: f64, mean: f64, stddev: f64) -> f64 {
    let z = (x - mean) / stddev;
    (-0.5 * z * z).exp() / (stddev * (2.0 * PI).sqrt())
}

/// `P(X = k)` for `X ~ B(n, p)`.
pub fn binomial_pmf(trials: u32, p: f64, k: u32) -> f64 {
    if k > trials {
        return 0.0;
    }
    let coeff = binomial_coefficient(i64::from(trials), i64::from(k));
    binomial_term(coeff, trials, p, k, || {
        ln_factorial(trials) - ln_factorial(k) - ln_factorial(trials - k)
    })
}

/// `C·p^k·(1-p)^(n-k)` given `C = C(n, k)`. Falls back to log space when the
/// coefficient overflowed or one of the powers underflowed.
fn binomial_term(coeff: f64, trials: u32, p: f64, k: u32, ln_coeff: impl FnOnce() -> f64) -> f64 {
    if p == 0.0 || p == 1.0 {
        let certain = if p == 0.0 { 0 } else { trials };
        return if k == certain { 1.0 } else { 0.0 };
    }
    let hits = p.powi(k as i32);
    let misses = (1.0 - p).powi((trials - k) as i32);
    if coeff.is_finite() && hits.is_normal() && misses.is_normal() {
        return coeff * hits * misses;
    }
    (ln_coeff() + f64::from(k) * p.ln() + f64::from(trials - k) * (1.0 - p).ln()).exp()
}

/// `P(X = k)` for `X ~ Po(λ)`, evaluated in log space so large `λ` and `k`
/// neither overflow `λ^k` nor underflow `e^-λ` prematurely.
pub fn poisson_pmf(rate: f64, k: u32) -> f64 {
    (-rate + f64::from(k) * rate.ln() - ln_factorial(k)).exp()
}

/// Masses for `k = 0..=trials`. `C(n, k)` is carried forward from `C(n, k-1)`
/// and log factorials come from one table, so the grid costs O(n).
fn binomial_masses(trials: u32, p: f64) -> Vec<f64> {
    let mut ln_table: Option<Vec<f64>> = None;
    let mut coeff = 1.0f64;
    let mut masses = Vec::with_capacity(trials as usize + 1);
    for k in 0..=trials {
        let mass = binomial_term(coeff, trials, p, k, || {
            let table = ln_table.get_or_insert_with(|| ln_factorial_table(trials));
            table[trials as usize] - table[k as usize] - table[(trials - k) as usize]
        });
        masses.push(mass);
        coeff = (coeff * f64::from(trials - k) / (f64::from(k) + 1.0)).round();
    }
    masses
}

/// Masses for `k = 0..=max_k`, same values as [`poisson_pmf`].
fn poisson_masses(rate: f64, max_k: u32) -> Vec<f64> {
    let ln_rate = rate.ln();
    ln_factorial_table(max_k)
        .into_iter()
        .zip(0u32..)
        .map(|(ln_fact, k)| (-rate + f64::from(k) * ln_rate - ln_fact).exp())
        .collect()
}

/// Last `k` of the Poisson grid: `max(10, ⌈λ + 4√λ⌉)`.
pub fn poisson_max_k(rate: f64) -> u32 {
    let tail = (rate + 4.0 * rate.sqrt()).ceil();
    if tail >= f64::from(u32::MAX) {
        return u32::MAX;
    }
    (tail as u32).max(POISSON_MIN_MAX_K)
}

/// Sample `spec`, tagging points against `region`.
///
/// Anything that cannot be drawn gives an empty sequence: an invalid spec
/// (see [`DistributionSpec::is_valid`]), a discrete grid of
/// [`MAX_DISCRETE_POINTS`] or more, or a Normal grid whose density overflows.
pub fn sample(spec: &DistributionSpec, region: Option<&RegionFilter>) -> Vec<SamplePoint> {
    if !spec.is_valid() {
        return Vec::new();
    }
    let masses = match *spec {
        DistributionSpec::Normal { mean, stddev, .. } => return sample_normal(mean, stddev, region),
        DistributionSpec::Binomial { trials, success_probability } =>
            within_grid_limit(trials).map(|n| binomial_masses(n, success_probability)),
        DistributionSpec::Poisson { rate } =>
            within_grid_limit(poisson_max_k(rate)).map(|max_k| poisson_masses(rate, max_k)),
    };
    masses.map(|m| sample_discrete(m, region)).unwrap_or_default()
}

/// [`sample`] plus the annotations the renderer needs (standard error).
pub fn sample_series(spec: &DistributionSpec, region: Option<&RegionFilter>) -> SampleSeries {
    let points = sample(spec, region);
    if points.is_empty() {
        return SampleSeries::default();
    }
    SampleSeries {
        spec: Some(*spec),
        region: region.copied(),
        points,
        standard_error: spec.standard_error(),
    }
}

/// Sample the loose parameters attached to a generated question.
pub fn sample_params(params: &DistParams) -> SampleSeries {
    match spec_from_params(params) {
        Some(spec) => sample_series(&spec, region_from_params(params).as_ref()),
        None => SampleSeries::default(),
    }
}

/// Resolve wire parameters to a spec, filling the chart defaults
/// (`μ=0, σ=1, n=1, p=0.5, λ=1`) for absent fields.
pub fn spec_from_params(params: &DistParams) -> Option<DistributionSpec> {
    let spec = match params.kind {
        DistributionKind::Normal => {
            let mut spec = DistributionSpec::normal(
                params.mu.unwrap_or(0.0),
                params.sigma.unwrap_or(1.0),
            );
            if let Some(n) = params.n.and_then(whole_count).filter(|&n| n > 1) {
                spec = spec.with_sample_size(n);
            }
            spec
        }
        DistributionKind::Binomial => DistributionSpec::binomial(
            whole_count(params.n.unwrap_or(1.0))?,
            params.p.unwrap_or(0.5),
        ),
        DistributionKind::Poisson => DistributionSpec::poisson(params.lambda.unwrap_or(1.0)),
        DistributionKind::Unknown => return None,
    };
    spec.is_valid().then_some(spec)
}

/// A threshold without a comparison highlights the upper tail.
pub fn region_from_params(params: &DistParams) -> Option<RegionFilter> {
    let threshold = params.threshold.filter(|t| t.is_finite())?;
    Some(RegionFilter {
        threshold,
        comparison: params.comparison.unwrap_or(Comparison::AtLeast),
    })
}

fn whole_count(x: f64) -> Option<u32> {
    (x.is_finite() && x >= 0.0 && x.fract() == 0.0 && x <= f64::from(u32::MAX)).then(|| x as u32)
}

fn sample_normal(mean: f64, stddev: f64, region: Option<&RegionFilter>) -> Vec<SamplePoint> {
    let start = mean - NORMAL_SPAN_SIGMAS * stddev;
    let end = mean + NORMAL_SPAN_SIGMAS * stddev;
    let step = (end - start) / f64::from(NORMAL_STEPS);

    let points: Vec<SamplePoint> = (0..=NORMAL_STEPS)
        .map(|i| {
            // Pin the last point so float drift never drops or overshoots it.
            let x = if i == NORMAL_STEPS { end } else { start + f64::from(i) * step };
            SamplePoint {
                position: SamplePosition::Continuous(round_to(x, POSITION_DP)),
                value: round_to(normal_density(x, mean, stddev), VALUE_DP),
                in_region: in_region(x, region),
            }
        })
        .collect();

    // A subnormal σ still overflows the peak density.
    let drawable = points.iter().all(|p| p.position.as_f64().is_finite() && p.value.is_finite());
    if drawable { points } else { Vec::new() }
}

fn within_grid_limit(max_k: u32) -> Option<u32> {
    (max_k < MAX_DISCRETE_POINTS).then_some(max_k)
}

fn sample_discrete(masses: Vec<f64>, region: Option<&RegionFilter>) -> Vec<SamplePoint> {
    masses
        .into_iter()
        .zip(0u32..)
        .map(|(mass, k)| SamplePoint {
            position: SamplePosition::Discrete(k),
            value: round_to(mass, VALUE_DP),
            in_region: in_region(f64::from(k), region),
        })
        .collect()
}
