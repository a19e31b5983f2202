//! Offline tour of the practice engine: charts, grading, and mastery.
//!
//! Run with: `cargo run --example demo`
//!
//! Nothing here talks to the generation service:
//!
//! 1. **Charts**: one series per distribution family, drawn as ASCII bars,
//!    with the threshold region marked `#`.
//! 2. **Grading**: the permissive matcher on a handful of typed answers.
//! 3. **Mastery**: a few successful generations recorded to a JSON file in
//!    the system temp directory, then reloaded.
//!
//! ## Key concepts demonstrated
//!
//! - `sample_series(spec, region)` is pure; an invalid spec gives an empty
//!   series rather than an error.
//! - Region tagging is inclusive: `P(X ≥ 4)` highlights `k = 4`.
//! - A Normal spec with a sample size carries a standard-error band.

use stat_drill_gen::{
    sample_series, training_engine::grading::is_acceptable, DistributionSpec, JsonFileStore,
    MasteryTracker, RegionFilter, SampleSeries, StatTopic,
};

const BAR_WIDTH: f64 = 50.0;

/// Print a series as horizontal bars scaled to the tallest point.
fn print_series(title: &str, series: &SampleSeries, every: usize) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    match (series.spec, series.region) {
        (Some(spec), Some(region)) => println!("  {title}: {spec}  highlight {region}"),
        (Some(spec), None)         => println!("  {title}: {spec}"),
        _                          => println!("  {title}: (nothing to draw)"),
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let peak = series.points.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    for point in series.points.iter().step_by(every.max(1)) {
        let len = if peak > 0.0 { (point.value / peak * BAR_WIDTH).round() as usize } else { 0 };
        let glyph = if point.in_region { "#" } else { "=" };
        println!("  {:>8} {:.4} {}", point.position.to_string(), point.value, glyph.repeat(len));
    }
    if series.region.is_some() {
        println!("  highlighted total ≈ {:.4}", series.highlighted_total());
    }
    if let (Some(se), Some((lo, hi))) = (series.standard_error, series.standard_error_band()) {
        println!("  SE = {se:.4}, band [{lo:.2}, {hi:.2}]");
    }
    println!();
}

fn main() {
    // ── Charts ───────────────────────────────────────────────────────────────
    println!();
    println!("══ Distribution charts ══");
    println!();

    let binomial = sample_series(&DistributionSpec::binomial(10, 0.3), Some(&RegionFilter::at_least(4.0)));
    print_series("Binomial", &binomial, 1);

    let poisson = sample_series(&DistributionSpec::poisson(3.5), Some(&RegionFilter::at_most(2.0)));
    print_series("Poisson", &poisson, 1);

    let normal = sample_series(
        &DistributionSpec::normal(50.0, 8.0).with_sample_size(16),
        Some(&RegionFilter::at_least(60.0)),
    );
    print_series("Normal", &normal, 5);

    let invalid = sample_series(&DistributionSpec::binomial(10, 1.5), None);
    print_series("Invalid", &invalid, 1);

    // ── Grading ──────────────────────────────────────────────────────────────
    // Whitespace and case are ignored; a substring either way is accepted.
    println!("══ Answer matcher ══");
    println!();

    let canonical = "0.3504";
    for candidate in ["0.3504", " 0.35 04", "0.35", "P(X ≥ 4) = 0.3504", "0.350", "", "0.65"] {
        let mark = if is_acceptable(candidate, canonical) { "✓" } else { "✗" };
        println!("  [{mark}] {candidate:?} vs {canonical:?}");
    }
    println!();

    // ── Mastery ──────────────────────────────────────────────────────────────
    // Each successful generation adds 5, capped at 100, and is written through.
    println!("══ Mastery tracker ══");
    println!();

    let dir = std::env::temp_dir().join("stat_drill_gen_demo");
    let mut tracker = MasteryTracker::load(JsonFileStore::in_dir(&dir));
    for topic in [StatTopic::Probability, StatTopic::Probability, StatTopic::PoissonDistribution] {
        let value = tracker.on_generation_success(topic.id());
        println!("  {topic:<40} → {value:>3}");
    }

    let reloaded = MasteryTracker::load(JsonFileStore::in_dir(&dir));
    println!();
    println!("  Reloaded from {}:", reloaded.store().path().display());
    for topic in StatTopic::ALL {
        println!("  {:<40} {:>3}  {}", topic.id(), reloaded.value(topic.id()), reloaded.status(topic.id()));
    }
    println!();
}
