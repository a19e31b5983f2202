//! Cross-module tests for the `stat_drill_gen` crate.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! # Coverage
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | End to end | `B(10, 0.3)` with `P(X ≥ 4)`: 11 points, k=4 highlighted 0.2001, k=3 plain 0.2668 |
//! | Wire params | JSON `distParams` → series; defaults; unknown tag and bad params render nothing |
//! | Normal | 101 points across `μ ± 4σ`, SE band from sample size, region at the mean |
//! | Poisson | Grid length follows `max(10, ⌈λ + 4√λ⌉)` |
//! | Matcher | The documented accept/reject table, including the permissive cases |
//! | Mastery | Increments survive a restart through the JSON file; cap at 100; topics independent |
//! | Syllabus | Ten topics, five per paper, ids round-trip through serde |
//! | Blueprint | Parsed payload instantiates with a library narrative |

use std::collections::BTreeMap;

use crate::content_service::payload;
use crate::training_engine::{
    grading::is_acceptable,
    mastery::MASTERY_SLOT,
    models::GradingRequest,
    template::instantiate,
    topics::{all_topics, topics_for},
};
use crate::{
    grade, render_math, sample_params, sample_series, ContentKind, DistParams, DistributionSpec,
    JsonFileStore, MasteryStatus, MasteryTracker, MathRenderer, Paper, PaperFilter,
    RegionFilter, SamplePosition, StatTopic, Verdict,
};

// ── helpers ──────────────────────────────────────────────────────────────────

fn params(json: &str) -> DistParams {
    serde_json::from_str(json).expect("valid distParams")
}

fn discrete_positions(series: &crate::SampleSeries) -> Vec<u32> {
    series
        .points
        .iter()
        .map(|p| match p.position {
            SamplePosition::Discrete(k) => k,
            SamplePosition::Continuous(x) => panic!("unexpected continuous position {x}"),
        })
        .collect()
}

// ── end to end ───────────────────────────────────────────────────────────────

#[test]
fn binomial_upper_tail_scenario() {
    let series = sample_series(&DistributionSpec::binomial(10, 0.3), Some(&RegionFilter::at_least(4.0)));

    assert_eq!(series.points.len(), 11);
    assert_eq!(discrete_positions(&series), (0..=10).collect::<Vec<_>>());

    let k4 = series.points[4];
    assert!(k4.in_region);
    assert_eq!(k4.value, 0.2001);

    let k3 = series.points[3];
    assert!(!k3.in_region);
    assert_eq!(k3.value, 0.2668);

    // P(X ≥ 4) ≈ 0.3504, up to per-point rounding.
    assert!((series.highlighted_total() - 0.3504).abs() < 1e-3);
}

#[test]
fn binomial_scenario_from_wire_params() {
    let p = params(r#"{"type": "binomial", "n": 10, "p": 0.3, "threshold": 4, "comparison": "greater"}"#);
    let from_wire = sample_params(&p);
    let direct = sample_series(&DistributionSpec::binomial(10, 0.3), Some(&RegionFilter::at_least(4.0)));
    assert_eq!(from_wire, direct);
}

// ── wire params ──────────────────────────────────────────────────────────────

#[test]
fn missing_fields_use_chart_defaults() {
    let normal = sample_params(&params(r#"{"type": "normal"}"#));
    assert_eq!(normal.spec, Some(DistributionSpec::normal(0.0, 1.0)));
    assert_eq!(normal.points.len(), 101);

    let binomial = sample_params(&params(r#"{"type": "binomial"}"#));
    assert_eq!(binomial.points.len(), 2);
    assert_eq!(binomial.points[0].value, 0.5);

    let poisson = sample_params(&params(r#"{"type": "poisson"}"#));
    assert_eq!(poisson.points.len(), 11);
}

#[test]
fn threshold_without_comparison_highlights_upper_tail() {
    let series = sample_params(&params(r#"{"type": "poisson", "lambda": 2, "threshold": 3}"#));
    assert!(!series.points[2].in_region);
    assert!(series.points[3].in_region);
    assert!(series.points[10].in_region);
}

#[test]
fn comparison_without_threshold_highlights_nothing() {
    let series = sample_params(&params(r#"{"type": "poisson", "lambda": 2, "comparison": "less"}"#));
    assert!(!series.is_empty());
    assert!(series.points.iter().all(|p| !p.in_region));
}

#[test]
fn unrenderable_params_give_empty_series() {
    for json in [
        r#"{"type": "geometric", "p": 0.2}"#,
        r#"{"type": "normal", "sigma": 0}"#,
        r#"{"type": "normal", "sigma": -2}"#,
        r#"{"type": "binomial", "n": 10, "p": 1.5}"#,
        r#"{"type": "binomial", "n": 2.5, "p": 0.5}"#,
        r#"{"type": "poisson", "lambda": 0}"#,
    ] {
        assert!(sample_params(&params(json)).is_empty(), "expected no chart for {json}");
    }
}

// ── normal ───────────────────────────────────────────────────────────────────

#[test]
fn normal_sample_size_annotates_standard_error() {
    let series = sample_params(&params(r#"{"type": "normal", "mu": 50, "sigma": 8, "n": 16}"#));
    assert_eq!(series.standard_error, Some(2.0));
    assert_eq!(series.standard_error_band(), Some((48.0, 52.0)));

    // The annotation leaves the sampled curve untouched.
    let bare = sample_series(&DistributionSpec::normal(50.0, 8.0), None);
    assert_eq!(series.points, bare.points);
}

#[test]
fn normal_grid_spans_four_sigma() {
    let series = sample_series(&DistributionSpec::normal(100.0, 15.0), Some(&RegionFilter::at_most(100.0)));
    let first = series.points.first().unwrap();
    let last = series.points.last().unwrap();
    assert_eq!(first.position, SamplePosition::Continuous(40.0));
    assert_eq!(last.position, SamplePosition::Continuous(160.0));
    assert!(series.points[50].in_region);
    assert!(!series.points[51].in_region);
}

// ── poisson ──────────────────────────────────────────────────────────────────

#[test]
fn poisson_grid_length() {
    // λ = 9: ⌈9 + 12⌉ = 21 → k = 0..=21.
    let series = sample_series(&DistributionSpec::poisson(9.0), None);
    assert_eq!(series.points.len(), 22);
    let total: f64 = series.points.iter().map(|p| p.value).sum();
    assert!((total - 1.0).abs() < 2e-3, "sum {total}");
}

// ── matcher ──────────────────────────────────────────────────────────────────

#[test]
fn matcher_table() {
    let cases: [(&str, &str, bool); 8] = [
        ("12.5",    "12.5",   true),
        ("",        "12.5",   false),
        ("   ",     "12.5",   false),
        ("12.5 ",   "  12.5", true),
        ("12",      "12.5",   true),
        ("X = 12.5", "12.5",  true),
        ("5/2",     "2.5",    false),
        ("0.6826",  "0.683",  false),
    ];
    for (candidate, canonical, expected) in cases {
        assert_eq!(
            is_acceptable(candidate, canonical),
            expected,
            "is_acceptable({candidate:?}, {canonical:?})"
        );
    }
}

#[test]
fn grade_request_round_trip() {
    let request: GradingRequest =
        serde_json::from_str(r#"{"canonicalAnswer": "\\mu = 4.2", "candidateAnswer": "MU=4.2"}"#).unwrap();
    assert_eq!(grade(&request), Verdict::Correct);
}

// ── mastery ──────────────────────────────────────────────────────────────────

#[test]
fn mastery_persists_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let topic = StatTopic::NormalDistribution.id();
    let other = StatTopic::HypothesisTesting.id();

    {
        let mut tracker = MasteryTracker::load(JsonFileStore::in_dir(dir.path()));
        assert_eq!(tracker.on_generation_success(topic), 5);
    }
    assert!(dir.path().join(format!("{MASTERY_SLOT}.json")).exists());

    let mut tracker = MasteryTracker::load(JsonFileStore::in_dir(dir.path()));
    assert_eq!(tracker.value(topic), 5);
    for _ in 0..20 {
        tracker.on_generation_success(topic);
    }
    assert_eq!(tracker.value(topic), 100);
    assert_eq!(tracker.status(topic), MasteryStatus::Mastered);
    assert_eq!(tracker.value(other), 0);
    assert_eq!(tracker.status(other), MasteryStatus::Unstarted);

    let reloaded = MasteryTracker::load(JsonFileStore::in_dir(dir.path()));
    assert_eq!(reloaded.value(topic), 100);
}

// ── syllabus ─────────────────────────────────────────────────────────────────

#[test]
fn syllabus_has_five_topics_per_paper() {
    assert_eq!(all_topics().count(), 10);
    assert_eq!(topics_for(PaperFilter::Only(Paper::S1)).len(), 5);
    assert_eq!(topics_for(PaperFilter::Only(Paper::S2)).len(), 5);
}

#[test]
fn topic_ids_round_trip_through_serde() {
    for topic in StatTopic::ALL {
        let json = serde_json::to_string(&topic).unwrap();
        assert_eq!(json, format!("\"{}\"", topic.id()));
        let back: StatTopic = serde_json::from_str(&json).unwrap();
        assert_eq!(back, topic);
        assert_eq!(StatTopic::from_id(topic.id()), Some(topic));
    }
}

// ── blueprint ────────────────────────────────────────────────────────────────

#[test]
fn parsed_blueprint_instantiates() {
    let raw = r#"```json
    {
        "questionTemplate": "{{context}} The mass is N({{mu}}, {{sigma}}^{{2}}). Find P(X > {{mu}}).",
        "narrativeLibrary": ["A bakery weighs loaves.", "A lab weighs samples."],
        "sympyCode": "X = Normal('X', mu, sigma)",
        "stackPrtLogic": "ATNumerical(ans1, 0.5, 0.001)"
    }
    ```"#;
    let blueprint = payload::parse_blueprint(raw).unwrap();

    let values: BTreeMap<String, String> =
        [("mu", "800"), ("sigma", "12")].iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    let question = instantiate(&blueprint, &values, Some(9));

    assert!(question.unresolved.is_empty());
    assert!(question.text.contains("N(800, 12^{{2}})"));
    assert!(question.text.ends_with("Find P(X > 800)."));
    let context = question.context.unwrap();
    assert!(question.text.starts_with(&context));
}

#[test]
fn solution_math_renders_through_host_renderer() {
    struct Tagged;
    impl MathRenderer for Tagged {
        type Error = std::convert::Infallible;
        fn render(&self, latex: &str, _: bool) -> Result<String, Self::Error> {
            Ok(format!("<math>{latex}</math>"))
        }
    }

    assert_eq!(render_math("$\\mu = 4$", Some(&Tagged), ContentKind::Math), "<math>\\mu = 4</math>");
    assert_eq!(render_math::<Tagged>("line one\nline two", None, ContentKind::Prose), "line one<br/>line two");
}
