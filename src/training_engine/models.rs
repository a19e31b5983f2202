use std::fmt;
use serde::{Deserialize, Serialize};

use crate::training_engine::sampler::NORMAL_SPAN_SIGMAS;

// ---------------------------------------------------------------------------
// Syllabus metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Paper {
    S1,
    S2,
}

impl fmt::Display for Paper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Paper::S1 => write!(f, "S1"),
            Paper::S2 => write!(f, "S2"),
        }
    }
}

/// Which papers a topic listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaperFilter {
    #[default]
    All,
    Only(Paper),
}

impl PaperFilter {
    pub fn matches(self, paper: Paper) -> bool {
        match self {
            PaperFilter::All => true,
            PaperFilter::Only(p) => p == paper,
        }
    }
}

/// One syllabus unit. Serialized as its stable id string, which is also the
/// key used for mastery records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatTopic {
    #[serde(rename = "S1: Representation of Data")]
    DataRepresentation,
    #[serde(rename = "S1: Permutations & Combinations")]
    PermutationsCombinations,
    #[serde(rename = "S1: Probability")]
    Probability,
    #[serde(rename = "S1: Discrete Random Variables")]
    DiscreteVariables,
    #[serde(rename = "S1: The Normal Distribution")]
    NormalDistribution,
    #[serde(rename = "S2: The Poisson Distribution")]
    PoissonDistribution,
    #[serde(rename = "S2: Linear Combinations of RVs")]
    LinearCombinations,
    #[serde(rename = "S2: Continuous Random Variables")]
    ContinuousVariables,
    #[serde(rename = "S2: Sampling and Estimation")]
    SamplingEstimation,
    #[serde(rename = "S2: Hypothesis Testing")]
    HypothesisTesting,
}

impl StatTopic {
    /// All ten topics in syllabus order.
    pub const ALL: [StatTopic; 10] = [
        StatTopic::DataRepresentation,
        StatTopic::PermutationsCombinations,
        StatTopic::Probability,
        StatTopic::DiscreteVariables,
        StatTopic::NormalDistribution,
        StatTopic::PoissonDistribution,
        StatTopic::LinearCombinations,
        StatTopic::ContinuousVariables,
        StatTopic::SamplingEstimation,
        StatTopic::HypothesisTesting,
    ];

    /// Stable identifier, e.g. `"S1: Probability"`.
    pub fn id(self) -> &'static str {
        match self {
            StatTopic::DataRepresentation       => "S1: Representation of Data",
            StatTopic::PermutationsCombinations => "S1: Permutations & Combinations",
            StatTopic::Probability              => "S1: Probability",
            StatTopic::DiscreteVariables        => "S1: Discrete Random Variables",
            StatTopic::NormalDistribution       => "S1: The Normal Distribution",
            StatTopic::PoissonDistribution      => "S2: The Poisson Distribution",
            StatTopic::LinearCombinations       => "S2: Linear Combinations of RVs",
            StatTopic::ContinuousVariables      => "S2: Continuous Random Variables",
            StatTopic::SamplingEstimation       => "S2: Sampling and Estimation",
            StatTopic::HypothesisTesting        => "S2: Hypothesis Testing",
        }
    }

    /// The id without its paper prefix (`"Probability"`).
    pub fn label(self) -> &'static str {
        let id = self.id();
        id.split_once(": ").map(|(_, rest)| rest).unwrap_or(id)
    }

    pub fn paper(self) -> Paper {
        match self {
            StatTopic::DataRepresentation
            | StatTopic::PermutationsCombinations
            | StatTopic::Probability
            | StatTopic::DiscreteVariables
            | StatTopic::NormalDistribution => Paper::S1,
            _ => Paper::S2,
        }
    }

    pub fn from_id(id: &str) -> Option<StatTopic> {
        StatTopic::ALL.into_iter().find(|t| t.id() == id)
    }
}

impl fmt::Display for StatTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicConfig {
    pub id: StatTopic,
    pub paper: Paper,
    pub icon: &'static str,
    pub description: &'static str,
    pub syllabus_objectives: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MasteryStatus {
    Unstarted,
    Practicing,
    Mastered,
}

impl MasteryStatus {
    pub fn from_value(value: u8) -> MasteryStatus {
        match value {
            0 => MasteryStatus::Unstarted,
            100.. => MasteryStatus::Mastered,
            _ => MasteryStatus::Practicing,
        }
    }
}

impl fmt::Display for MasteryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MasteryStatus::Unstarted  => write!(f, "unstarted"),
            MasteryStatus::Practicing => write!(f, "practicing"),
            MasteryStatus::Mastered   => write!(f, "mastered"),
        }
    }
}

// ---------------------------------------------------------------------------
// Distributions and sample points
// ---------------------------------------------------------------------------

/// Direction of a highlighted tail. The wire names are the legacy
/// `"greater"` / `"less"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    #[serde(rename = "greater")]
    AtLeast,
    #[serde(rename = "less")]
    AtMost,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::AtLeast => write!(f, "≥"),
            Comparison::AtMost  => write!(f, "≤"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionFilter {
    pub threshold: f64,
    pub comparison: Comparison,
}

impl RegionFilter {
    pub fn at_least(threshold: f64) -> Self {
        RegionFilter { threshold, comparison: Comparison::AtLeast }
    }

    pub fn at_most(threshold: f64) -> Self {
        RegionFilter { threshold, comparison: Comparison::AtMost }
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P(X {} {})", self.comparison, self.threshold)
    }
}

/// Largest |x| a Normal grid may reach. Leaves room for the `10^places`
/// scale in `sampler::round_to`.
pub const MAX_GRID_EXTENT: f64 = 1e300;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DistributionSpec {
    /// `sample_size` (n > 1) only annotates the series with a standard error.
    #[serde(rename_all = "camelCase")]
    Normal { mean: f64, stddev: f64, sample_size: Option<u32> },
    #[serde(rename_all = "camelCase")]
    Binomial { trials: u32, success_probability: f64 },
    Poisson { rate: f64 },
}

impl DistributionSpec {
    pub fn normal(mean: f64, stddev: f64) -> Self {
        DistributionSpec::Normal { mean, stddev, sample_size: None }
    }

    pub fn binomial(trials: u32, success_probability: f64) -> Self {
        DistributionSpec::Binomial { trials, success_probability }
    }

    pub fn poisson(rate: f64) -> Self {
        DistributionSpec::Poisson { rate }
    }

    /// Attach a sample size to a Normal spec; other variants are returned unchanged.
    pub fn with_sample_size(self, n: u32) -> Self {
        match self {
            DistributionSpec::Normal { mean, stddev, .. } =>
                DistributionSpec::Normal { mean, stddev, sample_size: Some(n) },
            other => other,
        }
    }

    /// True when every parameter satisfies the data-model invariants and a
    /// Normal grid stays within [`MAX_GRID_EXTENT`].
    pub fn is_valid(&self) -> bool {
        match *self {
            DistributionSpec::Normal { mean, stddev, .. } =>
                mean.is_finite()
                    && stddev.is_finite()
                    && stddev > 0.0
                    && mean.abs() + NORMAL_SPAN_SIGMAS * stddev <= MAX_GRID_EXTENT,
            DistributionSpec::Binomial { success_probability: p, .. } =>
                (0.0..=1.0).contains(&p),
            DistributionSpec::Poisson { rate } => rate.is_finite() && rate > 0.0,
        }
    }

    /// `σ/√n` for a Normal spec carrying a sample size above one.
    pub fn standard_error(&self) -> Option<f64> {
        match *self {
            DistributionSpec::Normal { stddev, sample_size: Some(n), .. } if n > 1 =>
                Some(stddev / f64::from(n).sqrt()),
            _ => None,
        }
    }
}

impl fmt::Display for DistributionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistributionSpec::Normal { mean, stddev, .. } =>
                write!(f, "Normal Distribution (μ={mean}, σ={stddev})"),
            DistributionSpec::Binomial { trials, success_probability } =>
                write!(f, "Binomial Distribution (n={trials}, p={success_probability})"),
            DistributionSpec::Poisson { rate } =>
                write!(f, "Poisson Distribution (λ={rate})"),
        }
    }
}

/// x-coordinate of a sample point: a real for densities, a count for masses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SamplePosition {
    Discrete(u32),
    Continuous(f64),
}

impl SamplePosition {
    pub fn as_f64(self) -> f64 {
        match self {
            SamplePosition::Continuous(x) => x,
            SamplePosition::Discrete(k) => f64::from(k),
        }
    }
}

impl fmt::Display for SamplePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplePosition::Continuous(x) => write!(f, "{x:.2}"),
            SamplePosition::Discrete(k) => write!(f, "{k}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplePoint {
    pub position: SamplePosition,
    /// Density (continuous) or probability (discrete), never negative.
    pub value: f64,
    pub in_region: bool,
}

/// A chart-ready series plus the annotations the renderer draws around it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleSeries {
    pub spec: Option<DistributionSpec>,
    pub region: Option<RegionFilter>,
    pub points: Vec<SamplePoint>,
    pub standard_error: Option<f64>,
}

impl SampleSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(μ - SE, μ + SE)` when a standard error is attached to a Normal series.
    pub fn standard_error_band(&self) -> Option<(f64, f64)> {
        match (self.spec, self.standard_error) {
            (Some(DistributionSpec::Normal { mean, .. }), Some(se)) => Some((mean - se, mean + se)),
            _ => None,
        }
    }

    /// Sum of the rounded values of highlighted points.
    pub fn highlighted_total(&self) -> f64 {
        self.points.iter().filter(|p| p.in_region).map(|p| p.value).sum()
    }
}

// ---------------------------------------------------------------------------
// Generated content (wire shapes from the content service)
// ---------------------------------------------------------------------------

/// Distribution tag as sent by the content service. Tags outside the three
/// supported families decode to `Unknown` and render nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionKind {
    Normal,
    Binomial,
    Poisson,
    #[serde(other)]
    Unknown,
}

/// Loose chart parameters attached to a generated question.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistParams {
    #[serde(rename = "type")]
    pub kind: DistributionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mu: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigma: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lambda: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
}

impl DistParams {
    pub fn new(kind: DistributionKind) -> Self {
        DistParams {
            kind,
            mu: None,
            sigma: None,
            n: None,
            p: None,
            lambda: None,
            threshold: None,
            comparison: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintOutput {
    /// Question text with `{{name}}` placeholders.
    pub question_template: String,
    pub narrative_library: Vec<String>,
    pub sympy_code: String,
    pub stack_prt_logic: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionStep {
    pub label: String,
    pub math: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Part {
    A,
    B,
    C,
    D,
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::A => write!(f, "a"),
            Part::B => write!(f, "b"),
            Part::C => write!(f, "c"),
            Part::D => write!(f, "d"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubQuestion {
    pub id: String,
    pub part: Part,
    pub text: String,
    pub marks: f64,
    pub step_by_step_solution: Vec<SolutionStep>,
    pub final_answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleQuestion {
    pub id: String,
    pub context: String,
    pub question_header: String,
    pub sub_questions: Vec<SubQuestion>,
    pub simplified_explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dist_params: Option<DistParams>,
}

// ---------------------------------------------------------------------------
// Grading and request bookkeeping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingRequest {
    pub canonical_answer: String,
    pub candidate_answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn is_correct(self) -> bool {
        self == Verdict::Correct
    }
}

/// Identifies one generation round trip. A completed round trip whose tag no
/// longer matches the session's current tag is stale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestTag {
    pub topic: StatTopic,
    pub id: String,
}

impl fmt::Display for RequestTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.topic)
    }
}
