//! # stat_drill_gen
//!
//! Practice engine for A-Level Statistics (papers S1 and S2).
//!
//! The library samples Normal, Binomial and Poisson distributions into
//! chart-ready series, highlights threshold regions such as `P(X ≥ 4)`,
//! checks free-text answers against a mark-scheme answer, and tracks a
//! per-topic mastery score that persists between runs. Worked questions
//! and procedural blueprints come from an external generation service
//! behind the [`ContentService`] trait.
//!
//! ## How it works
//!
//! 1. Pick a [`StatTopic`] (see [`training_engine::topics`] for the syllabus).
//! 2. Call [`StudySession::generate`]: a blueprint and a question set are
//!    requested concurrently; on success mastery for the topic goes up by 5.
//! 3. Read [`StudySession::questions`], grade answers with
//!    [`StudySession::grade`] and plot [`StudySession::chart`].
//!
//! ## Key features
//!
//! - **Exact tails**: discrete probabilities are rounded to four places and
//!   the highlighted region uses the unrounded position, so `P(X ≥ 4)` for
//!   `B(10, 0.3)` starts exactly at `k = 4`.
//! - **Stale results are dropped**: a slow reply for a topic the student has
//!   already moved away from never overwrites the fresher selection.
//! - **Fail-open storage**: a missing or corrupt mastery file starts empty.
//!
//! ## Quick start
//!
//! ```rust
//! use stat_drill_gen::{sample_series, DistributionSpec, RegionFilter};
//!
//! let series = sample_series(&DistributionSpec::binomial(10, 0.3), Some(&RegionFilter::at_least(4.0)));
//! for point in &series.points {
//!     let mark = if point.in_region { "*" } else { " " };
//!     println!("[{mark}] {} {:.4}", point.position, point.value);
//! }
//! assert_eq!(series.points[4].value, 0.2001);
//! ```
//!
//! ```rust,no_run
//! use stat_drill_gen::{GeminiClient, JsonFileStore, MasteryTracker, StatTopic, StudySession};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = MasteryTracker::load(JsonFileStore::in_dir("."));
//! let session = StudySession::new(GeminiClient::from_env()?, tracker);
//! let generated = session.generate(StatTopic::PoissonDistribution).await?;
//! println!("{} questions, mastery {}", generated.question_count, generated.mastery);
//! # Ok(())
//! # }
//! ```

pub mod content_service;
pub mod math_render;
pub mod training_engine;

// Convenience re-exports so callers can use `stat_drill_gen::StudySession`
// directly without reaching into `training_engine::`.
pub use content_service::{ContentService, GeminiClient, GeminiConfig};
pub use math_render::{render_math, ContentKind, MathRenderer};
pub use training_engine::{
    grade, sample, sample_params, sample_series, BlueprintOutput, Comparison, DistParams,
    DistributionKind, DistributionSpec, ErrorKind, GenerationError, Generated, JsonFileStore,
    MasteryStatus, MasteryStore, MasteryTracker, MemoryStore, Paper, PaperFilter, Part,
    RegionFilter, SamplePoint, SamplePosition, SampleQuestion, SampleSeries, StatTopic,
    StudySession, SubQuestion, TopicConfig, Verdict,
};

#[cfg(test)]
mod tests;
