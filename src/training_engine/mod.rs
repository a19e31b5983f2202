//! Core practice engine: distributions, grading, mastery, and the study
//! session that drives generation.
//!
//! ## Module overview
//!
//! | Module          | Purpose |
//! |-----------------|---------|
//! | `models`        | Shared types: topics, distribution specs, sample points, wire shapes |
//! | `combinatorics` | Factorials and binomial coefficients in `f64` |
//! | `region`        | Threshold region test for highlighted chart points |
//! | `sampler`       | Normal / Binomial / Poisson series for charting |
//! | `grading`       | Permissive free-text answer matcher |
//! | `mastery`       | Per-topic progress counter and its persistence slot |
//! | `template`      | Fills `{{name}}` placeholders in a generated blueprint |
//! | `topics`        | Static syllabus table for papers S1 and S2 |
//! | `session`       | Topic selection, concurrent generation, stale-result discard |
//! | `error`         | Generation and storage errors |

pub mod combinatorics;
pub mod error;
pub mod grading;
pub mod mastery;
pub mod models;
pub mod region;
pub mod sampler;
pub mod session;
pub mod template;
pub mod topics;

pub use error::{ErrorKind, GenerationError, MasteryError};
pub use grading::grade;
pub use mastery::{JsonFileStore, MasteryStore, MasteryTracker, MemoryStore};
pub use models::{
    BlueprintOutput, Comparison, DistParams, DistributionKind, DistributionSpec, MasteryStatus,
    Paper, PaperFilter, Part, RegionFilter, SamplePoint, SamplePosition, SampleQuestion,
    SampleSeries, StatTopic, SubQuestion, TopicConfig, Verdict,
};
pub use sampler::{sample, sample_params, sample_series};
pub use session::{Generated, StudySession};
