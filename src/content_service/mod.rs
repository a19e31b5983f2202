//! External generation service.
//!
//! Two request contracts, both asynchronous and both fallible:
//!
//! | Call                 | Returns               | Model role              |
//! |----------------------|-----------------------|-------------------------|
//! | `blueprint`          | [`BlueprintOutput`]   | procedural template     |
//! | `sample_questions`   | `Vec<SampleQuestion>` | worked exam questions   |
//!
//! [`GeminiClient`] is the HTTP implementation; tests and hosts can supply
//! any other [`ContentService`].

pub mod gemini;
pub mod payload;
pub mod prompts;

use async_trait::async_trait;

use crate::training_engine::{
    error::GenerationError,
    models::{BlueprintOutput, SampleQuestion, StatTopic},
};

pub use gemini::{GeminiClient, GeminiConfig};

#[async_trait]
pub trait ContentService: Send + Sync {
    /// Procedural blueprint for `topic`.
    async fn blueprint(&self, topic: StatTopic) -> Result<BlueprintOutput, GenerationError>;

    /// Worked practice questions for `topic`, steered by the syllabus
    /// `objectives`.
    async fn sample_questions(
        &self,
        topic: StatTopic,
        objectives: &[&str],
    ) -> Result<Vec<SampleQuestion>, GenerationError>;
}

#[async_trait]
impl<T: ContentService + ?Sized> ContentService for std::sync::Arc<T> {
    async fn blueprint(&self, topic: StatTopic) -> Result<BlueprintOutput, GenerationError> {
        (**self).blueprint(topic).await
    }

    async fn sample_questions(
        &self,
        topic: StatTopic,
        objectives: &[&str],
    ) -> Result<Vec<SampleQuestion>, GenerationError> {
        (**self).sample_questions(topic, objectives).await
    }
}
