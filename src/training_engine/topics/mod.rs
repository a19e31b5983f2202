//! Syllabus catalogue, grouped by paper.
//!
//! Each paper module holds a static `TOPICS` table with the [`TopicConfig`]
//! of every topic on that paper, in syllabus order.

use crate::training_engine::models::{PaperFilter, StatTopic, TopicConfig};

/// Representation of data, permutations, probability, discrete RVs, Normal.
pub mod s1;
/// Poisson, linear combinations, continuous RVs, sampling, hypothesis tests.
pub mod s2;

/// Every topic on both papers, S1 first.
pub fn all_topics() -> impl Iterator<Item = &'static TopicConfig> {
    s1::TOPICS.iter().chain(s2::TOPICS.iter())
}

/// Topics whose paper passes `filter`.
pub fn topics_for(filter: PaperFilter) -> Vec<&'static TopicConfig> {
    all_topics().filter(|t| filter.matches(t.paper)).collect()
}

pub fn topic_config(topic: StatTopic) -> Option<&'static TopicConfig> {
    all_topics().find(|c| c.id == topic)
}

/// Objectives for `topic`, empty if the catalogue has no entry.
pub fn objectives(topic: StatTopic) -> &'static [&'static str] {
    topic_config(topic).map(|c| c.syllabus_objectives).unwrap_or(&[])
}
