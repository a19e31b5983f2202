//! Free-text answer matching.
//!
//! The matcher is deliberately lenient: after stripping whitespace and
//! lower-casing, a candidate is accepted when either string contains the
//! other. `"12"` therefore matches `"12.5"`, and `"x = 12.5 cm"` matches
//! `"12.5"`. It has no algebra: `"2.5"` and `"5/2"` do not match.

use crate::training_engine::models::{GradingRequest, SubQuestion, Verdict};

/// Remove every whitespace character and lower-case the rest.
pub fn normalize(answer: &str) -> String {
    answer
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Bidirectional substring match on normalized strings. An empty candidate
/// is never acceptable.
pub fn is_acceptable(candidate: &str, canonical: &str) -> bool {
    let candidate = normalize(candidate);
    if candidate.is_empty() {
        return false;
    }
    let canonical = normalize(canonical);
    canonical.contains(&candidate) || candidate.contains(&canonical)
}

pub fn grade(request: &GradingRequest) -> Verdict {
    if is_acceptable(&request.candidate_answer, &request.canonical_answer) {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

impl SubQuestion {
    /// Grade a typed answer against this part's final answer.
    pub fn check(&self, candidate: &str) -> Verdict {
        grade(&GradingRequest {
            canonical_answer: self.final_answer.clone(),
            candidate_answer: candidate.to_string(),
        })
    }
}
