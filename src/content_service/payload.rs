//! Boundary validation of generated payloads.
//!
//! Decoding is strict (every required field present, `part` one of `a`–`d`,
//! `comparison` one of `greater`/`less`), then a semantic pass rejects
//! shapes that decode but cannot be used: blank ids, questions without
//! parts, negative marks, duplicate question ids.

use std::collections::HashSet;

use serde::de::DeserializeOwned;

use crate::training_engine::{
    error::GenerationError,
    models::{BlueprintOutput, SampleQuestion},
};

/// Drop a surrounding Markdown code fence (```json ... ```), if present.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, GenerationError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    serde_json::from_str(body).map_err(GenerationError::from_decode)
}

fn malformed(msg: impl Into<String>) -> GenerationError {
    GenerationError::Malformed(msg.into())
}

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

pub fn parse_blueprint(text: &str) -> Result<BlueprintOutput, GenerationError> {
    let blueprint: BlueprintOutput = decode(text)?;
    validate_blueprint(&blueprint)?;
    Ok(blueprint)
}

pub fn parse_questions(text: &str) -> Result<Vec<SampleQuestion>, GenerationError> {
    let questions: Vec<SampleQuestion> = decode(text)?;
    validate_questions(&questions)?;
    Ok(questions)
}

pub fn validate_blueprint(blueprint: &BlueprintOutput) -> Result<(), GenerationError> {
    if blank(&blueprint.question_template) {
        return Err(malformed("blueprint has an empty questionTemplate"));
    }
    if blueprint.narrative_library.iter().all(|n| blank(n)) {
        return Err(malformed("blueprint has an empty narrativeLibrary"));
    }
    Ok(())
}

pub fn validate_questions(questions: &[SampleQuestion]) -> Result<(), GenerationError> {
    if questions.is_empty() {
        return Err(malformed("no questions returned"));
    }
    let mut seen = HashSet::new();
    for q in questions {
        if blank(&q.id) {
            return Err(malformed("question with empty id"));
        }
        if !seen.insert(q.id.as_str()) {
            return Err(malformed(format!("duplicate question id {}", q.id)));
        }
        if blank(&q.question_header) {
            return Err(malformed(format!("question {} has no header", q.id)));
        }
        if q.sub_questions.is_empty() {
            return Err(malformed(format!("question {} has no parts", q.id)));
        }
        for sub in &q.sub_questions {
            if blank(&sub.id) || blank(&sub.text) {
                return Err(malformed(format!("question {} part {} is blank", q.id, sub.part)));
            }
            if blank(&sub.final_answer) {
                return Err(malformed(format!("question {} part {} has no final answer", q.id, sub.part)));
            }
            if !sub.marks.is_finite() || sub.marks < 0.0 {
                return Err(malformed(format!("question {} part {} has invalid marks", q.id, sub.part)));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training_engine::error::ErrorKind;
    use crate::training_engine::models::{Comparison, DistributionKind, Part};

    const BLUEPRINT: &str = r#"{
        "questionTemplate": "{{context}} X ~ B({{n}}, {{p}})",
        "narrativeLibrary": ["Seeds germinate.", "Parts are faulty."],
        "sympyCode": "from sympy.stats import Binomial",
        "stackPrtLogic": "ATAlgEquiv(ans1, ta)"
    }"#;

    const QUESTIONS: &str = r#"[{
        "id": "q1",
        "context": "Quality control",
        "questionHeader": "Components are faulty independently with probability 0.3.",
        "subQuestions": [{
            "id": "q1a",
            "part": "a",
            "text": "Find P(X \\geq 4) for a batch of 10.",
            "marks": 3,
            "stepByStepSolution": [
                { "label": "Model", "math": "X \\sim B(10, 0.3)", "explanation": "Fixed trials." }
            ],
            "finalAnswer": "0.350"
        }],
        "simplifiedExplanation": "Add up the upper tail.",
        "distParams": { "type": "binomial", "n": 10, "p": 0.3, "threshold": 4, "comparison": "greater" }
    }]"#;

    #[test]
    fn parses_valid_blueprint() {
        let bp = parse_blueprint(BLUEPRINT).unwrap();
        assert_eq!(bp.narrative_library.len(), 2);
    }

    #[test]
    fn parses_valid_questions() {
        let qs = parse_questions(QUESTIONS).unwrap();
        assert_eq!(qs.len(), 1);
        let sub = &qs[0].sub_questions[0];
        assert_eq!(sub.part, Part::A);
        assert_eq!(sub.marks, 3.0);
        let params = qs[0].dist_params.unwrap();
        assert_eq!(params.kind, DistributionKind::Binomial);
        assert_eq!(params.comparison, Some(Comparison::AtLeast));
    }

    #[test]
    fn fenced_payload_is_accepted() {
        let fenced = format!("```json\n{BLUEPRINT}\n```");
        assert!(parse_blueprint(&fenced).is_ok());
        assert_eq!(strip_code_fence("```\n[]\n```"), "[]");
        assert_eq!(strip_code_fence("  {}  "), "{}");
    }

    #[test]
    fn empty_body_is_generation_failure() {
        let err = parse_blueprint("   ").unwrap_err();
        assert!(matches!(err, GenerationError::EmptyResponse));
        assert_eq!(err.kind(), ErrorKind::GenerationFailed);
    }

    #[test]
    fn missing_field_is_malformed() {
        let err = parse_blueprint(r#"{"questionTemplate": "x", "narrativeLibrary": []}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedGenerationPayload);
    }

    #[test]
    fn unknown_part_letter_is_malformed() {
        let bad = QUESTIONS.replace(r#""part": "a""#, r#""part": "e""#);
        assert_eq!(parse_questions(&bad).unwrap_err().kind(), ErrorKind::MalformedGenerationPayload);
    }

    #[test]
    fn unknown_distribution_tag_still_parses() {
        let odd = QUESTIONS.replace(r#""type": "binomial""#, r#""type": "geometric""#);
        let qs = parse_questions(&odd).unwrap();
        assert_eq!(qs[0].dist_params.unwrap().kind, DistributionKind::Unknown);
    }

    #[test]
    fn semantic_checks() {
        let empty: Vec<SampleQuestion> = Vec::new();
        assert!(validate_questions(&empty).is_err());

        let mut qs = parse_questions(QUESTIONS).unwrap();
        qs[0].sub_questions[0].marks = -1.0;
        assert!(validate_questions(&qs).is_err());

        let mut qs = parse_questions(QUESTIONS).unwrap();
        qs.push(qs[0].clone());
        let err = validate_questions(&qs).unwrap_err();
        assert!(err.to_string().contains("duplicate question id q1"));

        let mut qs = parse_questions(QUESTIONS).unwrap();
        qs[0].sub_questions.clear();
        assert!(validate_questions(&qs).is_err());

        let mut bp = parse_blueprint(BLUEPRINT).unwrap();
        bp.narrative_library = vec!["  ".into()];
        assert_eq!(validate_blueprint(&bp).unwrap_err().kind(), ErrorKind::MalformedGenerationPayload);
    }

    #[test]
    fn not_json_is_generation_failure() {
        assert_eq!(parse_questions("Sorry, I can't").unwrap_err().kind(), ErrorKind::GenerationFailed);
    }
}
