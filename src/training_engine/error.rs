use thiserror::Error;

use crate::training_engine::models::StatTopic;

/// Coarse classification surfaced to the caller. The UI only needs to know
/// whether a retry makes sense and whether the result was simply stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    GenerationFailed,
    MalformedGenerationPayload,
    Superseded,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("content service not configured: {0}")]
    NotConfigured(&'static str),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: reqwest::StatusCode, body: String },
    #[error("empty response from content service")]
    EmptyResponse,
    #[error("response is not valid JSON: {0}")]
    Unparseable(#[source] serde_json::Error),
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("result for {topic} superseded by a newer selection")]
    Superseded { topic: StatTopic },
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::Malformed(_) => ErrorKind::MalformedGenerationPayload,
            GenerationError::Superseded { .. } => ErrorKind::Superseded,
            _ => ErrorKind::GenerationFailed,
        }
    }

    /// Classify a payload decode failure: syntax and EOF errors mean the body
    /// was not JSON at all, anything else is valid JSON of the wrong shape.
    pub fn from_decode(err: serde_json::Error) -> Self {
        if err.is_data() {
            GenerationError::Malformed(err.to_string())
        } else {
            GenerationError::Unparseable(err)
        }
    }
}

#[derive(Debug, Error)]
pub enum MasteryError {
    #[error("mastery slot I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("mastery slot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training_engine::models::BlueprintOutput;

    #[test]
    fn syntax_error_is_generation_failure() {
        let err = serde_json::from_str::<BlueprintOutput>("{not json").unwrap_err();
        assert_eq!(GenerationError::from_decode(err).kind(), ErrorKind::GenerationFailed);
    }

    #[test]
    fn shape_error_is_malformed_payload() {
        let err = serde_json::from_str::<BlueprintOutput>(r#"{"questionTemplate": "x"}"#).unwrap_err();
        assert_eq!(
            GenerationError::from_decode(err).kind(),
            ErrorKind::MalformedGenerationPayload
        );
    }

    #[test]
    fn superseded_kind() {
        let err = GenerationError::Superseded { topic: StatTopic::Probability };
        assert_eq!(err.kind(), ErrorKind::Superseded);
        assert!(err.to_string().contains("S1: Probability"));
    }
}
