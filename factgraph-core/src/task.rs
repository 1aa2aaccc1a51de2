use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const NEWS_MIN_CHARS: usize = 20;
pub const QUESTION_MIN_CHARS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Processing,
    Done,
    Error,
}

impl TaskStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, TaskStatus::Processing)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Processing => "processing",
            TaskStatus::Done => "done",
            TaskStatus::Error => "error",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// News article submitted for verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsIn {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsOut {
    pub task_id: String,
    pub status: TaskStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QIn {
    pub question: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QOut {
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be at least {min} characters (got {actual})")]
    TooShort {
        field: &'static str,
        min: usize,
        actual: usize,
    },
}

fn require_min_chars(field: &'static str, value: &str, min: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual < min {
        return Err(ValidationError::TooShort { field, min, actual });
    }
    Ok(())
}

impl NewsIn {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_min_chars("text", &self.text, NEWS_MIN_CHARS)
    }
}

impl QIn {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_min_chars("question", &self.question, QUESTION_MIN_CHARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        let out = NewsOut {
            task_id: "1a2b3c4d".into(),
            status: TaskStatus::Processing,
        };
        assert_eq!(
            serde_json::to_value(&out).expect("json"),
            serde_json::json!({"task_id": "1a2b3c4d", "status": "processing"})
        );
        let back: NewsOut =
            serde_json::from_str(r#"{"task_id":"x","status":"done"}"#).expect("parse");
        assert_eq!(back.status, TaskStatus::Done);
        assert!(back.status.is_terminal());
    }

    #[test]
    fn news_text_needs_twenty_characters() {
        let short = NewsIn {
            text: "too short".into(),
        };
        assert_eq!(
            short.validate(),
            Err(ValidationError::TooShort {
                field: "text",
                min: 20,
                actual: 9
            })
        );
        let ok = NewsIn {
            text: "a".repeat(NEWS_MIN_CHARS),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        // three CJK characters are nine bytes
        let q = QIn {
            question: "是真的".into(),
        };
        assert!(q.validate().is_ok());
        let q = QIn {
            question: "真的".into(),
        };
        assert!(q.validate().is_err());
    }
}
