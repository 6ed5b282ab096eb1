//! Question request and answer types.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// A question about the business behind `source_url`.
///
/// Missing fields deserialize as empty strings so that validation, not the
/// decoder, decides what counts as an invalid request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    /// Business page address
    #[serde(default, alias = "yelp_url")]
    pub source_url: String,

    /// Natural-language question
    #[serde(default)]
    pub question: String,
}

impl AskRequest {
    /// Create a new request.
    pub fn new(source_url: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            question: question.into(),
        }
    }

    /// Trim both fields and reject blank ones.
    pub fn validated(&self) -> Result<ValidatedRequest<'_>> {
        let source_url = self.source_url.trim();
        let question = self.question.trim();

        if source_url.is_empty() {
            return Err(RagError::invalid_request("source_url is required"));
        }
        if question.is_empty() {
            return Err(RagError::invalid_request("question is required"));
        }

        Ok(ValidatedRequest {
            source_url,
            question,
        })
    }
}

/// Trimmed, non-blank request fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedRequest<'a> {
    pub source_url: &'a str,
    pub question: &'a str,
}

/// The synthesized answer and what it was grounded on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    /// Raw completion text, unmodified
    pub text: String,

    /// Reviews collected for the request
    pub corpus_size: usize,

    /// Reviews placed in the prompt
    pub retrieved: usize,
}
