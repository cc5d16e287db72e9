//! Text-generation capability seam.
//!
//! The assistant treats the language model as an opaque function from a
//! prompt to an ordered list of candidates. [`crate::langbase::LangbaseClient`]
//! is the production implementation; tests substitute their own.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GenerationResult;

/// A single-turn generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Raw prompt text, passed through unmodified.
    pub prompt: String,
    /// Upper bound on the generated output length.
    pub max_output_length: u32,
    /// Number of candidates requested.
    pub candidate_count: u32,
}

impl GenerationRequest {
    /// Create a request for a single candidate.
    pub fn new(prompt: impl Into<String>, max_output_length: u32) -> Self {
        Self {
            prompt: prompt.into(),
            max_output_length,
            candidate_count: 1,
        }
    }
}

/// One generated candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub text: String,
}

impl Candidate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// External text-generation capability.
///
/// Implementations must return candidates in model order. Faults (network,
/// timeout, malformed payloads) are returned as errors and never masked.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> GenerationResult<Vec<Candidate>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_to_one_candidate() {
        let req = GenerationRequest::new("what is a fever", 100);
        assert_eq!(req.prompt, "what is a fever");
        assert_eq!(req.max_output_length, 100);
        assert_eq!(req.candidate_count, 1);
    }
}
