use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::error::{GenerationError, GenerationResult};
use crate::generation::{GenerationRequest, TextGenerator};

/// Keywords that mark generated text as healthcare-related.
pub const RELEVANCE_KEYWORDS: &[&str] = &[
    "doctor",
    "health",
    "symptom",
    "treatment",
    "medicine",
    "cough",
    "fever",
    "sore throat",
    "pain",
    "disease",
    "illness",
];

/// Returned in place of generated text that fails the relevance filter.
pub const ELABORATION_FALLBACK: &str =
    "I'm here to help with your healthcare queries. Could you please elaborate?";

/// Whether generated text mentions at least one relevance keyword.
pub fn is_relevant(text: &str) -> bool {
    let lowered = text.to_lowercase();
    RELEVANCE_KEYWORDS.iter().any(|k| lowered.contains(k))
}

/// Generative responder: calls the model and filters off-topic output.
#[derive(Clone)]
pub struct GenerativeResponder {
    generator: Arc<dyn TextGenerator>,
    max_output_length: u32,
}

impl GenerativeResponder {
    /// Create a new generative responder
    pub fn new(generator: Arc<dyn TextGenerator>, max_output_length: u32) -> Self {
        Self {
            generator,
            max_output_length,
        }
    }

    /// Generate a response for the raw user input.
    ///
    /// Faults from the generator propagate unchanged. Only the relevance
    /// fallback is handled here.
    pub async fn generate(&self, text: &str) -> GenerationResult<String> {
        let start = Instant::now();
        let request = GenerationRequest::new(text, self.max_output_length);

        let candidates = self.generator.generate(request).await?;
        let generated = candidates
            .into_iter()
            .next()
            .map(|c| c.text)
            .ok_or(GenerationError::NoCandidates)?;

        let latency_ms = start.elapsed().as_millis();

        if is_relevant(&generated) {
            debug!(latency_ms, chars = generated.len(), "Generated text passed relevance filter");
            Ok(generated)
        } else {
            info!(latency_ms, "Generated text judged irrelevant, using fallback");
            Ok(ELABORATION_FALLBACK.to_string())
        }
    }
}
