use serde::{Deserialize, Serialize};

use crate::generation::{Candidate, GenerationRequest};

/// Message in a Langbase conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

/// Message role
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
}

/// Request to run a Langbase pipe
#[derive(Debug, Clone, Serialize)]
pub struct PipeRequest {
    /// Pipe name (required by Langbase API)
    pub name: String,
    pub messages: Vec<Message>,
    /// Disable streaming (default: false for non-streaming response)
    #[serde(default)]
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Number of completions requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
}

/// Response from a Langbase pipe
#[derive(Debug, Clone, Deserialize)]
pub struct PipeResponse {
    pub success: bool,
    pub completion: String,
    #[serde(rename = "threadId")]
    pub thread_id: Option<String>,
    pub raw: Option<RawResponse>,
}

/// Raw model response details
#[derive(Debug, Clone, Deserialize)]
pub struct RawResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One model choice inside the raw response
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

/// Message payload of a choice
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

impl PipeRequest {
    /// Create a new pipe request with name and messages
    pub fn new(name: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            name: name.into(),
            messages,
            stream: false,
            max_tokens: None,
            n: None,
        }
    }

    /// Build a single-turn request from a generation request
    pub fn from_generation(name: impl Into<String>, request: &GenerationRequest) -> Self {
        Self::new(name, vec![Message::user(request.prompt.clone())])
            .with_max_tokens(request.max_output_length)
            .with_candidates(request.candidate_count)
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the number of completions requested
    pub fn with_candidates(mut self, n: u32) -> Self {
        self.n = Some(n);
        self
    }
}

impl PipeResponse {
    /// Candidates in model order.
    ///
    /// Uses `raw.choices` when the pipe forwards them, otherwise the single
    /// `completion` string.
    pub fn candidates(&self) -> Vec<Candidate> {
        let from_choices: Vec<Candidate> = self
            .raw
            .as_ref()
            .map(|raw| {
                raw.choices
                    .iter()
                    .filter_map(|c| c.message.as_ref().and_then(|m| m.content.clone()))
                    .map(Candidate::new)
                    .collect()
            })
            .unwrap_or_default();

        if !from_choices.is_empty() {
            return from_choices;
        }

        vec![Candidate::new(self.completion.clone())]
    }
}
