use tracing::debug;

use super::{GenerativeResponder, Policy, RuleMatcher};
use crate::error::GenerationResult;

/// Returned under [`Policy::Rule`] when no rule matches.
pub const NO_INFORMATION: &str = "Sorry, I don't have information on that.";

/// Combines the rule matcher and the generative responder under a policy.
#[derive(Clone)]
pub struct HybridSelector {
    rules: RuleMatcher,
    generative: GenerativeResponder,
    eager: bool,
}

impl HybridSelector {
    /// Create a selector that only calls the generator when the policy needs it
    pub fn new(generative: GenerativeResponder) -> Self {
        Self {
            rules: RuleMatcher::new(),
            generative,
            eager: false,
        }
    }

    /// Evaluate the generator on every call, whatever the policy and rule
    /// outcome. A generator fault then fails the call even under
    /// [`Policy::Rule`].
    pub fn with_eager_generation(mut self, eager: bool) -> Self {
        self.eager = eager;
        self
    }

    /// Produce a response for `text` using `policy`.
    pub async fn respond(&self, text: &str, policy: Policy) -> GenerationResult<String> {
        let rule_response = self.rules.find(&text.to_lowercase());

        let eager_response = if self.eager {
            Some(self.generative.generate(text).await?)
        } else {
            None
        };

        debug!(
            policy = %policy,
            rule_hit = rule_response.is_some(),
            eager = self.eager,
            "Selecting response"
        );

        match policy {
            Policy::Rule => Ok(rule_response.unwrap_or(NO_INFORMATION).to_string()),
            Policy::Ai => match eager_response {
                Some(response) => Ok(response),
                None => self.generative.generate(text).await,
            },
            Policy::Hybrid => match (rule_response, eager_response) {
                (Some(rule), _) => Ok(rule.to_string()),
                (None, Some(response)) => Ok(response),
                (None, None) => self.generative.generate(text).await,
            },
        }
    }
}
