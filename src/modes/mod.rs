//! Response policies.
//!
//! This module provides the three ways a query can be answered:
//! - [`RuleMatcher`]: fixed keyword-to-canned-response lookup
//! - [`GenerativeResponder`]: language-model output behind a relevance filter
//! - [`HybridSelector`]: picks between the two according to a [`Policy`]

mod generative;
mod hybrid;
mod rule;

pub use generative::*;
pub use hybrid::*;
pub use rule::*;

use serde::{Deserialize, Serialize};

/// Response policy selected for a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Keyword rules only.
    Rule,
    /// Generative model only.
    Ai,
    /// Rules first, generative model on a miss.
    #[default]
    Hybrid,
}

impl Policy {
    /// All policies, in dashboard display order.
    pub const ALL: [Policy; 3] = [Policy::Hybrid, Policy::Rule, Policy::Ai];

    /// Get the policy name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Rule => "rule",
            Policy::Ai => "ai",
            Policy::Hybrid => "hybrid",
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rule" => Ok(Policy::Rule),
            "ai" => Ok(Policy::Ai),
            "hybrid" => Ok(Policy::Hybrid),
            _ => Err(format!("Unknown response policy: {}", s)),
        }
    }
}
