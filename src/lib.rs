//! # Healthcare Assistant
//!
//! A single-session healthcare-query assistant for the terminal. Each
//! question is answered by one of three response policies and logged with
//! an optional user rating.
//!
//! ## Features
//!
//! - **Rule**: fixed keyword-to-canned-response lookup
//! - **AI**: generated text from a Langbase pipe, behind a relevance filter
//! - **Hybrid**: rules first, generated text when no rule matches
//! - **Query log**: per-session log of queries, policies and ratings, with a
//!   per-policy summary
//!
//! ## Architecture
//!
//! ```text
//! stdin → Repl → Assistant → HybridSelector → RuleMatcher
//!                    ↓                      ↘ GenerativeResponder → Langbase Pipes (HTTP)
//!              SessionState (memory)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use healthcare_assistant::{Assistant, Config};
//! use healthcare_assistant::langbase::LangbaseClient;
//! use healthcare_assistant::repl::Repl;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let langbase = LangbaseClient::new(&config.langbase, config.request.clone())?;
//!     let assistant = Assistant::from_config(&config, Arc::new(langbase));
//!     let mut repl = Repl::new(assistant, config.generation.default_policy);
//!     repl.run().await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Session handlers tying policies, auth and state together.
pub mod assistant;
/// Pluggable login gate.
pub mod auth;
/// Configuration management.
pub mod config;
/// Error types and result aliases for the application.
pub mod error;
/// Text-generation capability trait and request types.
pub mod generation;
/// Langbase API client and types for pipe communication.
pub mod langbase;
/// Response policies (rule, ai, hybrid).
pub mod modes;
/// Terminal front end.
pub mod repl;
/// In-memory session state: chat history and query log.
pub mod session;

pub use assistant::{Assistant, Submission};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use modes::Policy;
