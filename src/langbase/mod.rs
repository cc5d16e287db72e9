//! Langbase Pipes client.
//!
//! Runs a single configured pipe per query and exposes the result through
//! the [`crate::generation::TextGenerator`] trait.

mod client;
mod types;


pub use client::LangbaseClient;
pub use types::*;
