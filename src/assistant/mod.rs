//! Session handlers.
//!
//! [`Assistant`] owns the [`SessionState`] for one interactive session and
//! exposes the operations the display surface calls: login, submit, rate,
//! and the read-only history and dashboard views.

use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::auth::{Authenticator, Credentials, StaticCredentials};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::generation::TextGenerator;
use crate::modes::{GenerativeResponder, HybridSelector, Policy};
use crate::session::{ChatHistory, MethodSummary, QueryLog, Rating, RecordHandle, SessionState};

/// Warning shown for blank submissions.
pub const EMPTY_QUERY_WARNING: &str = "Please enter a query.";

/// Outcome of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Handle for attaching a rating to this submission.
    pub handle: RecordHandle,
    /// Response shown to the user.
    pub response: String,
}

/// Handler layer for one session.
pub struct Assistant {
    state: SessionState,
    selector: HybridSelector,
    authenticator: Box<dyn Authenticator>,
}

impl Assistant {
    /// Create an assistant with a fresh session
    pub fn new(selector: HybridSelector, authenticator: Box<dyn Authenticator>) -> Self {
        Self {
            state: SessionState::new(),
            selector,
            authenticator,
        }
    }

    /// Wire up an assistant from configuration and a generator
    pub fn from_config(config: &Config, generator: Arc<dyn TextGenerator>) -> Self {
        let generative = GenerativeResponder::new(generator, config.generation.max_output_length);
        let selector =
            HybridSelector::new(generative).with_eager_generation(config.generation.eager);
        let authenticator = Box::new(StaticCredentials::from_config(&config.auth));
        Self::new(selector, authenticator)
    }

    /// Try to log in. The session flag is only ever set, never cleared, here.
    pub fn login(&mut self, username: &str, password: &str) -> bool {
        let ok = self
            .authenticator
            .authenticate(&Credentials::new(username, password));
        if ok {
            self.state.mark_authenticated();
            info!(session_id = %self.state.id, username = %username, "Login successful");
        } else {
            warn!(session_id = %self.state.id, username = %username, "Invalid credentials");
        }
        ok
    }

    /// End the session and start a fresh, logged-out one.
    pub fn logout(&mut self) {
        info!(
            session_id = %self.state.id,
            queries = self.state.query_log().len(),
            "Session ended"
        );
        self.state = SessionState::new();
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// Answer `query` with `policy` and log the exchange.
    ///
    /// Nothing is recorded unless a response was produced.
    pub async fn submit(&mut self, query: &str, policy: Policy) -> AppResult<Submission> {
        self.require_login()?;

        if query.trim().is_empty() {
            warn!(session_id = %self.state.id, "Rejected empty query");
            return Err(AppError::Validation {
                field: "query".to_string(),
                reason: EMPTY_QUERY_WARNING.to_string(),
            });
        }

        let start = Instant::now();
        let response = match self.selector.respond(query, policy).await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    session_id = %self.state.id,
                    policy = %policy,
                    error = %e,
                    "Query failed"
                );
                return Err(e.into());
            }
        };

        let handle = self.state.record_exchange(query, &response, policy);

        info!(
            session_id = %self.state.id,
            policy = %policy,
            record = handle.index(),
            latency_ms = start.elapsed().as_millis(),
            "Query answered"
        );

        Ok(Submission { handle, response })
    }

    /// Attach a 1-5 rating to the submission named by `handle`.
    pub fn rate(&mut self, handle: RecordHandle, value: i64) -> AppResult<()> {
        self.require_login()?;

        let rating = match Rating::try_from(value) {
            Ok(rating) => rating,
            Err(e) => {
                warn!(session_id = %self.state.id, error = %e, "Rejected rating");
                return Err(e.into());
            }
        };

        if let Err(e) = self.state.attach_rating(handle, rating) {
            warn!(session_id = %self.state.id, error = %e, "Rating not attached");
            return Err(e.into());
        }

        info!(
            session_id = %self.state.id,
            record = handle.index(),
            rating = rating.value(),
            "Rating attached"
        );
        Ok(())
    }

    /// Handle of the most recent submission, if any.
    pub fn latest_submission(&self) -> Option<RecordHandle> {
        self.state.query_log().latest()
    }

    pub fn history(&self) -> &ChatHistory {
        self.state.history()
    }

    pub fn query_log(&self) -> &QueryLog {
        self.state.query_log()
    }

    pub fn method_summary(&self) -> MethodSummary {
        self.state.query_log().method_summary()
    }

    pub fn session(&self) -> &SessionState {
        &self.state
    }

    fn require_login(&self) -> AppResult<()> {
        if self.state.is_authenticated() {
            Ok(())
        } else {
            Err(AppError::Unauthenticated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GenerationError, SessionError};
    use crate::generation::{Candidate, MockTextGenerator};
    use crate::modes::{ELABORATION_FALLBACK, NO_INFORMATION, RULES};

    fn assistant_with(mock: MockTextGenerator) -> Assistant {
        let generative = GenerativeResponder::new(Arc::new(mock), 100);
        Assistant::new(
            HybridSelector::new(generative),
            Box::new(StaticCredentials::new("user", "pass")),
        )
    }

    fn logged_in(mock: MockTextGenerator) -> Assistant {
        let mut assistant = assistant_with(mock);
        assert!(assistant.login("user", "pass"));
        assistant
    }

    fn silent_generator() -> MockTextGenerator {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().times(0);
        mock
    }

    #[test]
    fn test_login() {
        let mut assistant = assistant_with(silent_generator());
        assert!(!assistant.login("user", "nope"));
        assert!(!assistant.is_authenticated());
        assert!(assistant.login("user", "pass"));
        assert!(assistant.is_authenticated());
    }

    #[tokio::test]
    async fn test_submit_requires_login() {
        let mut assistant = assistant_with(silent_generator());
        let err = assistant.submit("fever", Policy::Rule).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
        assert!(assistant.history().is_empty());
        assert!(assistant.query_log().is_empty());
    }

    #[tokio::test]
    async fn test_blank_submission_rejected() {
        let mut assistant = logged_in(silent_generator());
        for blank in ["", "   ", "\n\t"] {
            let err = assistant.submit(blank, Policy::Hybrid).await.unwrap_err();
            assert!(err.is_warning());
            assert!(err.to_string().contains(EMPTY_QUERY_WARNING));
        }
        assert_eq!(assistant.history().len(), 0);
        assert_eq!(assistant.query_log().len(), 0);
    }

    #[tokio::test]
    async fn test_submissions_grow_in_lockstep() {
        let mut assistant = logged_in(silent_generator());
        let queries = ["fever", "cough", "what is this", "appointment please"];
        for (i, q) in queries.iter().enumerate() {
            let submission = assistant.submit(q, Policy::Rule).await.unwrap();
            assert_eq!(submission.handle.index(), i);
        }
        assert_eq!(assistant.history().len(), queries.len());
        assert_eq!(assistant.query_log().len(), queries.len());
        assert_eq!(assistant.history().turns()[2].response, NO_INFORMATION);
    }

    #[tokio::test]
    async fn test_generation_fault_records_nothing() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .times(1)
            .returning(|_| Err(GenerationError::Timeout { timeout_ms: 30000 }));
        let mut assistant = logged_in(mock);

        let err = assistant.submit("hello", Policy::Ai).await.unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
        assert!(!err.is_warning());
        assert!(assistant.history().is_empty());
        assert!(assistant.query_log().is_empty());
    }

    #[tokio::test]
    async fn test_hybrid_end_to_end() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate()
            .times(1)
            .returning(|_| Ok(vec![Candidate::new("the weather today is sunny")]));
        let mut assistant = logged_in(mock);

        let hit = assistant.submit("What is a FEVER?", Policy::Hybrid).await.unwrap();
        assert_eq!(hit.response, RULES[0].1);

        let miss = assistant.submit("tell me something", Policy::Hybrid).await.unwrap();
        assert_eq!(miss.response, ELABORATION_FALLBACK);

        let record = &assistant.query_log().records()[1];
        assert_eq!(record.query, "tell me something");
        assert_eq!(record.method, Policy::Hybrid);
        assert!(record.rating.is_none());
    }

    #[tokio::test]
    async fn test_rate_latest_submission() {
        let mut assistant = logged_in(silent_generator());
        assistant.submit("cough", Policy::Rule).await.unwrap();
        let submission = assistant.submit("what is a fever", Policy::Hybrid).await.unwrap();

        assistant.rate(submission.handle, 4).unwrap();

        let records = assistant.query_log().records();
        assert_eq!(records[1].rating.map(|r| r.value()), Some(4));
        assert!(records[0].rating.is_none());
    }

    #[tokio::test]
    async fn test_rate_out_of_range() {
        let mut assistant = logged_in(silent_generator());
        let submission = assistant.submit("cough", Policy::Rule).await.unwrap();

        for value in [0, 6] {
            let err = assistant.rate(submission.handle, value).unwrap_err();
            assert!(matches!(
                err,
                AppError::Session(SessionError::RatingOutOfRange { .. })
            ));
        }
        assert!(assistant.query_log().records()[0].rating.is_none());

        assistant.rate(submission.handle, 3).unwrap();
        assert_eq!(
            assistant.query_log().records()[0].rating.map(|r| r.value()),
            Some(3)
        );
    }

    #[tokio::test]
    async fn test_logout_discards_state() {
        let mut assistant = logged_in(silent_generator());
        assistant.submit("fever", Policy::Rule).await.unwrap();
        let old_id = assistant.session().id.clone();

        assistant.logout();

        assert!(!assistant.is_authenticated());
        assert!(assistant.history().is_empty());
        assert!(assistant.latest_submission().is_none());
        assert_ne!(assistant.session().id, old_id);
    }

    #[tokio::test]
    async fn test_method_summary() {
        let mut assistant = logged_in(silent_generator());
        assistant.submit("fever", Policy::Rule).await.unwrap();
        assistant.submit("cough", Policy::Hybrid).await.unwrap();
        assistant.submit("symptom", Policy::Rule).await.unwrap();

        let summary = assistant.method_summary();
        assert_eq!(summary.count(Policy::Rule), 2);
        assert_eq!(summary.count(Policy::Hybrid), 1);
        assert_eq!(summary.count(Policy::Ai), 0);
    }
}
