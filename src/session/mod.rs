//! In-memory state for one interactive session.
//!
//! Nothing here outlives the session: the chat history, the query log and
//! the login flag are created empty when the session starts and dropped
//! when it ends.

mod chat_history;
mod query_log;

pub use chat_history::{ChatHistory, ChatTurn};
pub use query_log::{MethodSummary, QueryLog, QueryRecord, Rating, RecordHandle};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::SessionResult;
use crate::modes::Policy;

/// State owned by a single session.
///
/// The chat history and query log always have the same length; they are
/// only extended together through [`SessionState::record_exchange`].
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Session identifier, used in log fields.
    pub id: String,
    /// When the session started.
    pub started_at: DateTime<Utc>,
    authenticated: bool,
    history: ChatHistory,
    query_log: QueryLog,
}

impl SessionState {
    /// Fresh, unauthenticated session.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            authenticated: false,
            history: ChatHistory::new(),
            query_log: QueryLog::new(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn mark_authenticated(&mut self) {
        self.authenticated = true;
    }

    /// Append one chat turn and one unrated query record.
    pub fn record_exchange(
        &mut self,
        query: &str,
        response: &str,
        method: Policy,
    ) -> RecordHandle {
        self.history.append(query, response);
        self.query_log.append(query, method)
    }

    pub fn attach_rating(&mut self, handle: RecordHandle, rating: Rating) -> SessionResult<()> {
        self.query_log.attach_rating(handle, rating)
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    pub fn query_log(&self) -> &QueryLog {
        &self.query_log
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
