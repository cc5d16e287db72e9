use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};
use crate::modes::Policy;

/// A user rating in the range 1 to 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 5;

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = SessionError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(SessionError::RatingOutOfRange { value })
        }
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        i64::from(rating.0)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One logged interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRecord {
    /// The raw query text.
    pub query: String,
    /// Policy used to answer it.
    pub method: Policy,
    /// Rating, once the user has given one.
    pub rating: Option<Rating>,
    /// When the query was submitted.
    pub submitted_at: DateTime<Utc>,
}

/// Position of a record in the query log, returned by [`QueryLog::append`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordHandle(usize);

impl RecordHandle {
    /// Zero-based position in the log.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Number of logged queries per policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSummary {
    counts: Vec<(Policy, usize)>,
}

impl MethodSummary {
    /// Counts for every policy, in [`Policy::ALL`] order.
    pub fn counts(&self) -> &[(Policy, usize)] {
        &self.counts
    }

    pub fn count(&self, policy: Policy) -> usize {
        self.counts
            .iter()
            .find(|(p, _)| *p == policy)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

/// Append-only log of submitted queries.
#[derive(Debug, Clone, Default)]
pub struct QueryLog {
    records: Vec<QueryRecord>,
}

impl QueryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new unrated record at the end of the log.
    pub fn append(&mut self, query: impl Into<String>, method: Policy) -> RecordHandle {
        self.records.push(QueryRecord {
            query: query.into(),
            method,
            rating: None,
            submitted_at: Utc::now(),
        });
        RecordHandle(self.records.len() - 1)
    }

    /// Attach a rating to the record named by `handle`.
    ///
    /// The handle must name the latest record, and that record must not be
    /// rated yet. Nothing is mutated on error.
    pub fn attach_rating(&mut self, handle: RecordHandle, rating: Rating) -> SessionResult<()> {
        let index = handle.index();
        let latest = match self.records.len().checked_sub(1) {
            Some(latest) => latest,
            None => return Err(SessionError::RecordNotFound { index }),
        };

        if index > latest {
            return Err(SessionError::RecordNotFound { index });
        }
        if index != latest {
            return Err(SessionError::StaleHandle { index, latest });
        }

        let record = &mut self.records[index];
        if record.rating.is_some() {
            return Err(SessionError::AlreadyRated { index });
        }
        record.rating = Some(rating);
        Ok(())
    }

    /// Records in submission order.
    pub fn records(&self) -> &[QueryRecord] {
        &self.records
    }

    pub fn get(&self, handle: RecordHandle) -> Option<&QueryRecord> {
        self.records.get(handle.index())
    }

    /// Handle of the most recent record.
    pub fn latest(&self) -> Option<RecordHandle> {
        self.records.len().checked_sub(1).map(RecordHandle)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Count records per policy.
    pub fn method_summary(&self) -> MethodSummary {
        let counts = Policy::ALL
            .iter()
            .map(|policy| {
                let n = self.records.iter().filter(|r| r.method == *policy).count();
                (*policy, n)
            })
            .collect();
        MethodSummary { counts }
    }
}
