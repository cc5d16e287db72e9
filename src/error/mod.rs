use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation failed: {field} - {reason}")]
    Validation { field: String, reason: String },

    #[error("Not logged in: please log in to continue")]
    Unauthenticated,

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl AppError {
    /// Whether the error is a user-input problem that should be shown as a
    /// warning rather than a failure.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            AppError::Validation { .. }
                | AppError::Session(SessionError::RatingOutOfRange { .. })
        )
    }
}

/// Text generation errors
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Generator unavailable: {message} (retries: {retries})")]
    Unavailable { message: String, retries: u32 },

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Generator returned no candidates")]
    NoCandidates,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Session state errors (query log and rating attachment)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Rating must be between 1 and 5, got {value}")]
    RatingOutOfRange { value: i64 },

    #[error("No query record at position {index}")]
    RecordNotFound { index: usize },

    #[error("Record {index} is not the latest query (latest is {latest})")]
    StaleHandle { index: usize, latest: usize },

    #[error("Record {index} has already been rated")]
    AlreadyRated { index: usize },
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for generation operations
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;
