//! Login gate.
//!
//! The shipped [`StaticCredentials`] checks a single configured pair and is
//! not a security boundary. A real identity provider plugs in through
//! [`Authenticator`].

use crate::config::AuthConfig;

/// Username and password as typed by the user.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Decides whether a set of credentials may open the assistant.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, credentials: &Credentials) -> bool;
}

/// Accepts exactly one username/password pair.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    expected: Credentials,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            expected: Credentials::new(username, password),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }
}

impl Authenticator for StaticCredentials {
    fn authenticate(&self, credentials: &Credentials) -> bool {
        *credentials == self.expected
    }
}
