use std::env;

use crate::error::AppError;
use crate::modes::Policy;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub langbase: LangbaseConfig,
    pub generation: GenerationConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub request: RequestConfig,
}

/// Langbase API configuration
#[derive(Debug, Clone)]
pub struct LangbaseConfig {
    pub api_key: String,
    pub base_url: String,
    pub pipe: String,
}

/// Response generation configuration
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Upper bound on generated output length.
    pub max_output_length: u32,
    /// Call the generator on every query, even when a rule already matched.
    pub eager: bool,
    /// Policy used when the user has not picked one.
    pub default_policy: Policy,
}

/// Login gate configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// HTTP request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub timeout_ms: u64,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let langbase = LangbaseConfig {
            api_key: env::var("LANGBASE_API_KEY").map_err(|_| AppError::Config {
                message: "LANGBASE_API_KEY is required".to_string(),
            })?,
            base_url: env::var("LANGBASE_BASE_URL")
                .unwrap_or_else(|_| "https://api.langbase.com".to_string()),
            pipe: env::var("PIPE_NAME").unwrap_or_else(|_| "healthcare-assistant-v1".to_string()),
        };

        let default_policy = match env::var("DEFAULT_POLICY") {
            Ok(raw) => raw.parse::<Policy>().map_err(|e| AppError::Config { message: e })?,
            Err(_) => Policy::default(),
        };

        let generation = GenerationConfig {
            max_output_length: env::var("MAX_OUTPUT_LENGTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            eager: env::var("EAGER_GENERATION")
                .map(|s| matches!(s.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            default_policy,
        };

        let auth = AuthConfig {
            username: env::var("ASSISTANT_USERNAME").unwrap_or_else(|_| "user".to_string()),
            password: env::var("ASSISTANT_PASSWORD").unwrap_or_else(|_| "pass".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let request = RequestConfig {
            timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30000),
            max_retries: env::var("MAX_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
            retry_delay_ms: env::var("RETRY_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1000),
        };

        Ok(Config {
            langbase,
            generation,
            auth,
            logging,
            request,
        })
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_output_length: 100,
            eager: false,
            default_policy: Policy::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "user".to_string(),
            password: "pass".to_string(),
        }
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30000,
            max_retries: 0,
            retry_delay_ms: 1000,
        }
    }
}
