use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

/// Preconditions checked before any backend request is issued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Question is empty")]
    EmptyQuestion,

    #[error("Audience name is empty")]
    EmptyName,

    #[error("Audience has no subreddits")]
    NoSources,

    #[error("No audience selected")]
    NoAudienceSelected,

    #[error("Unknown audience: {name}")]
    UnknownAudience { name: String },

    #[error("No post at position {index}")]
    NoSuchPost { index: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("Request to {endpoint} rejected with status {status_code}")]
    Rejected {
        endpoint: String,
        status_code: u16,
        message: Option<String>,
    },

    #[error("Server error: {status_code}")]
    ServerError {
        status_code: u16,
        message: Option<String>,
    },

    #[error("Request timeout")]
    RequestTimeout,

    #[error("Invalid response from {endpoint}: {details}")]
    InvalidResponse { endpoint: String, details: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
