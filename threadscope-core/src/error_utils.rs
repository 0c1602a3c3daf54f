use crate::error::*;
use tracing::{error, info, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
    /// The `{error}` string the backend sent back, if it sent one.
    fn server_message(&self) -> Option<&str>;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::Backend(e) => {
                error!("Backend error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::Validation(e) => e.user_friendly_message(),
            CoreError::Backend(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Network(_) => {
                "Could not reach the search service. Please check that it is running.".to_string()
            }
            CoreError::InvalidInput { message } => format!("Invalid input: {}", message),
            _ => "An unexpected error occurred. Please try again later.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::Validation(_) => "VALIDATION".to_string(),
            CoreError::Backend(_) => "BACKEND".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::Io(_) => "IO".to_string(),
            CoreError::Network(_) => "NETWORK".to_string(),
            CoreError::InvalidInput { .. } => "INVALID_INPUT".to_string(),
        }
    }

    fn server_message(&self) -> Option<&str> {
        match self {
            CoreError::Backend(e) => e.server_message(),
            _ => None,
        }
    }
}

impl ErrorExt for ValidationError {
    fn log_error(&self) -> &Self {
        error!("ValidationError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ValidationError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ValidationError::EmptyQuestion => "Please enter a question.".to_string(),
            ValidationError::EmptyName => "Please enter an audience name.".to_string(),
            ValidationError::NoSources => "Please add at least one subreddit.".to_string(),
            ValidationError::NoAudienceSelected => "Please select an audience first.".to_string(),
            ValidationError::UnknownAudience { name } => {
                format!("Audience '{}' does not exist.", name)
            }
            ValidationError::NoSuchPost { index } => format!("There is no post #{}.", index),
        }
    }

    fn error_code(&self) -> String {
        match self {
            ValidationError::EmptyQuestion => "VALIDATION_EMPTY_QUESTION".to_string(),
            ValidationError::EmptyName => "VALIDATION_EMPTY_NAME".to_string(),
            ValidationError::NoSources => "VALIDATION_NO_SOURCES".to_string(),
            ValidationError::NoAudienceSelected => "VALIDATION_NO_AUDIENCE".to_string(),
            ValidationError::UnknownAudience { .. } => "VALIDATION_UNKNOWN_AUDIENCE".to_string(),
            ValidationError::NoSuchPost { .. } => "VALIDATION_NO_SUCH_POST".to_string(),
        }
    }

    fn server_message(&self) -> Option<&str> {
        None
    }
}

impl ErrorExt for BackendError {
    fn log_error(&self) -> &Self {
        error!("BackendError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("BackendError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        if let Some(message) = self.server_message() {
            return message.to_string();
        }
        match self {
            BackendError::RequestTimeout => {
                "Request to the search service timed out. Please try again.".to_string()
            }
            BackendError::InvalidResponse { .. } => {
                "The search service sent an unexpected response.".to_string()
            }
            _ => "The search service reported an error. Please try again later.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            BackendError::Rejected { .. } => "BACKEND_REJECTED".to_string(),
            BackendError::ServerError { .. } => "BACKEND_SERVER_ERROR".to_string(),
            BackendError::RequestTimeout => "BACKEND_TIMEOUT".to_string(),
            BackendError::InvalidResponse { .. } => "BACKEND_INVALID_RESPONSE".to_string(),
        }
    }

    fn server_message(&self) -> Option<&str> {
        match self {
            BackendError::Rejected { message, .. } | BackendError::ServerError { message, .. } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ConfigError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::FileNotFound { path } => {
                format!("Configuration file not found at '{}'.", path)
            }
            ConfigError::InvalidValue { field, value } => {
                format!("Invalid value '{}' for setting '{}'.", value, field)
            }
            ConfigError::ValidationFailed { reason } => {
                format!("Configuration is invalid: {}", reason)
            }
            ConfigError::Parse(_) => {
                "Configuration file is not valid TOML. Please check its syntax.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND".to_string(),
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
            ConfigError::ValidationFailed { .. } => "CONFIG_VALIDATION_FAILED".to_string(),
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR".to_string(),
        }
    }

    fn server_message(&self) -> Option<&str> {
        None
    }
}

pub struct ErrorReporter {
    report_errors: bool,
    report_warnings: bool,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            report_errors: true,
            report_warnings: true,
        }
    }

    pub fn with_error_reporting(mut self, enabled: bool) -> Self {
        self.report_errors = enabled;
        self
    }

    pub fn with_warning_reporting(mut self, enabled: bool) -> Self {
        self.report_warnings = enabled;
        self
    }

    pub fn report_error(&self, error: &CoreError) {
        if self.report_errors {
            error.log_error();
            info!("Error code: {}", error.error_code());
            info!("User message: {}", error.user_friendly_message());
        }
    }

    pub fn report_warning(&self, error: &CoreError) {
        if self.report_warnings {
            error.log_warn();
        }
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}
