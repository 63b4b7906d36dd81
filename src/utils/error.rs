use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned {status} for {url}")]
    StatusError { status: u16, url: String },

    #[error("Remote API is disabled (offline mode)")]
    OfflineError,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("{operation} failed remotely ({remote}) and locally ({local})")]
    FallbackFailed {
        operation: String,
        remote: Box<QuizError>,
        local: Box<QuizError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Configuration,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl QuizError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QuizError::ApiError(_) | QuizError::StatusError { .. } | QuizError::OfflineError => {
                ErrorCategory::Network
            }
            QuizError::IoError(_) | QuizError::SerializationError(_) => ErrorCategory::Storage,
            QuizError::ConfigError { .. }
            | QuizError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            QuizError::ValidationError { .. } => ErrorCategory::Validation,
            // categorized by the local failure
            QuizError::FallbackFailed { local, .. } => local.category(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            QuizError::OfflineError => ErrorSeverity::Low,
            QuizError::ApiError(_) | QuizError::StatusError { .. } => ErrorSeverity::Medium,
            QuizError::ValidationError { .. } => ErrorSeverity::High,
            QuizError::IoError(_) | QuizError::SerializationError(_) => ErrorSeverity::High,
            QuizError::ConfigError { .. }
            | QuizError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
            QuizError::FallbackFailed { .. } => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            QuizError::ApiError(_) | QuizError::StatusError { .. } => {
                "The quiz server could not be reached.".to_string()
            }
            QuizError::OfflineError => "Running without the quiz server.".to_string(),
            QuizError::IoError(_) => "The local question store could not be accessed.".to_string(),
            QuizError::SerializationError(_) => {
                "The local question store contains unreadable data.".to_string()
            }
            QuizError::ConfigError { message } => format!("Invalid configuration: {}", message),
            QuizError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for {}: {}", field, reason)
            }
            QuizError::ValidationError { message } => message.clone(),
            QuizError::FallbackFailed { operation, .. } => {
                format!("Could not {}: neither the server nor the local store worked.", operation)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the quiz server is running or pass --offline",
            ErrorCategory::Storage => "Check permissions on --data-dir or remove the corrupted store file",
            ErrorCategory::Configuration => "Fix the configuration file or command line flags",
            ErrorCategory::Validation => "Correct the highlighted input and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;
