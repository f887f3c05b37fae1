use thiserror::Error;

/// Why a raw postal code was rejected before any upstream call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidCepReason {
    Missing,
    TooShort { digits: usize },
    TooLong { digits: usize },
}

impl std::fmt::Display for InvalidCepReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidCepReason::Missing => write!(f, "CEP is missing"),
            InvalidCepReason::TooShort { digits } | InvalidCepReason::TooLong { digits } => {
                write!(f, "CEP has {} digits, expected 8", digits)
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum CepError {
    #[error("Invalid CEP: {reason}")]
    InvalidInput { reason: InvalidCepReason },

    #[error("CEP not found: {cep}")]
    NotFound { cep: String },

    #[error("Postal lookup service unavailable: {message}")]
    UpstreamUnavailable { message: String },

    #[error("Unrecognized state abbreviation '{value}' for CEP {cep}")]
    MappingError { cep: String, value: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<reqwest::Error> for CepError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else if err.is_connect() {
            format!("connection failed: {}", err)
        } else {
            err.to_string()
        };
        CepError::UpstreamUnavailable { message }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Upstream,
    Mapping,
    Configuration,
    System,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "invalid_input",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::Upstream => "upstream_unavailable",
            ErrorCategory::Mapping => "mapping_error",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::System => "system",
        }
    }
}

impl CepError {
    pub fn invalid(reason: InvalidCepReason) -> Self {
        CepError::InvalidInput { reason }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CepError::InvalidInput { .. } => ErrorCategory::Validation,
            CepError::NotFound { .. } => ErrorCategory::NotFound,
            CepError::UpstreamUnavailable { .. } => ErrorCategory::Upstream,
            CepError::MappingError { .. } => ErrorCategory::Mapping,
            CepError::ConfigError { .. } | CepError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            CepError::IoError(_) => ErrorCategory::System,
        }
    }

    /// Message safe to hand back to API callers; upstream internals stay in the logs.
    pub fn user_friendly_message(&self) -> String {
        match self {
            CepError::InvalidInput { reason } => format!("Invalid CEP: {}", reason),
            CepError::NotFound { .. } => "CEP not found".to_string(),
            CepError::UpstreamUnavailable { .. } => {
                "CEP lookup service is unavailable, try again later".to_string()
            }
            CepError::MappingError { .. } => {
                "CEP lookup service returned an unrecognized state".to_string()
            }
            CepError::ConfigError { .. }
            | CepError::InvalidConfigValueError { .. }
            | CepError::IoError(_) => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CepError>;
