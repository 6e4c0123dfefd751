use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapperError {
    #[error("Unknown domain: '{value}' (expected one of physical, social, conceptual, psychic)")]
    UnknownDomain { value: String },

    #[error("Unknown concept term: '{value}' (expected one of domain, organization, elements, frameworks, resources, relationships)")]
    UnknownConceptTerm { value: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Io,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MapperError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MapperError::UnknownDomain { .. }
            | MapperError::UnknownConceptTerm { .. }
            | MapperError::ValidationError { .. } => ErrorCategory::Input,
            MapperError::ConfigError { .. }
            | MapperError::InvalidConfigValueError { .. }
            | MapperError::MissingConfigError { .. }
            | MapperError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            MapperError::IoError(_) | MapperError::ZipError(_) => ErrorCategory::Io,
            MapperError::CsvError(_)
            | MapperError::SerializationError(_)
            | MapperError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Processing => ErrorSeverity::Medium,
            ErrorCategory::Io => match self {
                MapperError::IoError(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                    ErrorSeverity::Critical
                }
                _ => ErrorSeverity::Medium,
            },
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MapperError::UnknownDomain { .. } => {
                "Use one of: physical, social, conceptual, psychic"
            }
            MapperError::UnknownConceptTerm { .. } => {
                "Use one of: domain, organization, elements, frameworks, resources, relationships"
            }
            MapperError::InvalidConfigValueError { .. }
            | MapperError::ConfigValidationError { .. }
            | MapperError::ConfigError { .. } => {
                "Check the vocabulary file and command line arguments"
            }
            MapperError::MissingConfigError { .. } => {
                "Every domain needs all six concept terms in the vocabulary file"
            }
            MapperError::IoError(_) => "Make sure the input files exist and the output directory is writable",
            MapperError::ZipError(_) => "Retry without --bundle or free up disk space",
            MapperError::CsvError(_) | MapperError::SerializationError(_) => {
                "Re-run with --verbose to see which pattern failed"
            }
            MapperError::ProcessingError { .. } | MapperError::ValidationError { .. } => {
                "Inspect the input documents for malformed content"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Io => format!("File access failed: {}", self),
            ErrorCategory::Processing => format!("Rendering failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, MapperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_high_severity() {
        let err = MapperError::UnknownDomain {
            value: "martian".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("martian"));
        assert!(err.user_friendly_message().starts_with("Invalid input"));
    }

    #[test]
    fn test_io_error_category() {
        let err: MapperError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.severity(), ErrorSeverity::Medium);

        let denied: MapperError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope").into();
        assert_eq!(denied.severity(), ErrorSeverity::Critical);
    }
}
