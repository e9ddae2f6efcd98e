use compact_str::CompactString;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

#[derive(Debug, Clone, Error)]
pub enum SyncError {
    #[error("Missing environment variable: {name}")]
    MissingEnvVar { name: &'static str },

    #[error("Invalid configuration: {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("{0}")]
    GeneralError(CompactString),
}

impl From<crate::client::ClientError> for SyncError {
    fn from(e: crate::client::ClientError) -> Self {
        SyncError::GeneralError(e.to_string().into())
    }
}

impl SyncError {
    pub fn missing_env_var(name: &'static str) -> Self {
        Self::MissingEnvVar { name }
    }

    /// Create a configuration validation error
    pub fn config_validation_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidationError { field: field.into(), message: message.into() }
    }
}
