//! Error types for the toolchain configuration system

use thiserror::Error;

/// Configuration errors
///
/// Every variant is a fatal misconfiguration: none of them are retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A requested profile or toolchain key is absent from the document
    #[error("No {section} entry named '{key}'")]
    NotFound { section: String, key: String },

    /// A required field is missing or has the wrong semantic type
    #[error("Malformed configuration at {field}: {message}")]
    Malformed { field: String, message: String },

    /// Configuration file does not exist
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// Filesystem failure while reading or writing a document
    #[error("I/O error: {0}")]
    Io(String),

    /// Failure rendering a document to its canonical form
    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl ConfigError {
    /// Shorthand for a missing network profile
    pub fn network_not_found(name: impl Into<String>) -> Self {
        ConfigError::NotFound {
            section: "networks".to_string(),
            key: name.into(),
        }
    }

    /// Shorthand for a missing compiler entry
    pub fn compiler_not_found(toolchain: impl Into<String>) -> Self {
        ConfigError::NotFound {
            section: "compilers".to_string(),
            key: toolchain.into(),
        }
    }

    pub fn malformed(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Malformed {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether this is a lookup miss rather than a broken document
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::NotFound { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ConfigError::Malformed { .. })
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
