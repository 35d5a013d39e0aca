use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur in the Nova pet service
#[derive(Error, Debug)]
pub enum PetError {
    /// Invalid or unusable configuration value
    #[error("Configuration error: {0}")]
    Configuration(Arc<String>),

    /// Error when reading or parsing a configuration file
    #[error("Failed to load config file {path}: {message}")]
    ConfigFile { path: PathBuf, message: Arc<String> },

    /// Error when the HTTP listener cannot be bound
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: Arc<String>,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result with PetError
pub type Result<T> = std::result::Result<T, PetError>;

impl PetError {
    /// Shorthand for a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        PetError::Configuration(Arc::new(message.into()))
    }

    /// Shorthand for a config file error
    pub fn config_file(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        PetError::ConfigFile {
            path: path.into(),
            message: Arc::new(message.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let err = PetError::configuration("port out of range");
        assert_eq!(err.to_string(), "Configuration error: port out of range");
    }

    #[test]
    fn test_config_file_error_display() {
        let err = PetError::config_file("/etc/nova.toml", "missing field");
        assert_eq!(
            err.to_string(),
            "Failed to load config file /etc/nova.toml: missing field"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PetError = io.into();
        assert!(matches!(err, PetError::Io(_)));
    }
}
