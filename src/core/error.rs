//! Error types for the logging engine

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A caller supplied a level name that is not in the level table.
    /// The facility keeps its previous level.
    #[error("Invalid log level \"{name}\", left unchanged \"{current}\"")]
    InvalidLevel {
        facility: String,
        name: String,
        current: &'static str,
    },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl LoggerError {
    /// Create an invalid-level error for a facility
    pub fn invalid_level(
        facility: impl Into<String>,
        name: impl Into<String>,
        current: &'static str,
    ) -> Self {
        LoggerError::InvalidLevel {
            facility: facility.into(),
            name: name.into(),
            current,
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::invalid_level("http", "LOUD", "DEBUG");
        assert!(matches!(err, LoggerError::InvalidLevel { .. }));

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("opening log file", "cannot open './logs'", io_err);
        assert!(matches!(err, LoggerError::IoOperation { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::invalid_level("", "LOUD", "DEBUG");
        assert_eq!(
            err.to_string(),
            "Invalid log level \"LOUD\", left unchanged \"DEBUG\""
        );

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory");
        let err =
            LoggerError::io_operation("creating log directory", "'./logs' not writable", io_err);
        assert!(err.to_string().contains("creating log directory"));
        assert!(err.to_string().contains("'./logs' not writable"));
    }
}
