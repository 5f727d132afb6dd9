//! Error types for tracker-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from tracker-remote (settings, probe)
    #[error(transparent)]
    Remote(#[from] tracker_remote::Error),

    /// Error from tracker-store
    #[error(transparent)]
    Store(#[from] tracker_store::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_displays_message() {
        assert_eq!(CliError::user("bad input").to_string(), "bad input");
    }

    #[test]
    fn store_errors_pass_through() {
        let err: CliError = tracker_store::Error::from(tracker_remote::Error::NotConfigured).into();
        assert!(err.to_string().starts_with("Remote storage is not configured"));
    }
}
