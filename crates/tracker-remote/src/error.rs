//! Error types for tracker-remote

use std::fmt;
use std::path::PathBuf;

/// Result type for tracker-remote operations
pub type Result<T> = std::result::Result<T, Error>;

/// What went wrong underneath a failed read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The remote answered with a non-success status
    Status,
    /// The request never completed (DNS, refused, reset)
    Transport,
    /// The request exceeded the configured timeout
    Timeout,
    /// The response arrived but its envelope or JSON could not be decoded
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::Status => "status",
            FailureKind::Transport => "transport",
            FailureKind::Timeout => "timeout",
            FailureKind::Decode => "decode",
        };
        write!(f, "{}", s)
    }
}

/// Errors that can occur in tracker-remote operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No usable remote configuration; raised before any request is sent
    #[error("Remote storage is not configured. Set the access token, owner, repository and branch first.")]
    NotConfigured,

    /// Reading a document failed for a reason other than "not found"
    #[error("Failed to read {path} ({kind}{}): {detail}", status_suffix(.status))]
    RemoteRead {
        path: String,
        kind: FailureKind,
        status: Option<u16>,
        detail: String,
    },

    /// Writing a document failed for a reason other than a version conflict
    #[error("Failed to write {path} ({kind}{}): {detail}", status_suffix(.status))]
    RemoteWrite {
        path: String,
        kind: FailureKind,
        status: Option<u16>,
        detail: String,
    },

    /// The remote document changed since its version token was cached
    #[error("Version conflict on {path}: the data changed remotely. Reload and apply the change again.")]
    Conflict { path: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings at {path}: {message}")]
    SettingsParse { path: PathBuf, message: String },

    #[error("Failed to serialize settings for {path}: {message}")]
    SettingsSerialize { path: PathBuf, message: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" {}", s)).unwrap_or_default()
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn read(
        path: &str,
        kind: FailureKind,
        status: Option<u16>,
        detail: impl Into<String>,
    ) -> Self {
        Self::RemoteRead {
            path: path.to_string(),
            kind,
            status,
            detail: detail.into(),
        }
    }

    pub(crate) fn write(
        path: &str,
        kind: FailureKind,
        status: Option<u16>,
        detail: impl Into<String>,
    ) -> Self {
        Self::RemoteWrite {
            path: path.to_string(),
            kind,
            status,
            detail: detail.into(),
        }
    }

    /// HTTP status attached to a read or write failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RemoteRead { status, .. } | Error::RemoteWrite { status, .. } => *status,
            Error::Conflict { .. } => Some(409),
            _ => None,
        }
    }

    /// Failure kind of a read or write error.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Error::RemoteRead { kind, .. } | Error::RemoteWrite { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict { .. })
    }

    pub fn is_timeout(&self) -> bool {
        self.kind() == Some(FailureKind::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_display_includes_status_and_detail() {
        let err = Error::read("data/clients.json", FailureKind::Status, Some(401), "Bad credentials");
        let display = err.to_string();
        assert!(display.contains("data/clients.json"), "got: {}", display);
        assert!(display.contains("401"), "got: {}", display);
        assert!(display.contains("Bad credentials"), "got: {}", display);
    }

    #[test]
    fn timeout_is_distinguishable() {
        let err = Error::write("data/projects.json", FailureKind::Timeout, None, "deadline elapsed");
        assert!(err.is_timeout());
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn conflict_reports_409() {
        let err = Error::Conflict {
            path: "data/activities.json".into(),
        };
        assert!(err.is_conflict());
        assert_eq!(err.status(), Some(409));
        assert!(err.to_string().to_lowercase().contains("reload"));
    }
}
