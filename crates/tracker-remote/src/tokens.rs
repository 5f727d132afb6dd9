//! Version-token cache
//!
//! Maps a document path to the version token (content hash) last seen for
//! it. Entries are created lazily on the first successful read or write of a
//! path, overwritten after each later success, and never expire. The cache
//! is advisory: it cannot tell that a document changed remotely, the next
//! write simply fails with a conflict.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Per-path version tokens owned by one content client.
#[derive(Debug, Default)]
pub struct VersionTokens {
    tokens: Mutex<HashMap<String, String>>,
}

impl VersionTokens {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map still holds valid tokens.
        self.tokens.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Token cached for `path`, if any.
    pub fn get(&self, path: &str) -> Option<String> {
        self.lock().get(path).cloned()
    }

    /// Record the token returned by a successful read or write.
    pub fn record(&self, path: &str, token: impl Into<String>) {
        self.lock().insert(path.to_string(), token.into());
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of all cached tokens.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.lock().clone()
    }
}
