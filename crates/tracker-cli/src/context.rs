//! Command context
//!
//! Resolves where the settings live and builds the remote client and
//! editing session commands work with.

use std::path::PathBuf;
use std::sync::Arc;

use tracker_remote::{ContentClient, HttpTransport, SettingsStore, Transport};
use tracker_store::{CollectionStore, Session};

use crate::error::{CliError, Result};

/// Settings location plus the transport every command shares.
#[derive(Clone)]
pub struct Context {
    settings: SettingsStore,
    transport: Arc<dyn Transport>,
}

impl Context {
    /// Settings in `config_dir`, or the platform config directory.
    pub fn new(config_dir: Option<PathBuf>) -> Result<Self> {
        let settings = match config_dir {
            Some(dir) => SettingsStore::in_dir(dir),
            None => SettingsStore::default_location().ok_or_else(|| {
                CliError::user("No config directory on this platform; pass --config-dir")
            })?,
        };
        Ok(Self::with_transport(settings, Arc::new(HttpTransport::new())))
    }

    pub fn with_transport(settings: SettingsStore, transport: Arc<dyn Transport>) -> Self {
        Self {
            settings,
            transport,
        }
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Remote client reading its configuration from the settings file.
    pub fn remote(&self) -> ContentClient {
        ContentClient::from_parts(Arc::new(self.settings.clone()), self.transport.clone())
    }

    pub fn store(&self) -> CollectionStore {
        CollectionStore::new(self.remote())
    }

    /// A session with all collections loaded.
    pub async fn session(&self) -> Result<Session> {
        let mut session = Session::new(self.store());
        session.refresh().await?;
        Ok(session)
    }
}
