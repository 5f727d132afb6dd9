//! Local settings store
//!
//! Persists the [`RemoteConfig`] as `settings.toml` in a per-user config
//! directory. Writes go through a temp file held under an exclusive lock and
//! are renamed into place.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::config::{ConfigSource, RemoteConfig};
use crate::{Error, Result};

/// Directory name under the platform config dir.
pub const APP_DIR_NAME: &str = "client-tracker";

/// Settings file name inside the settings directory.
pub const SETTINGS_FILE: &str = "settings.toml";

/// File-backed store for the remote configuration.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store `settings.toml` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SETTINGS_FILE),
        }
    }

    /// Store under the platform config directory:
    /// - Linux: `~/.config/client-tracker/`
    /// - macOS: `~/Library/Application Support/client-tracker/`
    /// - Windows: `%APPDATA%\client-tracker\`
    ///
    /// Returns `None` when the platform has no config directory.
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::in_dir(dir.join(APP_DIR_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved configuration.
    ///
    /// A missing file is not an error and yields `None`.
    pub fn load(&self) -> Result<Option<RemoteConfig>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(&self.path, e)),
        };

        let config = toml::from_str(&content).map_err(|e| Error::SettingsParse {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        Ok(Some(config))
    }

    /// Save the configuration, replacing any previous settings.
    pub fn save(&self, config: &RemoteConfig) -> Result<()> {
        let content = toml::to_string_pretty(config).map_err(|e| Error::SettingsSerialize {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        write_atomic(&self.path, content.as_bytes())?;
        tracing::debug!(path = ?self.path, "Saved remote settings");
        Ok(())
    }
}

impl ConfigSource for SettingsStore {
    fn current(&self) -> Option<RemoteConfig> {
        match self.load() {
            Ok(config) => config.filter(RemoteConfig::is_complete),
            Err(e) => {
                tracing::warn!("Settings are unreadable, treating as not configured: {}", e);
                None
            }
        }
    }
}

/// Owner-only, since the file holds the access token.
#[cfg(unix)]
const SETTINGS_MODE: u32 = 0o600;

fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}

/// Open the staging file for writing, readable by the owner only.
fn open_private(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    std::os::unix::fs::OpenOptionsExt::mode(&mut options, SETTINGS_MODE);
    let file = options.open(path)?;
    // A leftover staging file keeps its old mode on open.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(SETTINGS_MODE))?;
    }
    Ok(file)
}

/// Replace `target` with `content` via a locked, synced staging file in the
/// same directory. The staging file is removed if anything fails before the
/// rename.
fn write_atomic(target: &Path, content: &[u8]) -> Result<()> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let staging = staging_path(target);
    let lock_failed = || Error::LockFailed {
        path: target.to_path_buf(),
    };

    let staged = (|| -> Result<()> {
        let mut file = open_private(&staging).map_err(|e| Error::io(&staging, e))?;
        file.lock_exclusive().map_err(|_| lock_failed())?;
        file.write_all(content)
            .and_then(|()| file.sync_all())
            .map_err(|e| Error::io(&staging, e))?;
        file.unlock().map_err(|_| lock_failed())
    })();

    if let Err(e) = staged {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }
    fs::rename(&staging, target).map_err(|e| Error::io(target, e))
}
