//! Settings commands

use colored::Colorize;
use tracker_remote::{RemoteConfig, SettingsStore};

use crate::error::{CliError, Result};

/// Save the remote settings.
pub fn run_config_set(
    settings: &SettingsStore,
    token: &str,
    owner: &str,
    repo: &str,
    branch: &str,
    api_base: Option<&str>,
    timeout_secs: Option<u64>,
) -> Result<()> {
    let mut config = RemoteConfig::new(token.trim(), owner.trim(), repo.trim()).with_branch(branch.trim());
    if let Some(api_base) = api_base {
        config = config.with_api_base(api_base.trim());
    }
    if let Some(secs) = timeout_secs {
        config = config.with_timeout_secs(secs);
    }
    if !config.is_complete() {
        return Err(CliError::user("Token, owner, repository and branch must not be empty"));
    }

    settings.save(&config)?;
    println!(
        "{} Saved settings for {} ({})",
        "OK".green().bold(),
        config.full_name().cyan(),
        settings.path().display()
    );
    Ok(())
}

/// Print the saved settings with the token masked.
pub fn run_config_show(settings: &SettingsStore) -> Result<()> {
    println!("{}", "Remote Storage Settings".bold());
    println!();
    println!("  {:<12} {}", "File:".dimmed(), settings.path().display());

    let Some(config) = settings.load()? else {
        println!("  {:<12} {}", "Status:".dimmed(), "(not configured)".yellow());
        println!();
        println!("Run {} to configure.", "tracker config set --help".cyan());
        return Ok(());
    };

    println!("  {:<12} {}", "Repository:".dimmed(), config.full_name());
    println!("  {:<12} {}", "Branch:".dimmed(), config.branch);
    println!("  {:<12} {}", "API:".dimmed(), config.api_base);
    println!("  {:<12} {}", "Token:".dimmed(), config.masked_token());
    println!("  {:<12} {}s", "Timeout:".dimmed(), config.timeout_secs);
    if !config.is_complete() {
        println!("  {:<12} {}", "Status:".dimmed(), "(incomplete)".yellow());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn set_writes_settings_file() {
        let dir = TempDir::new().unwrap();
        let settings = SettingsStore::in_dir(dir.path());

        run_config_set(&settings, " ghp_secret ", "acme", "crm-data", "main", None, Some(10)).unwrap();

        let saved = settings.load().unwrap().unwrap();
        assert_eq!(saved.token, "ghp_secret");
        assert_eq!(saved.full_name(), "acme/crm-data");
        assert_eq!(saved.timeout_secs, 10);
    }

    #[test]
    fn set_rejects_blank_fields() {
        let dir = TempDir::new().unwrap();
        let settings = SettingsStore::in_dir(dir.path());

        let err = run_config_set(&settings, "t", "  ", "r", "main", None, None).unwrap_err();

        assert!(matches!(err, CliError::User { .. }));
        assert!(settings.load().unwrap().is_none());
    }

    #[test]
    fn show_without_settings_succeeds() {
        let dir = TempDir::new().unwrap();
        assert!(run_config_show(&SettingsStore::in_dir(dir.path())).is_ok());
    }
}
