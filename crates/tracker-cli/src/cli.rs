//! CLI argument parsing using clap derive

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracker_store::{ActivityType, ProjectStatus};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepts only zero-padded calendar dates so stored dates sort lexically.
fn parse_date(s: &str) -> Result<String, String> {
    let date = NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| format!("'{}' is not a YYYY-MM-DD date: {}", s, e))?;
    let canonical = date.format(DATE_FORMAT).to_string();
    if canonical != s {
        return Err(format!("'{}' must be written as {}", s, canonical));
    }
    Ok(canonical)
}

/// Client Tracker - clients, projects and activity log stored as JSON in a
/// remote repository
#[derive(Parser, Debug)]
#[command(name = "tracker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding settings.toml (defaults to the platform config dir)
    #[arg(long, global = true, env = "TRACKER_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Manage the remote storage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Check that the configured repository is reachable
    Probe,

    /// Load all collections and show the pipeline summary
    Load {
        /// Print the loaded collections as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the demonstration dataset to the remote repository
    ///
    /// Overwrites all four collections.
    Seed,

    /// Manage clients
    Client {
        #[command(subcommand)]
        action: ClientAction,
    },

    /// Manage projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Log or remove activities
    Activity {
        #[command(subcommand)]
        action: ActivityAction,
    },

    /// Upload or remove meeting notes
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Save the access token, owner, repository and branch
    Set {
        /// Personal access token with contents read/write permission
        #[arg(long, env = "TRACKER_TOKEN", hide_env_values = true)]
        token: String,

        /// Repository owner (user or organization)
        #[arg(long)]
        owner: String,

        /// Repository name
        #[arg(long)]
        repo: String,

        /// Branch the data lives on
        #[arg(long, default_value = "main")]
        branch: String,

        /// API base URL
        #[arg(long)]
        api_base: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Show the saved settings (token masked)
    Show,
}

/// Client fields shared by `add` and `update`
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFields {
    /// Contact person
    #[arg(long)]
    pub contact: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    /// Add a client
    Add {
        /// Company name
        company_name: String,

        #[command(flatten)]
        fields: ClientFields,
    },

    /// Change a client's fields; omitted fields keep their value
    Update {
        id: String,

        /// New company name
        #[arg(long)]
        company_name: Option<String>,

        #[command(flatten)]
        fields: ClientFields,
    },

    /// Delete a client (its projects and activities are kept)
    Delete { id: String },

    /// List clients
    List {
        /// Filter by company name, contact person or email
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Show a client with its projects, activities and notes
    Show {
        id: String,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ProjectAction {
    /// Add a project for a client
    Add {
        /// Owning client id
        #[arg(long)]
        client: String,

        /// Project title
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Pipeline status (prospect, proposal, negotiation, won, lost, deepening)
        #[arg(long, default_value = "prospect")]
        status: ProjectStatus,

        /// Expected amount
        #[arg(long, default_value_t = 0)]
        amount: u64,

        /// Start date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        start: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        end: Option<String>,
    },

    /// Move a project to another pipeline status
    Status { id: String, status: ProjectStatus },

    /// Delete a project
    Delete { id: String },

    /// List projects
    List {
        #[arg(long)]
        status: Option<ProjectStatus>,

        /// Only projects of this client
        #[arg(long)]
        client: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Show a project with its activities and notes
    Show {
        id: String,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ActivityAction {
    /// Log an activity on a project
    Add {
        /// Project id; the client is taken from the project
        #[arg(long)]
        project: String,

        /// appointment, call, email, meeting or other
        #[arg(long = "type", default_value = "other")]
        kind: ActivityType,

        /// Day of the activity (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: String,

        title: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete an activity
    Delete { id: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum NoteAction {
    /// Upload a plain-text minutes file
    Add {
        /// Project id; the client is taken from the project
        #[arg(long)]
        project: String,

        /// Activity the minutes belong to
        #[arg(long)]
        activity: Option<String>,

        /// A .txt file up to 500 KiB
        #[arg(long)]
        file: PathBuf,
    },

    /// Delete a meeting note
    Delete { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_args() {
        let cli = Cli::parse_from(["tracker"]);
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_config_set_defaults_branch() {
        let cli = Cli::parse_from([
            "tracker", "config", "set", "--token", "t", "--owner", "o", "--repo", "r",
        ]);
        match cli.command {
            Some(Commands::Config {
                action: ConfigAction::Set { branch, api_base, .. },
            }) => {
                assert_eq!(branch, "main");
                assert_eq!(api_base, None);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn parse_project_status() {
        let cli = Cli::parse_from(["tracker", "project", "status", "p1", "Won"]);
        assert_eq!(
            cli.command,
            Some(Commands::Project {
                action: ProjectAction::Status {
                    id: "p1".into(),
                    status: ProjectStatus::Won,
                },
            })
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(Cli::try_parse_from(["tracker", "project", "status", "p1", "archived"]).is_err());
    }

    #[test]
    fn parse_activity_type_flag() {
        let cli = Cli::parse_from([
            "tracker", "activity", "add", "--project", "p1", "--type", "call", "--date",
            "2026-02-11", "Follow-up",
        ]);
        match cli.command {
            Some(Commands::Activity {
                action: ActivityAction::Add { kind, date, title, .. },
            }) => {
                assert_eq!(kind, ActivityType::Call);
                assert_eq!(date, "2026-02-11");
                assert_eq!(title, "Follow-up");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[rstest]
    #[case("2026-2-1")]
    #[case("2026-02-30")]
    #[case("11/02/2026")]
    #[case("")]
    fn malformed_activity_dates_are_rejected(#[case] date: &str) {
        let result = Cli::try_parse_from([
            "tracker", "activity", "add", "--project", "p1", "--date", date, "Visit",
        ]);
        assert!(result.is_err(), "{} should be rejected", date);
    }

    #[test]
    fn unpadded_project_dates_are_rejected() {
        let result = Cli::try_parse_from([
            "tracker", "project", "add", "c1", "Site", "--start", "2026-2-1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn project_dates_are_optional() {
        let cli = Cli::parse_from([
            "tracker", "project", "add", "c1", "Site", "--end", "2026-12-31",
        ]);
        match cli.command {
            Some(Commands::Project {
                action: ProjectAction::Add { start, end, .. },
            }) => {
                assert_eq!(start, None);
                assert_eq!(end.as_deref(), Some("2026-12-31"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["tracker", "probe", "--verbose", "--config-dir", "/tmp/x"]);
        assert!(cli.verbose);
        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/x")));
    }
}
