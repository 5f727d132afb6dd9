//! Client Tracker CLI
//!
//! Command-line front end for the client/project/activity store kept as
//! JSON documents in a remote repository.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{ActivityAction, ClientAction, Cli, Commands, ConfigAction, NoteAction, ProjectAction};
use commands::project::NewProject;
use context::Context;
use error::Result;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` selects debug output.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("Verbose mode enabled");
}

fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        println!("{} Client Tracker CLI", "tracker".green().bold());
        println!();
        println!("Run {} for available commands.", "tracker --help".cyan());
        return Ok(());
    };

    let ctx = Context::new(cli.config_dir)?;

    // Settings commands are purely local
    if let Commands::Config { action } = command {
        return match action {
            ConfigAction::Set {
                token,
                owner,
                repo,
                branch,
                api_base,
                timeout,
            } => commands::run_config_set(
                ctx.settings(),
                &token,
                &owner,
                &repo,
                &branch,
                api_base.as_deref(),
                timeout,
            ),
            ConfigAction::Show => commands::run_config_show(ctx.settings()),
        };
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(execute(&ctx, command))
}

async fn execute(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Config { .. } => Ok(()),
        Commands::Probe => commands::run_probe(ctx).await,
        Commands::Load { json } => commands::run_load(ctx, json).await,
        Commands::Seed => commands::run_seed(ctx).await,
        Commands::Client { action } => match action {
            ClientAction::Add {
                company_name,
                fields,
            } => commands::run_client_add(ctx, &company_name, fields).await,
            ClientAction::Update {
                id,
                company_name,
                fields,
            } => commands::run_client_update(ctx, &id, company_name, fields).await,
            ClientAction::Delete { id } => commands::run_client_delete(ctx, &id).await,
            ClientAction::List { search, json } => {
                commands::run_client_list(ctx, search.as_deref(), json).await
            }
            ClientAction::Show { id, json } => commands::run_client_show(ctx, &id, json).await,
        },
        Commands::Project { action } => match action {
            ProjectAction::Add {
                client,
                title,
                description,
                status,
                amount,
                start,
                end,
            } => {
                let new = NewProject {
                    client,
                    title,
                    description,
                    status,
                    amount,
                    start: start.unwrap_or_default(),
                    end: end.unwrap_or_default(),
                };
                commands::run_project_add(ctx, new).await
            }
            ProjectAction::Status { id, status } => {
                commands::run_project_status(ctx, &id, status).await
            }
            ProjectAction::Delete { id } => commands::run_project_delete(ctx, &id).await,
            ProjectAction::List {
                status,
                client,
                json,
            } => commands::run_project_list(ctx, status, client.as_deref(), json).await,
            ProjectAction::Show { id, json } => commands::run_project_show(ctx, &id, json).await,
        },
        Commands::Activity { action } => match action {
            ActivityAction::Add {
                project,
                kind,
                date,
                title,
                description,
            } => {
                commands::run_activity_add(ctx, &project, kind, &date, &title, &description).await
            }
            ActivityAction::Delete { id } => commands::run_activity_delete(ctx, &id).await,
        },
        Commands::Note { action } => match action {
            NoteAction::Add {
                project,
                activity,
                file,
            } => commands::run_note_add(ctx, &project, activity.as_deref(), &file).await,
            NoteAction::Delete { id } => commands::run_note_delete(ctx, &id).await,
        },
    }
}
