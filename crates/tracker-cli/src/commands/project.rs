//! Project commands

use colored::Colorize;
use tracker_store::{Project, ProjectDraft, ProjectOverview, ProjectStatus};

use super::{format_amount, print_json};
use crate::context::Context;
use crate::error::{CliError, Result};

/// Arguments of `project add`.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub client: String,
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub amount: u64,
    pub start: String,
    pub end: String,
}

pub async fn run_project_add(ctx: &Context, new: NewProject) -> Result<()> {
    if new.title.trim().is_empty() {
        return Err(CliError::user("Project title must not be empty"));
    }
    let mut session = ctx.session().await?;
    if session.data().client(&new.client).is_none() {
        return Err(CliError::user(format!("Client '{}' not found", new.client)));
    }

    let project = session
        .add_project(ProjectDraft {
            client_id: new.client,
            title: new.title.trim().to_string(),
            description: new.description,
            status: new.status,
            amount: new.amount,
            start_date: new.start,
            end_date: new.end,
        })
        .await?;
    println!("{} Added project {} {}", "OK".green().bold(), project.title, project.id.dimmed());
    Ok(())
}

pub async fn run_project_status(ctx: &Context, id: &str, status: ProjectStatus) -> Result<()> {
    let mut session = ctx.session().await?;
    let project = session.update_project_status(id, status).await?;
    println!(
        "{} {} is now {}",
        "OK".green().bold(),
        project.title,
        project.status.label().cyan()
    );
    Ok(())
}

pub async fn run_project_delete(ctx: &Context, id: &str) -> Result<()> {
    let mut session = ctx.session().await?;
    session.delete_project(id).await?;
    println!("{} Deleted project {}", "OK".green().bold(), id);
    Ok(())
}

pub async fn run_project_list(
    ctx: &Context,
    status: Option<ProjectStatus>,
    client: Option<&str>,
    json: bool,
) -> Result<()> {
    let session = ctx.session().await?;
    let projects: Vec<&Project> = session
        .data()
        .projects
        .iter()
        .filter(|p| status.is_none_or(|s| p.status == s))
        .filter(|p| client.is_none_or(|c| p.client_id == c))
        .collect();
    if json {
        return print_json(&projects);
    }

    if projects.is_empty() {
        println!("{}", "No projects".dimmed());
        return Ok(());
    }
    for project in projects {
        let company = session
            .data()
            .client(&project.client_id)
            .map(|c| c.company_name.as_str())
            .unwrap_or("-");
        println!(
            "  {:<26} {:<24} {:<14} {:>14} {}",
            project.title,
            company,
            project.status.label(),
            format_amount(project.amount),
            project.id.dimmed()
        );
    }
    Ok(())
}

pub async fn run_project_show(ctx: &Context, id: &str, json: bool) -> Result<()> {
    let session = ctx.session().await?;
    let overview = ProjectOverview::for_project(session.data(), id)
        .ok_or_else(|| CliError::user(format!("Project '{}' not found", id)))?;
    if json {
        return print_json(&overview);
    }

    let project = &overview.project;
    println!("{} {}", project.title.bold(), project.id.dimmed());
    println!();
    let company = overview
        .client
        .as_ref()
        .map(|c| c.company_name.as_str())
        .unwrap_or("(deleted client)");
    println!("  {:<10} {}", "Client:".dimmed(), company);
    println!("  {:<10} {}", "Status:".dimmed(), project.status.label());
    println!("  {:<10} {}", "Amount:".dimmed(), format_amount(project.amount));
    println!(
        "  {:<10} {} - {}",
        "Period:".dimmed(),
        project.start_date,
        project.end_date
    );
    if !project.description.is_empty() {
        println!("  {:<10} {}", "Notes:".dimmed(), project.description);
    }
    println!();

    println!("{}", "Activities".bold());
    for activity in &overview.activities {
        println!(
            "  {}  {:<12} {} {}",
            activity.date,
            activity.kind.label(),
            activity.title,
            activity.id.dimmed()
        );
    }
    if !overview.meeting_notes.is_empty() {
        println!();
        println!("{}", "Meeting notes".bold());
        for note in &overview.meeting_notes {
            println!("  {}  {} {}", note.uploaded_at, note.file_name, note.id.dimmed());
        }
    }
    Ok(())
}
