//! Probe, load and seed commands

use colored::Colorize;
use tracker_store::{PipelineSummary, ProjectStatus};

use super::{format_amount, print_json};
use crate::context::Context;
use crate::error::{CliError, Result};

/// Check connectivity; fails when the probe is not ok.
pub async fn run_probe(ctx: &Context) -> Result<()> {
    let report = ctx.remote().probe().await;
    if !report.ok {
        return Err(CliError::user(report.detail));
    }
    println!("{} {}", "OK".green().bold(), report.detail);
    Ok(())
}

/// Load everything and print the pipeline summary (or the raw data).
pub async fn run_load(ctx: &Context, json: bool) -> Result<()> {
    let session = ctx.session().await?;
    if json {
        return print_json(session.data());
    }
    print_summary(&PipelineSummary::from_data(session.data()));
    Ok(())
}

/// Write the demonstration dataset and print the resulting summary.
pub async fn run_seed(ctx: &Context) -> Result<()> {
    let mut session = tracker_store::Session::new(ctx.store());
    let data = session.seed().await?;
    println!(
        "{} Wrote demonstration data: {} clients, {} projects, {} activities, {} meeting notes",
        "OK".green().bold(),
        data.clients.len(),
        data.projects.len(),
        data.activities.len(),
        data.meeting_notes.len()
    );
    Ok(())
}

fn status_colored(status: ProjectStatus) -> colored::ColoredString {
    let label = status.label();
    match status {
        ProjectStatus::Won => label.green(),
        ProjectStatus::Lost => label.red(),
        ProjectStatus::Negotiation => label.yellow(),
        _ => label.normal(),
    }
}

pub(crate) fn print_summary(summary: &PipelineSummary) {
    println!("{}", "Pipeline".bold());
    println!();
    println!("  {:<14} {}", "Clients:".dimmed(), summary.client_count);
    println!("  {:<14} {}", "Projects:".dimmed(), summary.project_count);
    println!("  {:<14} {}", "Activities:".dimmed(), summary.activity_count);
    println!(
        "  {:<14} {}",
        "Total amount:".dimmed(),
        format_amount(summary.total_amount)
    );
    println!();

    println!("{}", "By status".bold());
    for total in &summary.by_status {
        println!(
            "  {:<16} {:>3}  {:>14}",
            status_colored(total.status),
            total.count,
            format_amount(total.amount)
        );
    }
    println!();

    println!("{}", "Open projects".bold());
    if summary.open_projects.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for project in &summary.open_projects {
        println!(
            "  {:>14}  {}  {} {}",
            format_amount(project.amount),
            project.title,
            status_colored(project.status),
            project.id.dimmed()
        );
    }
    println!();

    println!("{}", "Recent activities".bold());
    if summary.recent_activities.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for activity in &summary.recent_activities {
        println!(
            "  {}  {:<12} {}",
            activity.date,
            activity.kind.label(),
            activity.title
        );
    }
}
