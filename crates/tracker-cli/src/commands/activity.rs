//! Activity log commands

use colored::Colorize;
use tracker_store::{ActivityDraft, ActivityType};

use crate::context::Context;
use crate::error::{CliError, Result};

/// Log an activity; the client is the project's client.
pub async fn run_activity_add(
    ctx: &Context,
    project_id: &str,
    kind: ActivityType,
    date: &str,
    title: &str,
    description: &str,
) -> Result<()> {
    if title.trim().is_empty() {
        return Err(CliError::user("Activity title must not be empty"));
    }
    let mut session = ctx.session().await?;
    let client_id = session
        .data()
        .project(project_id)
        .map(|p| p.client_id.clone())
        .ok_or_else(|| CliError::user(format!("Project '{}' not found", project_id)))?;

    let activity = session
        .add_activity(ActivityDraft {
            project_id: project_id.to_string(),
            client_id,
            kind,
            title: title.trim().to_string(),
            description: description.to_string(),
            date: date.to_string(),
        })
        .await?;
    println!(
        "{} Logged {} on {} {}",
        "OK".green().bold(),
        activity.kind.label().to_lowercase(),
        activity.date,
        activity.id.dimmed()
    );
    Ok(())
}

pub async fn run_activity_delete(ctx: &Context, id: &str) -> Result<()> {
    let mut session = ctx.session().await?;
    session.delete_activity(id).await?;
    println!("{} Deleted activity {}", "OK".green().bold(), id);
    Ok(())
}
