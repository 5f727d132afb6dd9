//! Meeting note commands
//!
//! Minutes are uploaded as plain text and stored inline in the meeting
//! notes collection.

use std::path::Path;

use colored::Colorize;
use tracker_store::MeetingNoteDraft;

use crate::context::Context;
use crate::error::{CliError, Result};

/// Largest minutes file accepted.
pub const MAX_NOTE_BYTES: u64 = 500 * 1024;

/// Read a minutes file, enforcing the `.txt` extension and size cap.
///
/// Returns the file name and its UTF-8 content.
pub fn read_note_file(path: &Path) -> Result<(String, String)> {
    let is_txt = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
    if !is_txt {
        return Err(CliError::user(format!(
            "Only .txt files can be uploaded: {}",
            path.display()
        )));
    }

    let size = std::fs::metadata(path)?.len();
    if size > MAX_NOTE_BYTES {
        return Err(CliError::user(format!(
            "{} is {} bytes; the limit is 500 KiB",
            path.display(),
            size
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok((file_name, content))
}

pub async fn run_note_add(
    ctx: &Context,
    project_id: &str,
    activity_id: Option<&str>,
    file: &Path,
) -> Result<()> {
    let (file_name, content) = read_note_file(file)?;

    let mut session = ctx.session().await?;
    let client_id = session
        .data()
        .project(project_id)
        .map(|p| p.client_id.clone())
        .ok_or_else(|| CliError::user(format!("Project '{}' not found", project_id)))?;
    if let Some(activity_id) = activity_id {
        if session.data().activity(activity_id).is_none() {
            return Err(CliError::user(format!("Activity '{}' not found", activity_id)));
        }
    }

    let note = session
        .add_meeting_note(MeetingNoteDraft {
            project_id: project_id.to_string(),
            client_id,
            activity_id: activity_id.map(String::from),
            file_name,
            content,
        })
        .await?;
    println!(
        "{} Uploaded {} {}",
        "OK".green().bold(),
        note.file_name,
        note.id.dimmed()
    );
    Ok(())
}

pub async fn run_note_delete(ctx: &Context, id: &str) -> Result<()> {
    let mut session = ctx.session().await?;
    session.delete_meeting_note(id).await?;
    println!("{} Deleted meeting note {}", "OK".green().bold(), id);
    Ok(())
}
