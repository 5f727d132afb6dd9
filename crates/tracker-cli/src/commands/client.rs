//! Client commands

use colored::Colorize;
use tracker_store::{Client, ClientDraft, ClientOverview, search_clients};

use super::{format_amount, print_json};
use crate::cli::ClientFields;
use crate::context::Context;
use crate::error::{CliError, Result};

pub async fn run_client_add(ctx: &Context, company_name: &str, fields: ClientFields) -> Result<()> {
    if company_name.trim().is_empty() {
        return Err(CliError::user("Company name must not be empty"));
    }
    let draft = ClientDraft {
        company_name: company_name.trim().to_string(),
        contact_person: fields.contact.unwrap_or_default(),
        email: fields.email.unwrap_or_default(),
        phone: fields.phone.unwrap_or_default(),
        address: fields.address.unwrap_or_default(),
        notes: fields.notes.unwrap_or_default(),
    };

    let mut session = ctx.session().await?;
    let client = session.add_client(draft).await?;
    println!("{} Added client {} {}", "OK".green().bold(), client.company_name, client.id.dimmed());
    Ok(())
}

/// Apply the supplied fields to an existing client.
pub async fn run_client_update(
    ctx: &Context,
    id: &str,
    company_name: Option<String>,
    fields: ClientFields,
) -> Result<()> {
    let mut session = ctx.session().await?;
    let Some(current) = session.data().client(id).cloned() else {
        return Err(tracker_store::Error::RecordNotFound {
            collection: tracker_store::Collection::Clients,
            id: id.to_string(),
        }
        .into());
    };

    let edited = Client {
        company_name: company_name.unwrap_or(current.company_name.clone()),
        contact_person: fields.contact.unwrap_or(current.contact_person.clone()),
        email: fields.email.unwrap_or(current.email.clone()),
        phone: fields.phone.unwrap_or(current.phone.clone()),
        address: fields.address.unwrap_or(current.address.clone()),
        notes: fields.notes.unwrap_or(current.notes.clone()),
        ..current
    };
    let client = session.update_client(edited).await?;
    println!("{} Updated client {}", "OK".green().bold(), client.company_name);
    Ok(())
}

pub async fn run_client_delete(ctx: &Context, id: &str) -> Result<()> {
    let mut session = ctx.session().await?;
    session.delete_client(id).await?;
    println!("{} Deleted client {}", "OK".green().bold(), id);
    Ok(())
}

pub async fn run_client_list(ctx: &Context, search: Option<&str>, json: bool) -> Result<()> {
    let session = ctx.session().await?;
    let clients = search_clients(&session.data().clients, search.unwrap_or(""));
    if json {
        return print_json(&clients);
    }

    if clients.is_empty() {
        println!("{}", "No clients".dimmed());
        return Ok(());
    }
    for client in clients {
        println!(
            "  {:<28} {:<18} {:<28} {}",
            client.company_name,
            client.contact_person,
            client.email,
            client.id.dimmed()
        );
    }
    Ok(())
}

pub async fn run_client_show(ctx: &Context, id: &str, json: bool) -> Result<()> {
    let session = ctx.session().await?;
    let overview = ClientOverview::for_client(session.data(), id)
        .ok_or_else(|| CliError::user(format!("Client '{}' not found", id)))?;
    if json {
        return print_json(&overview);
    }

    let client = &overview.client;
    println!("{} {}", client.company_name.bold(), client.id.dimmed());
    println!();
    println!("  {:<10} {}", "Contact:".dimmed(), client.contact_person);
    println!("  {:<10} {}", "Email:".dimmed(), client.email);
    println!("  {:<10} {}", "Phone:".dimmed(), client.phone);
    println!("  {:<10} {}", "Address:".dimmed(), client.address);
    if !client.notes.is_empty() {
        println!("  {:<10} {}", "Notes:".dimmed(), client.notes);
    }
    println!();

    println!(
        "{} ({})",
        "Projects".bold(),
        format_amount(overview.total_amount)
    );
    for project in &overview.projects {
        println!(
            "  {:>14}  {}  {} {}",
            format_amount(project.amount),
            project.title,
            project.status.label(),
            project.id.dimmed()
        );
    }
    println!();

    println!("{}", "Activities".bold());
    for activity in &overview.activities {
        println!("  {}  {:<12} {}", activity.date, activity.kind.label(), activity.title);
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
