//! Read-only views over a loaded [`AppData`]
//!
//! These back the dashboard and detail screens: nothing here touches the
//! remote.

use std::cmp::Reverse;

use serde::Serialize;

use crate::model::{Activity, AppData, Client, MeetingNote, Project, ProjectStatus};

/// How many activities the dashboard lists.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Count and amount for one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusTotal {
    pub status: ProjectStatus,
    pub count: usize,
    pub amount: u64,
}

/// Dashboard figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSummary {
    pub client_count: usize,
    pub project_count: usize,
    pub activity_count: usize,
    pub total_amount: u64,
    /// One entry per status, in pipeline order
    pub by_status: Vec<StatusTotal>,
    /// Projects neither won nor lost, largest first
    pub open_projects: Vec<Project>,
    pub recent_activities: Vec<Activity>,
}

impl PipelineSummary {
    pub fn from_data(data: &AppData) -> Self {
        let by_status = ProjectStatus::ALL
            .into_iter()
            .map(|status| {
                let matching = data.projects.iter().filter(|p| p.status == status);
                StatusTotal {
                    status,
                    count: matching.clone().count(),
                    amount: total_amount(matching),
                }
            })
            .collect();

        let mut open_projects: Vec<Project> = data
            .projects
            .iter()
            .filter(|p| p.status.is_open())
            .cloned()
            .collect();
        open_projects.sort_by_key(|p| Reverse(p.amount));

        let mut recent_activities = newest_activities(data.activities.iter());
        recent_activities.truncate(RECENT_ACTIVITY_LIMIT);

        Self {
            client_count: data.clients.len(),
            project_count: data.projects.len(),
            activity_count: data.activities.len(),
            total_amount: total_amount(data.projects.iter()),
            by_status,
            open_projects,
            recent_activities,
        }
    }

    pub fn status_total(&self, status: ProjectStatus) -> Option<&StatusTotal> {
        self.by_status.iter().find(|t| t.status == status)
    }
}

/// Sum of project amounts, clamped at `u64::MAX`.
fn total_amount<'a>(projects: impl Iterator<Item = &'a Project>) -> u64 {
    projects.fold(0u64, |acc, p| acc.saturating_add(p.amount))
}

// Stable sort: activities sharing a date keep their stored order.
fn newest_activities<'a>(activities: impl Iterator<Item = &'a Activity>) -> Vec<Activity> {
    let mut list: Vec<Activity> = activities.cloned().collect();
    list.sort_by(|a, b| b.date.cmp(&a.date));
    list
}

fn newest_notes<'a>(notes: impl Iterator<Item = &'a MeetingNote>) -> Vec<MeetingNote> {
    let mut list: Vec<MeetingNote> = notes.cloned().collect();
    list.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
    list
}

/// Everything attached to one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientOverview {
    pub client: Client,
    pub projects: Vec<Project>,
    pub activities: Vec<Activity>,
    pub meeting_notes: Vec<MeetingNote>,
    pub total_amount: u64,
}

impl ClientOverview {
    /// `None` when no client has this id.
    pub fn for_client(data: &AppData, id: &str) -> Option<Self> {
        let client = data.client(id)?.clone();
        let projects: Vec<Project> = data
            .projects
            .iter()
            .filter(|p| p.client_id == id)
            .cloned()
            .collect();
        Some(Self {
            total_amount: total_amount(projects.iter()),
            activities: newest_activities(data.activities.iter().filter(|a| a.client_id == id)),
            meeting_notes: newest_notes(data.meeting_notes.iter().filter(|n| n.client_id == id)),
            client,
            projects,
        })
    }
}

/// Everything attached to one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOverview {
    pub project: Project,
    /// Owning client, if it still exists
    pub client: Option<Client>,
    pub activities: Vec<Activity>,
    pub meeting_notes: Vec<MeetingNote>,
}

impl ProjectOverview {
    pub fn for_project(data: &AppData, id: &str) -> Option<Self> {
        let project = data.project(id)?.clone();
        Some(Self {
            client: data.client(&project.client_id).cloned(),
            activities: newest_activities(data.activities.iter().filter(|a| a.project_id == id)),
            meeting_notes: newest_notes(data.meeting_notes.iter().filter(|n| n.project_id == id)),
            project,
        })
    }
}

/// Clients whose company name, contact person or email contains `query`,
/// ignoring case. An empty query matches everything.
pub fn search_clients<'a>(clients: &'a [Client], query: &str) -> Vec<&'a Client> {
    let needle = query.trim().to_lowercase();
    clients
        .iter()
        .filter(|c| {
            needle.is_empty()
                || [&c.company_name, &c.contact_person, &c.email]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}
