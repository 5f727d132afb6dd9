//! Record models
//!
//! Four flat record types, one per collection. Field names serialize in
//! camelCase so the documents stay readable by the browser front end.
//! References between records (`clientId`, `projectId`, `activityId`) are
//! plain ids and are never enforced.

mod activity;
mod client;
mod meeting_note;
mod project;

pub use activity::{Activity, ActivityDraft, ActivityType, UnknownActivityType};
pub use client::{Client, ClientDraft};
pub use meeting_note::{MeetingNote, MeetingNoteDraft};
pub use project::{Project, ProjectDraft, ProjectStatus, UnknownStatus};

use serde::{Deserialize, Serialize};

use crate::collection::Collection;

/// A record stored in one of the fixed collections.
pub trait Record {
    /// The collection this record type lives in.
    const COLLECTION: Collection;

    fn id(&self) -> &str;
}

/// All four collections as loaded together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    pub clients: Vec<Client>,
    pub projects: Vec<Project>,
    pub activities: Vec<Activity>,
    pub meeting_notes: Vec<MeetingNote>,
}

impl AppData {
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
            && self.projects.is_empty()
            && self.activities.is_empty()
            && self.meeting_notes.is_empty()
    }

    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn activity(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    pub fn meeting_note(&self, id: &str) -> Option<&MeetingNote> {
        self.meeting_notes.iter().find(|n| n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_aggregate_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(AppData::default()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"clients": [], "projects": [], "activities": [], "meetingNotes": []})
        );
        assert!(AppData::default().is_empty());
    }
}
