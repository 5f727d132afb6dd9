//! The four fixed collection documents.

use std::fmt;

/// One of the collection documents, each persisted as a single JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Clients,
    Projects,
    Activities,
    MeetingNotes,
}

impl Collection {
    /// All collections, in seed write order.
    pub const ALL: [Collection; 4] = [
        Collection::Clients,
        Collection::Projects,
        Collection::Activities,
        Collection::MeetingNotes,
    ];

    /// Document path in the remote repository.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Clients => "data/clients.json",
            Self::Projects => "data/projects.json",
            Self::Activities => "data/activities.json",
            Self::MeetingNotes => "data/meeting-notes.json",
        }
    }

    /// Commit message used when the collection is saved.
    pub fn commit_message(&self) -> &'static str {
        match self {
            Self::Clients => "Update client data",
            Self::Projects => "Update project data",
            Self::Activities => "Update activity log",
            Self::MeetingNotes => "Update meeting notes",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Projects => "projects",
            Self::Activities => "activities",
            Self::MeetingNotes => "meeting notes",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
