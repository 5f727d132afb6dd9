//! Project (deal) records and the sales pipeline status

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Record;
use crate::collection::Collection;

/// Where a project stands in the sales pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Prospect,
    Proposal,
    Negotiation,
    Won,
    Lost,
    /// Follow-up work with an existing customer
    Deepening,
}

impl ProjectStatus {
    /// Pipeline order.
    pub const ALL: [ProjectStatus; 6] = [
        ProjectStatus::Prospect,
        ProjectStatus::Proposal,
        ProjectStatus::Negotiation,
        ProjectStatus::Won,
        ProjectStatus::Lost,
        ProjectStatus::Deepening,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prospect => "prospect",
            Self::Proposal => "proposal",
            Self::Negotiation => "negotiation",
            Self::Won => "won",
            Self::Lost => "lost",
            Self::Deepening => "deepening",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Prospect => "Prospect",
            Self::Proposal => "Proposal sent",
            Self::Negotiation => "Negotiating",
            Self::Won => "Won",
            Self::Lost => "Lost",
            Self::Deepening => "Deepening",
        }
    }

    /// Still in play: neither won nor lost.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Won | Self::Lost)
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for an unrecognized status name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown project status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ProjectStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A deal with a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    /// References `Client::id`; not enforced
    pub client_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: ProjectStatus,
    /// Expected deal size in whole currency units
    pub amount: u64,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    pub created_at: String,
    pub updated_at: String,
}

/// The caller-supplied part of a new project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectDraft {
    pub client_id: String,
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub amount: u64,
    pub start_date: String,
    pub end_date: String,
}

impl Project {
    /// Build a new project; both timestamps are set to `now`.
    pub fn from_draft(draft: ProjectDraft, id: String, now: &str) -> Self {
        Self {
            id,
            client_id: draft.client_id,
            title: draft.title,
            description: draft.description,
            status: draft.status,
            amount: draft.amount,
            start_date: draft.start_date,
            end_date: draft.end_date,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }
}

impl Record for Project {
    const COLLECTION: Collection = Collection::Projects;

    fn id(&self) -> &str {
        &self.id
    }
}
