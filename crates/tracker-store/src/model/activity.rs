//! Activity log records
//!
//! Activities are immutable once logged: there is no `updatedAt`, and a
//! correction is a delete followed by a new entry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Record;
use crate::collection::Collection;

/// Kind of customer touchpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Appointment,
    Call,
    Email,
    Meeting,
    #[default]
    Other,
}

impl ActivityType {
    pub const ALL: [ActivityType; 5] = [
        ActivityType::Appointment,
        ActivityType::Call,
        ActivityType::Email,
        ActivityType::Meeting,
        ActivityType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Appointment => "appointment",
            Self::Call => "call",
            Self::Email => "email",
            Self::Meeting => "meeting",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Appointment => "Appointment",
            Self::Call => "Phone call",
            Self::Email => "Email",
            Self::Meeting => "Meeting",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for an unrecognized activity type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown activity type '{0}'")]
pub struct UnknownActivityType(pub String);

impl FromStr for ActivityType {
    type Err = UnknownActivityType;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownActivityType(s.to_string()))
    }
}

/// One logged touchpoint on a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub project_id: String,
    pub client_id: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Day the activity happened (`YYYY-MM-DD`)
    pub date: String,
    pub created_at: String,
}

/// The caller-supplied part of a new activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityDraft {
    pub project_id: String,
    pub client_id: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub title: String,
    pub description: String,
    pub date: String,
}

impl Activity {
    /// Build a new activity stamped with `now`.
    pub fn from_draft(draft: ActivityDraft, id: String, now: &str) -> Self {
        Self {
            id,
            project_id: draft.project_id,
            client_id: draft.client_id,
            kind: draft.kind,
            title: draft.title,
            description: draft.description,
            date: draft.date,
            created_at: now.to_string(),
        }
    }
}

impl Record for Activity {
    const COLLECTION: Collection = Collection::Activities;

    fn id(&self) -> &str {
        &self.id
    }
}
