//! Meeting note records (uploaded plain-text minutes)

use serde::{Deserialize, Serialize};

use super::Record;
use crate::collection::Collection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingNote {
    pub id: String,
    pub project_id: String,
    pub client_id: String,
    /// The activity these minutes belong to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,
    pub file_name: String,
    pub content: String,
    pub uploaded_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeetingNoteDraft {
    pub project_id: String,
    pub client_id: String,
    pub activity_id: Option<String>,
    pub file_name: String,
    pub content: String,
}

impl MeetingNote {
    pub fn from_draft(draft: MeetingNoteDraft, id: String, now: &str) -> Self {
        Self {
            id,
            project_id: draft.project_id,
            client_id: draft.client_id,
            activity_id: draft.activity_id,
            file_name: draft.file_name,
            content: draft.content,
            uploaded_at: now.to_string(),
        }
    }
}

impl Record for MeetingNote {
    const COLLECTION: Collection = Collection::MeetingNotes;

    fn id(&self) -> &str {
        &self.id
    }
}
