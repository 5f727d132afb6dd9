//! Client (customer company) records

use serde::{Deserialize, Serialize};

use super::Record;
use crate::collection::Collection;

/// A customer company and its main contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub company_name: String,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: String,
    pub updated_at: String,
}

/// The caller-supplied part of a new client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientDraft {
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
}

impl ClientDraft {
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            ..Self::default()
        }
    }
}

impl Client {
    /// Build a new client; both timestamps are set to `now`.
    pub fn from_draft(draft: ClientDraft, id: String, now: &str) -> Self {
        Self {
            id,
            company_name: draft.company_name,
            contact_person: draft.contact_person,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            notes: draft.notes,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }
}

impl Record for Client {
    const COLLECTION: Collection = Collection::Clients;

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_draft_sets_equal_timestamps() {
        let client = Client::from_draft(ClientDraft::new("Acme"), "x1".into(), "2026-01-01T00:00:00.000Z");
        assert_eq!(client.created_at, client.updated_at);
        assert_eq!(client.company_name, "Acme");
        assert_eq!(client.id, "x1");
    }

    #[test]
    fn serializes_in_camel_case() {
        let client = Client::from_draft(ClientDraft::new("Acme"), "x1".into(), "t");
        let value = serde_json::to_value(&client).unwrap();
        assert_eq!(value["companyName"], "Acme");
        assert_eq!(value["createdAt"], "t");
        assert!(value.get("company_name").is_none());
    }
}
