//! Collection store
//!
//! Loads and saves the four collections through a [`ContentClient`]. Every
//! save replaces the whole collection document; computing the next array is
//! the caller's job. Errors from the remote pass through unchanged.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracker_remote::ContentClient;

use crate::Result;
use crate::identity::now_timestamp;
use crate::model::{Activity, AppData, Client, MeetingNote, Project, Record};
use crate::seed::seed_data;

/// Load/save façade over the fixed collection documents.
#[derive(Debug, Clone)]
pub struct CollectionStore {
    remote: ContentClient,
}

impl CollectionStore {
    pub fn new(remote: ContentClient) -> Self {
        Self { remote }
    }

    pub fn remote(&self) -> &ContentClient {
        &self.remote
    }

    /// Load one collection; a missing document is an empty collection.
    pub async fn load<T: Record + DeserializeOwned>(&self) -> Result<Vec<T>> {
        let document = self.remote.read::<Vec<T>>(T::COLLECTION.path()).await?;
        Ok(document.or_default())
    }

    /// Load all four collections concurrently.
    ///
    /// All or nothing: the first failed read fails the whole load and no
    /// partial aggregate is returned.
    pub async fn load_all(&self) -> Result<AppData> {
        let (clients, projects, activities, meeting_notes) = tokio::try_join!(
            self.load::<Client>(),
            self.load::<Project>(),
            self.load::<Activity>(),
            self.load::<MeetingNote>(),
        )?;

        tracing::debug!(
            clients = clients.len(),
            projects = projects.len(),
            activities = activities.len(),
            meeting_notes = meeting_notes.len(),
            "Loaded all collections"
        );
        Ok(AppData {
            clients,
            projects,
            activities,
            meeting_notes,
        })
    }

    /// Replace a collection with `items`.
    pub async fn save<T: Record + Serialize>(&self, items: &[T]) -> Result<()> {
        let collection = T::COLLECTION;
        self.remote
            .write(collection.path(), items, Some(collection.commit_message()))
            .await?;
        tracing::debug!(%collection, count = items.len(), "Saved collection");
        Ok(())
    }

    pub async fn save_clients(&self, clients: &[Client]) -> Result<()> {
        self.save(clients).await
    }

    pub async fn save_projects(&self, projects: &[Project]) -> Result<()> {
        self.save(projects).await
    }

    pub async fn save_activities(&self, activities: &[Activity]) -> Result<()> {
        self.save(activities).await
    }

    pub async fn save_meeting_notes(&self, notes: &[MeetingNote]) -> Result<()> {
        self.save(notes).await
    }

    /// Write the demonstration dataset, stamped with the current time.
    pub async fn seed(&self) -> Result<()> {
        self.seed_with(&seed_data(&now_timestamp())).await
    }

    /// Write `data` collection by collection: clients, projects,
    /// activities, meeting notes. A failed write stops the sequence.
    ///
    /// The writes are awaited one at a time on purpose. Each path has its
    /// own version token, so running them concurrently would be safe for
    /// the token cache, but four commits landing together trip the
    /// remote's secondary rate limits. Keep this sequential.
    pub async fn seed_with(&self, data: &AppData) -> Result<()> {
        tracing::info!("Seeding demonstration data");
        self.save_clients(&data.clients).await?;
        self.save_projects(&data.projects).await?;
        self.save_activities(&data.activities).await?;
        self.save_meeting_notes(&data.meeting_notes).await?;
        Ok(())
    }
}
