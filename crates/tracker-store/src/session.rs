//! Editing session
//!
//! A [`Session`] holds the last loaded [`AppData`] and applies edits to it.
//! Each edit builds the next version of one collection from the snapshot,
//! saves it, and only swaps it into the snapshot once the save succeeded.
//! A failed save (conflict included) leaves the snapshot as it was.

use crate::collection::Collection;
use crate::identity::{generate_id, now_timestamp};
use crate::model::{
    Activity, ActivityDraft, AppData, Client, ClientDraft, MeetingNote, MeetingNoteDraft, Project,
    ProjectDraft, ProjectStatus, Record,
};
use crate::store::CollectionStore;
use crate::{Error, Result};

/// Copy of `items` with the record whose id matches `record` replaced.
fn replaced<T: Record + Clone>(items: &[T], record: &T) -> Result<Vec<T>> {
    let index = position(items, record.id())?;
    let mut next = items.to_vec();
    next[index] = record.clone();
    Ok(next)
}

/// Copy of `items` without the record `id`.
fn removed<T: Record + Clone>(items: &[T], id: &str) -> Result<Vec<T>> {
    position(items, id)?;
    Ok(items.iter().filter(|r| r.id() != id).cloned().collect())
}

fn position<T: Record>(items: &[T], id: &str) -> Result<usize> {
    items
        .iter()
        .position(|r| r.id() == id)
        .ok_or_else(|| Error::RecordNotFound {
            collection: T::COLLECTION,
            id: id.to_string(),
        })
}

fn appended<T: Clone>(items: &[T], record: T) -> Vec<T> {
    let mut next = items.to_vec();
    next.push(record);
    next
}

/// In-memory snapshot plus the store it came from.
#[derive(Debug)]
pub struct Session {
    store: CollectionStore,
    data: AppData,
    initialized: bool,
}

impl Session {
    /// A session with an empty, not yet loaded snapshot.
    pub fn new(store: CollectionStore) -> Self {
        Self {
            store,
            data: AppData::default(),
            initialized: false,
        }
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    /// Whether a full load has completed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Reload all collections. On failure the previous snapshot is kept.
    pub async fn refresh(&mut self) -> Result<&AppData> {
        self.data = self.store.load_all().await?;
        self.initialized = true;
        Ok(&self.data)
    }

    /// Write the demonstration dataset over whatever is stored, then
    /// reload. Existing documents are read first so their version tokens
    /// are known.
    pub async fn seed(&mut self) -> Result<&AppData> {
        self.ensure_loaded().await?;
        self.store.seed().await?;
        self.refresh().await
    }

    // Edits against a never-loaded snapshot would overwrite the remote
    // collection with an almost empty array.
    async fn ensure_loaded(&mut self) -> Result<()> {
        if !self.initialized {
            self.refresh().await?;
        }
        Ok(())
    }

    // ----- clients -----

    pub async fn add_client(&mut self, draft: ClientDraft) -> Result<Client> {
        self.ensure_loaded().await?;
        let client = Client::from_draft(draft, generate_id(), &now_timestamp());
        let next = appended(&self.data.clients, client.clone());
        self.store.save_clients(&next).await?;
        self.data.clients = next;
        tracing::info!(id = %client.id, "Added client");
        Ok(client)
    }

    /// Replace a client's editable fields; `id` and `createdAt` are kept.
    pub async fn update_client(&mut self, client: Client) -> Result<Client> {
        self.ensure_loaded().await?;
        let stored = &self.data.clients[position(&self.data.clients, &client.id)?];
        let updated = Client {
            created_at: stored.created_at.clone(),
            updated_at: now_timestamp(),
            ..client
        };
        let next = replaced(&self.data.clients, &updated)?;
        self.store.save_clients(&next).await?;
        self.data.clients = next;
        Ok(updated)
    }

    /// Remove a client. Its projects and activities are left in place.
    pub async fn delete_client(&mut self, id: &str) -> Result<()> {
        self.ensure_loaded().await?;
        let next = removed(&self.data.clients, id)?;
        self.store.save_clients(&next).await?;
        self.data.clients = next;
        tracing::info!(id, "Deleted client");
        Ok(())
    }

    // ----- projects -----

    pub async fn add_project(&mut self, draft: ProjectDraft) -> Result<Project> {
        self.ensure_loaded().await?;
        let project = Project::from_draft(draft, generate_id(), &now_timestamp());
        let next = appended(&self.data.projects, project.clone());
        self.store.save_projects(&next).await?;
        self.data.projects = next;
        tracing::info!(id = %project.id, "Added project");
        Ok(project)
    }

    pub async fn update_project(&mut self, project: Project) -> Result<Project> {
        self.ensure_loaded().await?;
        let stored = &self.data.projects[position(&self.data.projects, &project.id)?];
        let updated = Project {
            created_at: stored.created_at.clone(),
            updated_at: now_timestamp(),
            ..project
        };
        let next = replaced(&self.data.projects, &updated)?;
        self.store.save_projects(&next).await?;
        self.data.projects = next;
        Ok(updated)
    }

    /// Move a project to another pipeline stage.
    pub async fn update_project_status(
        &mut self,
        id: &str,
        status: ProjectStatus,
    ) -> Result<Project> {
        self.ensure_loaded().await?;
        let stored = self.data.projects[position(&self.data.projects, id)?].clone();
        tracing::info!(id, from = %stored.status, to = %status, "Changing project status");
        self.update_project(Project { status, ..stored }).await
    }

    pub async fn delete_project(&mut self, id: &str) -> Result<()> {
        self.ensure_loaded().await?;
        let next = removed(&self.data.projects, id)?;
        self.store.save_projects(&next).await?;
        self.data.projects = next;
        tracing::info!(id, "Deleted project");
        Ok(())
    }

    // ----- activities -----

    pub async fn add_activity(&mut self, draft: ActivityDraft) -> Result<Activity> {
        self.ensure_loaded().await?;
        let activity = Activity::from_draft(draft, generate_id(), &now_timestamp());
        let next = appended(&self.data.activities, activity.clone());
        self.store.save_activities(&next).await?;
        self.data.activities = next;
        tracing::info!(id = %activity.id, kind = %activity.kind, "Logged activity");
        Ok(activity)
    }

    pub async fn delete_activity(&mut self, id: &str) -> Result<()> {
        self.ensure_loaded().await?;
        let next = removed(&self.data.activities, id)?;
        self.store.save_activities(&next).await?;
        self.data.activities = next;
        Ok(())
    }

    // ----- meeting notes -----

    pub async fn add_meeting_note(&mut self, draft: MeetingNoteDraft) -> Result<MeetingNote> {
        self.ensure_loaded().await?;
        let note = MeetingNote::from_draft(draft, generate_id(), &now_timestamp());
        let next = appended(&self.data.meeting_notes, note.clone());
        self.store.save_meeting_notes(&next).await?;
        self.data.meeting_notes = next;
        tracing::info!(id = %note.id, file = %note.file_name, "Added meeting note");
        Ok(note)
    }

    pub async fn delete_meeting_note(&mut self, id: &str) -> Result<()> {
        self.ensure_loaded().await?;
        let next = removed(&self.data.meeting_notes, id)?;
        self.store.save_meeting_notes(&next).await?;
        self.data.meeting_notes = next;
        Ok(())
    }

    /// Number of records currently held for `collection`.
    pub fn count(&self, collection: Collection) -> usize {
        match collection {
            Collection::Clients => self.data.clients.len(),
            Collection::Projects => self.data.projects.len(),
            Collection::Activities => self.data.activities.len(),
            Collection::MeetingNotes => self.data.meeting_notes.len(),
        }
    }
}
