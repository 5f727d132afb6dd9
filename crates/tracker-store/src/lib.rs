//! Collection store for Client Tracker
//!
//! Persists four record collections (clients, projects, activities and
//! meeting notes) as JSON arrays in a remote repository, one document per
//! collection:
//!
//! - [`CollectionStore`] loads and saves whole collections
//! - [`Session`] keeps a loaded snapshot and applies typed edits to it
//! - [`summary`] derives dashboard and detail views from a snapshot
//!
//! A missing document loads as an empty collection. Saves are guarded by
//! the remote's version tokens; a concurrent edit surfaces as a conflict
//! and the caller reloads.

pub mod collection;
pub mod error;
pub mod identity;
pub mod model;
pub mod seed;
pub mod session;
pub mod store;
pub mod summary;

pub use collection::Collection;
pub use error::{Error, Result};
pub use model::{
    Activity, ActivityDraft, ActivityType, AppData, Client, ClientDraft, MeetingNote,
    MeetingNoteDraft, Project, ProjectDraft, ProjectStatus, Record,
};
pub use seed::seed_data;
pub use session::Session;
pub use store::CollectionStore;
pub use summary::{ClientOverview, PipelineSummary, ProjectOverview, StatusTotal, search_clients};
