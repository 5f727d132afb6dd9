//! Tests for the collection store against the in-memory remote

use pretty_assertions::assert_eq;
use serde_json::json;
use tracker_remote::{ContentClient, Error as RemoteError, FailureKind, RemoteConfig, TransportError};
use tracker_store::identity::{generate_id, is_generated_id, now_timestamp};
use tracker_store::{
    Activity, ActivityDraft, ActivityType, AppData, Client, ClientDraft, Collection,
    CollectionStore, Error, Project, ProjectDraft, ProjectStatus, seed_data,
};
use tracker_test_utils::{Fault, MemoryRemote};

fn setup() -> (MemoryRemote, CollectionStore) {
    let remote = MemoryRemote::default();
    let store = CollectionStore::new(ContentClient::new(remote.config(), remote.clone()));
    (remote, store)
}

fn written_paths(remote: &MemoryRemote) -> Vec<String> {
    remote
        .writes()
        .into_iter()
        .filter_map(|w| w.path)
        .collect()
}

mod load_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn empty_remote_loads_empty_collections() {
        let (remote, store) = setup();

        let data = store.load_all().await.unwrap();

        assert_eq!(data, AppData::default());
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({"clients": [], "projects": [], "activities": [], "meetingNotes": []})
        );
        assert_eq!(remote.requests().len(), 4);
    }

    #[tokio::test]
    async fn partially_populated_remote_loads() {
        let (remote, store) = setup();
        let seed = seed_data("2026-02-01T00:00:00.000Z");
        remote.put_document(
            Collection::Projects.path(),
            &serde_json::to_value(&seed.projects).unwrap(),
        );

        let data = store.load_all().await.unwrap();

        assert_eq!(data.projects, seed.projects);
        assert!(data.clients.is_empty());
        assert!(data.meeting_notes.is_empty());
    }

    #[tokio::test]
    async fn one_failed_read_fails_the_whole_load() {
        let (remote, store) = setup();
        remote.put_document(Collection::Clients.path(), &json!([]));
        remote.fail_path(
            Collection::Activities.path(),
            Fault::Status(500, r#"{"message":"Server Error"}"#.into()),
        );

        let err = store.load_all().await.unwrap_err();

        match err {
            Error::Remote(RemoteError::RemoteRead { path, status, .. }) => {
                assert_eq!(path, "data/activities.json");
                assert_eq!(status, Some(500));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_collection_is_a_decode_error() {
        let (remote, store) = setup();
        remote.put_raw(Collection::Clients.path(), "[{\"id\": 1");

        let err = store.load::<Client>().await.unwrap_err();

        assert_eq!(
            err.as_remote().and_then(RemoteError::kind),
            Some(FailureKind::Decode)
        );
    }

    #[tokio::test]
    async fn unconfigured_store_fails_before_any_request() {
        let remote = MemoryRemote::default();
        let store = CollectionStore::new(ContentClient::new(None::<RemoteConfig>, remote.clone()));

        let err = store.load_all().await.unwrap_err();

        assert!(matches!(err, Error::Remote(RemoteError::NotConfigured)));
        assert!(remote.requests().is_empty());
    }
}

mod save_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn saved_collection_reads_back_in_order() {
        let (remote, store) = setup();
        let projects = seed_data(&now_timestamp()).projects;

        store.save_projects(&projects).await.unwrap();

        assert_eq!(store.load::<Project>().await.unwrap(), projects);
        let stored = remote.document(Collection::Projects.path()).unwrap();
        let ids: Vec<_> = stored
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["p1", "p2", "p3", "p4"]);
    }

    #[tokio::test]
    async fn each_collection_uses_its_commit_message() {
        let (remote, store) = setup();

        store.save_clients(&[]).await.unwrap();
        store.save_activities(&[]).await.unwrap();

        let messages: Vec<_> = remote
            .writes()
            .into_iter()
            .filter_map(|w| w.message)
            .collect();
        assert_eq!(messages, vec!["Update client data", "Update activity log"]);
    }

    #[tokio::test]
    async fn acme_scenario() {
        let (remote, store) = setup();
        let data = store.load_all().await.unwrap();
        assert!(data.is_empty());

        let acme = Client::from_draft(ClientDraft::new("Acme"), generate_id(), &now_timestamp());
        let mut clients = data.clients;
        clients.push(acme);
        store.save_clients(&clients).await.unwrap();

        let stored = remote.document("data/clients.json").unwrap();
        let stored = stored.as_array().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0]["companyName"], "Acme");
        assert!(is_generated_id(stored[0]["id"].as_str().unwrap()));
        assert_eq!(stored[0]["createdAt"], stored[0]["updatedAt"]);
    }

    #[tokio::test]
    async fn stale_save_is_a_conflict() {
        let (remote, store) = setup();
        store.load_all().await.unwrap();
        store.save_clients(&[]).await.unwrap();
        let before = store.remote().tokens().get(Collection::Clients.path());

        // Another editor saves in between
        remote.put_document(Collection::Clients.path(), &json!([{"id": "other"}]));
        let err = store.save_clients(&[]).await.unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(store.remote().tokens().get(Collection::Clients.path()), before);
        assert_eq!(
            remote.document(Collection::Clients.path()).unwrap(),
            json!([{"id": "other"}])
        );
    }

    #[tokio::test]
    async fn activity_has_no_update_stamp_on_the_wire() {
        let (remote, store) = setup();
        let activity = Activity::from_draft(
            ActivityDraft {
                kind: ActivityType::Email,
                title: "Sent quote".into(),
                ..ActivityDraft::default()
            },
            generate_id(),
            &now_timestamp(),
        );

        store.save_activities(&[activity]).await.unwrap();

        let stored = remote.document(Collection::Activities.path()).unwrap();
        assert_eq!(stored[0]["type"], "email");
        assert!(stored[0].get("updatedAt").is_none());
    }

    #[tokio::test]
    async fn project_status_round_trips_lowercase() {
        let (remote, store) = setup();
        let project = Project::from_draft(
            ProjectDraft {
                status: ProjectStatus::Deepening,
                amount: 1,
                ..ProjectDraft::default()
            },
            generate_id(),
            &now_timestamp(),
        );

        store.save_projects(std::slice::from_ref(&project)).await.unwrap();

        assert_eq!(
            remote.document(Collection::Projects.path()).unwrap()[0]["status"],
            "deepening"
        );
        assert_eq!(store.load::<Project>().await.unwrap(), vec![project]);
    }
}

mod seed_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn seed_writes_collections_in_order() {
        let (remote, store) = setup();

        store.seed().await.unwrap();

        assert_eq!(
            written_paths(&remote),
            vec![
                "data/clients.json",
                "data/projects.json",
                "data/activities.json",
                "data/meeting-notes.json",
            ]
        );
        let data = store.load_all().await.unwrap();
        assert_eq!(
            (
                data.clients.len(),
                data.projects.len(),
                data.activities.len(),
                data.meeting_notes.len()
            ),
            (3, 4, 3, 1)
        );
    }

    #[tokio::test]
    async fn failed_seed_write_stops_the_sequence() {
        let (remote, store) = setup();
        remote.fail_path(
            Collection::Projects.path(),
            Fault::Transport(TransportError::timeout("timed out")),
        );

        let err = store.seed().await.unwrap_err();

        assert!(err.as_remote().unwrap().is_timeout());
        assert_eq!(
            written_paths(&remote),
            vec!["data/clients.json", "data/projects.json"]
        );
        assert!(remote.document(Collection::Activities.path()).is_none());
        assert!(remote.document(Collection::MeetingNotes.path()).is_none());
    }

    #[tokio::test]
    async fn seed_over_loaded_data_reuses_tokens() {
        let (remote, store) = setup();
        store.seed().await.unwrap();
        store.load_all().await.unwrap();
        remote.clear_requests();

        store.seed_with(&seed_data("2026-03-01T00:00:00.000Z")).await.unwrap();

        assert!(remote.writes().iter().all(|w| w.sha.is_some()));
    }
}
