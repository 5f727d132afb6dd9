//! Tests for the remote content client against the in-memory remote

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use tracker_remote::{
    ContentClient, Document, Error, FailureKind, Method, RemoteConfig, TransportError,
    VersionTokens,
};
use tracker_test_utils::{Fault, MemoryRemote};

const CLIENTS: &str = "data/clients.json";
const PROJECTS: &str = "data/projects.json";

fn setup() -> (MemoryRemote, ContentClient) {
    let remote = MemoryRemote::default();
    let client = ContentClient::new(remote.config(), remote.clone());
    (remote, client)
}

mod read_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn missing_document_reads_as_absent() {
        let (_remote, client) = setup();

        let doc: Document<Vec<Value>> = client.read(CLIENTS).await.unwrap();

        assert!(doc.is_absent());
        assert!(client.tokens().get(CLIENTS).is_none());
    }

    #[tokio::test]
    async fn read_targets_configured_branch() {
        let remote = MemoryRemote::default();
        let client = ContentClient::new(remote.config().with_branch("data"), remote.clone());

        let _: Document<Value> = client.read(CLIENTS).await.unwrap();

        let requests = remote.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Get);
        assert!(requests[0].url.ends_with("/contents/data/clients.json?ref=data"));
        assert_eq!(requests[0].token, "t");
    }

    #[tokio::test]
    async fn read_records_version_token() {
        let (remote, client) = setup();
        let sha = remote.put_document(CLIENTS, &json!([{"id": "c1"}]));

        let doc: Document<Value> = client.read(CLIENTS).await.unwrap();

        assert_eq!(doc, Document::Found(json!([{"id": "c1"}])));
        assert_eq!(client.tokens().get(CLIENTS), Some(sha));
    }

    #[tokio::test]
    async fn read_decodes_multibyte_text() {
        let (remote, client) = setup();
        remote.put_document(CLIENTS, &json!([{"companyName": "株式会社サンプル商事"}]));

        let doc: Vec<Value> = client.read(CLIENTS).await.unwrap().or_default();

        assert_eq!(doc[0]["companyName"], "株式会社サンプル商事");
    }

    #[tokio::test]
    async fn unauthorized_read_is_remote_read_error() {
        let (remote, client) = setup();
        remote.require_token("other");

        let err = client.read::<Value>(CLIENTS).await.unwrap_err();

        match err {
            Error::RemoteRead {
                status, kind, detail, ..
            } => {
                assert_eq!(status, Some(401));
                assert_eq!(kind, FailureKind::Status);
                assert_eq!(detail, "Bad credentials");
            }
            other => panic!("expected RemoteRead, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn invalid_json_is_decode_failure_and_caches_nothing() {
        let (remote, client) = setup();
        remote.put_raw(CLIENTS, "{ not json");

        let err = client.read::<Value>(CLIENTS).await.unwrap_err();

        assert_eq!(err.kind(), Some(FailureKind::Decode));
        assert!(client.tokens().get(CLIENTS).is_none());
    }

    #[tokio::test]
    async fn unexpected_shape_is_decode_failure() {
        let (remote, client) = setup();
        remote.put_document(CLIENTS, &json!({"not": "an array"}));

        let err = client.read::<Vec<Value>>(CLIENTS).await.unwrap_err();

        assert!(matches!(
            err,
            Error::RemoteRead {
                kind: FailureKind::Decode,
                ..
            }
        ));
    }

    #[rstest]
    #[case(TransportError::timeout("operation timed out"), FailureKind::Timeout)]
    #[case(TransportError::connect("connection refused"), FailureKind::Transport)]
    #[tokio::test]
    async fn transport_failures_keep_their_kind(
        #[case] failure: TransportError,
        #[case] expected: FailureKind,
    ) {
        let (remote, client) = setup();
        remote.fail_next(Fault::Transport(failure));

        let err = client.read::<Value>(CLIENTS).await.unwrap_err();

        assert_eq!(err.kind(), Some(expected));
        assert_eq!(err.status(), None);
    }
}

mod write_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn write_then_read_round_trips_in_order() {
        let (_remote, client) = setup();
        let items = json!([{"id": "b"}, {"id": "a"}, {"id": "c"}]);

        client.write(CLIENTS, &items, None).await.unwrap();
        let back: Value = client.read(CLIENTS).await.unwrap().into_option().unwrap();

        assert_eq!(back, items);
    }

    #[tokio::test]
    async fn stored_document_is_pretty_printed() {
        let (remote, client) = setup();

        client.write(CLIENTS, &json!([{"id": "c1"}]), None).await.unwrap();

        let raw = remote.raw(CLIENTS).unwrap();
        assert!(raw.contains("\n  {\n    \"id\": \"c1\""), "got: {}", raw);
    }

    #[tokio::test]
    async fn first_write_omits_token_and_uses_defaults() {
        let (remote, client) = setup();

        client.write(CLIENTS, &json!([]), None).await.unwrap();

        let writes = remote.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].sha, None);
        assert_eq!(writes[0].message.as_deref(), Some("Update data/clients.json"));
        assert_eq!(writes[0].branch.as_deref(), Some("main"));
        assert_eq!(client.tokens().get(CLIENTS), remote.sha(CLIENTS));
    }

    #[tokio::test]
    async fn next_write_reuses_token_from_previous_write() {
        let (remote, client) = setup();

        client.write(CLIENTS, &json!([1]), Some("first")).await.unwrap();
        let after_first = remote.sha(CLIENTS);
        client.write(CLIENTS, &json!([1, 2]), Some("second")).await.unwrap();

        let writes = remote.writes();
        assert_eq!(writes[1].sha, after_first);
        assert_eq!(writes[1].message.as_deref(), Some("second"));
        assert_eq!(remote.document(CLIENTS), Some(json!([1, 2])));
    }

    #[tokio::test]
    async fn write_after_read_uses_token_from_read() {
        let (remote, client) = setup();
        let sha = remote.put_document(PROJECTS, &json!([]));

        let _: Document<Value> = client.read(PROJECTS).await.unwrap();
        client.write(PROJECTS, &json!([{"id": "p1"}]), None).await.unwrap();

        assert_eq!(remote.writes()[0].sha, Some(sha));
    }

    #[tokio::test]
    async fn tokens_are_tracked_per_path() {
        let (remote, client) = setup();
        remote.put_document(CLIENTS, &json!([]));
        let _: Document<Value> = client.read(CLIENTS).await.unwrap();

        client.write(PROJECTS, &json!([]), None).await.unwrap();

        assert_eq!(remote.writes()[0].sha, None);
    }

    #[tokio::test]
    async fn blind_write_over_existing_document_conflicts() {
        let (remote, client) = setup();
        remote.put_document(CLIENTS, &json!([{"id": "theirs"}]));

        let err = client.write(CLIENTS, &json!([]), None).await.unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(remote.document(CLIENTS), Some(json!([{"id": "theirs"}])));
        assert!(client.tokens().get(CLIENTS).is_none());
    }

    #[tokio::test]
    async fn remote_edit_makes_cached_token_stale() {
        let (remote, client) = setup();
        client.write(CLIENTS, &json!([1]), None).await.unwrap();
        let cached = client.tokens().get(CLIENTS);

        remote.put_document(CLIENTS, &json!([1, "edited elsewhere"]));
        let err = client.write(CLIENTS, &json!([1, 2]), None).await.unwrap_err();

        assert!(matches!(err, Error::Conflict { ref path } if path == CLIENTS));
        assert_eq!(client.tokens().get(CLIENTS), cached);
    }

    #[tokio::test]
    async fn reload_after_conflict_allows_write() {
        let (remote, client) = setup();
        client.write(CLIENTS, &json!([1]), None).await.unwrap();
        remote.put_document(CLIENTS, &json!([1, 2]));
        assert!(client.write(CLIENTS, &json!([1, 3]), None).await.is_err());

        let _: Document<Value> = client.read(CLIENTS).await.unwrap();
        client.write(CLIENTS, &json!([1, 2, 3]), None).await.unwrap();

        assert_eq!(remote.document(CLIENTS), Some(json!([1, 2, 3])));
    }

    #[tokio::test]
    async fn server_error_is_remote_write_error() {
        let (remote, client) = setup();
        remote.fail_next(Fault::Status(
            500,
            r#"{"message":"Server Error"}"#.to_string(),
        ));

        let err = client.write(CLIENTS, &json!([]), None).await.unwrap_err();

        match err {
            Error::RemoteWrite { status, detail, .. } => {
                assert_eq!(status, Some(500));
                assert_eq!(detail, "Server Error");
            }
            other => panic!("expected RemoteWrite, got {:?}", other),
        }
        assert!(client.tokens().is_empty());
    }

    #[tokio::test]
    async fn write_timeout_is_marked() {
        let (remote, client) = setup();
        remote.fail_next(Fault::Transport(TransportError::timeout("timed out")));

        let err = client.write(CLIENTS, &json!([]), None).await.unwrap_err();

        assert!(matches!(err, Error::RemoteWrite { .. }));
        assert!(err.is_timeout());
    }
}

mod config_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn missing_config_fails_before_any_request() {
        let remote = MemoryRemote::default();
        let client = ContentClient::new(None::<RemoteConfig>, remote.clone());

        let read = client.read::<Value>(CLIENTS).await.unwrap_err();
        let write = client.write(CLIENTS, &json!([]), None).await.unwrap_err();

        assert!(matches!(read, Error::NotConfigured));
        assert!(matches!(write, Error::NotConfigured));
        assert!(remote.requests().is_empty());
    }

    #[tokio::test]
    async fn blank_token_counts_as_not_configured() {
        let remote = MemoryRemote::default();
        let mut config = remote.config();
        config.token = String::new();
        let client = ContentClient::new(config, remote.clone());

        let err = client.read::<Value>(CLIENTS).await.unwrap_err();

        assert!(matches!(err, Error::NotConfigured));
        assert!(remote.requests().is_empty());
    }

    #[tokio::test]
    async fn shared_token_cache_is_visible_to_both_clients() {
        let remote = MemoryRemote::default();
        let tokens = Arc::new(VersionTokens::new());
        let first = ContentClient::new(remote.config(), remote.clone()).with_tokens(tokens.clone());
        let second = ContentClient::new(remote.config(), remote.clone()).with_tokens(tokens.clone());

        first.write(CLIENTS, &json!([1]), None).await.unwrap();
        second.write(CLIENTS, &json!([1, 2]), None).await.unwrap();

        assert_eq!(tokens.get(CLIENTS), remote.sha(CLIENTS));
    }

    #[tokio::test]
    async fn separate_clients_have_separate_caches() {
        let remote = MemoryRemote::default();
        let first = ContentClient::new(remote.config(), remote.clone());
        let second = ContentClient::new(remote.config(), remote.clone());

        first.write(CLIENTS, &json!([1]), None).await.unwrap();
        let err = second.write(CLIENTS, &json!([2]), None).await.unwrap_err();

        assert!(err.is_conflict());
    }
}

mod probe_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn probe_reports_repository_name() {
        let (remote, client) = setup();

        let report = client.probe().await;

        assert!(report.ok);
        assert_eq!(report.detail, "Connected: o/r");
        assert!(remote.requests()[0].url.ends_with("/repos/o/r"));
    }

    #[tokio::test]
    async fn probe_reports_auth_failure() {
        let (remote, client) = setup();
        remote.require_token("other");

        let report = client.probe().await;

        assert!(!report.ok);
        assert_eq!(report.detail, "Connection failed: 401 Unauthorized");
    }

    #[tokio::test]
    async fn probe_reports_missing_repository() {
        let remote = MemoryRemote::new("o", "r");
        let config = RemoteConfig::new("t", "o", "elsewhere")
            .with_api_base(tracker_test_utils::TEST_API_BASE);
        let client = ContentClient::new(config, remote);

        let report = client.probe().await;

        assert!(!report.ok);
        assert!(report.detail.contains("404"), "got: {}", report.detail);
    }

    #[tokio::test]
    async fn probe_reports_network_error() {
        let (remote, client) = setup();
        remote.fail_next(Fault::Transport(TransportError::connect("dns error")));

        let report = client.probe().await;

        assert!(!report.ok);
        assert_eq!(report.detail, "Connection error: dns error");
    }

    #[tokio::test]
    async fn probe_without_config_does_not_send() {
        let remote = MemoryRemote::default();
        let client = ContentClient::new(None::<RemoteConfig>, remote.clone());

        let report = client.probe().await;

        assert!(!report.ok);
        assert_eq!(report.detail, "Not configured");
        assert!(remote.requests().is_empty());
    }
}
