//! Versioned remote content client for Client Tracker
//!
//! Treats files in a remote repository as a key-value store of JSON
//! documents keyed by path:
//!
//! - **Reads** fetch one document on the configured branch; a missing file
//!   is [`Document::Absent`], not an error
//! - **Writes** replace one document in a single commit, guarded by the
//!   version token last seen for that path
//! - **Probe** checks that credentials and target resolve
//!
//! Configuration comes from a [`ConfigSource`] (usually the
//! [`SettingsStore`]) and requests go through a [`Transport`] (usually
//! [`HttpTransport`]).

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod settings;
pub mod tokens;
pub mod transport;

pub use client::{ContentClient, Document, ProbeReport};
pub use config::{ConfigSource, RemoteConfig};
pub use error::{Error, FailureKind, Result};
pub use http::HttpTransport;
pub use settings::SettingsStore;
pub use tokens::VersionTokens;
pub use transport::{
    Method, Transport, TransportError, TransportErrorKind, TransportRequest, TransportResponse,
};
