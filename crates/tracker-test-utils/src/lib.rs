//! Shared test utilities for the client-tracker workspace.
//!
//! This crate provides an in-memory stand-in for the versioned-content API
//! so client and store tests run without a network. It is a dev-dependency
//! only and is never published.
//!
//! # Modules
//!
//! - [`remote`] - [`MemoryRemote`] fake transport with request recording
//!   and fault injection

pub mod remote;

pub use remote::{Fault, MemoryRemote, RecordedRequest, TEST_API_BASE};
