//! Error types for the stores and the catalog API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `Http` with the raw status
//! code and body for debugging. Transport-level failures (connection refused,
//! timeout) are reported by the host through the `Transport` variant, since
//! the core never performs I/O itself.

use thiserror::Error;
use uuid::Uuid;

/// Errors returned by `CatalogClient` parse methods or reported by the host.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 — the requested product does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialize(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialize(String),

    /// The host could not complete the round-trip (network error, timeout).
    #[error("request failed: {0}")]
    Transport(String),
}

/// Errors returned by `TaskStore` mutation operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("no task with id {0}")]
    NotFound(Uuid),

    #[error("task title must not be empty")]
    EmptyTitle,
}

/// Errors returned by the durable storage collaborator.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read key {key:?}: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write key {key:?}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
}
