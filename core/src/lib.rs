//! State containers for a task manager and remote product catalog.
//!
//! # Overview
//! Two stores, consumed independently by presentation code:
//!
//! - [`TaskStore`] owns the task collection. Mutations are synchronous and
//!   each one is followed by a full serialization of the collection to the
//!   durable [`Storage`] collaborator.
//! - [`ProductStore`] mirrors the remote catalog. Each remote operation is a
//!   `begin_*` / `finish_*` pair around an HTTP round-trip the host
//!   executes (host-does-IO pattern), with shared `loading` / `error`
//!   status for spinners and toasts.
//!
//! # Design
//! - The core never touches the network: [`CatalogClient`] builds
//!   `HttpRequest` values and parses `HttpResponse` values, making every
//!   state transition deterministic and testable.
//! - Stores are constructed explicitly and passed by reference; there is no
//!   process-wide instance.
//! - Form input crosses a single validation boundary ([`validate`]) before
//!   it reaches a store; the stores additionally answer typed errors
//!   instead of silently ignoring stale ids.

pub mod client;
pub mod error;
pub mod http;
pub mod products;
pub mod storage;
pub mod tasks;
pub mod types;
pub mod validate;

pub use client::CatalogClient;
pub use error::{ApiError, StorageError, TaskError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use products::ProductStore;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use tasks::{StatusFilter, TaskFilter, TaskStats, TaskStore, TASKS_KEY};
pub use types::{
    CreateProduct, NewTask, Product, ProductQuery, ProductRating, SortOrder, Task, TaskPatch,
    TaskPriority, UpdateProduct, DEFAULT_CATEGORY,
};
pub use validate::{FieldError, ProductForm, TaskForm, ValidationErrors};
