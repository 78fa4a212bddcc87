//! Domain types for tasks and catalog products.
//!
//! # Design
//! Task fields serialize with camelCase names (`dueDate`, `createdAt`) so the
//! persisted format stays a flat JSON array readable by any consumer of the
//! same storage key. Product DTOs mirror the remote catalog's schema but are
//! defined independently from the mock-server crate; integration tests catch
//! schema drift between the two.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category assigned to a task when the caller leaves it blank.
pub const DEFAULT_CATEGORY: &str = "Personal";

/// Priority level of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// A user-owned to-do item.
///
/// `id` and `created_at` are assigned by the store at creation and never
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Validated payload for creating a task.
///
/// Produced by `TaskForm::validate`; the store fills in `id`, `created_at`
/// and `completed` itself.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub category: String,
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, priority: TaskPriority) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority,
            category: DEFAULT_CATEGORY.to_string(),
            due_date: None,
        }
    }
}

/// Partial update for an existing task. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub category: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub completed: Option<bool>,
}

/// Aggregate rating attached to a product by the remote catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductRating {
    pub rate: f64,
    pub count: u64,
}

/// A catalog item. `id` is assigned by the remote collaborator; the client
/// never invents one for create requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<ProductRating>,
}

/// Request payload for creating a product (also used as the full replacement
/// body for PUT).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProduct {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<ProductRating>,
}

/// Request payload for partially updating a product via PATCH. Only the
/// fields present in the JSON are applied; omitted fields remain unchanged
/// on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<ProductRating>,
}

/// Sort direction accepted by the catalog's list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Optional query parameters for listing products.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductQuery {
    pub limit: Option<u32>,
    pub sort: Option<SortOrder>,
}
