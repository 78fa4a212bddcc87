//! Task store: single source of truth for the task collection.
//!
//! # Design
//! All mutations are synchronous and side-effect-free apart from the write
//! to durable storage that follows each of them. The store is constructed
//! explicitly with its storage collaborator and passed by reference to
//! whoever renders it; there is no process-wide instance.
//!
//! Mutations return typed results: an operation on an id that is not in the
//! collection answers `TaskError::NotFound` instead of silently doing
//! nothing, so a caller holding a stale id finds out.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::error::TaskError;
use crate::storage::Storage;
use crate::types::{NewTask, Task, TaskPatch, TaskPriority, DEFAULT_CATEGORY};

/// Storage key under which the serialized task collection lives.
pub const TASKS_KEY: &str = "tasks";

/// Status narrowing for [`TaskStore::filter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

/// Search and narrowing criteria over the task collection.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Case-insensitive substring match against title and description.
    pub search: String,
    pub status: StatusFilter,
    pub category: Option<String>,
    pub priority: Option<TaskPriority>,
}

/// Counts displayed by the stats panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    /// High-priority tasks that are still open.
    pub high_priority: usize,
}

/// In-memory task collection plus its durable persistence behavior.
///
/// Canonical order is insertion order: new tasks are appended.
pub struct TaskStore<S: Storage> {
    storage: S,
    tasks: Vec<Task>,
}

impl<S: Storage> TaskStore<S> {
    /// Reads the persisted collection from `storage`. A missing key yields
    /// the built-in sample tasks; corrupt data is logged and likewise falls
    /// back to the samples, never surfacing an error to the caller.
    pub fn load(storage: S) -> Self {
        let tasks = match storage.get(TASKS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(tasks) => tasks,
                Err(err) => {
                    tracing::warn!(%err, "stored task list is corrupt, using sample tasks");
                    sample_tasks()
                }
            },
            Ok(None) => sample_tasks(),
            Err(err) => {
                tracing::warn!(%err, "could not read stored task list, using sample tasks");
                sample_tasks()
            }
        };
        Self { storage, tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Creates a task from a validated payload, assigning `id` and
    /// `created_at`, and appends it to the collection.
    pub fn add(&mut self, new: NewTask) -> Result<Task, TaskError> {
        if new.title.trim().is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        let category = if new.category.trim().is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            new.category
        };
        let task = Task {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            priority: new.priority,
            category,
            due_date: new.due_date,
            completed: false,
            created_at: Utc::now(),
        };
        self.tasks.push(task.clone());
        self.persist();
        Ok(task)
    }

    /// Merges the supplied fields into the task matching `id` and returns
    /// the updated task.
    pub fn update(&mut self, id: Uuid, patch: TaskPatch) -> Result<Task, TaskError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))?;
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = Some(description);
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(category) = patch.category {
            task.category = category;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        let updated = task.clone();
        self.persist();
        Ok(updated)
    }

    pub fn delete(&mut self, id: Uuid) -> Result<(), TaskError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Err(TaskError::NotFound(id));
        }
        self.persist();
        Ok(())
    }

    /// Flips `completed` on the matching task and returns the new value.
    pub fn toggle_completion(&mut self, id: Uuid) -> Result<bool, TaskError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))?;
        task.completed = !task.completed;
        let completed = task.completed;
        self.persist();
        Ok(completed)
    }

    /// Tasks matching `filter`, in collection order.
    pub fn filter(&self, filter: &TaskFilter) -> Vec<&Task> {
        let needle = filter.search.trim().to_lowercase();
        self.tasks
            .iter()
            .filter(|task| match filter.status {
                StatusFilter::All => true,
                StatusFilter::Active => !task.completed,
                StatusFilter::Completed => task.completed,
            })
            .filter(|task| {
                filter
                    .category
                    .as_ref()
                    .is_none_or(|c| task.category.eq_ignore_ascii_case(c))
            })
            .filter(|task| filter.priority.is_none_or(|p| task.priority == p))
            .filter(|task| {
                if needle.is_empty() {
                    return true;
                }
                task.title.to_lowercase().contains(&needle)
                    || task
                        .description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for task in &self.tasks {
            if !seen.contains(&task.category.as_str()) {
                seen.push(task.category.as_str());
            }
        }
        seen
    }

    pub fn stats(&self) -> TaskStats {
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        let high_priority = self
            .tasks
            .iter()
            .filter(|t| t.priority == TaskPriority::High && !t.completed)
            .count();
        TaskStats {
            total: self.tasks.len(),
            completed,
            active: self.tasks.len() - completed,
            high_priority,
        }
    }

    /// Serializes the full collection to storage. Write failures are logged
    /// and do not fail the mutation that triggered them; the in-memory state
    /// stays authoritative for the session.
    fn persist(&mut self) {
        match serde_json::to_string(&self.tasks) {
            Ok(raw) => {
                if let Err(err) = self.storage.set(TASKS_KEY, &raw) {
                    tracing::error!(%err, "failed to persist task list");
                }
            }
            Err(err) => tracing::error!(%err, "failed to serialize task list"),
        }
    }
}

/// Default collection shown on first run or after storage corruption.
fn sample_tasks() -> Vec<Task> {
    let now = Utc::now();
    vec![
        Task {
            id: Uuid::new_v4(),
            title: "Complete project documentation".to_string(),
            description: Some("Write the user guide for the task manager".to_string()),
            priority: TaskPriority::Medium,
            category: "Work".to_string(),
            due_date: Some((now + Duration::days(1)).date_naive()),
            completed: false,
            created_at: now,
        },
        Task {
            id: Uuid::new_v4(),
            title: "Buy groceries".to_string(),
            description: None,
            priority: TaskPriority::High,
            category: DEFAULT_CATEGORY.to_string(),
            due_date: None,
            completed: true,
            created_at: now - Duration::days(2),
        },
    ]
}
