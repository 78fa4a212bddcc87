//! Single validation boundary between form input and the stores.
//!
//! # Design
//! Forms collect free text; this module turns a raw form into the validated
//! payload type the stores accept, or into the full list of field issues for
//! inline display. Every rule is checked — validation never stops at the
//! first failure.
//!
//! The reference date for due-date checks is injected by the caller so the
//! rules stay deterministic under test.

use std::fmt;

use chrono::NaiveDate;
use url::Url;

use crate::types::{CreateProduct, NewTask, ProductRating, TaskPriority, DEFAULT_CATEGORY};

const TITLE_MAX: usize = 100;
const TASK_DESCRIPTION_MAX: usize = 500;
const PRODUCT_DESCRIPTION_MAX: usize = 1000;
const PRICE_MIN: f64 = 0.01;
const PRICE_MAX: f64 = 10_000.0;

/// A single failed rule, addressed to the form field it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All rule failures for one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub issues: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.issues.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Messages for one field, for inline display next to the widget.
    pub fn for_field(&self, field: &str) -> Vec<&str> {
        self.issues
            .iter()
            .filter(|issue| issue.field == field)
            .map(|issue| issue.message.as_str())
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for issue in &self.issues {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", issue.field, issue.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw task form input, as collected from the user.
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub category: String,
    /// `YYYY-MM-DD`, empty for no due date.
    pub due_date: String,
}

impl TaskForm {
    /// Validates the form against `today` and produces the payload the task
    /// store accepts. Description and due date are optional; a blank
    /// category falls back to the default.
    pub fn validate(&self, today: NaiveDate) -> Result<NewTask, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push("title", "Title is required");
        } else if title.chars().count() > TITLE_MAX {
            errors.push("title", "Title must be less than 100 characters");
        }

        let description = self.description.trim();
        if description.chars().count() > TASK_DESCRIPTION_MAX {
            errors.push("description", "Description must be less than 500 characters");
        }

        let due_date = if self.due_date.trim().is_empty() {
            None
        } else {
            match NaiveDate::parse_from_str(self.due_date.trim(), "%Y-%m-%d") {
                Ok(date) if date < today => {
                    errors.push("dueDate", "Due date cannot be in the past");
                    None
                }
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push("dueDate", "Due date must be a valid date");
                    None
                }
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        let category = self.category.trim();
        Ok(NewTask {
            title: title.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            priority: self.priority,
            category: if category.is_empty() {
                DEFAULT_CATEGORY.to_string()
            } else {
                category.to_string()
            },
            due_date,
        })
    }
}

/// Raw product form input.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rating: Option<ProductRating>,
}

impl ProductForm {
    /// Validates the form and produces the create/replace payload for the
    /// catalog. Unlike tasks, description and category are required here.
    pub fn validate(&self) -> Result<CreateProduct, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push("title", "Title is required");
        } else if title.chars().count() > TITLE_MAX {
            errors.push("title", "Title must be less than 100 characters");
        }

        if self.price.is_nan() || self.price < PRICE_MIN {
            errors.push("price", "Price must be greater than 0");
        } else if self.price > PRICE_MAX {
            errors.push("price", "Price must be less than $10,000");
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.push("description", "Description is required");
        } else if description.chars().count() > PRODUCT_DESCRIPTION_MAX {
            errors.push(
                "description",
                "Description must be less than 1000 characters",
            );
        }

        let category = self.category.trim();
        if category.is_empty() {
            errors.push("category", "Please select a category");
        }

        let image = self.image.trim();
        if image.is_empty() {
            errors.push("image", "Image URL is required");
        } else if Url::parse(image).is_err() {
            errors.push("image", "Please enter a valid URL");
        }

        if let Some(rating) = self.rating {
            if !(0.0..=5.0).contains(&rating.rate) {
                errors.push("rating", "Rating must be between 0 and 5");
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CreateProduct {
            title: title.to_string(),
            price: self.price,
            description: description.to_string(),
            category: category.to_string(),
            image: image.to_string(),
            rating: self.rating,
        })
    }
}
