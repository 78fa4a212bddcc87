//! Stateless HTTP request builder and response parser for the product API.
//!
//! # Design
//! `CatalogClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! the core deterministic and free of I/O dependencies.
//!
//! Status policy follows the remote collaborator's contract: any 2xx counts
//! as success, 404 maps to `ApiError::NotFound`, and everything else is
//! surfaced with its status and body.

use url::Url;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateProduct, Product, ProductQuery, UpdateProduct};

/// Synchronous, stateless client for the remote product catalog.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_products(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/products", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// List request with the catalog's optional `limit` and `sort` query
    /// parameters.
    pub fn build_list_products_with(&self, query: &ProductQuery) -> HttpRequest {
        let mut params = Vec::new();
        if let Some(limit) = query.limit {
            params.push(format!("limit={limit}"));
        }
        if let Some(sort) = query.sort {
            params.push(format!("sort={}", sort.as_str()));
        }
        let mut path = format!("{}/products", self.base_url);
        if !params.is_empty() {
            path.push('?');
            path.push_str(&params.join("&"));
        }
        HttpRequest {
            method: HttpMethod::Get,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_product(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/products/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_product(&self, input: &CreateProduct) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialize(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/products", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// Full-replacement update (PUT). The payload carries every field; the
    /// server keeps the id.
    pub fn build_update_product(
        &self,
        id: u64,
        input: &CreateProduct,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialize(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/products/{id}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// Partial update (PATCH). Only the fields present in `input` are sent.
    pub fn build_patch_product(
        &self,
        id: u64,
        input: &UpdateProduct,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialize(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Patch,
            path: format!("{}/products/{id}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_product(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/products/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Category names may contain spaces ("men's clothing"), so the segment
    /// is percent-encoded through `Url` rather than formatted directly.
    pub fn build_list_by_category(&self, category: &str) -> Result<HttpRequest, ApiError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ApiError::Serialize(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::Serialize("base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["products", "category", category]);
        Ok(HttpRequest {
            method: HttpMethod::Get,
            path: url.into(),
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn build_list_categories(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/products/categories", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_products(&self, response: HttpResponse) -> Result<Vec<Product>, ApiError> {
        ensure_success(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialize(e.to_string()))
    }

    pub fn parse_get_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        ensure_success(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialize(e.to_string()))
    }

    pub fn parse_create_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        ensure_success(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialize(e.to_string()))
    }

    pub fn parse_update_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        ensure_success(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialize(e.to_string()))
    }

    pub fn parse_patch_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        ensure_success(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialize(e.to_string()))
    }

    /// The catalog answers DELETE with the removed product; the body is
    /// ignored here because the store only needs the confirmation.
    pub fn parse_delete_product(&self, response: HttpResponse) -> Result<(), ApiError> {
        ensure_success(&response)?;
        Ok(())
    }

    pub fn parse_list_categories(&self, response: HttpResponse) -> Result<Vec<String>, ApiError> {
        ensure_success(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialize(e.to_string()))
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn ensure_success(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
