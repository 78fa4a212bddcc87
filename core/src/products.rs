//! Product store: mirror of the remote catalog's last known state.
//!
//! # Design
//! Each remote operation is a `begin_*` / `finish_*` pair around the host's
//! HTTP round-trip. `begin_*` flips `loading` on, clears any previous error
//! and hands back the request to execute; `finish_*` takes the outcome
//! (`Err` is how the host reports a transport failure such as a timeout),
//! flips `loading` off and applies the result to the local list.
//!
//! Operations are not coordinated against each other: if two round-trips for
//! the same id are in flight, whichever `finish_*` runs last wins. Local
//! state changes only after the remote call resolves — the one list removal
//! in `finish_delete` happens after confirmation, never optimistically.

use crate::client::CatalogClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{CreateProduct, Product};

/// In-memory product list plus per-flight `loading` / `error` status.
pub struct ProductStore {
    client: CatalogClient,
    products: Vec<Product>,
    selected: Option<Product>,
    loading: bool,
    error: Option<String>,
}

impl ProductStore {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            products: Vec::new(),
            selected: None,
            loading: false,
            error: None,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn selected(&self) -> Option<&Product> {
        self.selected.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Human-readable failure of the most recent operation, retained until
    /// the next `begin_*` or an explicit [`clear_error`](Self::clear_error).
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_selected(&mut self, product: Option<Product>) {
        self.selected = product;
    }

    fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn fail(&mut self, context: &str, err: &ApiError) {
        self.error = Some(format!("{context}: {err}"));
    }

    /// Starts a full refresh of the local list.
    pub fn begin_fetch_all(&mut self) -> HttpRequest {
        self.start();
        self.client.build_list_products()
    }

    /// On success the local list is replaced wholesale by the authoritative
    /// response; on failure the previous list is left untouched.
    pub fn finish_fetch_all(&mut self, outcome: Result<HttpResponse, ApiError>) {
        self.loading = false;
        match outcome.and_then(|resp| self.client.parse_list_products(resp)) {
            Ok(products) => self.products = products,
            Err(err) => self.fail("Failed to fetch products", &err),
        }
    }

    pub fn begin_fetch_by_id(&mut self, id: u64) -> HttpRequest {
        self.start();
        self.client.build_get_product(id)
    }

    pub fn finish_fetch_by_id(&mut self, id: u64, outcome: Result<HttpResponse, ApiError>) {
        self.loading = false;
        match outcome.and_then(|resp| self.client.parse_get_product(resp)) {
            Ok(product) => self.selected = Some(product),
            Err(err) => self.fail(&format!("Failed to fetch product {id}"), &err),
        }
    }

    pub fn begin_create(&mut self, payload: &CreateProduct) -> Result<HttpRequest, ApiError> {
        self.start();
        match self.client.build_create_product(payload) {
            Ok(req) => Ok(req),
            Err(err) => {
                self.loading = false;
                self.fail("Failed to create product", &err);
                Err(err)
            }
        }
    }

    /// On success the returned product (carrying the server-assigned id) is
    /// appended to the local list.
    pub fn finish_create(&mut self, outcome: Result<HttpResponse, ApiError>) {
        self.loading = false;
        match outcome.and_then(|resp| self.client.parse_create_product(resp)) {
            Ok(product) => self.products.push(product),
            Err(err) => self.fail("Failed to create product", &err),
        }
    }

    pub fn begin_update(
        &mut self,
        id: u64,
        payload: &CreateProduct,
    ) -> Result<HttpRequest, ApiError> {
        self.start();
        match self.client.build_update_product(id, payload) {
            Ok(req) => Ok(req),
            Err(err) => {
                self.loading = false;
                self.fail(&format!("Failed to update product {id}"), &err);
                Err(err)
            }
        }
    }

    /// On success the matching local entry is replaced by the server's
    /// version. A response for an id with no local entry is dropped; that
    /// only happens when a fetch replaced the list mid-flight.
    pub fn finish_update(&mut self, id: u64, outcome: Result<HttpResponse, ApiError>) {
        self.loading = false;
        match outcome.and_then(|resp| self.client.parse_update_product(resp)) {
            Ok(product) => {
                match self.products.iter_mut().find(|p| p.id == product.id) {
                    Some(entry) => *entry = product,
                    None => {
                        tracing::warn!(id = product.id, "update response for unknown product");
                    }
                }
            }
            Err(err) => self.fail(&format!("Failed to update product {id}"), &err),
        }
    }

    pub fn begin_delete(&mut self, id: u64) -> HttpRequest {
        self.start();
        self.client.build_delete_product(id)
    }

    /// Removes the local entry only after the server confirms the delete.
    pub fn finish_delete(&mut self, id: u64, outcome: Result<HttpResponse, ApiError>) {
        self.loading = false;
        match outcome.and_then(|resp| self.client.parse_delete_product(resp)) {
            Ok(()) => self.products.retain(|p| p.id != id),
            Err(err) => self.fail(&format!("Failed to delete product {id}"), &err),
        }
    }
}
