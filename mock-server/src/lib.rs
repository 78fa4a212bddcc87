//! In-process stand-in for the remote product catalog.
//!
//! Implements the catalog's REST surface over an in-memory map so the core
//! crate's integration tests can run the real HTTP path. Ids are assigned
//! sequentially on create, the way the live service does.

use std::{
    collections::{BTreeSet, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    pub rate: f64,
    pub count: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

#[derive(Deserialize)]
pub struct CreateProduct {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    #[serde(default)]
    pub rating: Option<Rating>,
}

#[derive(Deserialize, Default)]
pub struct UpdateProduct {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub rating: Option<Rating>,
}

#[derive(Deserialize, Default)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub sort: Option<String>,
}

#[derive(Default)]
pub struct Catalog {
    products: HashMap<u64, Product>,
    next_id: u64,
}

pub type Db = Arc<RwLock<Catalog>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Catalog::default()));
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/categories", get(list_categories))
        .route("/products/category/{category}", get(list_by_category))
        .route(
            "/products/{id}",
            get(get_product)
                .put(replace_product)
                .patch(patch_product)
                .delete(delete_product),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Products ordered by id, honoring `sort=desc` and `limit`.
async fn list_products(
    State(db): State<Db>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Product>> {
    let catalog = db.read().await;
    let mut products: Vec<Product> = catalog.products.values().cloned().collect();
    products.sort_by_key(|p| p.id);
    if query.sort.as_deref() == Some("desc") {
        products.reverse();
    }
    if let Some(limit) = query.limit {
        products.truncate(limit);
    }
    Json(products)
}

async fn create_product(
    State(db): State<Db>,
    Json(input): Json<CreateProduct>,
) -> (StatusCode, Json<Product>) {
    let mut catalog = db.write().await;
    catalog.next_id += 1;
    let product = Product {
        id: catalog.next_id,
        title: input.title,
        price: input.price,
        description: input.description,
        category: input.category,
        image: input.image,
        rating: input.rating,
    };
    catalog.products.insert(product.id, product.clone());
    (StatusCode::CREATED, Json(product))
}

async fn get_product(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Product>, StatusCode> {
    let catalog = db.read().await;
    catalog
        .products
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Full replacement; the id in the path wins over anything in the body.
async fn replace_product(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<CreateProduct>,
) -> Result<Json<Product>, StatusCode> {
    let mut catalog = db.write().await;
    if !catalog.products.contains_key(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let product = Product {
        id,
        title: input.title,
        price: input.price,
        description: input.description,
        category: input.category,
        image: input.image,
        rating: input.rating,
    };
    catalog.products.insert(id, product.clone());
    Ok(Json(product))
}

async fn patch_product(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateProduct>,
) -> Result<Json<Product>, StatusCode> {
    let mut catalog = db.write().await;
    let product = catalog.products.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input.title {
        product.title = title;
    }
    if let Some(price) = input.price {
        product.price = price;
    }
    if let Some(description) = input.description {
        product.description = description;
    }
    if let Some(category) = input.category {
        product.category = category;
    }
    if let Some(image) = input.image {
        product.image = image;
    }
    if let Some(rating) = input.rating {
        product.rating = Some(rating);
    }
    Ok(Json(product.clone()))
}

/// Answers with the removed product, matching the live catalog's behavior.
async fn delete_product(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Product>, StatusCode> {
    let mut catalog = db.write().await;
    catalog
        .products
        .remove(&id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_by_category(
    State(db): State<Db>,
    Path(category): Path<String>,
) -> Json<Vec<Product>> {
    let catalog = db.read().await;
    let mut products: Vec<Product> = catalog
        .products
        .values()
        .filter(|p| p.category == category)
        .cloned()
        .collect();
    products.sort_by_key(|p| p.id);
    Json(products)
}

/// Distinct category names, sorted.
async fn list_categories(State(db): State<Db>) -> Json<Vec<String>> {
    let catalog = db.read().await;
    let categories: BTreeSet<String> = catalog
        .products
        .values()
        .map(|p| p.category.clone())
        .collect();
    Json(categories.into_iter().collect())
}
