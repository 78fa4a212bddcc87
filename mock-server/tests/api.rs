use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Product};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn mouse_body() -> &'static str {
    r#"{"title":"Mouse","price":24.99,"description":"Optical","category":"electronics","image":"https://img.example/mouse.png"}"#
}

fn mug_body() -> &'static str {
    r#"{"title":"Mug","price":9.5,"description":"Ceramic","category":"home","image":"https://img.example/mug.png","rating":{"rate":4.2,"count":12}}"#
}

// --- list ---

#[tokio::test]
async fn list_products_empty() {
    let app = app();
    let resp = app.oneshot(get_request("/products")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let products: Vec<Product> = body_json(resp).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn list_products_honors_limit_and_sort() {
    let app = app();
    for body in [mouse_body(), mug_body(), mouse_body()] {
        let resp = app
            .clone()
            .oneshot(json_request("POST", "/products", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = app
        .clone()
        .oneshot(get_request("/products?sort=desc&limit=2"))
        .await
        .unwrap();
    let products: Vec<Product> = body_json(resp).await;
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, 3);
    assert_eq!(products[1].id, 2);
}

// --- create ---

#[tokio::test]
async fn create_product_returns_201_with_sequential_ids() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/products", mouse_body()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let first: Product = body_json(resp).await;
    assert_eq!(first.id, 1);
    assert_eq!(first.title, "Mouse");
    assert!(first.rating.is_none());

    let resp = app
        .oneshot(json_request("POST", "/products", mug_body()))
        .await
        .unwrap();
    let second: Product = body_json(resp).await;
    assert_eq!(second.id, 2);
    assert!(second.rating.is_some());
}

// --- get ---

#[tokio::test]
async fn get_product_not_found() {
    let app = app();
    let resp = app.oneshot(get_request("/products/42")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn get_product_returns_created_product() {
    let app = app();
    app.clone()
        .oneshot(json_request("POST", "/products", mouse_body()))
        .await
        .unwrap();

    let resp = app.oneshot(get_request("/products/1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let product: Product = body_json(resp).await;
    assert_eq!(product.title, "Mouse");
}

// --- put ---

#[tokio::test]
async fn replace_product_keeps_path_id() {
    let app = app();
    app.clone()
        .oneshot(json_request("POST", "/products", mouse_body()))
        .await
        .unwrap();

    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/products/1",
            r#"{"title":"Trackball","price":59.0,"description":"Thumb-operated","category":"electronics","image":"https://img.example/tb.png"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let product: Product = body_json(resp).await;
    assert_eq!(product.id, 1);
    assert_eq!(product.title, "Trackball");
}

#[tokio::test]
async fn replace_missing_product_is_404() {
    let app = app();
    let resp = app
        .oneshot(json_request("PUT", "/products/9", mouse_body()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- patch ---

#[tokio::test]
async fn patch_product_applies_only_present_fields() {
    let app = app();
    app.clone()
        .oneshot(json_request("POST", "/products", mouse_body()))
        .await
        .unwrap();

    let resp = app
        .oneshot(json_request("PATCH", "/products/1", r#"{"price":19.99}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let product: Product = body_json(resp).await;
    assert_eq!(product.price, 19.99);
    assert_eq!(product.title, "Mouse");
}

// --- delete ---

#[tokio::test]
async fn delete_product_returns_removed_product_then_404() {
    let app = app();
    app.clone()
        .oneshot(json_request("POST", "/products", mouse_body()))
        .await
        .unwrap();

    let resp = app
        .clone()
        .oneshot(json_request("DELETE", "/products/1", ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let removed: Product = body_json(resp).await;
    assert_eq!(removed.id, 1);

    let resp = app
        .oneshot(json_request("DELETE", "/products/1", ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- categories ---

#[tokio::test]
async fn list_by_category_filters() {
    let app = app();
    for body in [mouse_body(), mug_body()] {
        app.clone()
            .oneshot(json_request("POST", "/products", body))
            .await
            .unwrap();
    }

    let resp = app
        .oneshot(get_request("/products/category/home"))
        .await
        .unwrap();
    let products: Vec<Product> = body_json(resp).await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].category, "home");
}

#[tokio::test]
async fn list_categories_is_sorted_and_distinct() {
    let app = app();
    for body in [mouse_body(), mug_body(), mouse_body()] {
        app.clone()
            .oneshot(json_request("POST", "/products", body))
            .await
            .unwrap();
    }

    let resp = app.oneshot(get_request("/products/categories")).await.unwrap();
    let categories: Vec<String> = body_json(resp).await;
    assert_eq!(categories, vec!["electronics", "home"]);
}
