//! Full catalog lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the product store's
//! `begin_*` / `finish_*` pairs over real HTTP using ureq. Validates that
//! request building, response parsing and the store's state transitions work
//! end-to-end with the actual server.

use taskfront_core::{
    ApiError, CatalogClient, CreateProduct, HttpMethod, HttpRequest, HttpResponse, ProductStore,
    UpdateProduct,
};

/// Execute an `HttpRequest` using ureq and return the outcome the store
/// expects.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// handle status interpretation. Transport-level failures map to
/// `ApiError::Transport`, the way a host reports a dead server or timeout.
/// The 10-second cap matches the collaborator's contract.
fn execute(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(Some(std::time::Duration::from_secs(10)))
        .build()
        .new_agent();

    let result = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Put, Some(body)) => agent
            .put(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
        (HttpMethod::Patch, Some(body)) => agent
            .patch(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Patch, None) => agent.patch(&req.path).send_empty(),
    };

    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}

/// Start the mock server on a random port and return its base URL.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn payload(title: &str, price: f64, category: &str) -> CreateProduct {
    CreateProduct {
        title: title.to_string(),
        price,
        description: format!("{title} description"),
        category: category.to_string(),
        image: format!("https://img.example/{price}.png"),
        rating: None,
    }
}

#[test]
fn catalog_lifecycle() {
    let base_url = start_server();
    let mut store = ProductStore::new(CatalogClient::new(&base_url));

    // Step 1: fetch — catalog starts empty.
    let req = store.begin_fetch_all();
    store.finish_fetch_all(execute(req));
    assert!(store.error().is_none());
    assert!(store.products().is_empty(), "expected empty catalog");

    // Step 2: create two products; ids come from the server.
    let req = store.begin_create(&payload("Mouse", 24.99, "electronics")).unwrap();
    store.finish_create(execute(req));
    let req = store.begin_create(&payload("Mug", 9.5, "home")).unwrap();
    store.finish_create(execute(req));
    assert!(store.error().is_none());
    assert_eq!(store.products().len(), 2);
    let mouse_id = store.products()[0].id;
    let mug_id = store.products()[1].id;
    assert_ne!(mouse_id, mug_id);

    // Step 3: full replacement via PUT, mirrored into the local list.
    let req = store
        .begin_update(mouse_id, &payload("Trackball", 59.0, "electronics"))
        .unwrap();
    store.finish_update(mouse_id, execute(req));
    assert_eq!(store.products()[0].title, "Trackball");
    assert_eq!(store.products()[1].title, "Mug");

    // Step 4: a fresh fetch replaces the list with the server's state.
    let req = store.begin_fetch_all();
    store.finish_fetch_all(execute(req));
    assert_eq!(store.products().len(), 2);
    assert_eq!(store.products()[0].title, "Trackball");

    // Step 5: fetch a single product into `selected`.
    let req = store.begin_fetch_by_id(mug_id);
    store.finish_fetch_by_id(mug_id, execute(req));
    assert_eq!(store.selected().unwrap().title, "Mug");

    // Step 6: delete, applied locally only after confirmation.
    let req = store.begin_delete(mouse_id);
    store.finish_delete(mouse_id, execute(req));
    assert!(store.error().is_none());
    assert_eq!(store.products().len(), 1);
    assert_eq!(store.products()[0].id, mug_id);

    // Step 7: deleting again fails server-side; the local list is kept.
    let req = store.begin_delete(mouse_id);
    store.finish_delete(mouse_id, execute(req));
    let error = store.error().unwrap();
    assert!(error.starts_with(&format!("Failed to delete product {mouse_id}")));
    assert_eq!(store.products().len(), 1);
}

#[test]
fn client_side_endpoints_beyond_the_store() {
    let base_url = start_server();
    let client = CatalogClient::new(&base_url);

    for p in [
        payload("Mouse", 24.99, "electronics"),
        payload("Keyboard", 49.0, "electronics"),
        payload("Mug", 9.5, "home"),
    ] {
        let req = client.build_create_product(&p).unwrap();
        client.parse_create_product(execute(req).unwrap()).unwrap();
    }

    // Category filter.
    let req = client.build_list_by_category("electronics").unwrap();
    let electronics = client.parse_list_products(execute(req).unwrap()).unwrap();
    assert_eq!(electronics.len(), 2);

    // Distinct category names.
    let req = client.build_list_categories();
    let categories = client.parse_list_categories(execute(req).unwrap()).unwrap();
    assert_eq!(categories, vec!["electronics", "home"]);

    // PATCH applies partial updates.
    let target = electronics[0].id;
    let req = client
        .build_patch_product(
            target,
            &UpdateProduct {
                price: Some(19.99),
                ..UpdateProduct::default()
            },
        )
        .unwrap();
    let patched = client.parse_patch_product(execute(req).unwrap()).unwrap();
    assert_eq!(patched.price, 19.99);
    assert_eq!(patched.title, "Mouse");
}

#[test]
fn transport_failure_reaches_the_error_field() {
    // Nothing listens on this port; the host reports a transport error and
    // the store keeps its (empty) list.
    let mut store = ProductStore::new(CatalogClient::new("http://127.0.0.1:9"));
    let req = store.begin_fetch_all();
    store.finish_fetch_all(execute(req));

    assert!(!store.loading());
    assert!(store.products().is_empty());
    let error = store.error().unwrap();
    assert!(error.starts_with("Failed to fetch products"));
}
