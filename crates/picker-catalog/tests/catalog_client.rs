//! Integration tests for `CatalogClient::fetch_products_page`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use picker_catalog::{CatalogClient, CatalogError, CatalogSource, PageOutcome, SearchPaginator};

fn test_client(server: &MockServer) -> CatalogClient {
    CatalogClient::new(
        &format!("{}/products", server.uri()),
        "test-key",
        5,
        "picker-test/0.1",
    )
    .expect("failed to build test CatalogClient")
}

fn shirt_json() -> serde_json::Value {
    json!([{
        "id": 1,
        "title": "Shirt",
        "image": {"src": "https://cdn.example.com/shirt.png"},
        "variants": [
            {"id": 11, "title": "S", "available": 4, "price": "12.00"},
            {"id": 12, "title": "M", "price": "12.00"}
        ]
    }])
}

#[tokio::test]
async fn sends_api_key_and_paging_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(header("x-api-key", "test-key"))
        .and(query_param("search", "shirt"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(shirt_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch_products_page("shirt", 2, 5).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let products = result.unwrap().products;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].title, "Shirt");
    assert_eq!(
        products[0].image_url.as_deref(),
        Some("https://cdn.example.com/shirt.png")
    );
    assert_eq!(products[0].variants[0].available, Some(4));
    assert_eq!(products[0].variants[1].available, None);
}

#[tokio::test]
async fn omits_search_param_for_empty_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param_is_missing("search"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let products = client.fetch_products_page("", 1, 5).await.unwrap().products;
    assert!(products.is_empty());
}

#[tokio::test]
async fn non_array_body_is_an_empty_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": "no results"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch_products_page("shirt", 1, 5).await;
    assert!(
        matches!(result, Ok(ref page) if page.products.is_empty() && page.received == 0),
        "expected empty page, got: {result:?}"
    );
}

#[tokio::test]
async fn server_error_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch_products_page("shirt", 1, 5).await;
    assert!(
        matches!(result, Err(CatalogError::UnexpectedStatus { status: 500, .. })),
        "expected UnexpectedStatus(500), got: {result:?}"
    );
}

#[tokio::test]
async fn unauthorized_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.fetch_products_page("", 1, 5).await;
    assert!(
        matches!(result, Err(CatalogError::UnexpectedStatus { status: 401, .. })),
        "expected UnexpectedStatus(401), got: {result:?}"
    );
}

#[tokio::test]
async fn numeric_price_is_accepted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 7,
            "title": "Mug",
            "image": null,
            "variants": [{"id": 71, "title": "Default Title", "price": 8.5}]
        }])))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let products = client.fetch_products_page("", 1, 5).await.unwrap().products;
    assert_eq!(products[0].variants[0].price, "8.5");
    assert!(products[0].image_url.is_none());
}

#[tokio::test]
async fn malformed_element_does_not_end_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Shirt"},
            {"id": 2, "title": "Hat"},
            {"id": 3, "title": null},
            {"id": 4, "title": "Mug"},
            {"id": 5, "title": "Sock"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mut paginator = SearchPaginator::new(5);
    let request = paginator.search("");

    let page = client.fetch_page(&request).await;
    let page = page.expect("page 1 should decode");
    assert_eq!(page.products.len(), 4);
    assert_eq!(page.received, 5);

    let outcome = paginator.apply(request.tag, Ok(page));
    assert!(
        matches!(outcome, PageOutcome::Appended { page: 1, appended: 4 }),
        "expected Appended, got: {outcome:?}"
    );
    let next = paginator.load_more();
    assert_eq!(next.map(|r| r.page()), Some(2));
}
