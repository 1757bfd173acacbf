//! Integration tests for the public catalog and contact forms.

mod common;

use serde_json::json;
use storefront_api::rest::resources::{ProductQuery, SortOrder, DEFAULT_FEATURED_LIMIT};
use storefront_api::ErrorKind;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{api, client_for, pagination_json, product_json};

#[tokio::test]
async fn test_list_products_sends_filters_and_reads_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api("/products")))
        .and(query_param("page", "2"))
        .and(query_param("limit", "2"))
        .and(query_param("category", "3"))
        .and(query_param("sort", "price"))
        .and(query_param("order", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [product_json(3, "Pump A"), product_json(4, "Pump B")],
            "pagination": pagination_json(2, 2, 5, 3)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let page = client
        .products()
        .list(&ProductQuery {
            page: Some(2),
            limit: Some(2),
            category: Some(3),
            sort: Some("price".to_string()),
            order: Some(SortOrder::Asc),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page[0].name, "Pump A");
    assert_eq!(page.page, 2);
    assert_eq!(page.total_items, 5);
    assert_eq!(page.total_pages, 3);
    assert!(page.has_next_page());
    assert!(page.has_prev_page());
}

#[tokio::test]
async fn test_list_products_is_idempotent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api("/products")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [product_json(1, "Filter")],
            "pagination": pagination_json(1, 12, 1, 1)
        })))
        .expect(2)
        .mount(&server)
        .await;

    let products = client_for(&server).products();
    let first = products.list(&ProductQuery::default()).await.unwrap();
    let second = products.list(&ProductQuery::default()).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_empty_catalog_is_consistent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api("/products")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [],
            "pagination": pagination_json(1, 12, 0, 0)
        })))
        .mount(&server)
        .await;

    let page = client_for(&server)
        .products()
        .list(&ProductQuery::default())
        .await
        .unwrap();

    assert!(page.is_empty());
    assert!(!page.has_next_page());
}

#[tokio::test]
async fn test_inconsistent_envelope_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api("/products")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [product_json(1, "Filter")],
            "pagination": pagination_json(4, 12, 1, 1)
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .products()
        .list(&ProductQuery::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unknown);
    assert_eq!(err.message, "inconsistent pagination envelope");
}

#[tokio::test]
async fn test_missing_pagination_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api("/products")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"products": [product_json(1, "A")]})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .products()
        .list(&ProductQuery::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unknown);
}

#[tokio::test]
async fn test_get_product_with_category() {
    let server = MockServer::start().await;
    let mut product = product_json(9, "Septic tank");
    product["old_price"] = json!(2490.0);
    product["category"] = json!({"id": 1, "name": "Septics", "is_active": true});
    Mock::given(method("GET"))
        .and(path(api("/products/9")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"product": product})))
        .expect(1)
        .mount(&server)
        .await;

    let product = client_for(&server).products().get(9).await.unwrap();

    assert_eq!(product.id, 9);
    assert!(product.is_discounted());
    assert!(product.in_stock());
    assert_eq!(product.category.unwrap().name, "Septics");
}

#[tokio::test]
async fn test_featured_uses_default_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api("/products")))
        .and(query_param("featured", "true"))
        .and(query_param("limit", DEFAULT_FEATURED_LIMIT.to_string().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [product_json(1, "Pump")],
            "pagination": pagination_json(1, 8, 1, 1)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server).products().featured(None).await.unwrap();
    assert_eq!(page.limit, 8);
}

#[tokio::test]
async fn test_search_and_category_keep_other_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api("/products")))
        .and(query_param("search", "filter"))
        .and(query_param("limit", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [],
            "pagination": pagination_json(1, 4, 0, 0)
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api("/products")))
        .and(query_param("category", "5"))
        .and(query_param("limit", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [],
            "pagination": pagination_json(1, 4, 0, 0)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let products = client_for(&server).products();
    let query = ProductQuery {
        limit: Some(4),
        ..Default::default()
    };

    products.search("filter", &query).await.unwrap();
    products.by_category(5, &query).await.unwrap();
}

#[tokio::test]
async fn test_list_categories() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api("/categories")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "categories": [
                {"id": 1, "name": "Pumps", "description": "", "is_active": true},
                {"id": 2, "name": "Filters", "description": "Water filters", "is_active": true}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let categories = client_for(&server).categories().list().await.unwrap();

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[1].description, "Water filters");
}

#[tokio::test]
async fn test_quick_contact() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api("/quick-contact")))
        .and(body_json(json!({"name": "Ivan", "phone": "+79000000000"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Заявка принята",
            "id": 40
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ack = client_for(&server)
        .contacts()
        .quick("Ivan", "+79000000000")
        .await
        .unwrap();

    assert_eq!(ack.id, Some(40));
}

#[tokio::test]
async fn test_phone_only_contact() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api("/phone-contact")))
        .and(body_json(json!({"phone": "+79000000000"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Заявка принята",
            "id": 41
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ack = client_for(&server)
        .contacts()
        .phone_only("+79000000000")
        .await
        .unwrap();

    assert_eq!(ack.message, "Заявка принята");
}

#[tokio::test]
async fn test_contact_validation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api("/phone-contact")))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Телефон обязателен"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .contacts()
        .phone_only("")
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.message, "Телефон обязателен");
}
