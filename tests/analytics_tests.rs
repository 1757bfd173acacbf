//! Integration tests for visit tracking and analytics administration.

mod common;

use serde_json::json;
use storefront_api::rest::resources::PhoneContactQuery;
use storefront_api::ErrorKind;
use wiremock::matchers::{any, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{api, client_for, sign_in_admin, sign_in_customer};

#[tokio::test]
async fn test_tracking_is_public() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api("/track-visitor")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Посещение зарегистрировано"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api("/track-phone-click")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Клик по телефону зарегистрирован"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let analytics = client_for(&server).analytics();

    let ack = analytics.track_visit().await.unwrap();
    assert_eq!(ack.message, "Посещение зарегистрировано");

    let ack = analytics.track_phone_click().await.unwrap();
    assert_eq!(ack.message, "Клик по телефону зарегистрирован");
}

#[tokio::test]
async fn test_tracking_failure_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api("/track-phone-click")))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"error": "Ошибка сохранения статистики кликов"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .analytics()
        .track_phone_click()
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::HttpStatus(500));
    assert_eq!(err.message, "Ошибка сохранения статистики кликов");
}

#[tokio::test]
async fn test_admin_analytics_is_gated() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    sign_in_customer(&client, "t1");
    let admin = client.admin_analytics();

    let results = [
        admin.visitor_stats(None).await.map(|_| ()),
        admin.phone_click_stats(None).await.map(|_| ()),
        admin
            .phone_contacts(&PhoneContactQuery::default())
            .await
            .map(|_| ()),
        admin.delete_phone_contact(1).await.map(|_| ()),
    ];

    for result in results {
        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(err.message, "admin access required");
    }
}

#[tokio::test]
async fn test_visitor_stats() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api("/admin/visitor-stats")))
        .and(query_param("days", "7"))
        .and(header("Authorization", "Bearer t-admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "daily_stats": [{"date": "2024-06-02", "unique_views": 14, "total_views": 16}],
            "monthly_stats": [{"month": "2024-06", "unique_views": 30, "total_views": 41}],
            "total_unique": 311
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    sign_in_admin(&client, "t-admin");

    let stats = client.admin_analytics().visitor_stats(Some(7)).await.unwrap();

    assert_eq!(stats.daily_stats[0].total_views, 16);
    assert_eq!(stats.monthly_stats[0].unique_views, 30);
    assert_eq!(stats.total_unique, 311);
}

#[tokio::test]
async fn test_phone_click_stats_with_no_clicks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api("/admin/phone-click-stats")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_clicks": 0,
            "unique_clicks": 0,
            "daily_clicks": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    sign_in_admin(&client, "t-admin");

    let stats = client.admin_analytics().phone_click_stats(None).await.unwrap();
    assert_eq!(stats.total_clicks, 0);
    assert!(stats.daily_clicks.is_empty());
}

#[tokio::test]
async fn test_list_and_delete_phone_contacts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(api("/admin/phone-contacts")))
        .and(query_param("page", "1"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contacts": [
                {"id": 9, "phone": "+79000000009", "created_at": "2024-06-02T10:00:00Z"},
                {"id": 8, "phone": "+79000000008", "created_at": "2024-06-01T10:00:00Z"}
            ],
            "total": 3,
            "page": 1,
            "limit": 2,
            "pages": 2
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(api("/admin/phone-contacts/9")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Контакт успешно удален"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    sign_in_admin(&client, "t-admin");
    let admin = client.admin_analytics();

    let page = admin
        .phone_contacts(&PhoneContactQuery {
            page: Some(1),
            limit: Some(2),
        })
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].phone, "+79000000009");
    assert_eq!(page.total_items, 3);
    assert!(page.has_next_page());

    let ack = admin.delete_phone_contact(9).await.unwrap();
    assert_eq!(ack.message, "Контакт успешно удален");
}

#[tokio::test]
async fn test_missing_phone_contact_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(api("/admin/phone-contacts/404")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Контакт не найден"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    sign_in_admin(&client, "t-admin");

    let err = client
        .admin_analytics()
        .delete_phone_contact(404)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.message, "Контакт не найден");
}
