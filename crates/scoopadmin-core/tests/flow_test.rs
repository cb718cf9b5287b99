// End-to-end flow tests: dispatcher + store against a mock backend.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scoopadmin_api::{ApiClient, ListQuery, MutationBody, ResourceKind, SessionStore};
use scoopadmin_core::{
    AdminStore, CoreError, Dispatcher, DomainEvent, EventBus, ListController, NotificationLevel,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Dispatcher, tempfile::TempDir) {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let session = Arc::new(SessionStore::open(dir.path().join("session.json")));
    session
        .store(secrecy::SecretString::from("test-token".to_owned()), None)
        .expect("store token");
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new(), session)
        .expect("client");
    let dispatcher = Dispatcher::new(Arc::new(client), Arc::new(AdminStore::new()));
    (server, dispatcher, dir)
}

fn banner_page(titles: &[&str]) -> serde_json::Value {
    let items: Vec<_> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| json!({ "id": format!("b-{i}"), "title": title, "active": true }))
        .collect();
    json!({
        "success": true,
        "data": items,
        "pagination": { "page": 1, "limit": 10, "total": titles.len(), "total_pages": 1 }
    })
}

// ── Concurrent fetches ──────────────────────────────────────────────

#[tokio::test]
async fn last_resolved_response_wins_the_list_state() {
    // Two overlapping fetches for the same list: the one that resolves
    // last determines the final slice state, regardless of issue order.
    let (server, dispatcher, _dir) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/banners"))
        .and(query_param("search", "mango"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(200))
                .set_body_json(banner_page(&["Mango madness"])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/banners"))
        .and(query_param("search", "berry"))
        .respond_with(ResponseTemplate::new(200).set_body_json(banner_page(&["Berry blast"])))
        .mount(&server)
        .await;

    let slow = ListQuery::new().page(1).limit(10).search("mango");
    let fast = ListQuery::new().page(1).limit(10).search("berry");
    let (slow_result, fast_result) = tokio::join!(
        dispatcher.fetch_list(ResourceKind::Banners, &slow),
        dispatcher.fetch_list(ResourceKind::Banners, &fast),
    );
    slow_result.expect("slow fetch");
    fast_result.expect("fast fetch");

    let list = dispatcher.store().banners.list.get();
    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].title, "Mango madness");
    assert!(!list.loading);
}

// ── Delete + composed refetch ───────────────────────────────────────

#[tokio::test]
async fn delete_then_composed_refetch_drops_the_row() {
    let (server, dispatcher, _dir) = setup().await;
    let ctl = ListController::new(ResourceKind::Banners);

    // First fetch sees two rows, the refetch after the delete sees one.
    Mock::given(method("GET"))
        .and(path("/api/banners"))
        .respond_with(ResponseTemplate::new(200).set_body_json(banner_page(&["Keep", "Drop"])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/banners"))
        .respond_with(ResponseTemplate::new(200).set_body_json(banner_page(&["Keep"])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/banners/delete"))
        .and(body_json(json!({ "id": "b-1" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "message": "deleted" })),
        )
        .mount(&server)
        .await;

    dispatcher
        .fetch_list(ResourceKind::Banners, &ctl.query())
        .await
        .expect("initial fetch");
    assert_eq!(dispatcher.store().banners.list.get().items.len(), 2);

    dispatcher
        .delete(ResourceKind::Banners, "b-1")
        .await
        .expect("delete");

    // The delete alone never rewrites the rows.
    let list = dispatcher.store().banners.list.get();
    assert_eq!(list.items.len(), 2);
    let delete = dispatcher.store().banners.delete.get();
    assert_eq!(delete.result_id.as_deref(), Some("b-1"));
    assert!(delete.error.is_none());

    // The screen composes the refetch with its current query.
    dispatcher
        .fetch_list(ResourceKind::Banners, &ctl.query())
        .await
        .expect("refetch");
    let list = dispatcher.store().banners.list.get();
    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].title, "Keep");
}

// ── Failure handling ────────────────────────────────────────────────

#[tokio::test]
async fn failed_refresh_keeps_previous_rows_visible() {
    let (server, dispatcher, _dir) = setup().await;
    let query = ListQuery::new().page(1).limit(10);

    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{ "id": "o-1", "orderNumber": "SN-100", "status": "pending", "total": 12.5 }],
            "pagination": { "page": 1, "limit": 10, "total": 1, "total_pages": 1 }
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "success": false, "error": "database unavailable" })),
        )
        .mount(&server)
        .await;

    dispatcher
        .fetch_list(ResourceKind::Orders, &query)
        .await
        .expect("first fetch");

    let err = dispatcher
        .fetch_list(ResourceKind::Orders, &query)
        .await
        .expect_err("refresh fails");
    assert!(matches!(err, CoreError::Api { .. }));

    let list = dispatcher.store().orders.list.get();
    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].order_number, "SN-100");
    assert!(list.error.is_some());
}

#[tokio::test]
async fn mutation_failure_raises_error_toast_and_leaves_list_alone() {
    let (server, dispatcher, _dir) = setup().await;
    let mut toasts = dispatcher.notifications();

    Mock::given(method("POST"))
        .and(path("/api/products/create"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "success": false, "error": "name already in use" })),
        )
        .mount(&server)
        .await;

    let err = dispatcher
        .create(
            ResourceKind::Products,
            MutationBody::Json(json!({ "name": "Sundae", "price": 6.0 })),
        )
        .await
        .expect_err("create fails");
    assert!(err.to_string().contains("name already in use"));

    let create = dispatcher.store().products.create.get();
    assert!(!create.loading);
    assert!(create.error.is_some());
    assert!(dispatcher.store().products.list.get().items.is_empty());

    let toast = toasts.recv().await.expect("toast");
    assert_eq!(toast.level, NotificationLevel::Error);
    assert!(toast.message.contains("Product create failed"));
}

#[tokio::test]
async fn successful_create_raises_success_toast_with_new_id() {
    let (server, dispatcher, _dir) = setup().await;
    let mut toasts = dispatcher.notifications();

    Mock::given(method("POST"))
        .and(path("/api/banners/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({ "success": true, "data": { "id": "b-new", "title": "Fresh" } }),
        ))
        .mount(&server)
        .await;

    let id = dispatcher
        .create(
            ResourceKind::Banners,
            MutationBody::Json(json!({ "title": "Fresh", "active": true })),
        )
        .await
        .expect("create");
    assert_eq!(id, "b-new");
    assert_eq!(
        dispatcher.store().banners.create.get().result_id.as_deref(),
        Some("b-new")
    );

    let toast = toasts.recv().await.expect("toast");
    assert_eq!(toast.level, NotificationLevel::Success);
    assert_eq!(toast.message, "Banner created");
}

// ── Event-driven refetch ────────────────────────────────────────────

#[tokio::test]
async fn added_event_refetches_the_mounted_list() {
    let (server, dispatcher, _dir) = setup().await;
    let bus = EventBus::new();
    let mut events = bus.subscribe();
    let mut ctl = ListController::new(ResourceKind::Orders);
    ctl.set_page(3, None);

    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{ "id": "o-2", "orderNumber": "SN-101", "status": "pending", "total": 8.0 }],
            "pagination": { "page": 1, "limit": 10, "total": 1, "total_pages": 1 }
        })))
        .mount(&server)
        .await;

    bus.publish(DomainEvent::ResourceAdded {
        kind: ResourceKind::Orders,
    });
    let event = events.recv().await.expect("event");

    // A products screen ignores the order event entirely.
    let other = ListController::new(ResourceKind::Products);
    assert!(other.handle_event(&event).is_none());

    // The refetch jumps back to the first page, where the new order is.
    let query = ctl.handle_event(&event).expect("same-kind refetch");
    assert!(query.to_params().contains(&("page", "1".to_owned())));
    dispatcher
        .fetch_list(ResourceKind::Orders, &query)
        .await
        .expect("refetch");
    assert_eq!(
        dispatcher.store().orders.list.get().items[0].order_number,
        "SN-101"
    );
}

// ── Settings singleton ──────────────────────────────────────────────

#[tokio::test]
async fn settings_round_trip_through_detail_and_update_slices() {
    let (server, dispatcher, _dir) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/settings/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "name": "Scoop Nation", "currency": "EUR", "deliveryFee": 2.5 }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/settings/update"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": "saved" })),
        )
        .mount(&server)
        .await;

    dispatcher.fetch_settings().await.expect("fetch settings");
    let detail = dispatcher.store().settings.detail.get();
    let mut settings = detail.data.expect("settings loaded");
    assert_eq!(settings.name, "Scoop Nation");

    settings.delivery_fee = 0.0;
    dispatcher
        .update_settings(&settings)
        .await
        .expect("update settings");
    let update = dispatcher.store().settings.update.get();
    assert!(!update.loading);
    assert!(update.error.is_none());
}
