use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use gym_booking::adapters::memory::InMemoryBookingStore;
use gym_booking::api::handlers::AppState;
use gym_booking::api::router::create_router;
use gym_booking::api::types::*;
use gym_booking::application::booking::ServiceDependencies;
use gym_booking::domain::UserId;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

// ============================================================================
// テスト用のヘルパー関数
// ============================================================================

/// インメモリストアを使ったルーターを作成
fn setup_app() -> (Arc<InMemoryBookingStore>, axum::Router) {
    let store = Arc::new(InMemoryBookingStore::new());
    let app_state = Arc::new(AppState {
        service_deps: ServiceDependencies {
            booking_store: store.clone(),
        },
        default_slot_capacity: 10,
    });
    (store, create_router(app_state))
}

async fn send(app: &axum::Router, request: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// POST /slots でスロットを作成し、そのレスポンスを返す
async fn create_slot(app: &axum::Router, capacity: Option<i32>) -> SlotResponse {
    let mut body = json!({
        "time": "2023-06-28T10:00:00Z",
        "duration": 60,
    });
    if let Some(capacity) = capacity {
        body["capacity"] = json!(capacity);
    }

    let response = send(app, post_json("/slots", body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await
}

// ============================================================================
// 正常系フロー
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let (_store, app) = setup_app();

    let response = send(&app, get("/health")).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_full_booking_flow() {
    let (_store, app) = setup_app();
    let slot = create_slot(&app, Some(2)).await;

    // Step 1: 予約確認画面用のスロット取得
    let response = send(&app, get(&format!("/slots/{}/book", slot.slot_id))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let form: SlotResponse = read_json(response).await;
    assert_eq!(form, slot);

    // Step 2: 予約 → 一覧へリダイレクト
    let response = send(
        &app,
        post_json(
            &format!("/slots/{}/book", slot.slot_id),
            json!({ "user_id": 1 }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/bookings"
    );

    // Step 3: 予約一覧
    let response = send(&app, get("/bookings")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let bookings: Vec<BookingResponse> = read_json(response).await;
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].slot_id, slot.slot_id);
    assert_eq!(bookings[0].user_id, 1);
    assert_eq!(bookings[0].slot.capacity, 1);

    // Step 4: スロット一覧にも残席数が反映されている
    let response = send(&app, get("/slots")).await;
    let slots: Vec<SlotResponse> = read_json(response).await;
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].capacity, 1);
}

#[tokio::test]
async fn test_create_slot_uses_default_capacity() {
    let (_store, app) = setup_app();

    let slot = create_slot(&app, None).await;

    assert_eq!(slot.capacity, 10);
    assert_eq!(slot.duration, 60);
}

// ============================================================================
// エラー系
// ============================================================================

#[tokio::test]
async fn test_booking_form_for_unknown_slot_is_not_found() {
    let (_store, app) = setup_app();

    let response = send(&app, get("/slots/1/book")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_book_unknown_slot_is_not_found() {
    let (store, app) = setup_app();

    let response = send(&app, post_json("/slots/1/book", json!({ "user_id": 1 }))).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "SLOT_NOT_FOUND");
    assert_eq!(store.booking_count().await, 0);
}

#[tokio::test]
async fn test_book_full_slot_reports_message() {
    let (store, app) = setup_app();
    let slot = create_slot(&app, Some(0)).await;

    let response = send(
        &app,
        post_json(
            &format!("/slots/{}/book", slot.slot_id),
            json!({ "user_id": 1 }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "SLOT_FULL");
    assert_eq!(error.message, "Slot is full.");
    assert_eq!(store.booking_count().await, 0);
}

#[tokio::test]
async fn test_book_twice_reports_message() {
    let (store, app) = setup_app();
    let slot = create_slot(&app, Some(1)).await;
    store
        .insert_booking_unchecked(
            gym_booking::domain::SlotId::new(slot.slot_id),
            UserId::new(1),
        )
        .await
        .unwrap();

    let response = send(
        &app,
        post_json(
            &format!("/slots/{}/book", slot.slot_id),
            json!({ "user_id": 1 }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "ALREADY_BOOKED");
    assert_eq!(error.message, "You have already booked this slot.");
    assert_eq!(store.booking_count().await, 1);

    // 残席数は変わらない
    let response = send(&app, get(&format!("/slots/{}/book", slot.slot_id))).await;
    let form: SlotResponse = read_json(response).await;
    assert_eq!(form.capacity, 1);
}

#[tokio::test]
async fn test_create_slot_with_negative_duration_is_rejected() {
    let (_store, app) = setup_app();

    let response = send(
        &app,
        post_json(
            "/slots",
            json!({ "time": "2023-06-28T10:00:00Z", "duration": -1, "capacity": 3 }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.error, "INVALID_SLOT");
}
