use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use marquee_api::{app, AppState};
use marquee_core::booking::{BookingRecord, CreateBookingRequest};
use marquee_core::repository::BookingRepository;
use marquee_store::MemoryBookingStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

fn test_app(store: Arc<MemoryBookingStore>) -> axum::Router {
    app(AppState::new(store))
}

fn get_booking() -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/api/booking")
        .body(Body::empty())
        .unwrap()
}

fn post_booking(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/booking")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn empty_store_returns_sentinel_message() {
    let app = test_app(Arc::new(MemoryBookingStore::new()));

    let response = app.oneshot(get_booking()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"message": "no previous booking found"}));
}

#[tokio::test]
async fn create_then_fetch_round_trips() {
    let store = Arc::new(MemoryBookingStore::new());
    let app = test_app(store);

    let payload = json!({
        "movie": "Tenet",
        "slot": "01:00 PM",
        "seats": {"A1": 2, "D2": 1}
    });
    let response = app.clone().oneshot(post_booking(payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({}));

    let response = app.oneshot(get_booking()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "movie": "Tenet",
            "slot": "01:00 PM",
            "seats": {"A1": 2, "A2": 0, "A3": 0, "A4": 0, "D1": 0, "D2": 1}
        })
    );
}

#[tokio::test]
async fn latest_reflects_the_second_of_two_bookings() {
    let app = test_app(Arc::new(MemoryBookingStore::new()));

    for movie in ["Tenet", "Come Play"] {
        let payload = json!({"movie": movie, "slot": "08:00 PM", "seats": {"A1": 1}});
        let response = app.clone().oneshot(post_booking(payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let body = body_json(app.oneshot(get_booking()).await.unwrap()).await;
    assert_eq!(body["movie"], "Come Play");
}

#[tokio::test]
async fn missing_movie_is_rejected_without_a_write() {
    let store = Arc::new(MemoryBookingStore::new());
    let app = test_app(store.clone());

    let payload = json!({"slot": "10:00 AM", "seats": {"A1": 2}});
    let response = app.oneshot(post_booking(payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({"error": "missing required fields"}));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn blank_slot_is_rejected() {
    let app = test_app(Arc::new(MemoryBookingStore::new()));

    let payload = json!({"movie": "Tenet", "slot": "", "seats": {"A1": 2}});
    let response = app.oneshot(post_booking(payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn all_zero_seats_are_rejected_without_a_write() {
    let store = Arc::new(MemoryBookingStore::new());
    let app = test_app(store.clone());

    let payload = json!({
        "movie": "Tenet",
        "slot": "03:00 PM",
        "seats": {"A1": 0, "A2": 0, "A3": 0, "A4": 0, "D1": 0, "D2": 0}
    });
    let response = app.oneshot(post_booking(payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn omitted_seats_default_to_zero_and_are_rejected() {
    let app = test_app(Arc::new(MemoryBookingStore::new()));

    let payload = json!({"movie": "Tenet", "slot": "03:00 PM"});
    let response = app.oneshot(post_booking(payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// Pins current behavior for the open question: counts are only summed, so a
// negative count that keeps the total non-zero is accepted as-is.
#[tokio::test]
async fn negative_counts_are_not_rejected() {
    let store = Arc::new(MemoryBookingStore::new());
    let app = test_app(store.clone());

    let payload = json!({"movie": "Tenet", "slot": "03:00 PM", "seats": {"A1": -1}});
    let response = app.oneshot(post_booking(payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.len().await, 1);
}

struct FailingStore;

#[async_trait]
impl BookingRepository for FailingStore {
    async fn insert_booking(
        &self,
        _request: &CreateBookingRequest,
    ) -> Result<BookingRecord, Box<dyn std::error::Error + Send + Sync>> {
        Err("connection reset".into())
    }

    async fn latest_booking(
        &self,
    ) -> Result<Option<BookingRecord>, Box<dyn std::error::Error + Send + Sync>> {
        Err("connection reset".into())
    }
}

#[tokio::test]
async fn store_failures_map_to_masked_500s() {
    let app = app(AppState::new(Arc::new(FailingStore)));

    let response = app.clone().oneshot(get_booking()).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({"error": "server error"}));

    let payload = json!({"movie": "Tenet", "slot": "10:00 AM", "seats": {"A1": 1}});
    let response = app.oneshot(post_booking(payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({"error": "server error"}));
}
