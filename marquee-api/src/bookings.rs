use axum::{
    extract::{Json, State},
    routing::get,
    Router,
};
use marquee_core::booking::{CreateBookingRequest, LatestBooking};
use serde_json::{json, Value};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/booking", get(latest_booking).post(create_booking))
}

/// GET /api/booking: the most recently created booking, or the sentinel
/// message when nothing has been booked yet.
async fn latest_booking(State(state): State<AppState>) -> Result<Json<LatestBooking>, ApiError> {
    let latest = state.bookings.latest_booking().await.map_err(ApiError::Store)?;

    Ok(Json(match latest {
        Some(record) => LatestBooking::from(record),
        None => LatestBooking::none(),
    }))
}

/// POST /api/booking: validate and persist one booking. The response body
/// is an empty object; the stored record is not echoed back.
async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<Json<Value>, ApiError> {
    request.validate()?;

    let record = state.bookings.insert_booking(&request).await.map_err(ApiError::Store)?;
    info!("Booking stored: {} @ {} ({} seats)", record.movie, record.slot, record.seats.total());

    Ok(Json(json!({})))
}
