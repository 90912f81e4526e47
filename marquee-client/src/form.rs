//! The booking form state machine.
//!
//! Selections are single-select and every mutation is written through to the
//! selection store immediately, so a fresh session restores exactly what the
//! user last had on screen. Submission validates locally before any network
//! call; the transient seat-error flag is set here and cleared by the
//! runtime's timer (see [`crate::runtime`]).

use chrono::NaiveDateTime;
use marquee_core::booking::{
    BookingSummary, CreateBookingRequest, LatestBooking, SeatCounts, SeatLabel,
    NO_BOOKING_MESSAGE,
};
use marquee_core::catalog::SEAT_PRICE;
use marquee_core::showtime::{self, Countdown};
use std::sync::Arc;
use tracing::warn;

use crate::api::{BookingApi, ClientError};
use crate::storage::{keys, SelectionStore};

/// Inline message shown while the transient seat-error flag is set.
pub const SEAT_ERROR_MESSAGE: &str = "Please select at least one seat to continue";

/// What the "last booking" panel is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum LastBookingView {
    Loading,
    Message(String),
    Booking(BookingSummary),
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Local validation failed; the seat-error flag is now set and nothing
    /// was sent.
    Invalid,
    /// Stored; selections were cleared and the last-booking panel updated.
    Booked,
    /// The service call failed; selections are left intact.
    Failed(ClientError),
}

pub struct BookingForm {
    movie: Option<String>,
    slot: Option<String>,
    seats: SeatCounts,
    last_booking: LastBookingView,
    seat_error: bool,
    dark_mode: bool,
    store: Arc<dyn SelectionStore>,
}

impl BookingForm {
    /// Rebuilds the form from durable storage. Unparseable leftovers fall
    /// back to defaults rather than failing the session.
    pub fn restore(store: Arc<dyn SelectionStore>) -> Self {
        let movie = store.get(keys::MOVIE).filter(|m| !m.is_empty());
        let slot = store.get(keys::SLOT).filter(|s| !s.is_empty());
        let seats = store
            .get(keys::SEATS)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        let dark_mode = store
            .get(keys::DARK_MODE)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or(false);

        Self {
            movie,
            slot,
            seats,
            last_booking: LastBookingView::Loading,
            seat_error: false,
            dark_mode,
            store,
        }
    }

    pub fn movie(&self) -> Option<&str> {
        self.movie.as_deref()
    }

    pub fn slot(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    pub fn seats(&self) -> &SeatCounts {
        &self.seats
    }

    pub fn last_booking(&self) -> &LastBookingView {
        &self.last_booking
    }

    pub fn seat_error(&self) -> bool {
        self.seat_error
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Replaces the current movie selection.
    pub fn select_movie(&mut self, name: &str) {
        self.movie = Some(name.to_string());
        self.store.set(keys::MOVIE, name);
    }

    /// Replaces the current slot selection.
    pub fn select_slot(&mut self, label: &str) {
        self.slot = Some(label.to_string());
        self.store.set(keys::SLOT, label);
    }

    /// Applies a raw seat-count edit: non-numeric input counts as 0 and the
    /// result is clamped to be non-negative.
    pub fn set_seat_count(&mut self, label: SeatLabel, raw: &str) {
        let count = raw.trim().parse::<i32>().unwrap_or(0).max(0);
        self.seats.set(label, count);
        self.persist_seats();
    }

    pub fn total_seats(&self) -> i64 {
        self.seats.total()
    }

    pub fn total_price(&self) -> i64 {
        self.total_seats() * SEAT_PRICE
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        self.store.set(keys::DARK_MODE, if self.dark_mode { "true" } else { "false" });
    }

    /// Countdown for the selected slot at `now`, or None when no slot is
    /// selected (or its label does not parse).
    pub fn countdown(&self, now: NaiveDateTime) -> Option<Countdown> {
        let slot = self.slot.as_deref()?;
        showtime::countdown(slot, now).ok()
    }

    /// Folds a get-latest result into the display state. A fetch failure
    /// degrades to the sentinel message, it is not an error state.
    pub fn apply_latest(&mut self, result: Result<LatestBooking, ClientError>) {
        self.last_booking = match result {
            Ok(LatestBooking::Found(summary)) => LastBookingView::Booking(summary),
            Ok(LatestBooking::None { message }) => LastBookingView::Message(message),
            Err(err) => {
                warn!("Failed to fetch last booking: {}", err);
                LastBookingView::Message(NO_BOOKING_MESSAGE.to_string())
            }
        };
    }

    /// Copies the last fetched booking back into the active selection.
    /// Returns false when there is no booking to copy.
    pub fn book_again(&mut self) -> bool {
        let LastBookingView::Booking(summary) = self.last_booking.clone() else {
            return false;
        };
        self.select_movie(&summary.movie);
        self.select_slot(&summary.slot);
        self.seats = summary.seats;
        self.persist_seats();
        true
    }

    pub fn clear_seat_error(&mut self) {
        self.seat_error = false;
    }

    /// The submit action. Validates locally first: an unset movie or slot or
    /// a zero seat total sets the transient error flag and never reaches the
    /// service. On a stored booking the selections are cleared (the
    /// dark-mode preference survives) and the last-booking panel shows the
    /// submitted data; on failure everything is left as it was.
    pub async fn submit(&mut self, api: &dyn BookingApi) -> SubmitOutcome {
        let Some(request) = self.draft() else {
            self.seat_error = true;
            return SubmitOutcome::Invalid;
        };

        match api.create(&request).await {
            Ok(()) => {
                self.last_booking = LastBookingView::Booking(BookingSummary::from(&request));
                self.reset_selection();
                SubmitOutcome::Booked
            }
            Err(err) => SubmitOutcome::Failed(err),
        }
    }

    fn draft(&self) -> Option<CreateBookingRequest> {
        let movie = self.movie.clone()?;
        let slot = self.slot.clone()?;
        if self.seats.total() == 0 {
            return None;
        }
        Some(CreateBookingRequest { movie, slot, seats: self.seats.clone() })
    }

    fn reset_selection(&mut self) {
        self.movie = None;
        self.slot = None;
        self.seats = SeatCounts::default();
        self.store.remove(keys::MOVIE);
        self.store.remove(keys::SLOT);
        self.store.remove(keys::SEATS);
    }

    fn persist_seats(&self) {
        match serde_json::to_string(&self.seats) {
            Ok(raw) => self.store.set(keys::SEATS, &raw),
            Err(err) => warn!("Failed to serialize seat counts: {}", err),
        }
    }
}
