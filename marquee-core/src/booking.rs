use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Message returned by get-latest when the store holds no bookings yet.
pub const NO_BOOKING_MESSAGE: &str = "no previous booking found";

/// The closed set of seat categories on the single screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatLabel {
    A1,
    A2,
    A3,
    A4,
    D1,
    D2,
}

impl SeatLabel {
    pub const ALL: [SeatLabel; 6] = [
        SeatLabel::A1,
        SeatLabel::A2,
        SeatLabel::A3,
        SeatLabel::A4,
        SeatLabel::D1,
        SeatLabel::D2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeatLabel::A1 => "A1",
            SeatLabel::A2 => "A2",
            SeatLabel::A3 => "A3",
            SeatLabel::A4 => "A4",
            SeatLabel::D1 => "D1",
            SeatLabel::D2 => "D2",
        }
    }
}

impl fmt::Display for SeatLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown seat label: {0}")]
pub struct UnknownSeatLabel(String);

impl FromStr for SeatLabel {
    type Err = UnknownSeatLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SeatLabel::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownSeatLabel(s.to_string()))
    }
}

/// Per-category seat counts. One named field per label so the schema is
/// explicit; absent keys default to 0 and unrecognized keys are dropped on
/// deserialization. Counts are not range-checked here: the sum-based check
/// in [`CreateBookingRequest::validate`] is the only server-side gate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatCounts {
    #[serde(rename = "A1", default)]
    pub a1: i32,
    #[serde(rename = "A2", default)]
    pub a2: i32,
    #[serde(rename = "A3", default)]
    pub a3: i32,
    #[serde(rename = "A4", default)]
    pub a4: i32,
    #[serde(rename = "D1", default)]
    pub d1: i32,
    #[serde(rename = "D2", default)]
    pub d2: i32,
}

impl SeatCounts {
    pub fn get(&self, label: SeatLabel) -> i32 {
        match label {
            SeatLabel::A1 => self.a1,
            SeatLabel::A2 => self.a2,
            SeatLabel::A3 => self.a3,
            SeatLabel::A4 => self.a4,
            SeatLabel::D1 => self.d1,
            SeatLabel::D2 => self.d2,
        }
    }

    pub fn set(&mut self, label: SeatLabel, count: i32) {
        match label {
            SeatLabel::A1 => self.a1 = count,
            SeatLabel::A2 => self.a2 = count,
            SeatLabel::A3 => self.a3 = count,
            SeatLabel::A4 => self.a4 = count,
            SeatLabel::D1 => self.d1 = count,
            SeatLabel::D2 => self.d2 = count,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SeatLabel, i32)> + '_ {
        SeatLabel::ALL.into_iter().map(|label| (label, self.get(label)))
    }

    /// Sum across all categories. Widened so pathological counts cannot
    /// overflow the check in `validate`.
    pub fn total(&self) -> i64 {
        self.iter().map(|(_, count)| count as i64).sum()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("movie is required")]
    MissingMovie,
    #[error("slot is required")]
    MissingSlot,
    #[error("at least one seat must be booked")]
    NoSeats,
}

/// Candidate booking as submitted by an untrusted caller. Absent fields
/// deserialize to their empty/zero forms so validation owns every rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    #[serde(default)]
    pub movie: String,
    #[serde(default)]
    pub slot: String,
    #[serde(default)]
    pub seats: SeatCounts,
}

impl CreateBookingRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.movie.trim().is_empty() {
            return Err(ValidationError::MissingMovie);
        }
        if self.slot.trim().is_empty() {
            return Err(ValidationError::MissingSlot);
        }
        if self.seats.total() == 0 {
            return Err(ValidationError::NoSeats);
        }
        Ok(())
    }
}

/// A persisted booking. Immutable once created; `id` and `created_at` are
/// assigned by the store at insertion time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: Uuid,
    pub movie: String,
    pub slot: String,
    pub seats: SeatCounts,
    pub created_at: DateTime<Utc>,
}

/// The caller-visible projection of a booking: id and timestamp stay private
/// to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSummary {
    pub movie: String,
    pub slot: String,
    pub seats: SeatCounts,
}

impl From<BookingRecord> for BookingSummary {
    fn from(record: BookingRecord) -> Self {
        BookingSummary {
            movie: record.movie,
            slot: record.slot,
            seats: record.seats,
        }
    }
}

impl From<&CreateBookingRequest> for BookingSummary {
    fn from(req: &CreateBookingRequest) -> Self {
        BookingSummary {
            movie: req.movie.clone(),
            slot: req.slot.clone(),
            seats: req.seats.clone(),
        }
    }
}

/// Result of get-latest: a booking, or a sentinel message when the store is
/// empty. Serialized untagged so the wire shapes stay `{movie, slot, seats}`
/// and `{message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LatestBooking {
    Found(BookingSummary),
    None { message: String },
}

impl LatestBooking {
    pub fn none() -> Self {
        LatestBooking::None {
            message: NO_BOOKING_MESSAGE.to_string(),
        }
    }
}

impl From<BookingRecord> for LatestBooking {
    fn from(record: BookingRecord) -> Self {
        LatestBooking::Found(record.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateBookingRequest {
        CreateBookingRequest {
            movie: "Tenet".to_string(),
            slot: "01:00 PM".to_string(),
            seats: SeatCounts {
                a1: 2,
                d1: 1,
                ..SeatCounts::default()
            },
        }
    }

    #[test]
    fn valid_request_passes() {
        assert_eq!(valid_request().validate(), Ok(()));
    }

    #[test]
    fn empty_movie_is_rejected() {
        let mut req = valid_request();
        req.movie = String::new();
        assert_eq!(req.validate(), Err(ValidationError::MissingMovie));
    }

    #[test]
    fn blank_slot_is_rejected() {
        let mut req = valid_request();
        req.slot = "   ".to_string();
        assert_eq!(req.validate(), Err(ValidationError::MissingSlot));
    }

    #[test]
    fn zero_seat_total_is_rejected() {
        let mut req = valid_request();
        req.seats = SeatCounts::default();
        assert_eq!(req.validate(), Err(ValidationError::NoSeats));
    }

    #[test]
    fn absent_fields_deserialize_to_defaults() {
        let req: CreateBookingRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.movie, "");
        assert_eq!(req.slot, "");
        assert_eq!(req.seats.total(), 0);
    }

    #[test]
    fn partial_seat_map_defaults_missing_labels_to_zero() {
        let req: CreateBookingRequest =
            serde_json::from_str(r#"{"movie":"Tenet","slot":"10:00 AM","seats":{"A2":3}}"#)
                .unwrap();
        assert_eq!(req.seats.a2, 3);
        assert_eq!(req.seats.a1, 0);
        assert_eq!(req.seats.total(), 3);
    }

    #[test]
    fn unknown_seat_keys_are_dropped() {
        let req: CreateBookingRequest = serde_json::from_str(
            r#"{"movie":"Tenet","slot":"10:00 AM","seats":{"Z9":5,"A1":1}}"#,
        )
        .unwrap();
        assert_eq!(req.seats.total(), 1);
    }

    #[test]
    fn latest_booking_sentinel_wire_shape() {
        let json = serde_json::to_value(LatestBooking::none()).unwrap();
        assert_eq!(json, serde_json::json!({"message": "no previous booking found"}));
    }

    #[test]
    fn latest_booking_round_trips_both_variants() {
        let found: LatestBooking =
            serde_json::from_str(r#"{"movie":"Tenet","slot":"10:00 AM","seats":{"A1":1}}"#)
                .unwrap();
        assert!(matches!(found, LatestBooking::Found(_)));

        let none: LatestBooking =
            serde_json::from_str(r#"{"message":"no previous booking found"}"#).unwrap();
        assert_eq!(none, LatestBooking::none());
    }

    #[test]
    fn seat_label_parses_case_insensitively() {
        assert_eq!("d2".parse::<SeatLabel>().unwrap(), SeatLabel::D2);
        assert!("B7".parse::<SeatLabel>().is_err());
    }
}
