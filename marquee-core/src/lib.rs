pub mod booking;
pub mod catalog;
pub mod repository;
pub mod showtime;

pub use booking::{BookingRecord, BookingSummary, CreateBookingRequest, LatestBooking, SeatCounts, SeatLabel};
pub use repository::BookingRepository;
