pub mod api;
pub mod form;
pub mod runtime;
pub mod storage;

pub use api::{BookingApi, ClientError, HttpBookingApi};
pub use form::{BookingForm, LastBookingView, SubmitOutcome};
