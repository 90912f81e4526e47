use async_trait::async_trait;
use crate::booking::{BookingRecord, CreateBookingRequest};

/// Repository trait for booking data access.
///
/// Implementations assign `id` and `created_at` at insertion time; callers
/// hand over an already-validated request and never pick either value.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> Result<BookingRecord, Box<dyn std::error::Error + Send + Sync>>;

    /// The single most recently created booking, if any.
    async fn latest_booking(
        &self,
    ) -> Result<Option<BookingRecord>, Box<dyn std::error::Error + Send + Sync>>;
}
