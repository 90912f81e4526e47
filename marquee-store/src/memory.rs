use async_trait::async_trait;
use chrono::Utc;
use marquee_core::booking::{BookingRecord, CreateBookingRequest};
use marquee_core::repository::BookingRepository;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Vec-backed booking store for tests and local demos. Same insertion-time
/// stamping as the Postgres repository; `latest` resolves timestamp ties in
/// favor of the later insert.
#[derive(Default)]
pub struct MemoryBookingStore {
    records: RwLock<Vec<BookingRecord>>,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingStore {
    async fn insert_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> Result<BookingRecord, Box<dyn std::error::Error + Send + Sync>> {
        let record = BookingRecord {
            id: Uuid::new_v4(),
            movie: request.movie.clone(),
            slot: request.slot.clone(),
            seats: request.seats.clone(),
            created_at: Utc::now(),
        };
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn latest_booking(
        &self,
    ) -> Result<Option<BookingRecord>, Box<dyn std::error::Error + Send + Sync>> {
        let records = self.records.read().await;
        // max_by_key keeps the last of equal elements, so same-instant
        // inserts still resolve to the newest one.
        Ok(records.iter().max_by_key(|r| r.created_at).cloned())
    }
}
