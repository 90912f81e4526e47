use async_trait::async_trait;
use chrono::{DateTime, Utc};
use marquee_core::booking::{BookingRecord, CreateBookingRequest, SeatCounts};
use marquee_core::repository::BookingRepository;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Seat counts live in one column per label so the table carries the same
// explicit schema as the domain struct.
#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    movie: String,
    slot: String,
    seats_a1: i32,
    seats_a2: i32,
    seats_a3: i32,
    seats_a4: i32,
    seats_d1: i32,
    seats_d2: i32,
    created_at: DateTime<Utc>,
}

impl From<BookingRow> for BookingRecord {
    fn from(row: BookingRow) -> Self {
        BookingRecord {
            id: row.id,
            movie: row.movie,
            slot: row.slot,
            seats: SeatCounts {
                a1: row.seats_a1,
                a2: row.seats_a2,
                a3: row.seats_a3,
                a4: row.seats_a4,
                d1: row.seats_d1,
                d2: row.seats_d2,
            },
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
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

        sqlx::query(
            r#"
            INSERT INTO bookings (id, movie, slot, seats_a1, seats_a2, seats_a3, seats_a4, seats_d1, seats_d2, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(record.id)
        .bind(&record.movie)
        .bind(&record.slot)
        .bind(record.seats.a1)
        .bind(record.seats.a2)
        .bind(record.seats.a3)
        .bind(record.seats.a4)
        .bind(record.seats.d1)
        .bind(record.seats.d2)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        debug!("Stored booking {} for {}", record.id, record.movie);
        Ok(record)
    }

    async fn latest_booking(
        &self,
    ) -> Result<Option<BookingRecord>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, movie, slot, seats_a1, seats_a2, seats_a3, seats_a4, seats_d1, seats_d2, created_at
            FROM bookings
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BookingRecord::from))
    }
}
