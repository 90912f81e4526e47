//! Timer plumbing around the form: the 60-second countdown tick and the
//! 4-second auto-clear of the transient seat error. Both run as spawned
//! tasks against a shared form handle and both die with their owner, so a
//! torn-down view never leaves a timer running.

use chrono::Local;
use marquee_core::showtime::Countdown;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// How long the transient seat-error message stays visible.
pub const SEAT_ERROR_FLASH: Duration = Duration::from_millis(4000);

/// Countdown recompute interval while a slot is selected.
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(60);

pub type SharedForm = Arc<Mutex<crate::form::BookingForm>>;

/// Recomputes the countdown immediately and then on every tick, handing the
/// result to `on_update` (None when no slot is selected). Stopping or
/// dropping the ticker aborts the task.
pub struct CountdownTicker {
    handle: JoinHandle<()>,
}

impl CountdownTicker {
    pub fn start<F>(form: SharedForm, on_update: F) -> Self
    where
        F: Fn(Option<Countdown>) + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut tick = tokio::time::interval(COUNTDOWN_TICK);
            loop {
                tick.tick().await;
                let countdown = form
                    .lock()
                    .ok()
                    .and_then(|form| form.countdown(Local::now().naive_local()));
                on_update(countdown);
            }
        });
        Self { handle }
    }

    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Clears the seat-error flag after [`SEAT_ERROR_FLASH`]. Call right after a
/// submit comes back `Invalid`.
pub fn schedule_seat_error_clear(form: SharedForm) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(SEAT_ERROR_FLASH).await;
        if let Ok(mut form) = form.lock() {
            form.clear_seat_error();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::BookingApi;
    use crate::form::{BookingForm, SubmitOutcome};
    use crate::storage::MemorySelectionStore;
    use async_trait::async_trait;
    use marquee_core::booking::{CreateBookingRequest, LatestBooking};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NoopApi;

    #[async_trait]
    impl BookingApi for NoopApi {
        async fn latest(&self) -> Result<LatestBooking, crate::api::ClientError> {
            Ok(LatestBooking::none())
        }

        async fn create(&self, _request: &CreateBookingRequest) -> Result<(), crate::api::ClientError> {
            Ok(())
        }
    }

    fn shared_form() -> SharedForm {
        Arc::new(Mutex::new(BookingForm::restore(Arc::new(MemorySelectionStore::new()))))
    }

    #[tokio::test(start_paused = true)]
    async fn seat_error_clears_after_the_flash_window() {
        let mut form = BookingForm::restore(Arc::new(MemorySelectionStore::new()));
        let outcome = form.submit(&NoopApi).await;
        assert!(matches!(outcome, SubmitOutcome::Invalid));

        let form: SharedForm = Arc::new(Mutex::new(form));
        assert!(form.lock().unwrap().seat_error());

        let handle = schedule_seat_error_clear(form.clone());

        tokio::time::sleep(Duration::from_millis(3999)).await;
        assert!(form.lock().unwrap().seat_error(), "flag cleared too early");

        tokio::time::sleep(Duration::from_millis(2)).await;
        handle.await.unwrap();
        assert!(!form.lock().unwrap().seat_error());
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_fires_immediately_and_stops_on_drop() {
        let form = shared_form();
        form.lock().unwrap().select_slot("10:00 AM");

        let ticks = Arc::new(AtomicUsize::new(0));
        let seen = ticks.clone();
        let ticker = CountdownTicker::start(form, move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1, "first tick should be immediate");

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 2);

        drop(ticker);
        tokio::time::sleep(Duration::from_secs(180)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 2, "ticker kept running after drop");
    }
}
