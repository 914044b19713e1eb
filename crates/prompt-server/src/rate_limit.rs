use tokio::sync::Mutex;
use tokio::time::{sleep_until, Duration, Instant};

/// Spaces provider calls at least `interval` apart. Callers that arrive early
/// wait out the remainder instead of being turned away.
pub struct RateLimiter {
    interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_call: Mutex::new(None),
        }
    }

    pub async fn acquire(&self) {
        // Held across the sleep so concurrent callers queue behind each other.
        let mut last_call = self.last_call.lock().await;
        if let Some(previous) = *last_call {
            let ready_at = previous + self.interval;
            if ready_at > Instant::now() {
                tracing::debug!(wait_ms = (ready_at - Instant::now()).as_millis() as u64, "rate limited");
                sleep_until(ready_at).await;
            }
        }
        *last_call = Some(Instant::now());
    }
}
