//! Per-source sliding-window rate limiting.
//!
//! Every adapter owns one [`RateLimiter`] sized from its source's
//! requests-per-minute budget. Callers wait for a slot; requests are
//! delayed, never rejected.

use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

const WINDOW: Duration = Duration::from_secs(60);

/// A sliding one-minute window over request timestamps.
///
/// Permits up to `max_per_minute` requests in any 60-second span. An idle
/// limiter allows a full burst immediately; once the window is full,
/// [`RateLimiter::await_slot`] sleeps until the oldest request ages out.
/// It never errors and every waiter is eventually admitted.
#[derive(Debug)]
pub struct RateLimiter {
    max_per_minute: usize,
    window: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    /// Create a limiter permitting `max_per_minute` requests per minute.
    /// A budget of 0 is treated as 1.
    pub fn new(max_per_minute: u32) -> Self {
        Self {
            max_per_minute: (max_per_minute as usize).max(1),
            window: Mutex::new(VecDeque::new()),
        }
    }

    /// Wait until a request slot is available, then claim it.
    pub async fn await_slot(&self) {
        loop {
            let wait = {
                let now = Instant::now();
                let mut window = self.window.lock().await;
                while window
                    .front()
                    .is_some_and(|&t| now.duration_since(t) >= WINDOW)
                {
                    window.pop_front();
                }
                if window.len() < self.max_per_minute {
                    window.push_back(now);
                    return;
                }
                // Window full; sleep until the oldest entry expires and retry.
                match window.front() {
                    Some(&oldest) => WINDOW.saturating_sub(now.duration_since(oldest)),
                    None => Duration::ZERO,
                }
            };
            tokio::time::sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::time::advance;

    #[tokio::test(start_paused = true)]
    async fn burst_up_to_limit_is_immediate() {
        let limiter = RateLimiter::new(5);
        let start = Instant::now();
        for _ in 0..5 {
            limiter.await_slot().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn sixth_request_waits_for_window() {
        let limiter = RateLimiter::new(5);
        let start = Instant::now();
        for _ in 0..5 {
            limiter.await_slot().await;
        }
        limiter.await_slot().await;
        assert!(start.elapsed() >= Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn ten_rapid_requests_all_admitted() {
        let limiter = Arc::new(RateLimiter::new(5));
        let start = Instant::now();
        let mut done = Vec::new();
        for _ in 0..10 {
            let limiter = Arc::clone(&limiter);
            done.push(tokio::spawn(async move {
                limiter.await_slot().await;
            }));
        }
        for handle in done {
            handle.await.unwrap();
        }
        // None dropped, and the second batch ran one window later.
        assert!(start.elapsed() >= Duration::from_secs(60));
        assert!(start.elapsed() < Duration::from_secs(121));
    }

    #[tokio::test(start_paused = true)]
    async fn window_slides_rather_than_resets() {
        let limiter = RateLimiter::new(2);
        limiter.await_slot().await;
        advance(Duration::from_secs(30)).await;
        limiter.await_slot().await;
        // First slot frees at t=60, not t=90.
        let start = Instant::now();
        limiter.await_slot().await;
        assert_eq!(start.elapsed(), Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn idle_limiter_recovers_full_burst() {
        let limiter = RateLimiter::new(3);
        for _ in 0..3 {
            limiter.await_slot().await;
        }
        advance(Duration::from_secs(61)).await;
        let start = Instant::now();
        for _ in 0..3 {
            limiter.await_slot().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[test]
    fn zero_budget_treated_as_one() {
        let limiter = RateLimiter::new(0);
        assert_eq!(limiter.max_per_minute, 1);
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RateLimiter>();
    }
}
