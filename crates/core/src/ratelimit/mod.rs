//! Capacity-bounded sliding-window rate limiter.
//!
//! Keyed by client address. The store holds at most `max_clients` entries:
//! expired windows are pruned on touch and, when the store is full, the
//! least-recently-seen client is evicted before a new one is admitted. This
//! replaces the unbounded lazily-pruned map the platform previously relied
//! on.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Decision for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// Request admitted; this many further requests fit in the window.
    Allowed {
        /// Remaining requests in the current window.
        remaining: u32,
    },
    /// Request rejected; the window frees up after this long.
    Limited {
        /// Time until the oldest hit leaves the window.
        retry_after: Duration,
    },
}

#[derive(Debug)]
struct ClientWindow {
    hits: VecDeque<Instant>,
    last_seen: Instant,
}

/// Sliding-window limiter with a hard cap on tracked clients.
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    window: Duration,
    max_requests: u32,
    max_clients: usize,
    clients: Mutex<HashMap<String, ClientWindow>>,
}

impl SlidingWindowLimiter {
    /// Creates a limiter admitting `max_requests` per `window` per client,
    /// tracking at most `max_clients` clients.
    #[must_use]
    pub fn new(window: Duration, max_requests: u32, max_clients: usize) -> Self {
        Self {
            window,
            max_requests,
            max_clients: max_clients.max(1),
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Records a request for `key` and decides whether to admit it.
    pub fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, Instant::now())
    }

    /// Clock-injected variant of [`check`](Self::check).
    pub fn check_at(&self, key: &str, now: Instant) -> RateDecision {
        let mut clients = self.clients.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        if !clients.contains_key(key) && clients.len() >= self.max_clients {
            Self::evict(&mut clients, self.window, self.max_clients, now);
        }

        let entry = clients.entry(key.to_string()).or_insert_with(|| ClientWindow {
            hits: VecDeque::new(),
            last_seen: now,
        });
        entry.last_seen = now;

        while entry
            .hits
            .front()
            .is_some_and(|&hit| now.duration_since(hit) >= self.window)
        {
            entry.hits.pop_front();
        }

        if entry.hits.len() >= self.max_requests as usize {
            let retry_after = entry
                .hits
                .front()
                .map_or(self.window, |&oldest| self.window - now.duration_since(oldest));
            return RateDecision::Limited { retry_after };
        }

        entry.hits.push_back(now);
        let remaining = self.max_requests - u32::try_from(entry.hits.len()).unwrap_or(u32::MAX);
        RateDecision::Allowed { remaining }
    }

    /// Number of tracked clients.
    pub fn tracked_clients(&self) -> usize {
        self.clients
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    fn evict(
        clients: &mut HashMap<String, ClientWindow>,
        window: Duration,
        max_clients: usize,
        now: Instant,
    ) {
        // Drop fully-expired windows first; they carry no information.
        clients.retain(|_, entry| {
            entry
                .hits
                .back()
                .is_some_and(|&hit| now.duration_since(hit) < window)
        });

        // Still full: evict the least-recently-seen client.
        if clients.len() >= max_clients {
            if let Some(stalest) = clients
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(key, _)| key.clone())
            {
                clients.remove(&stalest);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    #[test]
    fn test_requests_within_limit_are_allowed() {
        let limiter = SlidingWindowLimiter::new(WINDOW, 3, 100);
        let now = Instant::now();

        for remaining in (0..3).rev() {
            assert_eq!(
                limiter.check_at("10.0.0.1", now),
                RateDecision::Allowed { remaining }
            );
        }
    }

    #[test]
    fn test_request_over_limit_is_rejected() {
        let limiter = SlidingWindowLimiter::new(WINDOW, 2, 100);
        let now = Instant::now();

        limiter.check_at("10.0.0.1", now);
        limiter.check_at("10.0.0.1", now);
        assert!(matches!(
            limiter.check_at("10.0.0.1", now),
            RateDecision::Limited { .. }
        ));
    }

    #[test]
    fn test_window_slides() {
        let limiter = SlidingWindowLimiter::new(WINDOW, 1, 100);
        let now = Instant::now();

        limiter.check_at("10.0.0.1", now);
        assert!(matches!(
            limiter.check_at("10.0.0.1", now + Duration::from_secs(30)),
            RateDecision::Limited { .. }
        ));
        assert!(matches!(
            limiter.check_at("10.0.0.1", now + WINDOW),
            RateDecision::Allowed { .. }
        ));
    }

    #[test]
    fn test_clients_are_independent() {
        let limiter = SlidingWindowLimiter::new(WINDOW, 1, 100);
        let now = Instant::now();

        limiter.check_at("10.0.0.1", now);
        assert!(matches!(
            limiter.check_at("10.0.0.2", now),
            RateDecision::Allowed { .. }
        ));
    }

    #[test]
    fn test_store_never_exceeds_capacity() {
        let limiter = SlidingWindowLimiter::new(WINDOW, 5, 3);
        let now = Instant::now();

        for i in 0..10 {
            limiter.check_at(&format!("10.0.0.{i}"), now + Duration::from_secs(i));
        }

        assert!(limiter.tracked_clients() <= 3);
    }

    #[test]
    fn test_eviction_prefers_expired_then_stalest() {
        let limiter = SlidingWindowLimiter::new(WINDOW, 5, 2);
        let now = Instant::now();

        limiter.check_at("expired", now);
        limiter.check_at("fresh", now + WINDOW + Duration::from_secs(1));
        // Store is full; "expired" is outside the window and goes first.
        limiter.check_at("newcomer", now + WINDOW + Duration::from_secs(2));

        assert!(limiter.tracked_clients() <= 2);
        // "fresh" survived the eviction and still counts its hit.
        assert_eq!(
            limiter.check_at("fresh", now + WINDOW + Duration::from_secs(3)),
            RateDecision::Allowed { remaining: 3 }
        );
    }

    #[test]
    fn test_retry_after_is_bounded_by_window() {
        let limiter = SlidingWindowLimiter::new(WINDOW, 1, 10);
        let now = Instant::now();

        limiter.check_at("10.0.0.1", now);
        let decision = limiter.check_at("10.0.0.1", now + Duration::from_secs(45));
        match decision {
            RateDecision::Limited { retry_after } => {
                assert_eq!(retry_after, Duration::from_secs(15));
            }
            RateDecision::Allowed { .. } => panic!("expected limit"),
        }
    }
}
