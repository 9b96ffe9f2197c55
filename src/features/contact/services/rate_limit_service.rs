use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::core::config::RateLimitConfig;

/// One fixed-window counter per client IP.
#[derive(Debug, Clone)]
struct RateLimitEntry {
    count: u32,
    reset_at: Instant,
}

/// In-process fixed-window rate limiter keyed by client IP.
///
/// Entries are evicted lazily: an entry whose window has elapsed is replaced
/// the next time its key is checked, and there is no background sweep. State
/// lives in process memory only, which is adequate for a single-instance
/// deployment; horizontal scaling needs an external shared store instead.
pub struct RateLimitService {
    max_requests: u32,
    window: Duration,
    entries: Mutex<HashMap<String, RateLimitEntry>>,
}

impl RateLimitService {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            max_requests: config.max_requests,
            window: config.window(),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns true when the request is allowed.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    /// Time-injected variant of [`check`](Self::check).
    pub(crate) fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match entries.get_mut(key) {
            Some(entry) if now < entry.reset_at => {
                if entry.count >= self.max_requests {
                    return false;
                }
                entry.count += 1;
                true
            }
            // First request for this key, or the previous window elapsed.
            _ => {
                entries.insert(
                    key.to_string(),
                    RateLimitEntry {
                        count: 1,
                        reset_at: now + self.window,
                    },
                );
                true
            }
        }
    }
}
