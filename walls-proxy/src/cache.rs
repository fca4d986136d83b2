use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;
use tokio::time::Duration;
use tracing::{debug, trace};

pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheEntry<V> {
    value: Arc<V>,
    computed_at: Instant,
}

/// Holds the result of one computation for `ttl`.
///
/// The lock is held while computing, so concurrent callers on a miss wait for
/// the running computation instead of starting their own.
pub struct TtlCache<V, C = SystemClock> {
    ttl: Duration,
    clock: C,
    entry: Mutex<Option<CacheEntry<V>>>,
}

impl<V> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<V, C: Clock> TtlCache<V, C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            ttl,
            clock,
            entry: Mutex::new(None),
        }
    }

    /// Returns the cached value, or runs `compute` if there is none or it has
    /// expired. A `None` from `compute` is passed through and never stored.
    pub async fn get_or_compute<F, Fut>(&self, compute: F) -> Option<Arc<V>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<V>>,
    {
        let mut entry = self.entry.lock().await;

        if let Some(cached) = entry.as_ref() {
            let age = self.clock.now().saturating_duration_since(cached.computed_at);
            if age < self.ttl {
                trace!(?age, "cache hit");
                return Some(Arc::clone(&cached.value));
            }

            debug!(?age, "cached value expired");
            *entry = None;
        }

        let value = Arc::new(compute().await?);

        *entry = Some(CacheEntry {
            value: Arc::clone(&value),
            computed_at: self.clock.now(),
        });

        Some(value)
    }
}
