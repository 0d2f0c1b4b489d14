//! Rate limiting decorator
//!
//! Wraps a provider and enforces a minimum interval between consecutive
//! lookups, plus an optional random jitter drawn per lookup.

use crate::core::traits::{AsyncLookupProvider, LookupProvider};
use crate::types::{LookupError, LookupResult};
use async_trait::async_trait;
use rand::Rng;
use std::time::{Duration, Instant};

/// Provider decorator spacing out lookups
#[derive(Debug)]
pub struct Throttled<P> {
    inner: P,
    min_interval: Duration,
    jitter: Duration,
    last_request: Option<Instant>,
}

impl<P> Throttled<P> {
    /// Wrap `inner`, waiting at least `min_interval` plus up to `jitter` between lookups
    pub fn new(inner: P, min_interval: Duration, jitter: Duration) -> Self {
        Self {
            inner,
            min_interval,
            jitter,
            last_request: None,
        }
    }

    /// The wrapped provider
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// How long to wait before the next lookup
    ///
    /// The first lookup never waits.
    fn wait_time(&self) -> Duration {
        let Some(last) = self.last_request else {
            return Duration::ZERO;
        };
        let interval = self.min_interval + self.sample_jitter();
        interval.saturating_sub(last.elapsed())
    }

    fn sample_jitter(&self) -> Duration {
        let max_ms = self.jitter.as_millis() as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..=max_ms))
    }
}

impl<P: LookupProvider> LookupProvider for Throttled<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn lookup(&mut self, handle: &str) -> Result<LookupResult, LookupError> {
        let wait = self.wait_time();
        if !wait.is_zero() {
            tracing::trace!("Throttling {:?} before @{}", wait, handle);
            std::thread::sleep(wait);
        }
        self.last_request = Some(Instant::now());
        self.inner.lookup(handle)
    }
}

#[async_trait]
impl<P: AsyncLookupProvider> AsyncLookupProvider for Throttled<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn lookup(&mut self, handle: &str) -> Result<LookupResult, LookupError> {
        let wait = self.wait_time();
        if !wait.is_zero() {
            tracing::trace!("Throttling {:?} before @{}", wait, handle);
            tokio::time::sleep(wait).await;
        }
        self.last_request = Some(Instant::now());
        self.inner.lookup(handle).await
    }
}
