//! Retry decorator
//!
//! Re-issues lookups that failed with `RateLimited` or `Transient`, waiting
//! between attempts. The wait is the provider's `retry_after` hint when it
//! gives one, otherwise `backoff * 2^attempt`. Hints are clamped to
//! `backoff * 2^max_retries`. `NotFound` and `Fatal` pass
//! through untouched. When retries run out the last error is returned, so a
//! recoverable failure stays recoverable.

use crate::core::traits::{AsyncLookupProvider, LookupProvider};
use crate::types::{LookupError, LookupResult};
use async_trait::async_trait;
use std::time::Duration;

/// Provider decorator retrying recoverable failures
#[derive(Debug)]
pub struct Retrying<P> {
    inner: P,
    max_retries: u32,
    backoff: Duration,
}

impl<P> Retrying<P> {
    /// Wrap `inner`, allowing up to `max_retries` extra attempts per lookup
    pub fn new(inner: P, max_retries: u32, backoff: Duration) -> Self {
        Self {
            inner,
            max_retries,
            backoff,
        }
    }

    /// The wrapped provider
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Exponential backoff for retry number `attempt` (0-based)
    fn backoff_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Wait before retry number `attempt` (0-based), or `None` when no retry is due
    fn retry_delay(&self, error: &LookupError, attempt: u32) -> Option<Duration> {
        if !error.is_retryable() || attempt >= self.max_retries {
            return None;
        }
        match error {
            LookupError::RateLimited {
                retry_after: Some(hint),
                ..
            } => Some((*hint).min(self.backoff_for(self.max_retries))),
            _ => Some(self.backoff_for(attempt)),
        }
    }
}

impl<P: LookupProvider> LookupProvider for Retrying<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn lookup(&mut self, handle: &str) -> Result<LookupResult, LookupError> {
        let mut attempt = 0;
        loop {
            let error = match self.inner.lookup(handle) {
                Ok(result) => return Ok(result),
                Err(error) => error,
            };
            let Some(delay) = self.retry_delay(&error, attempt) else {
                return Err(error);
            };
            attempt += 1;
            tracing::warn!(
                "{}; retry {}/{} in {:?}",
                error,
                attempt,
                self.max_retries,
                delay
            );
            std::thread::sleep(delay);
        }
    }
}

#[async_trait]
impl<P: AsyncLookupProvider> AsyncLookupProvider for Retrying<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn lookup(&mut self, handle: &str) -> Result<LookupResult, LookupError> {
        let mut attempt = 0;
        loop {
            let error = match self.inner.lookup(handle).await {
                Ok(result) => return Ok(result),
                Err(error) => error,
            };
            let Some(delay) = self.retry_delay(&error, attempt) else {
                return Err(error);
            };
            attempt += 1;
            tracing::warn!(
                "{}; retry {}/{} in {:?}",
                error,
                attempt,
                self.max_retries,
                delay
            );
            tokio::time::sleep(delay).await;
        }
    }
}
