//! Lookup providers
//!
//! Concrete backends and decorators behind the [`LookupProvider`] and
//! [`AsyncLookupProvider`] traits:
//! - `snapshot` - Offline replay of captured lookup outcomes
//! - `throttle` - Minimum delay and jitter between lookups
//! - `retry` - Retry with backoff for recoverable failures
//!
//! The factories below assemble `Retrying<Throttled<SnapshotProvider>>` from
//! [`Settings`]; the resolver only ever sees the trait object.

pub mod retry;
pub mod snapshot;
pub mod throttle;

pub use retry::Retrying;
pub use snapshot::SnapshotProvider;
pub use throttle::Throttled;

use crate::config::{ProbeConfig, Settings};
use crate::core::traits::{AsyncLookupProvider, LookupProvider};
use crate::types::ResolveError;

/// Wrap a backend in the throttle and retry decorators configured by `probe`
pub fn decorate<P>(inner: P, probe: &ProbeConfig) -> Retrying<Throttled<P>> {
    Retrying::new(
        Throttled::new(inner, probe.delay(), probe.jitter()),
        probe.max_retries,
        probe.backoff(),
    )
}

fn load_backend(settings: &Settings) -> Result<SnapshotProvider, ResolveError> {
    let path = settings
        .provider
        .snapshot
        .as_deref()
        .ok_or(ResolveError::NoProvider)?;
    SnapshotProvider::from_path(path)
}

/// Build the blocking provider stack
///
/// # Returns
///
/// * `Ok(provider)` - decorated backend ready for the resolver
/// * `Err(ResolveError::NoProvider)` - no backend configured
/// * `Err(_)` - the backend could not be loaded
pub fn build_provider(settings: &Settings) -> Result<Box<dyn LookupProvider + Send>, ResolveError> {
    let backend = load_backend(settings)?;
    Ok(Box::new(decorate(backend, &settings.probe)))
}

/// Build the async provider stack
pub fn build_async_provider(
    settings: &Settings,
) -> Result<Box<dyn AsyncLookupProvider>, ResolveError> {
    let backend = load_backend(settings)?;
    Ok(Box::new(decorate(backend, &settings.probe)))
}
