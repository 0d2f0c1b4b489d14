//! Core traits for lookup providers
//!
//! This module defines the trait abstractions that let every backend (an
//! unofficial API client, an HTML scraper, a paid proxy API, an offline
//! snapshot) be used interchangeably by the resolver. Backends are chosen at
//! the configuration layer; the resolver never branches on the concrete type.

use crate::types::{LookupError, LookupResult};
use async_trait::async_trait;

/// Blocking lookup provider
///
/// Implementations may keep mutable state (rate limiter clocks, sessions),
/// hence `&mut self`.
pub trait LookupProvider {
    /// Short provider name used in logs and fatal errors
    fn name(&self) -> &str;

    /// Look up a single candidate handle
    fn lookup(&mut self, handle: &str) -> Result<LookupResult, LookupError>;
}

/// Asynchronous lookup provider
///
/// Same contract as [`LookupProvider`], for backends driven by the tokio runtime.
#[async_trait]
pub trait AsyncLookupProvider: Send {
    /// Short provider name used in logs and fatal errors
    fn name(&self) -> &str;

    /// Look up a single candidate handle
    async fn lookup(&mut self, handle: &str) -> Result<LookupResult, LookupError>;
}

impl<P: LookupProvider + ?Sized> LookupProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn lookup(&mut self, handle: &str) -> Result<LookupResult, LookupError> {
        (**self).lookup(handle)
    }
}

#[async_trait]
impl<P: AsyncLookupProvider + ?Sized> AsyncLookupProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn lookup(&mut self, handle: &str) -> Result<LookupResult, LookupError> {
        (**self).lookup(handle).await
    }
}
