//! Lookup-related types
//!
//! This module defines what a lookup provider hands back for a single
//! candidate handle: either a [`LookupResult`] describing the account, or a
//! [`LookupError`] describing why no data was obtained.

use std::time::Duration;
use thiserror::Error;

/// Account data returned by a provider for one candidate handle
///
/// Absence of data is kept distinct from a confirmed zero: a provider that
/// could not read the follower count reports `None`, never `Some(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupResult {
    /// Number of followers, if the provider could read it
    pub follower_count: Option<u64>,

    /// Provider-asserted verification flag (`None` when unknown)
    pub is_verified: Option<bool>,

    /// Whether the account exists at all
    pub exists: bool,
}

impl LookupResult {
    /// An existing account with a known follower count and verification flag
    pub fn account(follower_count: u64, is_verified: bool) -> Self {
        LookupResult {
            follower_count: Some(follower_count),
            is_verified: Some(is_verified),
            exists: true,
        }
    }

    /// A provider answer stating that the handle has no account behind it
    pub fn missing() -> Self {
        LookupResult {
            follower_count: None,
            is_verified: None,
            exists: false,
        }
    }

    /// Returns true only when the provider positively asserted verification
    pub fn verified(&self) -> bool {
        self.is_verified == Some(true)
    }
}

/// Reasons a provider could not produce a [`LookupResult`]
///
/// Every variant except [`LookupError::Fatal`] is recoverable at the
/// granularity of a single candidate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    /// No account exists for the handle
    #[error("Handle '{handle}' not found")]
    NotFound {
        /// The probed handle
        handle: String,
    },

    /// The provider refused the request because of rate limiting
    #[error("Rate limited while looking up '{handle}'{}", retry_after.map(|d| format!(" (retry after {}ms)", d.as_millis())).unwrap_or_default())]
    RateLimited {
        /// The probed handle
        handle: String,
        /// Back-off hint supplied by the provider, if any
        retry_after: Option<Duration>,
    },

    /// Network hiccup, timeout, unexpected payload, etc.
    #[error("Transient error looking up '{handle}': {message}")]
    Transient {
        /// The probed handle
        handle: String,
        /// Description of the failure
        message: String,
    },

    /// The provider is unusable (e.g. credentials irrecoverably rejected)
    #[error("Provider unusable: {message}")]
    Fatal {
        /// Description of the failure
        message: String,
    },
}

impl LookupError {
    /// Create a NotFound error
    pub fn not_found(handle: &str) -> Self {
        LookupError::NotFound {
            handle: handle.to_string(),
        }
    }

    /// Create a RateLimited error
    pub fn rate_limited(handle: &str, retry_after: Option<Duration>) -> Self {
        LookupError::RateLimited {
            handle: handle.to_string(),
            retry_after,
        }
    }

    /// Create a Transient error
    pub fn transient(handle: &str, message: &str) -> Self {
        LookupError::Transient {
            handle: handle.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a Fatal error
    pub fn fatal(message: &str) -> Self {
        LookupError::Fatal {
            message: message.to_string(),
        }
    }

    /// Whether this failure makes the provider unusable for the rest of the batch
    pub fn is_fatal(&self) -> bool {
        matches!(self, LookupError::Fatal { .. })
    }

    /// Whether repeating the same lookup may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LookupError::RateLimited { .. } | LookupError::Transient { .. }
        )
    }
}
