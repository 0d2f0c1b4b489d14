//! Verification-gated selection of the best resolved account
//!
//! [`CandidateSelector`] is the accumulator shared by the blocking and async
//! resolvers. It holds a single best-so-far slot, decides whether each probe
//! outcome is eligible, and says when probing can stop.

use crate::config::ResolverConfig;
use crate::types::{LookupError, LookupResult, ResolutionRecord};

/// Tagged outcome of one provider call
#[derive(Debug, Clone, PartialEq)]
pub enum Probe {
    /// The provider answered with data
    Resolved(LookupResult),
    /// The lookup failed but the next candidate may still be tried
    Recoverable(LookupError),
    /// The provider is unusable; the batch must stop
    Fatal(LookupError),
}

impl From<Result<LookupResult, LookupError>> for Probe {
    fn from(result: Result<LookupResult, LookupError>) -> Self {
        match result {
            Ok(data) => Probe::Resolved(data),
            Err(e) if e.is_fatal() => Probe::Fatal(e),
            Err(e) => Probe::Recoverable(e),
        }
    }
}

/// Why a resolved result was not taken as best-so-far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The provider said the account does not exist
    Missing,
    /// The provider did not report a follower count
    NoFollowerCount,
    /// Follower count under the configured minimum
    BelowThreshold(u64),
    /// Verified-only mode and the account is not verified
    Unverified,
    /// Eligible, but best-so-far ranks at least as high
    NotBetter,
}

/// Result of offering a resolved lookup to the selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Taken as the new best-so-far; keep probing
    Accepted,
    /// Taken as best-so-far and verified; stop probing
    Settled,
    /// Not taken
    Rejected(Rejection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Selected {
    handle: String,
    follower_count: u64,
    verified: Option<bool>,
}

impl Selected {
    fn is_verified(&self) -> bool {
        self.verified == Some(true)
    }
}

/// Best-so-far accumulator for one name
#[derive(Debug)]
pub struct CandidateSelector<'a> {
    config: &'a ResolverConfig,
    best: Option<Selected>,
}

impl<'a> CandidateSelector<'a> {
    /// Create an empty selector for the given policy
    pub fn new(config: &'a ResolverConfig) -> Self {
        CandidateSelector { config, best: None }
    }

    /// Offer a resolved lookup for `handle`
    ///
    /// A result replaces best-so-far when best-so-far is unset, when it is
    /// verified and best-so-far is not, or when both are equally verified and
    /// it has strictly more followers.
    pub fn offer(&mut self, handle: &str, result: &LookupResult) -> Verdict {
        if !result.exists {
            return Verdict::Rejected(Rejection::Missing);
        }
        let follower_count = match result.follower_count {
            Some(count) => count,
            None => return Verdict::Rejected(Rejection::NoFollowerCount),
        };
        if follower_count < self.config.min_followers {
            return Verdict::Rejected(Rejection::BelowThreshold(follower_count));
        }
        let verified = result.verified();
        if self.config.verified_only && !verified {
            return Verdict::Rejected(Rejection::Unverified);
        }

        let better = match &self.best {
            None => true,
            Some(best) if verified != best.is_verified() => verified,
            Some(best) => follower_count > best.follower_count,
        };
        if !better {
            return Verdict::Rejected(Rejection::NotBetter);
        }

        self.best = Some(Selected {
            handle: handle.to_string(),
            follower_count,
            verified: result.is_verified,
        });

        if verified {
            Verdict::Settled
        } else {
            Verdict::Accepted
        }
    }

    /// Consume the selector and build the record for `name`
    pub fn finish(self, name: &str) -> ResolutionRecord {
        match self.best {
            Some(best) => {
                ResolutionRecord::found(name, &best.handle, best.follower_count, best.verified)
            }
            None => ResolutionRecord::not_found(name),
        }
    }
}

/// Per-name probe counters, logged after each resolution
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTally {
    pub probes: usize,
    pub not_found: usize,
    pub rate_limited: usize,
    pub transient: usize,
    pub rejected: usize,
}

impl ProbeTally {
    /// Count a recoverable failure
    pub fn failure(&mut self, error: &LookupError) {
        match error {
            LookupError::NotFound { .. } => self.not_found += 1,
            LookupError::RateLimited { .. } => self.rate_limited += 1,
            LookupError::Transient { .. } => self.transient += 1,
            LookupError::Fatal { .. } => {}
        }
    }
}
