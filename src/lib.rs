//! Follower Resolver Library
//! # Overview
//!
//! This library turns display names into at most one Instagram handle each,
//! preferring verified accounts above a follower threshold. It provides a
//! streaming CSV batch driver with both a blocking and an async strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (LookupResult, ResolutionRecord, errors)
//! - [`config`] - TOML settings with defaults and validation
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Resolution logic:
//!   - [`core::generator`] - Candidate handle generation
//!   - [`core::selection`] - Verification-gated best-match selection
//!   - [`core::resolver`] - Probing loop over a lookup provider
//!   - [`core::summary`] - Batch totals
//! - [`provider`] - Lookup backends and rate limit / retry decorators
//! - [`io`] - CSV name input and resolution output
//! - [`strategy`] - Sync and async batch drivers
//!
//! # Selection Rule
//!
//! A result is eligible when the account exists, reports a follower count,
//! meets `min_followers`, and (with `verified_only`) is verified. Among
//! eligible results a verified account beats an unverified one, then the
//! larger follower count wins; the first verified eligible result ends the
//! search for that name.
//!
//! ```
//! use follower_resolver::core::generator::generate;
//!
//! let candidates = generate("Derek Hough");
//! assert_eq!(candidates[0], "derekhough");
//! assert!(candidates.contains(&"derek.hough".to_string()));
//! ```

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod provider;
pub mod strategy;
pub mod types;

pub use config::Settings;
pub use crate::core::{AccountResolver, AsyncLookupProvider, BatchSummary, LookupProvider};
pub use types::{LookupError, LookupResult, ResolutionRecord, ResolveError};
