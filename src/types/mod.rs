//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `lookup`: Provider lookup results and lookup failures
//! - `record`: Per-name resolution records
//! - `error`: Error types for the resolver and batch driver

pub mod error;
pub mod lookup;
pub mod record;

pub use error::ResolveError;
pub use lookup::{LookupError, LookupResult};
pub use record::ResolutionRecord;
