//! Core resolution logic
//!
//! This module contains the handle-resolution components:
//! - `generator` - Handle candidate generation
//! - `selection` - Best-so-far accumulator and eligibility rules
//! - `resolver` - Blocking probing loop
//! - `async` - Async probing loop
//! - `traits` - Lookup provider abstractions
//! - `summary` - Batch totals for reporting

pub mod r#async;
pub mod generator;
pub mod resolver;
pub mod selection;
pub mod summary;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use generator::generate;
pub use resolver::AccountResolver;
pub use selection::{CandidateSelector, Probe, Verdict};
pub use summary::BatchSummary;
pub use traits::{AsyncLookupProvider, LookupProvider};
