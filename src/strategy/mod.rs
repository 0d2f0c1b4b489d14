//! Processing strategy module for batch name resolution
//!
//! This module defines the Strategy pattern for complete resolution pipelines,
//! encompassing CSV name reading, per-name resolution and incremental output.
//! Different implementations (blocking, async) are selected at runtime.
//!
//! Both strategies share the same pipeline shape:
//!
//! ```text
//! names CSV → reader → NameGate → AccountResolver → RecordWriter → BatchSummary
//! ```

use crate::cli::StrategyType;
use crate::config::Settings;
use crate::core::{AccountResolver, BatchSummary};
use crate::provider::{build_async_provider, build_provider};
use crate::types::{ResolutionRecord, ResolveError};
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use tokio_util::sync::CancellationToken;

pub mod r#async;
pub mod sync;

pub use self::r#async::AsyncProcessingStrategy;
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete resolution pipelines
pub trait ProcessingStrategy: Send {
    /// Resolve every name in the input file and write one row per unique name
    ///
    /// Rows are written and flushed as soon as each name is resolved, so
    /// everything before a failure stays in `output`.
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the input CSV file containing names
    /// * `output` - Mutable reference to a writer for resolution rows
    ///
    /// # Returns
    ///
    /// * `Ok(BatchSummary)` if the whole input was processed
    /// * `Err(ResolveError)` if the batch was aborted
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened or lacks the name column
    /// - Output cannot be written
    /// - The provider failed fatally (`ProviderFatal`, returned unchanged)
    /// - The batch was cancelled (`Interrupted`)
    ///
    /// Unreadable input rows and recoverable lookup failures are logged and
    /// do not abort the batch.
    fn process(
        &mut self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<BatchSummary, ResolveError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `settings` - Resolver, probe, input and provider settings
/// * `cancel` - Cancelling it interrupts the batch and discards the name in flight
///
/// # Returns
///
/// A boxed strategy wired to the configured provider stack, or
/// `ResolveError::NoProvider` if none is configured.
pub fn create_strategy(
    strategy_type: StrategyType,
    settings: &Settings,
    cancel: CancellationToken,
) -> Result<Box<dyn ProcessingStrategy>, ResolveError> {
    let resolver = AccountResolver::new(settings.resolver.clone());
    let input = settings.input.clone();

    let strategy: Box<dyn ProcessingStrategy> = match strategy_type {
        StrategyType::Sync => Box::new(
            SyncProcessingStrategy::new(resolver, build_provider(settings)?, input)
                .with_cancellation(cancel),
        ),
        StrategyType::Async => Box::new(
            AsyncProcessingStrategy::new(resolver, build_async_provider(settings)?, input)
                .with_cancellation(cancel),
        ),
    };
    Ok(strategy)
}

/// What to do with a name read from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Admission {
    /// Resolve it
    Admit,
    /// Empty after trimming
    Blank,
    /// Already admitted earlier in the batch
    Duplicate,
    /// The unique-name limit has been reached; stop reading
    LimitReached,
}

/// Blank, duplicate and limit filter in front of the resolver
///
/// Names are compared case-insensitively with whitespace runs collapsed,
/// since such variants generate the same candidates.
#[derive(Debug, Default)]
pub(crate) struct NameGate {
    seen: HashSet<String>,
    limit: Option<usize>,
}

impl NameGate {
    pub(crate) fn new(limit: Option<usize>) -> Self {
        Self {
            seen: HashSet::new(),
            limit,
        }
    }

    pub(crate) fn admit(&mut self, name: &str) -> Admission {
        if self.limit.is_some_and(|limit| self.seen.len() >= limit) {
            return Admission::LimitReached;
        }
        let key = name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");
        if key.is_empty() {
            Admission::Blank
        } else if self.seen.insert(key) {
            Admission::Admit
        } else {
            Admission::Duplicate
        }
    }
}

/// Log one resolved name at info level
pub(crate) fn log_record(position: usize, record: &ResolutionRecord) {
    match (&record.handle, record.found) {
        (Some(handle), true) => tracing::info!(
            "[{}] {} -> {} ({} followers, {})",
            position,
            record.name,
            handle,
            record.follower_count.unwrap_or(0),
            if record.is_verified() { "verified" } else { "unverified" }
        ),
        _ => tracing::info!("[{}] {} -> no qualifying account", position, record.name),
    }
}
