//! Synchronous processing strategy
//!
//! Single-threaded, blocking implementation of the ProcessingStrategy trait.
//! It orchestrates the batch by coordinating:
//! - CSV input through `NameReader` (iterator interface)
//! - Per-name resolution through `AccountResolver` and a blocking provider
//! - Incremental output through `RecordWriter`
//!
//! Cancellation is checked between names and before every lookup. A name
//! whose probing is cut short is discarded, never written.

use crate::config::InputConfig;
use crate::core::{AccountResolver, BatchSummary, LookupProvider};
use crate::io::csv_format::RecordWriter;
use crate::io::sync_reader::NameReader;
use crate::strategy::{log_record, Admission, NameGate, ProcessingStrategy};
use crate::types::ResolveError;
use std::io::Write;
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use follower_resolver::config::Settings;
/// use follower_resolver::core::AccountResolver;
/// use follower_resolver::provider::build_provider;
/// use follower_resolver::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
///
/// let settings = Settings::load(Path::new("resolver.toml")).unwrap();
/// let mut strategy = SyncProcessingStrategy::new(
///     AccountResolver::new(settings.resolver.clone()),
///     build_provider(&settings).unwrap(),
///     settings.input.clone(),
/// );
/// let summary = strategy
///     .process(Path::new("names.csv"), &mut std::io::stdout())
///     .unwrap();
/// println!("{} found", summary.found);
/// ```
pub struct SyncProcessingStrategy {
    resolver: AccountResolver,
    provider: Box<dyn LookupProvider + Send>,
    input: InputConfig,
    cancel: CancellationToken,
}

impl SyncProcessingStrategy {
    /// Create a strategy around a resolver and a blocking provider
    pub fn new(
        resolver: AccountResolver,
        provider: Box<dyn LookupProvider + Send>,
        input: InputConfig,
    ) -> Self {
        Self {
            resolver,
            provider,
            input,
            cancel: CancellationToken::new(),
        }
    }

    /// Stop before the next lookup once `cancel` fires
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &mut self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<BatchSummary, ResolveError> {
        let reader = NameReader::open(input_path, &self.input.name_column)?;
        let mut writer = RecordWriter::new(output)?;
        let mut gate = NameGate::new(self.input.limit);
        let mut summary = BatchSummary::new();

        for result in reader {
            if self.cancel.is_cancelled() {
                return Err(ResolveError::Interrupted {
                    completed: writer.written(),
                });
            }

            let name = match result {
                Ok(name) => name,
                Err(e) => {
                    tracing::warn!("Skipping unreadable row: {}", e);
                    continue;
                }
            };

            match gate.admit(&name) {
                Admission::Admit => {}
                Admission::Blank => continue,
                Admission::Duplicate => {
                    tracing::debug!("Skipping duplicate name '{}'", name);
                    summary.skip_duplicate();
                    continue;
                }
                Admission::LimitReached => break,
            }

            let record = match self.resolver.resolve_name_until(
                &name,
                self.provider.as_mut(),
                &self.cancel,
            ) {
                Err(ResolveError::Interrupted { .. }) => {
                    tracing::warn!("Interrupted while resolving '{}'; discarding it", name);
                    return Err(ResolveError::Interrupted {
                        completed: writer.written(),
                    });
                }
                result => result?,
            };
            writer.write(&record)?;
            summary.record(&record);
            log_record(writer.written(), &record);
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;
    use crate::core::testing::ScriptedProvider;
    use crate::types::{LookupError, LookupResult};
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn strategy(provider: ScriptedProvider, input: InputConfig) -> SyncProcessingStrategy {
        SyncProcessingStrategy::new(
            AccountResolver::new(ResolverConfig::default()),
            Box::new(provider),
            input,
        )
    }

    fn provider() -> ScriptedProvider {
        ScriptedProvider::new()
            .with("zendaya", Ok(LookupResult::account(184_000_000, true)))
            .with("derekhough", Ok(LookupResult::account(3_000_000, true)))
    }

    #[test]
    fn test_sync_strategy_resolves_names() {
        let file = create_temp_csv("name\nZendaya\nJane Doe\n");
        let mut output = Vec::new();

        let summary = strategy(provider(), InputConfig::default())
            .process(file.path(), &mut output)
            .unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "name,handle,follower_count,verified,found\n\
             Zendaya,@zendaya,184000000,true,true\n\
             Jane Doe,,,,false\n"
        );
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.found, 1);
    }

    #[test]
    fn test_sync_strategy_skips_blanks_and_duplicates() {
        let file = create_temp_csv("name\nZendaya\n\nzendaya\nDerek Hough\n");
        let mut output = Vec::new();

        let summary = strategy(provider(), InputConfig::default())
            .process(file.path(), &mut output)
            .unwrap();

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.duplicates_skipped, 1);
        assert_eq!(String::from_utf8(output).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_sync_strategy_honours_limit() {
        let file = create_temp_csv("name\nZendaya\nDerek Hough\nJane Doe\n");
        let mut output = Vec::new();
        let input = InputConfig {
            limit: Some(1),
            ..InputConfig::default()
        };

        let summary = strategy(provider(), input)
            .process(file.path(), &mut output)
            .unwrap();

        assert_eq!(summary.processed, 1);
    }

    #[test]
    fn test_sync_strategy_missing_column() {
        let file = create_temp_csv("celebrity_name\nZendaya\n");
        let mut output = Vec::new();

        let result = strategy(provider(), InputConfig::default()).process(file.path(), &mut output);

        assert_eq!(result.err(), Some(ResolveError::missing_column("name")));
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let mut output = Vec::new();
        let result = strategy(provider(), InputConfig::default())
            .process(Path::new("nonexistent.csv"), &mut output);
        assert!(matches!(result, Err(ResolveError::FileNotFound { .. })));
    }

    #[test]
    fn test_sync_strategy_fatal_keeps_written_rows() {
        let file = create_temp_csv("name\nZendaya\nJane Doe\nDerek Hough\n");
        let mut output = Vec::new();
        let provider = provider().with("janedoe", Err(LookupError::fatal("login required")));

        let result = strategy(provider, InputConfig::default()).process(file.path(), &mut output);

        assert_eq!(
            result.err(),
            Some(ResolveError::provider_fatal(
                "scripted",
                "Jane Doe",
                "janedoe",
                "login required"
            ))
        );
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "name,handle,follower_count,verified,found\n\
             Zendaya,@zendaya,184000000,true,true\n"
        );
    }

    #[test]
    fn test_sync_strategy_cancelled_before_start() {
        let file = create_temp_csv("name\nZendaya\n");
        let mut output = Vec::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = strategy(provider(), InputConfig::default())
            .with_cancellation(cancel)
            .process(file.path(), &mut output);

        assert_eq!(result.err(), Some(ResolveError::Interrupted { completed: 0 }));
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "name,handle,follower_count,verified,found\n"
        );
    }

    #[test]
    fn test_sync_strategy_cancellation_discards_in_flight_name() {
        let file = create_temp_csv("name\nZendaya\nJane Doe\nCheryl Burke\n");
        let mut output = Vec::new();
        let cancel = CancellationToken::new();
        let provider = provider().cancel_on("jane.doe", cancel.clone());

        let result = strategy(provider, InputConfig::default())
            .with_cancellation(cancel)
            .process(file.path(), &mut output);

        assert_eq!(result.err(), Some(ResolveError::Interrupted { completed: 1 }));
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "name,handle,follower_count,verified,found\n\
             Zendaya,@zendaya,184000000,true,true\n"
        );
    }

    #[test]
    fn test_sync_strategy_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<SyncProcessingStrategy>();
    }
}
