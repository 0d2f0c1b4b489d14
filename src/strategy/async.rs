//! Asynchronous processing strategy
//!
//! This module provides an async implementation of the ProcessingStrategy
//! trait on a current-thread tokio runtime. Names are resolved strictly one
//! after another; the runtime provides non-blocking file I/O, timers for the
//! provider decorators, and cancellation.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── InputConfig (name_column, limit, batch_size)
//!     ├── AsyncNameReader (batch CSV reading)
//!     ├── NameGate (blank/duplicate/limit filter)
//!     ├── AccountResolver::resolve_name_async
//!     │     └── Box<dyn AsyncLookupProvider>
//!     └── RecordWriter (flushed per row)
//! ```
//!
//! # Cancellation
//!
//! The strategy holds a `CancellationToken`. When it fires, the name being
//! probed is dropped unfinished, every row already written is kept, and
//! `process` returns `ResolveError::Interrupted`.

use crate::config::InputConfig;
use crate::core::{AccountResolver, AsyncLookupProvider, BatchSummary};
use crate::io::async_reader::AsyncNameReader;
use crate::io::csv_format::RecordWriter;
use crate::strategy::{log_record, Admission, NameGate, ProcessingStrategy};
use crate::types::ResolveError;
use std::io::Write;
use std::path::Path;
use tokio_util::compat::TokioAsyncReadCompatExt;
use tokio_util::sync::CancellationToken;

/// Asynchronous processing strategy
pub struct AsyncProcessingStrategy {
    resolver: AccountResolver,
    provider: Box<dyn AsyncLookupProvider>,
    input: InputConfig,
    cancel: CancellationToken,
}

impl AsyncProcessingStrategy {
    /// Create a strategy around a resolver and an async provider
    ///
    /// # Arguments
    ///
    /// * `resolver` - Selection policy and candidate cap
    /// * `provider` - Async provider stack
    /// * `input` - Name column, limit and read batch size
    pub fn new(
        resolver: AccountResolver,
        provider: Box<dyn AsyncLookupProvider>,
        input: InputConfig,
    ) -> Self {
        Self {
            resolver,
            provider,
            input,
            cancel: CancellationToken::new(),
        }
    }

    /// Interrupt the batch once `cancel` fires
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    async fn run(
        &mut self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<BatchSummary, ResolveError> {
        let file = tokio::fs::File::open(input_path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    ResolveError::file_not_found(&input_path.display().to_string())
                }
                _ => ResolveError::from(e),
            })?;

        // Wrap tokio file in a compatibility layer for csv-async
        let mut reader = AsyncNameReader::new(file.compat(), &self.input.name_column).await?;
        let mut writer = RecordWriter::new(output)?;
        let mut gate = NameGate::new(self.input.limit);
        let mut summary = BatchSummary::new();

        'batches: loop {
            let batch = reader.read_batch(self.input.batch_size).await?;
            if batch.is_empty() {
                break;
            }

            for name in batch {
                if self.cancel.is_cancelled() {
                    return Err(ResolveError::Interrupted {
                        completed: writer.written(),
                    });
                }

                match gate.admit(&name) {
                    Admission::Admit => {}
                    Admission::Blank => continue,
                    Admission::Duplicate => {
                        tracing::debug!("Skipping duplicate name '{}'", name);
                        summary.skip_duplicate();
                        continue;
                    }
                    Admission::LimitReached => break 'batches,
                }

                let record = tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => {
                        tracing::warn!("Interrupted while resolving '{}'; discarding it", name);
                        return Err(ResolveError::Interrupted {
                            completed: writer.written(),
                        });
                    }
                    result = self.resolver.resolve_name_async(&name, self.provider.as_mut()) => result?,
                };

                writer.write(&record)?;
                summary.record(&record);
                log_record(writer.written(), &record);
            }
        }

        Ok(summary)
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process names on a current-thread runtime
    ///
    /// # Error Handling
    ///
    /// Runtime creation failures surface as `ResolveError::Runtime`; all
    /// other errors follow the trait contract.
    fn process(
        &mut self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<BatchSummary, ResolveError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ResolveError::Runtime {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        runtime.block_on(self.run(input_path, output))
    }
}
