//! Offline snapshot provider
//!
//! Replays a captured table of lookup outcomes from CSV:
//!
//! ```text
//! handle,follower_count,verified,status
//! zendaya,184000000,true,found
//! @MarkBallas,900000,false,
//! derekhough,,,rate_limited
//! ```
//!
//! `status` is one of `found` (the default when empty), `not_found`,
//! `rate_limited`, `error` or `fatal`. Handles are normalised before storage
//! and before every lookup, so `@MarkBallas` and `markballas` are the same
//! entry. Handles absent from the snapshot answer `NotFound`.

use crate::core::traits::{AsyncLookupProvider, LookupProvider};
use crate::types::{LookupError, LookupResult, ResolveError};
use async_trait::async_trait;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Outcome recorded for a handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotStatus {
    Found,
    NotFound,
    RateLimited,
    Error,
    Fatal,
}

/// One row of the snapshot file
#[derive(Debug, Deserialize)]
struct SnapshotRow {
    handle: String,
    #[serde(default)]
    follower_count: Option<u64>,
    #[serde(default)]
    verified: Option<bool>,
    #[serde(default)]
    status: Option<SnapshotStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SnapshotEntry {
    status: SnapshotStatus,
    follower_count: Option<u64>,
    verified: Option<bool>,
}

/// Normalise a handle for snapshot matching: trim, drop a leading `@`, lowercase
pub fn normalize_handle(handle: &str) -> String {
    let trimmed = handle.trim();
    trimmed
        .strip_prefix('@')
        .unwrap_or(trimmed)
        .trim()
        .to_lowercase()
}

/// Lookup provider backed by a captured snapshot
#[derive(Debug, Clone, Default)]
pub struct SnapshotProvider {
    entries: HashMap<String, SnapshotEntry>,
}

impl SnapshotProvider {
    /// Load a snapshot from a CSV file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the snapshot CSV
    ///
    /// # Returns
    ///
    /// * `Ok(SnapshotProvider)` - all rows parsed
    /// * `Err(ResolveError::FileNotFound)` - the file does not exist
    /// * `Err(ResolveError::ParseError)` - a row could not be parsed
    pub fn from_path(path: &Path) -> Result<Self, ResolveError> {
        if !path.is_file() {
            return Err(ResolveError::file_not_found(&path.display().to_string()));
        }
        let file = File::open(path)?;
        let provider = Self::from_reader(file)?;
        tracing::info!(
            "Loaded {} snapshot entries from {}",
            provider.len(),
            path.display()
        );
        Ok(provider)
    }

    /// Load a snapshot from any CSV source
    ///
    /// A malformed row fails the whole load.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ResolveError> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut provider = SnapshotProvider::default();
        for row in csv_reader.deserialize::<SnapshotRow>() {
            let row = row?;
            let handle = normalize_handle(&row.handle);
            if handle.is_empty() {
                tracing::warn!("Skipping snapshot row with an empty handle");
                continue;
            }
            let entry = SnapshotEntry {
                status: row.status.unwrap_or(SnapshotStatus::Found),
                follower_count: row.follower_count,
                verified: row.verified,
            };
            if provider.entries.contains_key(&handle) {
                tracing::warn!("Duplicate snapshot entry for '{}' ignored", handle);
                continue;
            }
            provider.entries.insert(handle, entry);
        }

        Ok(provider)
    }

    /// Number of distinct handles in the snapshot
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the snapshot holds no handles
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replay the recorded outcome for `handle`
    pub fn replay(&self, handle: &str) -> Result<LookupResult, LookupError> {
        let key = normalize_handle(handle);
        let Some(entry) = self.entries.get(&key) else {
            return Err(LookupError::not_found(handle));
        };

        match entry.status {
            SnapshotStatus::Found => Ok(LookupResult {
                follower_count: entry.follower_count,
                is_verified: entry.verified,
                exists: true,
            }),
            SnapshotStatus::NotFound => Err(LookupError::not_found(handle)),
            SnapshotStatus::RateLimited => Err(LookupError::rate_limited(handle, None)),
            SnapshotStatus::Error => Err(LookupError::transient(handle, "recorded lookup error")),
            SnapshotStatus::Fatal => Err(LookupError::fatal(&format!(
                "recorded fatal outcome for '{}'",
                key
            ))),
        }
    }
}

impl LookupProvider for SnapshotProvider {
    fn name(&self) -> &str {
        "snapshot"
    }

    fn lookup(&mut self, handle: &str) -> Result<LookupResult, LookupError> {
        self.replay(handle)
    }
}

#[async_trait]
impl AsyncLookupProvider for SnapshotProvider {
    fn name(&self) -> &str {
        "snapshot"
    }

    async fn lookup(&mut self, handle: &str) -> Result<LookupResult, LookupError> {
        self.replay(handle)
    }
}
