//! CSV format handling for name input and resolution output
//!
//! This module centralizes all CSV format concerns, providing:
//! - Name column lookup in an input header
//! - Output row serialization
//! - An incremental record writer that flushes after every row
//!
//! Output columns are `name,handle,follower_count,verified,found`. Missing
//! optional values are written as empty cells.

use crate::types::{ResolutionRecord, ResolveError};
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;

/// Output header, in column order
pub const OUTPUT_HEADER: [&str; 5] = ["name", "handle", "follower_count", "verified", "found"];

/// Output row structure for serialization
#[derive(Debug, Serialize, PartialEq)]
struct OutputRow<'a> {
    name: &'a str,
    handle: Option<&'a str>,
    follower_count: Option<u64>,
    verified: Option<bool>,
    found: bool,
}

impl<'a> From<&'a ResolutionRecord> for OutputRow<'a> {
    fn from(record: &'a ResolutionRecord) -> Self {
        OutputRow {
            name: &record.name,
            handle: record.handle.as_deref(),
            follower_count: record.follower_count,
            verified: record.verified,
            found: record.found,
        }
    }
}

/// Locate the name column in a header row
///
/// # Arguments
///
/// * `headers` - Header fields, already trimmed
/// * `column` - Configured name column
///
/// # Returns
///
/// * `Ok(index)` - position of the column
/// * `Err(ResolveError::MissingColumn)` - the header has no such column
pub fn find_column<'a, I>(headers: I, column: &str) -> Result<usize, ResolveError>
where
    I: IntoIterator<Item = &'a str>,
{
    headers
        .into_iter()
        .position(|header| header.trim_start_matches('\u{feff}') == column)
        .ok_or_else(|| ResolveError::missing_column(column))
}

/// Incremental CSV writer for resolution records
///
/// The header is written on creation. Every record is flushed before
/// [`RecordWriter::write`] returns, so rows survive a later abort.
pub struct RecordWriter<W: Write> {
    writer: csv::Writer<W>,
    written: usize,
}

impl<W: Write> RecordWriter<W> {
    /// Create a writer and emit the header
    pub fn new(output: W) -> Result<Self, ResolveError> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);
        writer.write_record(OUTPUT_HEADER)?;
        writer.flush()?;
        Ok(Self { writer, written: 0 })
    }

    /// Write and flush one record
    pub fn write(&mut self, record: &ResolutionRecord) -> Result<(), ResolveError> {
        self.writer.serialize(OutputRow::from(record))?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far
    pub fn written(&self) -> usize {
        self.written
    }
}
