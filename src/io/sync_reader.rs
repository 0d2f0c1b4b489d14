//! Synchronous name reader with iterator interface
//!
//! Streams names from a CSV file one row at a time. The name column is
//! located in the header when the reader is created; a header without it is
//! rejected up front.
//!
//! ```no_run
//! use follower_resolver::io::sync_reader::NameReader;
//! use std::path::Path;
//!
//! let reader = NameReader::open(Path::new("names.csv"), "celebrity_name").unwrap();
//! for result in reader {
//!     match result {
//!         Ok(name) => println!("Resolving {}", name),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, missing column) are returned from `open()`
//! - Rows that fail to parse are yielded as `Err` items carrying the line number
//! - An I/O failure mid-file ends the iteration after yielding it

use crate::io::csv_format::find_column;
use crate::types::ResolveError;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Synchronous CSV name reader
///
/// Yields the trimmed value of the name column for every data row. Rows too
/// short to contain the column yield an empty string; dropping blanks is the
/// caller's decision.
#[derive(Debug)]
pub struct NameReader<R: Read> {
    reader: csv::Reader<R>,
    column: usize,
    record: StringRecord,
    done: bool,
}

impl NameReader<File> {
    /// Open a CSV file and locate the name column
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the CSV file
    /// * `column` - Name of the column holding display names
    ///
    /// # Returns
    ///
    /// * `Ok(NameReader)` if the file opened and the column exists
    /// * `Err(ResolveError::FileNotFound)` if the file does not exist
    /// * `Err(ResolveError::MissingColumn)` if the header lacks the column
    pub fn open(path: &Path, column: &str) -> Result<Self, ResolveError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                ResolveError::file_not_found(&path.display().to_string())
            }
            _ => ResolveError::from(e),
        })?;
        Self::from_reader(file, column)
    }
}

impl<R: Read> NameReader<R> {
    /// Wrap any reader producing CSV
    pub fn from_reader(reader: R, column: &str) -> Result<Self, ResolveError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(reader);

        let column = find_column(reader.headers()?.iter(), column)?;

        Ok(Self {
            reader,
            column,
            record: StringRecord::new(),
            done: false,
        })
    }
}

impl<R: Read> Iterator for NameReader<R> {
    type Item = Result<String, ResolveError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_record(&mut self.record) {
            Ok(true) => Some(Ok(self
                .record
                .get(self.column)
                .unwrap_or("")
                .trim()
                .to_string())),
            Ok(false) => None,
            Err(e) => {
                self.done = e.is_io_error();
                Some(Err(e.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn names(content: &str, column: &str) -> Vec<Result<String, ResolveError>> {
        NameReader::from_reader(content.as_bytes(), column)
            .unwrap()
            .collect()
    }

    #[test]
    fn test_open_reads_names() {
        let file = create_temp_csv("name\nZendaya\nDerek Hough\n");

        let reader = NameReader::open(file.path(), "name").unwrap();
        let names: Vec<String> = reader.filter_map(Result::ok).collect();

        assert_eq!(names, ["Zendaya", "Derek Hough"]);
    }

    #[test]
    fn test_open_missing_file() {
        let result = NameReader::open(Path::new("nonexistent.csv"), "name");
        assert!(matches!(result, Err(ResolveError::FileNotFound { .. })));
    }

    #[test]
    fn test_missing_column() {
        let result = NameReader::from_reader("celebrity_name\nZendaya\n".as_bytes(), "name");
        assert_eq!(result.err(), Some(ResolveError::missing_column("name")));
    }

    #[test]
    fn test_configured_column_among_others() {
        let content = "rank,celebrity_name,category\n1,Zendaya,actor\n2,  Derek Hough  ,dancer\n";
        let names: Vec<String> = names(content, "celebrity_name")
            .into_iter()
            .map(Result::unwrap)
            .collect();
        assert_eq!(names, ["Zendaya", "Derek Hough"]);
    }

    #[test]
    fn test_short_and_blank_rows_yield_empty_names() {
        let content = "rank,name\n1,Zendaya\n2\n3,   \n";
        let names: Vec<String> = names(content, "name")
            .into_iter()
            .map(Result::unwrap)
            .collect();
        assert_eq!(names, ["Zendaya", "", ""]);
    }

    #[test]
    fn test_empty_file_after_header() {
        assert!(names("name\n", "name").is_empty());
    }

    #[test]
    fn test_invalid_utf8_row_is_error_and_iteration_continues() {
        let mut content = b"name\nZendaya\n".to_vec();
        content.extend_from_slice(b"\xff\xfe\n");
        content.extend_from_slice(b"Cheryl Burke\n");

        let results: Vec<_> = NameReader::from_reader(content.as_slice(), "name")
            .unwrap()
            .collect();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(ResolveError::ParseError { .. })
        ));
        assert_eq!(results[2].as_ref().unwrap(), "Cheryl Burke");
    }
}
