//! Asynchronous name reader with batch interface
//!
//! Streams names from CSV through csv-async, handing them out in batches so
//! the async strategy can interleave reading with resolution.
//!
//! # Architecture
//!
//! ```text
//! tokio File → compat → AsyncNameReader → Vec<String> batches
//!                            ↓
//!                     csv_format module
//!                      (find_column)
//! ```

use crate::io::csv_format::find_column;
use crate::types::ResolveError;
use csv_async::{AsyncReaderBuilder, StringRecord, Trim};
use futures::io::AsyncRead;

/// Asynchronous CSV name reader
///
/// Maintains streaming behavior with constant memory usage; only the
/// current batch is held.
pub struct AsyncNameReader<R: AsyncRead + Unpin + Send> {
    reader: csv_async::AsyncReader<R>,
    column: usize,
    record: StringRecord,
}

impl<R: AsyncRead + Unpin + Send> AsyncNameReader<R> {
    /// Create a reader and locate the name column
    ///
    /// # Arguments
    ///
    /// * `reader` - Async reader providing CSV data
    /// * `column` - Name of the column holding display names
    ///
    /// # Returns
    ///
    /// * `Ok(AsyncNameReader)` if the header contains the column
    /// * `Err(ResolveError::MissingColumn)` otherwise
    pub async fn new(reader: R, column: &str) -> Result<Self, ResolveError> {
        let mut reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .create_reader(reader);

        let column = find_column(reader.headers().await?.iter(), column)?;

        Ok(Self {
            reader,
            column,
            record: StringRecord::new(),
        })
    }

    /// Read up to `batch_size` names
    ///
    /// Rows that fail to parse are logged and skipped. Rows too short to
    /// contain the name column yield an empty string.
    ///
    /// # Returns
    ///
    /// * `Ok(names)` - empty when the end of the file is reached
    /// * `Err(ResolveError)` - the underlying reader failed
    pub async fn read_batch(&mut self, batch_size: usize) -> Result<Vec<String>, ResolveError> {
        let mut batch = Vec::with_capacity(batch_size);

        while batch.len() < batch_size {
            match self.reader.read_record(&mut self.record).await {
                Ok(true) => batch.push(
                    self.record
                        .get(self.column)
                        .unwrap_or("")
                        .trim()
                        .to_string(),
                ),
                Ok(false) => break,
                Err(e) if matches!(e.kind(), csv_async::ErrorKind::Io(_)) => {
                    return Err(e.into());
                }
                Err(e) => tracing::warn!("Skipping unreadable row: {}", e),
            }
        }

        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::io::Cursor;

    async fn reader(content: &str, column: &str) -> AsyncNameReader<Cursor<Vec<u8>>> {
        AsyncNameReader::new(Cursor::new(content.as_bytes().to_vec()), column)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_read_batch() {
        let mut names = reader("name\nZendaya\nDerek Hough\nCheryl Burke\n", "name").await;

        assert_eq!(names.read_batch(2).await.unwrap(), ["Zendaya", "Derek Hough"]);
        assert_eq!(names.read_batch(2).await.unwrap(), ["Cheryl Burke"]);
        assert!(names.read_batch(2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_csv() {
        let mut names = reader("name\n", "name").await;
        assert!(names.read_batch(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_column() {
        let result =
            AsyncNameReader::new(Cursor::new(b"celebrity_name\nZendaya\n".to_vec()), "name").await;
        assert_eq!(result.err(), Some(ResolveError::missing_column("name")));
    }

    #[tokio::test]
    async fn test_configured_column_and_whitespace() {
        let mut names = reader(
            "rank,celebrity_name\n1,  Zendaya  \n2\n",
            "celebrity_name",
        )
        .await;
        assert_eq!(names.read_batch(10).await.unwrap(), ["Zendaya", ""]);
    }

    #[tokio::test]
    async fn test_invalid_utf8_row_skipped() {
        let mut content = b"name\nZendaya\n".to_vec();
        content.extend_from_slice(b"\xff\xfe\n");
        content.extend_from_slice(b"Cheryl Burke\n");
        let mut names = AsyncNameReader::new(Cursor::new(content), "name")
            .await
            .unwrap();

        assert_eq!(
            names.read_batch(10).await.unwrap(),
            ["Zendaya", "Cheryl Burke"]
        );
    }
}
