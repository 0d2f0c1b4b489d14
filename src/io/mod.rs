//! I/O module
//!
//! Handles CSV parsing and output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (name column lookup, output serialization)
//! - `sync_reader` - Synchronous name reader with iterator interface
//! - `async_reader` - Asynchronous name reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod sync_reader;

pub use async_reader::AsyncNameReader;
pub use csv_format::{RecordWriter, OUTPUT_HEADER};
pub use sync_reader::NameReader;
