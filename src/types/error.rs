//! Error types for the follower resolver
//!
//! This module defines all batch-level errors that can occur while reading
//! names, resolving them and writing resolution records. Per-candidate
//! provider failures live in [`crate::types::LookupError`]; only the fatal
//! one is promoted to a [`ResolveError`].
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Errors**: Malformed rows, missing name column
//! - **Configuration Errors**: Invalid TOML, out-of-range settings, no provider
//! - **Provider Errors**: A provider became unusable mid-batch
//! - **Interruption**: The batch was cancelled by the user

use thiserror::Error;

/// Main error type for the follower resolver
///
/// A `ProviderFatal` is deliberately distinct from a "name not found"
/// outcome: the latter is a normal `ResolutionRecord` with `found = false`,
/// the former aborts the remaining batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// Raised per row by the readers; the row is skipped and reading continues.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// The configured name column is absent from the input header
    #[error("Name column '{column}' not found in input header")]
    MissingColumn {
        /// The configured column name
        column: String,
    },

    /// Configuration file or flag values are invalid
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem
        message: String,
    },

    /// No lookup provider was configured
    #[error("No lookup provider configured (pass --snapshot or set [provider] snapshot)")]
    NoProvider,

    /// A provider failed non-recoverably; the rest of the batch is abandoned
    #[error("Provider '{provider}' failed fatally on '{handle}' while resolving '{name}': {message}")]
    ProviderFatal {
        /// Provider name
        provider: String,
        /// Name being resolved when the failure happened
        name: String,
        /// Candidate handle being probed
        handle: String,
        /// Provider-supplied description
        message: String,
    },

    /// The batch was cancelled; rows already written are kept
    #[error("Interrupted after {completed} completed records")]
    Interrupted {
        /// Number of records written before the interruption
        completed: usize,
    },

    /// Async runtime could not be created
    #[error("Runtime error: {message}")]
    Runtime {
        /// Description of the failure
        message: String,
    },
}

// Conversion from io::Error to ResolveError
impl From<std::io::Error> for ResolveError {
    fn from(error: std::io::Error) -> Self {
        ResolveError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to ResolveError
impl From<csv::Error> for ResolveError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        ResolveError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<csv_async::Error> for ResolveError {
    fn from(error: csv_async::Error) -> Self {
        ResolveError::ParseError {
            line: None,
            message: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for ResolveError {
    fn from(error: toml::de::Error) -> Self {
        ResolveError::InvalidConfig {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl ResolveError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        ResolveError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Create a MissingColumn error
    pub fn missing_column(column: &str) -> Self {
        ResolveError::MissingColumn {
            column: column.to_string(),
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(message: &str) -> Self {
        ResolveError::InvalidConfig {
            message: message.to_string(),
        }
    }

    /// Create a ProviderFatal error
    pub fn provider_fatal(provider: &str, name: &str, handle: &str, message: &str) -> Self {
        ResolveError::ProviderFatal {
            provider: provider.to_string(),
            name: name.to_string(),
            handle: handle.to_string(),
            message: message.to_string(),
        }
    }

    /// Process exit code for this error
    ///
    /// - 2: the provider became unusable
    /// - 130: interrupted by the user
    /// - 1: everything else
    pub fn exit_code(&self) -> i32 {
        match self {
            ResolveError::ProviderFatal { .. } => 2,
            ResolveError::Interrupted { .. } => 130,
            _ => 1,
        }
    }
}
