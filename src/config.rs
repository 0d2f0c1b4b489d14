//! Runtime configuration
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! an optional TOML file, and command-line flags (see [`crate::cli`]).
//!
//! ```toml
//! [resolver]
//! min_followers = 5000
//! verified_only = true
//!
//! [probe]
//! delay_ms = 1500
//! max_retries = 2
//!
//! [input]
//! name_column = "celebrity_name"
//!
//! [provider]
//! snapshot = "lookups.csv"
//! ```

use crate::types::ResolveError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Selection policy applied by the resolver
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Accounts with fewer followers are never selected
    pub min_followers: u64,
    /// Only verified accounts may be selected
    pub verified_only: bool,
    /// Probe at most this many candidates per name
    pub max_candidates: Option<usize>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            min_followers: 5000,
            verified_only: false,
            max_candidates: None,
        }
    }
}

/// Pacing and retry policy for provider calls
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Minimum delay between two consecutive lookups
    pub delay_ms: u64,
    /// Extra random delay in `0..=jitter_ms` added to each wait
    pub jitter_ms: u64,
    /// Retries for rate-limited or transient failures
    pub max_retries: u32,
    /// Initial back-off, doubled on each retry
    pub backoff_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1500,
            jitter_ms: 0,
            max_retries: 2,
            backoff_ms: 2000,
        }
    }
}

impl ProbeConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn jitter(&self) -> Duration {
        Duration::from_millis(self.jitter_ms)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

/// How names are read from the input file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Header of the column holding display names
    pub name_column: String,
    /// Stop after this many unique names
    pub limit: Option<usize>,
    /// Names read per batch by the async reader
    pub batch_size: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            name_column: "name".to_string(),
            limit: None,
            batch_size: 64,
        }
    }
}

/// Which lookup provider backs the resolver
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Path to a captured lookup snapshot CSV
    pub snapshot: Option<PathBuf>,
}

/// Complete application settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub resolver: ResolverConfig,
    pub probe: ProbeConfig,
    pub input: InputConfig,
    pub provider: ProviderConfig,
}

impl Settings {
    /// Load settings from a TOML file, filling unspecified keys with defaults
    pub fn load(path: &Path) -> Result<Self, ResolveError> {
        if !path.is_file() {
            return Err(ResolveError::file_not_found(&path.display().to_string()));
        }
        tracing::debug!("Reading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        let mut settings = Self::from_toml(&content)?;

        // Relative snapshot paths are relative to the config file
        if let (Some(snapshot), Some(dir)) = (settings.provider.snapshot.as_ref(), path.parent()) {
            if snapshot.is_relative() {
                settings.provider.snapshot = Some(dir.join(snapshot));
            }
        }
        Ok(settings)
    }

    /// Parse settings from TOML text and validate them
    pub fn from_toml(content: &str) -> Result<Self, ResolveError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ResolveError> {
        if self.input.batch_size == 0 {
            return Err(ResolveError::invalid_config(
                "batch_size must be greater than 0",
            ));
        }
        if self.input.name_column.trim().is_empty() {
            return Err(ResolveError::invalid_config("name_column must not be empty"));
        }
        if self.resolver.max_candidates == Some(0) {
            return Err(ResolveError::invalid_config(
                "max_candidates must be greater than 0",
            ));
        }
        if self.input.limit == Some(0) {
            return Err(ResolveError::invalid_config("limit must be greater than 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.resolver.min_followers, 5000);
        assert!(!settings.resolver.verified_only);
        assert_eq!(settings.probe.delay(), Duration::from_millis(1500));
        assert_eq!(settings.input.name_column, "name");
        assert_eq!(settings.provider.snapshot, None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = Settings::from_toml(
            "[resolver]\nverified_only = true\n\n[input]\nname_column = \"celebrity_name\"\n",
        )
        .unwrap();
        assert!(settings.resolver.verified_only);
        assert_eq!(settings.resolver.min_followers, 5000);
        assert_eq!(settings.input.name_column, "celebrity_name");
        assert_eq!(settings.input.batch_size, 64);
        assert_eq!(settings.probe, ProbeConfig::default());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[rstest]
    #[case::zero_batch("[input]\nbatch_size = 0\n", "batch_size")]
    #[case::blank_column("[input]\nname_column = \" \"\n", "name_column")]
    #[case::zero_candidates("[resolver]\nmax_candidates = 0\n", "max_candidates")]
    #[case::zero_limit("[input]\nlimit = 0\n", "limit")]
    #[case::wrong_type("[resolver]\nmin_followers = \"many\"\n", "Invalid configuration")]
    fn test_invalid_toml(#[case] content: &str, #[case] expected: &str) {
        let error = Settings::from_toml(content).unwrap_err();
        assert!(matches!(error, ResolveError::InvalidConfig { .. }));
        assert!(error.to_string().contains(expected), "{}", error);
    }

    #[test]
    fn test_load_resolves_snapshot_relative_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[provider]\nsnapshot = \"lookups.csv\"\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.provider.snapshot, Some(dir.path().join("lookups.csv")));
    }

    #[test]
    fn test_load_missing_file() {
        let error = Settings::load(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(error, ResolveError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_from_temp_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[probe]\ndelay_ms = 0\nmax_retries = 5\n")
            .unwrap();
        file.flush().unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.probe.delay_ms, 0);
        assert_eq!(settings.probe.max_retries, 5);
    }
}
