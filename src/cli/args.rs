use crate::config::Settings;
use crate::types::ResolveError;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Resolve display names to verified, high-follower Instagram handles
#[derive(Parser, Debug)]
#[command(name = "follower-resolver")]
#[command(
    about = "Resolve display names to verified, high-follower Instagram handles",
    long_about = None
)]
pub struct CliArgs {
    /// Input CSV file path containing display names
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Processing strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for blocking or 'async' for tokio-driven"
    )]
    pub strategy: StrategyType,

    /// TOML settings file
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Lookup snapshot CSV to replay
    #[arg(long = "snapshot", value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// Output CSV path
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output CSV path (default: stdout)"
    )]
    pub output: Option<PathBuf>,

    /// Minimum follower count for an account to qualify
    #[arg(long = "min-followers", value_name = "COUNT")]
    pub min_followers: Option<u64>,

    /// Only accept verified accounts
    #[arg(long = "verified-only")]
    pub verified_only: bool,

    /// Maximum candidates probed per name
    #[arg(long = "max-candidates", value_name = "COUNT")]
    pub max_candidates: Option<usize>,

    /// Column holding display names
    #[arg(long = "name-column", value_name = "COLUMN")]
    pub name_column: Option<String>,

    /// Stop after this many unique names
    #[arg(long = "limit", value_name = "COUNT")]
    pub limit: Option<usize>,

    /// Minimum delay between lookups in milliseconds
    #[arg(long = "delay-ms", value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Retries for rate-limited or transient lookups
    #[arg(long = "max-retries", value_name = "COUNT")]
    pub max_retries: Option<u32>,

    /// Names read per batch (async mode only)
    #[arg(long = "batch-size", value_name = "SIZE")]
    pub batch_size: Option<usize>,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Build the effective settings
    ///
    /// Starts from the `--config` file when given (defaults otherwise) and
    /// applies every flag that was passed on top of it.
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - validated settings
    /// * `Err(ResolveError)` - the config file is unreadable or a value is invalid
    pub fn to_settings(&self) -> Result<Settings, ResolveError> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if let Some(min_followers) = self.min_followers {
            settings.resolver.min_followers = min_followers;
        }
        if self.verified_only {
            settings.resolver.verified_only = true;
        }
        if self.max_candidates.is_some() {
            settings.resolver.max_candidates = self.max_candidates;
        }
        if let Some(name_column) = &self.name_column {
            settings.input.name_column = name_column.clone();
        }
        if self.limit.is_some() {
            settings.input.limit = self.limit;
        }
        if let Some(batch_size) = self.batch_size {
            settings.input.batch_size = batch_size;
        }
        if let Some(delay_ms) = self.delay_ms {
            settings.probe.delay_ms = delay_ms;
        }
        if let Some(max_retries) = self.max_retries {
            settings.probe.max_retries = max_retries;
        }
        if self.snapshot.is_some() {
            settings.provider.snapshot = self.snapshot.clone();
        }

        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // Strategy parsing tests
    #[rstest]
    #[case::default_strategy(&["program", "names.csv"], StrategyType::Async)]
    #[case::explicit_sync(&["program", "--strategy", "sync", "names.csv"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "--strategy", "async", "names.csv"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.strategy, expected);
    }

    #[test]
    fn test_defaults_without_flags() {
        let parsed = CliArgs::try_parse_from(["program", "names.csv"]).unwrap();
        assert_eq!(parsed.to_settings().unwrap(), Settings::default());
        assert_eq!(parsed.output, None);
    }

    #[test]
    fn test_flags_override_defaults() {
        let parsed = CliArgs::try_parse_from([
            "program",
            "--snapshot",
            "lookups.csv",
            "--min-followers",
            "10000",
            "--verified-only",
            "--max-candidates",
            "12",
            "--name-column",
            "celebrity_name",
            "--limit",
            "15",
            "--delay-ms",
            "0",
            "--max-retries",
            "4",
            "--batch-size",
            "8",
            "-o",
            "out.csv",
            "names.csv",
        ])
        .unwrap();

        let settings = parsed.to_settings().unwrap();

        assert_eq!(settings.resolver.min_followers, 10_000);
        assert!(settings.resolver.verified_only);
        assert_eq!(settings.resolver.max_candidates, Some(12));
        assert_eq!(settings.input.name_column, "celebrity_name");
        assert_eq!(settings.input.limit, Some(15));
        assert_eq!(settings.input.batch_size, 8);
        assert_eq!(settings.probe.delay_ms, 0);
        assert_eq!(settings.probe.max_retries, 4);
        assert_eq!(settings.provider.snapshot, Some(PathBuf::from("lookups.csv")));
        assert_eq!(parsed.output, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[resolver]\nmin_followers = 1000\nverified_only = true\n\n[probe]\ndelay_ms = 250\n")
            .unwrap();
        file.flush().unwrap();
        let config = file.path().to_str().unwrap();

        let parsed =
            CliArgs::try_parse_from(["program", "--config", config, "--min-followers", "7500", "names.csv"])
                .unwrap();
        let settings = parsed.to_settings().unwrap();

        assert_eq!(settings.resolver.min_followers, 7_500);
        assert!(settings.resolver.verified_only);
        assert_eq!(settings.probe.delay_ms, 250);
    }

    #[rstest]
    #[case::zero_batch_size(&["program", "--batch-size", "0", "names.csv"])]
    #[case::zero_max_candidates(&["program", "--max-candidates", "0", "names.csv"])]
    #[case::blank_name_column(&["program", "--name-column", " ", "names.csv"])]
    fn test_invalid_values_rejected(#[case] args: &[&str]) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert!(matches!(
            parsed.to_settings(),
            Err(ResolveError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_missing_config_file() {
        let parsed =
            CliArgs::try_parse_from(["program", "--config", "no/such.toml", "names.csv"]).unwrap();
        assert!(matches!(
            parsed.to_settings(),
            Err(ResolveError::FileNotFound { .. })
        ));
    }

    // Error handling tests
    #[rstest]
    #[case::missing_input(&["program"])]
    #[case::invalid_strategy(&["program", "--strategy", "invalid", "names.csv"])]
    #[case::negative_min_followers(&["program", "--min-followers", "-5", "names.csv"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
