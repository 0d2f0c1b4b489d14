//! Follower Resolver CLI
//!
//! Command-line interface for resolving display names to Instagram handles.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --snapshot lookups.csv names.csv > handles.csv
//! cargo run -- --strategy sync --snapshot lookups.csv names.csv > handles.csv
//! cargo run -- --config resolver.toml --verified-only --limit 15 -o handles.csv names.csv
//! ```
//!
//! Rows are written as soon as each name is resolved. Logs go to stderr
//! (`RUST_LOG` overrides the default `info` level) so stdout stays clean CSV.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (bad arguments, file not found, missing column, etc.)
//! - 2: The lookup provider failed fatally; rows written so far are kept
//! - 130: Interrupted with Ctrl-C; rows written so far are kept

use anyhow::{Context, Result};
use follower_resolver::cli::{self, CliArgs};
use follower_resolver::core::BatchSummary;
use follower_resolver::strategy;
use follower_resolver::types::ResolveError;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    if let Err(e) = init_tracing() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    let args = cli::parse_args();
    tracing::debug!("Parsed CLI arguments: {:?}", args);

    match run(&args) {
        Ok(summary) => summary.log(),
        Err(e) => {
            tracing::error!("{:#}", e);
            let code = e
                .downcast_ref::<ResolveError>()
                .map_or(1, ResolveError::exit_code);
            process::exit(code);
        }
    }
}

fn init_tracing() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Setting up tracing subscriber failed")
}

fn run(args: &CliArgs) -> Result<BatchSummary> {
    let settings = args.to_settings()?;
    tracing::info!(
        "Follower Resolver v{} starting ({:?} strategy, min_followers={}, verified_only={})",
        env!("CARGO_PKG_VERSION"),
        args.strategy,
        settings.resolver.min_followers,
        settings.resolver.verified_only
    );

    let cancel = CancellationToken::new();
    install_interrupt_handler(cancel.clone())?;

    let mut strategy = strategy::create_strategy(args.strategy, &settings, cancel)?;

    let mut output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output file '{}'", path.display())
        })?)),
        None => Box::new(io::stdout()),
    };

    let summary = strategy.process(&args.input_file, &mut output)?;
    output.flush().context("Failed to flush output")?;
    Ok(summary)
}

/// Cancel `cancel` on the first Ctrl-C and exit on the second
fn install_interrupt_handler(cancel: CancellationToken) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create signal runtime")?;

    std::thread::Builder::new()
        .name("signal".to_string())
        .spawn(move || {
            runtime.block_on(async {
                if tokio::signal::ctrl_c().await.is_err() {
                    return;
                }
                tracing::warn!("Interrupt received; stopping before the next name (Ctrl-C again to abort)");
                cancel.cancel();

                if tokio::signal::ctrl_c().await.is_ok() {
                    process::exit(130);
                }
            })
        })
        .context("Failed to spawn signal thread")?;

    Ok(())
}
