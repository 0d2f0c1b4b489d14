//! Account resolver
//!
//! Probes a name's candidates through a [`LookupProvider`] in priority order
//! and keeps the best qualifying account. The selection rule itself lives in
//! [`crate::core::selection`]; this module owns the probing loop.
//!
//! The resolver enforces:
//! - At most one selected handle per name
//! - `found = true` only for an account at or above `min_followers`
//! - Early exit on the first verified qualifying account
//! - Recoverable provider failures never abort the name
//! - A fatal provider failure aborts with [`ResolveError::ProviderFatal`] and
//!   discards the name's partial result
//! - With a cancellation token, no lookup starts after the token fires and
//!   the name's partial result is discarded

use crate::config::ResolverConfig;
use crate::core::generator::generate_capped;
use crate::core::selection::{CandidateSelector, Probe, ProbeTally, Verdict};
use crate::core::traits::LookupProvider;
use crate::types::{LookupError, ResolutionRecord, ResolveError};
use tokio_util::sync::CancellationToken;

/// Resolves names to at most one account each
#[derive(Debug, Clone, Default)]
pub struct AccountResolver {
    config: ResolverConfig,
}

impl AccountResolver {
    /// Create a resolver with the given selection policy
    pub fn new(config: ResolverConfig) -> Self {
        AccountResolver { config }
    }

    /// The selection policy in use
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Generate candidates for `name` and resolve them
    ///
    /// Candidates are capped at `max_candidates` when configured.
    pub fn resolve_name<P>(&self, name: &str, provider: &mut P) -> Result<ResolutionRecord, ResolveError>
    where
        P: LookupProvider + ?Sized,
    {
        let candidates = self.candidates(name);
        self.resolve(name, &candidates, provider)
    }

    /// Like [`AccountResolver::resolve_name`], but stops before the next
    /// lookup once `cancel` fires
    ///
    /// Returns `Err(ResolveError::Interrupted { completed: 0 })` when
    /// cancelled; the caller knows how many records were completed.
    pub fn resolve_name_until<P>(
        &self,
        name: &str,
        provider: &mut P,
        cancel: &CancellationToken,
    ) -> Result<ResolutionRecord, ResolveError>
    where
        P: LookupProvider + ?Sized,
    {
        let candidates = self.candidates(name);
        self.probe(name, &candidates, provider, Some(cancel))
    }

    /// Candidate list for `name` under this resolver's cap
    pub fn candidates(&self, name: &str) -> Vec<String> {
        generate_capped(name, self.config.max_candidates)
    }

    /// Probe `candidates` in order and select the best qualifying account
    ///
    /// # Arguments
    ///
    /// * `name` - Display name the record is produced for
    /// * `candidates` - Handles in priority order
    /// * `provider` - Lookup backend
    ///
    /// # Returns
    ///
    /// * `Ok(ResolutionRecord)` - found or not found
    /// * `Err(ResolveError::ProviderFatal)` - the provider became unusable
    pub fn resolve<P>(
        &self,
        name: &str,
        candidates: &[String],
        provider: &mut P,
    ) -> Result<ResolutionRecord, ResolveError>
    where
        P: LookupProvider + ?Sized,
    {
        self.probe(name, candidates, provider, None)
    }

    fn probe<P>(
        &self,
        name: &str,
        candidates: &[String],
        provider: &mut P,
        cancel: Option<&CancellationToken>,
    ) -> Result<ResolutionRecord, ResolveError>
    where
        P: LookupProvider + ?Sized,
    {
        let mut selector = CandidateSelector::new(&self.config);
        let mut tally = ProbeTally::default();

        for handle in candidates {
            if cancel.is_some_and(CancellationToken::is_cancelled) {
                tracing::debug!("[{}] cancelled after {} probes", name, tally.probes);
                return Err(ResolveError::Interrupted { completed: 0 });
            }

            tally.probes += 1;
            match Probe::from(provider.lookup(handle)) {
                Probe::Resolved(result) => match selector.offer(handle, &result) {
                    Verdict::Settled => {
                        tracing::debug!("[{}] verified match @{}, stopping", name, handle);
                        break;
                    }
                    Verdict::Accepted => {
                        tracing::trace!("[{}] holding @{} as fallback", name, handle);
                    }
                    Verdict::Rejected(reason) => {
                        tally.rejected += 1;
                        tracing::trace!("[{}] rejected @{}: {:?}", name, handle, reason);
                    }
                },
                Probe::Recoverable(e) => {
                    tally.failure(&e);
                    tracing::trace!("[{}] {}", name, e);
                }
                Probe::Fatal(e) => {
                    tracing::error!(
                        "[{}] provider '{}' failed fatally on @{}: {}",
                        name,
                        provider.name(),
                        handle,
                        e
                    );
                    return Err(fatal_error(provider.name(), name, handle, e));
                }
            }
        }

        tracing::debug!("[{}] probe tally: {:?}", name, tally);
        Ok(selector.finish(name))
    }
}

/// Promote a fatal lookup failure to a batch-level error
pub(crate) fn fatal_error(
    provider: &str,
    name: &str,
    handle: &str,
    error: LookupError,
) -> ResolveError {
    let message = match error {
        LookupError::Fatal { message } => message,
        other => other.to_string(),
    };
    ResolveError::provider_fatal(provider, name, handle, &message)
}
