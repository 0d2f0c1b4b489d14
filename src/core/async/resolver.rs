//! Async probing loop for [`AccountResolver`]

use crate::core::resolver::{fatal_error, AccountResolver};
use crate::core::selection::{CandidateSelector, Probe, ProbeTally, Verdict};
use crate::core::traits::AsyncLookupProvider;
use crate::types::{ResolutionRecord, ResolveError};

impl AccountResolver {
    /// Generate candidates for `name` and resolve them through an async provider
    pub async fn resolve_name_async<P>(
        &self,
        name: &str,
        provider: &mut P,
    ) -> Result<ResolutionRecord, ResolveError>
    where
        P: AsyncLookupProvider + ?Sized,
    {
        let candidates = self.candidates(name);
        self.resolve_async(name, &candidates, provider).await
    }

    /// Async counterpart of [`AccountResolver::resolve`]
    ///
    /// Same ordering, early-exit and failure semantics.
    pub async fn resolve_async<P>(
        &self,
        name: &str,
        candidates: &[String],
        provider: &mut P,
    ) -> Result<ResolutionRecord, ResolveError>
    where
        P: AsyncLookupProvider + ?Sized,
    {
        let mut selector = CandidateSelector::new(self.config());
        let mut tally = ProbeTally::default();

        for handle in candidates {
            tally.probes += 1;
            match Probe::from(provider.lookup(handle).await) {
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
