//! Scripted provider shared by unit tests

use crate::core::traits::{AsyncLookupProvider, LookupProvider};
use crate::types::{LookupError, LookupResult};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

/// Provider answering from a fixed script and recording every probe
///
/// Handles missing from the script answer `NotFound`.
#[derive(Debug, Default)]
pub(crate) struct ScriptedProvider {
    script: HashMap<String, Result<LookupResult, LookupError>>,
    probed: Vec<String>,
    cancel_on: Option<(String, CancellationToken)>,
}

impl ScriptedProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, handle: &str, outcome: Result<LookupResult, LookupError>) -> Self {
        self.script.insert(handle.to_string(), outcome);
        self
    }

    /// Cancel `token` when `handle` is looked up
    pub(crate) fn cancel_on(mut self, handle: &str, token: CancellationToken) -> Self {
        self.cancel_on = Some((handle.to_string(), token));
        self
    }

    pub(crate) fn probed(&self) -> &[String] {
        &self.probed
    }

    fn answer(&mut self, handle: &str) -> Result<LookupResult, LookupError> {
        self.probed.push(handle.to_string());
        if let Some((trigger, token)) = &self.cancel_on {
            if trigger == handle {
                token.cancel();
            }
        }
        self.script
            .get(handle)
            .cloned()
            .unwrap_or_else(|| Err(LookupError::not_found(handle)))
    }
}

impl LookupProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn lookup(&mut self, handle: &str) -> Result<LookupResult, LookupError> {
        self.answer(handle)
    }
}

#[async_trait]
impl AsyncLookupProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn lookup(&mut self, handle: &str) -> Result<LookupResult, LookupError> {
        self.answer(handle)
    }
}
