//! Query session controller.
//!
//! Owns the full lifecycle of one query: idle -> loading -> ready/error,
//! which response mode is active, and per-clue reveal state in step-by-step
//! mode. A single long-lived controller serves the whole session.
//!
//! Supersession: every submission mints a generation token, and a completion
//! is applied only while its token is still current. A second submission (or
//! a mode change) bumps the generation, so a late response from an earlier
//! request is discarded instead of overwriting newer state. No cancellation
//! is sent to the transport.

use crate::api::TutorApi;
use crate::error::TutorError;
use crate::normalize::normalize;
use crate::query::{Query, ResponseMode};
use crate::section::ResponseBundle;
use std::sync::Arc;

/// Lifecycle phase of the current query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
}

/// Everything presentation needs to render the session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub phase: Phase,
    pub query: Option<Query>,
    pub bundle: Option<ResponseBundle>,
    /// One flag per text section; empty outside step-by-step Ready.
    pub revealed: Vec<bool>,
    pub error_message: Option<String>,
}

/// Proof of a specific submission; only the latest one may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitToken(u64);

pub struct SessionController {
    client: Arc<dyn TutorApi>,
    state: SessionState,
    mode: ResponseMode,
    generation: u64,
}

impl SessionController {
    pub fn new(client: Arc<dyn TutorApi>, mode: ResponseMode) -> Self {
        Self {
            client,
            state: SessionState::default(),
            mode,
            generation: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn mode(&self) -> ResponseMode {
        self.mode
    }

    /// Submit a query and wait for it to settle.
    ///
    /// Empty-after-trim text is rejected with `Validation` and the phase is
    /// left untouched. Transport and normalization failures are absorbed
    /// into the Error phase (they are retryable display states, not caller
    /// errors), so a successful return only means the submission ran.
    pub async fn submit(&mut self, query: Query) -> Result<(), TutorError> {
        let token = self.begin(query.clone())?;
        let client = Arc::clone(&self.client);
        let result = client.execute(&query).await;
        self.finish(token, result);
        Ok(())
    }

    /// Validate the query and enter Loading, superseding any in-flight
    /// request. Returns the token the eventual completion must present.
    pub fn begin(&mut self, query: Query) -> Result<SubmitToken, TutorError> {
        if query.trimmed_text().is_empty() {
            return Err(TutorError::Validation("query text is empty".to_string()));
        }

        self.generation += 1;
        self.mode = query.mode;
        self.state.phase = Phase::Loading;
        self.state.query = Some(query);
        self.state.bundle = None;
        self.state.revealed.clear();
        self.state.error_message = None;

        Ok(SubmitToken(self.generation))
    }

    /// Apply a settled transport result. A stale token (superseded by a
    /// newer `begin` or a mode change) is discarded without touching state.
    pub fn finish(&mut self, token: SubmitToken, result: Result<serde_json::Value, TutorError>) {
        if token.0 != self.generation {
            tracing::debug!(
                token = token.0,
                current = self.generation,
                "discarding superseded response"
            );
            return;
        }

        let outcome = result.and_then(|raw| normalize(&raw, self.mode));
        match outcome {
            Ok(bundle) => {
                self.state.revealed = match self.mode {
                    ResponseMode::StepByStep => vec![false; bundle.text_section_count()],
                    ResponseMode::Consolidated => Vec::new(),
                };
                self.state.bundle = Some(bundle);
                self.state.error_message = None;
                self.state.phase = Phase::Ready;
            }
            Err(err) => {
                tracing::warn!(error = %err, "query failed");
                self.state.bundle = None;
                self.state.revealed.clear();
                self.state.error_message = Some(err.display_message());
                self.state.phase = Phase::Error;
            }
        }
    }

    /// Reveal clue `index` (0-based over text sections). Revealing an
    /// already-visible clue is an Ok no-op; reveals are one-way.
    pub fn reveal_section(&mut self, index: usize) -> Result<(), TutorError> {
        if self.state.phase != Phase::Ready || self.mode != ResponseMode::StepByStep {
            return Err(TutorError::Validation(
                "nothing to reveal: no step-by-step answer is ready".to_string(),
            ));
        }
        match self.state.revealed.get_mut(index) {
            Some(flag) => {
                *flag = true;
                Ok(())
            }
            None => Err(TutorError::Validation(format!(
                "clue index {index} out of range (have {})",
                self.state.revealed.len()
            ))),
        }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.state.revealed.get(index).copied().unwrap_or(false)
    }

    /// Switch response mode. The two modes return incompatible payloads, so
    /// this drops any displayed or in-flight result and returns to Idle; the
    /// caller must submit again.
    pub fn change_mode(&mut self, new_mode: ResponseMode) {
        self.mode = new_mode;
        self.generation += 1;
        self.state.phase = Phase::Idle;
        self.state.bundle = None;
        self.state.revealed.clear();
        self.state.error_message = None;
    }
}
