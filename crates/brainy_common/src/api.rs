//! API client boundary.
//!
//! Production code uses `HttpTutorClient` against the remote tutoring
//! service. Test code uses `FakeTutorClient` with scripted responses, so the
//! session state machine can be exercised without a network.

use crate::error::TutorError;
use crate::query::{Query, ResponseMode};
use async_trait::async_trait;
use std::time::Duration;

/// Seam between the session controller and the transport.
#[async_trait]
pub trait TutorApi: Send + Sync {
    /// Send one query and return the raw JSON payload.
    ///
    /// The payload shape is deliberately untyped here; normalization owns
    /// shape interpretation.
    async fn execute(&self, query: &Query) -> Result<serde_json::Value, TutorError>;
}

/// HTTP client for the tutoring service.
#[derive(Debug)]
pub struct HttpTutorClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTutorClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, TutorError> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(TutorError::Configuration(
                "service base URL is not set".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| TutorError::Configuration(format!("HTTP client setup failed: {e}")))?;

        Ok(Self { base_url, client })
    }
}

#[async_trait]
impl TutorApi for HttpTutorClient {
    async fn execute(&self, query: &Query) -> Result<serde_json::Value, TutorError> {
        let text = query.trimmed_text();
        if text.is_empty() {
            // Fail fast, no network call.
            return Err(TutorError::Validation("query text is empty".to_string()));
        }

        let url = format!("{}/execute", self.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "question": text,
            "step_by_step": query.mode == ResponseMode::StepByStep,
            "profile": query.profile,
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TutorError::Transport {
                status: None,
                body: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(TutorError::Transport {
                status: Some(status.as_u16()),
                body: body_text,
            });
        }

        response.json().await.map_err(|e| {
            TutorError::MalformedResponse(format!("response is not valid JSON: {e}"))
        })
    }
}

/// Scripted client for tests: returns queued results in order, repeating the
/// last one when the queue runs dry.
pub struct FakeTutorClient {
    responses: std::sync::Mutex<Vec<Result<serde_json::Value, TutorError>>>,
    call_count: std::sync::Mutex<usize>,
}

impl FakeTutorClient {
    pub fn new(responses: Vec<Result<serde_json::Value, TutorError>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses),
            call_count: std::sync::Mutex::new(0),
        }
    }

    /// Client that always returns the given payload.
    pub fn always(payload: serde_json::Value) -> Self {
        Self::new(vec![Ok(payload)])
    }

    /// Client that always fails with the given error.
    pub fn always_error(error: TutorError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl TutorApi for FakeTutorClient {
    async fn execute(&self, _query: &Query) -> Result<serde_json::Value, TutorError> {
        *self.call_count.lock().unwrap() += 1;

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(TutorError::Transport {
                status: None,
                body: "fake client queue exhausted".to_string(),
            });
        }
        if responses.len() == 1 {
            responses[0].clone()
        } else {
            responses.remove(0)
        }
    }
}
