use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use recap_core::RecapError;
use serde_json::Value;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub status: u16,
    pub body: Value,
}

/// Transport seam between a chat model and the provider's HTTP API.
#[async_trait]
pub trait ProviderBackend: Send + Sync {
    async fn send(&self, request: ProviderRequest) -> Result<ProviderResponse, RecapError>;
}

/// Production backend using reqwest.
///
/// Every request carries an explicit timeout so a hung call cannot block
/// the run forever; timeouts surface as transient errors and count
/// against the caller's retry budget.
pub struct HttpBackend {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpBackend {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderBackend for HttpBackend {
    async fn send(&self, request: ProviderRequest) -> Result<ProviderResponse, RecapError> {
        let mut builder = self.client.post(&request.url).timeout(self.timeout);
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        builder = builder.json(&request.body);

        let response = builder
            .send()
            .await
            .map_err(|e| RecapError::Transient(format!("HTTP request failed: {e}")))?;

        let status = response.status().as_u16();
        let body: Value = response
            .json()
            .await
            .map_err(|e| RecapError::Parsing(format!("failed to parse response JSON: {e}")))?;

        Ok(ProviderResponse { status, body })
    }
}

/// Test backend with queued responses.
pub struct FakeBackend {
    responses: Mutex<VecDeque<Result<ProviderResponse, RecapError>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
        }
    }

    pub fn push_response(&self, response: ProviderResponse) -> &Self {
        self.responses
            .try_lock()
            .expect("not concurrent during setup")
            .push_back(Ok(response));
        self
    }

    pub fn push_error(&self, error: RecapError) -> &Self {
        self.responses
            .try_lock()
            .expect("not concurrent during setup")
            .push_back(Err(error));
        self
    }
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderBackend for FakeBackend {
    async fn send(&self, _request: ProviderRequest) -> Result<ProviderResponse, RecapError> {
        let mut responses = self.responses.lock().await;
        responses
            .pop_front()
            .unwrap_or_else(|| Err(RecapError::NonRetryable("FakeBackend exhausted".to_string())))
    }
}
