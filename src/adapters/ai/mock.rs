//! Mock completion service for testing.
//!
//! Configurable implementation of the CompletionService port, allowing tests
//! to run without calling a real completion API: pre-queued responses, error
//! injection, and call capture for verification.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{CompletionError, CompletionRequest, CompletionResponse, CompletionService};

/// Mock completion service.
///
/// Responses are consumed in the order they were queued; an exhausted queue
/// answers with an unavailable error.
#[derive(Debug, Clone, Default)]
pub struct MockCompletionService {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful completion.
    Success { content: String, model: String },
    /// Return an error.
    Error(MockError),
}

/// Mock error kinds for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    /// Simulate provider unavailable.
    Unavailable { message: String },
    /// Simulate network error.
    Network { message: String },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate timeout.
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for CompletionError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::Unavailable { message } => CompletionError::unavailable(message),
            MockError::Network { message } => CompletionError::network(message),
            MockError::AuthenticationFailed => CompletionError::AuthenticationFailed,
            MockError::Timeout { timeout_secs } => CompletionError::Timeout { timeout_secs },
        }
    }
}

impl MockCompletionService {
    /// Creates a mock with an empty response queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response with a default model name.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.responses
            .lock()
            .expect("mock lock poisoned")
            .push_back(MockResponse::Success {
                content: content.into(),
                model: "mock-model".to_string(),
            });
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: MockError) -> Self {
        self.responses
            .lock()
            .expect("mock lock poisoned")
            .push_back(MockResponse::Error(error));
        self
    }

    /// Number of completion calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock lock poisoned").len()
    }

    /// Prompt of the most recent call, if any.
    pub fn last_prompt(&self) -> Option<String> {
        self.calls
            .lock()
            .expect("mock lock poisoned")
            .last()
            .map(|request| request.prompt.clone())
    }
}

#[async_trait]
impl CompletionService for MockCompletionService {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        self.calls
            .lock()
            .expect("mock lock poisoned")
            .push(request);

        let next = self
            .responses
            .lock()
            .expect("mock lock poisoned")
            .pop_front();

        match next {
            Some(MockResponse::Success { content, model }) => {
                Ok(CompletionResponse { content, model })
            }
            Some(MockResponse::Error(err)) => Err(err.into()),
            None => Err(CompletionError::unavailable(
                "mock response queue is empty",
            )),
        }
    }
}
