//! Mock AI Provider for testing.
//!
//! Scripted completions for exercising the generation gateway and the
//! wizard without calling a real API. Replies are consumed in order; once
//! the script runs out every call answers with an empty JSON object, which
//! the gateway rejects as malformed.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response(r#"{"marketSegments":["Mahasiswa","Pekerja kantoran","Keluarga"]}"#)
//!     .with_error(AIError::unavailable("overloaded"))
//!     .with_delay(Duration::from_millis(100));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

const MOCK_MODEL: &str = "mock-model-1";

type Script = VecDeque<(Result<String, AIError>, FinishReason)>;

/// Scripted provider. Clones share the script and the call log.
#[derive(Debug, Clone, Default)]
pub struct MockAIProvider {
    script: Arc<Mutex<Script>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
    delay: Duration,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a completion that ends normally.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push_response(content);
        self
    }

    /// Queues a completion cut short by the token limit.
    pub fn with_truncated_response(self, content: impl Into<String>) -> Self {
        lock(&self.script).push_back((Ok(content.into()), FinishReason::Length));
        self
    }

    /// Queues a provider failure.
    pub fn with_error(self, error: AIError) -> Self {
        lock(&self.script).push_back((Err(error), FinishReason::Stop));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queues a completion through a shared handle.
    pub fn push_response(&self, content: impl Into<String>) {
        lock(&self.script).push_back((Ok(content.into()), FinishReason::Stop));
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Requests received so far, oldest first.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        lock(&self.calls).clone()
    }

    /// Replies still queued.
    pub fn pending(&self) -> usize {
        lock(&self.script).len()
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let prompt_tokens = request
            .last_user_message()
            .map(|m| m.split_whitespace().count() as u32)
            .unwrap_or_default();
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let (reply, finish_reason) = lock(&self.script)
            .pop_front()
            .unwrap_or_else(|| (Ok("{}".to_string()), FinishReason::Stop));
        let content = reply?;

        Ok(CompletionResponse {
            usage: TokenUsage::new(prompt_tokens, content.split_whitespace().count() as u32),
            content,
            model: MOCK_MODEL.to_string(),
            finish_reason,
        })
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", MOCK_MODEL, 200_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MessageRole, RequestMetadata};

    fn request() -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new("discover_segments", "trace-123"))
            .with_message(MessageRole::User, "Business Type: F&B")
    }

    #[tokio::test]
    async fn replies_in_order_then_empty_object() {
        let provider = MockAIProvider::new()
            .with_response(r#"{"marketSegments": ["Mahasiswa"]}"#)
            .with_error(AIError::rate_limited(30));

        let first = provider.complete(request()).await.unwrap();
        assert_eq!(first.content, r#"{"marketSegments": ["Mahasiswa"]}"#);
        assert_eq!(first.model, MOCK_MODEL);
        assert_eq!(first.finish_reason, FinishReason::Stop);

        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, AIError::RateLimited { retry_after_secs: 30 }));

        assert_eq!(provider.complete(request()).await.unwrap().content, "{}");
    }

    #[tokio::test]
    async fn records_calls_across_clones() {
        let provider = MockAIProvider::new();
        let handle = provider.clone();
        handle.push_response("late");
        assert_eq!(provider.pending(), 1);

        assert_eq!(provider.complete(request()).await.unwrap().content, "late");
        assert_eq!(handle.call_count(), 1);
        assert_eq!(handle.get_calls()[0].last_user_message(), Some("Business Type: F&B"));
    }

    #[tokio::test]
    async fn truncated_reply_reports_length() {
        let provider = MockAIProvider::new().with_truncated_response(r#"{"marketSeg"#);
        let reply = provider.complete(request()).await.unwrap();
        assert_eq!(reply.finish_reason, FinishReason::Length);
    }
}
