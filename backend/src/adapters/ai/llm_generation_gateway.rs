//! LLM Generation Gateway - `GenerationGateway` over an `AIProvider`.
//!
//! Renders the prompt for each operation, sends it to the provider, pulls
//! the first JSON object out of the completion text and validates it into
//! the typed response. Provider prose around the object (or a markdown
//! fence) is tolerated; anything that does not parse into the expected
//! shape is a `GenerationError`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};
use uuid::Uuid;

use super::prompts;
use crate::ports::{
    AIError, AIProvider, CompletionRequest, FinishReason, GenerationError, GenerationGateway,
    MessageRole,
    PositioningRequest, PositioningSuggestion, RequestMetadata, SegmentDiscovery,
    SegmentDiscoveryRequest, TargetRecommendation, TargetRecommendationRequest,
    SUGGESTED_MIN_SEGMENTS,
};

const MAX_OUTPUT_TOKENS: u32 = 1024;
const TEMPERATURE: f32 = 0.7;

/// Generation gateway backed by a text-completion provider.
pub struct LlmGenerationGateway {
    provider: Arc<dyn AIProvider>,
    deadline: Duration,
}

impl LlmGenerationGateway {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self {
            provider,
            deadline: Duration::from_secs(120),
        }
    }

    /// Overall deadline for one operation, retries included.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    async fn generate<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        prompt: String,
    ) -> Result<T, GenerationError> {
        let request = CompletionRequest::new(RequestMetadata::new(
            operation,
            Uuid::new_v4().to_string(),
        ))
        .with_system_prompt(prompts::SYSTEM_PROMPT)
        .with_message(MessageRole::User, prompt)
        .with_max_tokens(MAX_OUTPUT_TOKENS)
        .with_temperature(TEMPERATURE);

        let completion = timeout(self.deadline, self.provider.complete(request))
            .await
            .map_err(|_| GenerationError::Timeout {
                timeout_secs: self.deadline.as_secs(),
            })?
            .map_err(|err| {
                warn!(operation, error = %err, "Generation provider call failed");
                map_provider_error(err)
            })?;

        match completion.finish_reason {
            FinishReason::Stop => {}
            FinishReason::Length => {
                warn!(operation, "Generation hit the token limit, response may be cut off")
            }
            FinishReason::ContentFilter => {
                return Err(GenerationError::provider("response withheld by content filter"))
            }
        }

        parse_completion(&completion.content).map_err(|err| {
            warn!(operation, error = %err, "Generation response rejected");
            err
        })
    }
}

fn map_provider_error(err: AIError) -> GenerationError {
    match err {
        AIError::Timeout { timeout_secs } => GenerationError::Timeout {
            timeout_secs: u64::from(timeout_secs),
        },
        AIError::Parse(message) => GenerationError::malformed(message),
        other => GenerationError::provider(other.to_string()),
    }
}

/// Locates the outermost JSON object in `text`.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parses completion text into `T`.
pub fn parse_completion<T: DeserializeOwned>(text: &str) -> Result<T, GenerationError> {
    let object = extract_json_object(text)
        .ok_or_else(|| GenerationError::malformed("no JSON object in response"))?;
    serde_json::from_str(object).map_err(|e| GenerationError::malformed(e.to_string()))
}

#[async_trait]
impl GenerationGateway for LlmGenerationGateway {
    async fn discover_segments(
        &self,
        request: SegmentDiscoveryRequest,
    ) -> Result<SegmentDiscovery, GenerationError> {
        let discovery: SegmentDiscovery = self
            .generate("discover_segments", prompts::segment_discovery(&request))
            .await?;
        let discovery = discovery.validated()?;

        if discovery.market_segments.len() < SUGGESTED_MIN_SEGMENTS {
            warn!(
                count = discovery.market_segments.len(),
                "Fewer market segments than requested"
            );
        }
        info!(count = discovery.market_segments.len(), "Market segments discovered");
        Ok(discovery)
    }

    async fn recommend_targets(
        &self,
        request: TargetRecommendationRequest,
    ) -> Result<TargetRecommendation, GenerationError> {
        let recommendation: TargetRecommendation = self
            .generate("recommend_targets", prompts::target_recommendation(&request))
            .await?;

        let pair = recommendation.into_pair()?;
        Ok(TargetRecommendation {
            recommended_segments: pair.into(),
        })
    }

    async fn synthesize_positioning(
        &self,
        request: PositioningRequest,
    ) -> Result<PositioningSuggestion, GenerationError> {
        let suggestion: PositioningSuggestion = self
            .generate("synthesize_positioning", prompts::positioning(&request))
            .await?;
        suggestion.validated()
    }
}
