use std::sync::Arc;

use async_trait::async_trait;

use crate::config::LlmConfig;
use crate::error::{MimicError, Result};
use crate::llm::client::{DraftClient, Endpoint};

/// Produces a draft answer for a question.
///
/// `voice_example` is the corpus post closest to the question, when one
/// exists; implementations may use it to steer tone.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, question: &str, voice_example: Option<&str>) -> Result<String>;
}

/// The drafting model, or the reason there is none.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    Ready(Arc<DraftClient>),
    Unavailable { reason: String },
}

impl LlmProvider {
    /// Build the client once; a bad configuration turns into `Unavailable`
    /// so the service still starts and answers with its fallback.
    pub fn new(config: Option<&LlmConfig>) -> Self {
        let Some(config) = config else {
            return Self::Unavailable {
                reason: "LLM_MODEL is not set".to_string(),
            };
        };

        match DraftClient::new(config) {
            Ok(client) => Self::Ready(Arc::new(client)),
            Err(e) => Self::Unavailable {
                reason: e.to_string(),
            },
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn endpoint(&self) -> Option<&Endpoint> {
        match self {
            Self::Ready(client) => Some(client.endpoint()),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn model(&self) -> Option<&str> {
        match self {
            Self::Ready(client) => Some(client.model()),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Unavailable { reason } => Some(reason),
        }
    }
}

#[async_trait]
impl TextGenerator for LlmProvider {
    async fn generate(&self, question: &str, voice_example: Option<&str>) -> Result<String> {
        match self {
            Self::Ready(client) => client.draft(question, voice_example).await,
            Self::Unavailable { reason } => Err(MimicError::LlmUnavailable(reason.clone())),
        }
    }
}
