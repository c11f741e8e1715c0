//! OpenAI-compatible chat client that drafts answers in the author's voice.

use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::{ApiError, OpenAIError},
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
    Client,
};
use backoff::{backoff::Backoff, ExponentialBackoffBuilder};
use reqwest::StatusCode;

use crate::config::{parse_llm_provider_model, LlmConfig};
use crate::error::{MimicError, Result};
use crate::llm::prompts::{answer_prompt, ANSWER_SYSTEM_PROMPT};

const FIRST_RETRY_DELAY: Duration = Duration::from_millis(100);

const RATE_LIMIT_MARKERS: &[&str] = &[
    "rate limit",
    "rate_limit",
    "too many requests",
    "insufficient_quota",
];
const AUTH_MARKERS: &[&str] = &[
    "unauthorized",
    "forbidden",
    "authentication",
    "invalid api key",
    "invalid_api_key",
];

/// Where the configured model is served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    OpenAI,
    OpenRouter,
    Ollama,
    LmStudio,
    /// Bare model name served from `LLM_BASE_URL`.
    Custom,
}

impl Endpoint {
    /// Split a `provider/model` string into its endpoint and the model name
    /// sent on the wire.
    pub fn resolve(config: &LlmConfig) -> Result<(Self, String)> {
        let (provider, model) = parse_llm_provider_model(&config.model);
        let endpoint = match provider.to_lowercase().as_str() {
            "openai" => Self::OpenAI,
            "openrouter" => Self::OpenRouter,
            "ollama" => Self::Ollama,
            "lmstudio" => Self::LmStudio,
            _ if config.base_url.is_some() => Self::Custom,
            _ => {
                return Err(MimicError::LlmUnavailable(format!(
                    "Unknown provider in model {:?}; set LLM_BASE_URL for a custom endpoint",
                    config.model
                )))
            }
        };
        Ok((endpoint, model.to_string()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::OpenRouter => "openrouter",
            Self::Ollama => "ollama",
            Self::LmStudio => "lmstudio",
            Self::Custom => "openai-compatible",
        }
    }

    fn default_base_url(&self) -> Option<&'static str> {
        match self {
            Self::OpenAI => Some("https://api.openai.com/v1"),
            Self::OpenRouter => Some("https://openrouter.ai/api/v1"),
            Self::Ollama => Some("http://localhost:11434/v1"),
            Self::LmStudio => Some("http://localhost:1234/v1"),
            Self::Custom => None,
        }
    }

    fn requires_api_key(&self) -> bool {
        matches!(self, Self::OpenAI | Self::OpenRouter)
    }
}

/// What a failed call means for the retry loop.
#[derive(Debug)]
enum Failure {
    RateLimited,
    Rejected(String),
    Transient(MimicError),
    Fatal(MimicError),
}

impl Failure {
    fn classify(error: OpenAIError) -> Self {
        match error {
            OpenAIError::Reqwest(error) => match error.status() {
                Some(StatusCode::TOO_MANY_REQUESTS) => Self::RateLimited,
                Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
                    Self::Rejected(error.to_string())
                }
                Some(status) if !status.is_server_error() => {
                    Self::Fatal(MimicError::Llm(format!("LLM request failed: {error}")))
                }
                // No status means the request never got an answer.
                _ => Self::Transient(MimicError::Llm(format!("LLM request failed: {error}"))),
            },
            OpenAIError::ApiError(error) => Self::from_api_error(error),
            OpenAIError::JSONDeserialize(error) => {
                Self::Fatal(MimicError::Llm(format!("Unreadable LLM response: {error}")))
            }
            OpenAIError::InvalidArgument(message) => Self::Fatal(MimicError::Validation(message)),
            other => Self::Fatal(MimicError::Llm(other.to_string())),
        }
    }

    /// Server errors reach us as bare messages without a type or code.
    fn from_api_error(error: ApiError) -> Self {
        let haystack = format!(
            "{} {} {}",
            error.message,
            error.r#type.as_deref().unwrap_or_default(),
            error.code.as_deref().unwrap_or_default()
        )
        .to_lowercase();

        if RATE_LIMIT_MARKERS.iter().any(|m| haystack.contains(m)) {
            Self::RateLimited
        } else if AUTH_MARKERS.iter().any(|m| haystack.contains(m)) {
            Self::Rejected(error.message)
        } else if error.r#type.is_none() && error.code.is_none() {
            Self::Transient(MimicError::Llm(format!("LLM server error: {}", error.message)))
        } else {
            Self::Fatal(MimicError::Llm(format!("LLM API error: {error}")))
        }
    }
}

/// Drafts short answers with the configured chat model.
///
/// Sampling settings are fixed at construction. Transient failures are
/// retried up to `max_retries` times with exponential delays; rate limits
/// and rejected credentials fail immediately.
#[derive(Debug, Clone)]
pub struct DraftClient {
    client: Client<OpenAIConfig>,
    endpoint: Endpoint,
    model: String,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    max_retries: u32,
}

impl DraftClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let (endpoint, model) = Endpoint::resolve(config)?;

        if endpoint.requires_api_key() && config.api_key.is_none() {
            return Err(MimicError::LlmUnavailable(format!(
                "LLM_API_KEY is required for {}",
                endpoint.name()
            )));
        }

        let base_url = config
            .base_url
            .clone()
            .or_else(|| endpoint.default_base_url().map(str::to_string))
            .ok_or_else(|| MimicError::LlmUnavailable("No LLM base URL".to_string()))?;

        let timeout = Duration::from_secs(config.timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MimicError::Llm(format!("Failed to create LLM HTTP client: {e}")))?;

        // async-openai retries server errors on its own; keep that inside
        // one request timeout so our attempts stay countable.
        let client = Client::with_config(
            OpenAIConfig::new()
                .with_api_base(base_url)
                .with_api_key(config.api_key.clone().unwrap_or_default()),
        )
        .with_http_client(http)
        .with_backoff(
            ExponentialBackoffBuilder::new()
                .with_max_elapsed_time(Some(timeout))
                .build(),
        );

        Ok(Self {
            client,
            endpoint,
            model,
            temperature: config.temperature,
            top_p: config.top_p,
            max_tokens: config.max_tokens,
            max_retries: config.max_retries,
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model for a trimmed draft answer to `question`.
    pub async fn draft(&self, question: &str, voice_example: Option<&str>) -> Result<String> {
        let request = self.request(question, voice_example)?;
        let mut delays = ExponentialBackoffBuilder::new()
            .with_initial_interval(FIRST_RETRY_DELAY)
            .with_max_elapsed_time(None)
            .build();
        let mut attempt = 0;

        loop {
            let error = match self.client.chat().create(request.clone()).await {
                Ok(response) => return first_answer(response),
                Err(error) => error,
            };

            match Failure::classify(error) {
                Failure::Transient(error) if attempt < self.max_retries => {
                    attempt += 1;
                    let delay = delays.next_backoff().unwrap_or(FIRST_RETRY_DELAY);
                    tracing::debug!(attempt, ?delay, error = %error, "Retrying draft");
                    tokio::time::sleep(delay).await;
                }
                Failure::Transient(error) | Failure::Fatal(error) => return Err(error),
                Failure::RateLimited => return Err(MimicError::LlmRateLimit { retry_after: None }),
                Failure::Rejected(detail) => {
                    return Err(MimicError::Llm(format!(
                        "LLM authentication failed: {detail}"
                    )))
                }
            }
        }
    }

    // Local OpenAI-compatible servers only read `max_tokens`.
    #[allow(deprecated)]
    fn request(
        &self,
        question: &str,
        voice_example: Option<&str>,
    ) -> Result<CreateChatCompletionRequest> {
        let invalid = |e: OpenAIError| MimicError::Validation(format!("Invalid draft request: {e}"));

        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(ANSWER_SYSTEM_PROMPT)
            .build()
            .map_err(invalid)?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(answer_prompt(question, voice_example))
            .build()
            .map_err(invalid)?;
        let messages: Vec<ChatCompletionRequestMessage> = vec![system.into(), user.into()];

        CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .messages(messages)
            .temperature(self.temperature)
            .top_p(self.top_p)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(invalid)
    }
}

fn first_answer(response: CreateChatCompletionResponse) -> Result<String> {
    let draft = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default();
    let draft = draft.trim();

    if draft.is_empty() {
        return Err(MimicError::Generation("model returned an empty draft".to_string()));
    }
    Ok(draft.to_string())
}
