use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_env_opt<T: std::str::FromStr>(var: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Ignoring.", val, var, e);
                None
            }
        },
        Err(_) => None,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub profile: ProfileConfig,
    pub llm: Option<LlmConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_keys: Vec<String>,
    /// Upper bound for request bodies; larger training corpora get a 413.
    pub max_body_bytes: usize,
}

pub const DEFAULT_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Where the trained profile lives and how answers are personalized.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileConfig {
    pub store_path: String,
    /// 0 keeps every answer for the life of the profile.
    pub response_cache_size: usize,
    /// Fixed seed for the personalization RNG; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub generation_timeout_secs: u64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            store_path: "clones/clone_data.json".to_string(),
            response_cache_size: 0,
            seed: None,
            generation_timeout_secs: 30,
        }
    }
}

/// LLM configuration for the answer-drafting model
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("MIMIC_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("MIMIC_PORT", 3000),
                api_keys: env::var("MIMIC_API_KEYS")
                    .map(|keys| {
                        keys.split(',')
                            .map(|s| s.trim().to_string())
                            .filter(|s| !s.is_empty())
                            .collect()
                    })
                    .unwrap_or_default(),
                max_body_bytes: parse_env_or("MIMIC_MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES),
            },
            profile: ProfileConfig {
                store_path: env::var("PROFILE_STORE_PATH")
                    .unwrap_or_else(|_| "clones/clone_data.json".to_string()),
                response_cache_size: parse_env_or("RESPONSE_CACHE_SIZE", 0),
                seed: parse_env_opt("PERSONALIZATION_SEED"),
                generation_timeout_secs: parse_env_or("GENERATION_TIMEOUT_SECS", 30),
            },
            llm: env::var("LLM_MODEL").ok().map(|model| LlmConfig {
                model,
                api_key: env::var("LLM_API_KEY").ok(),
                base_url: env::var("LLM_BASE_URL").ok(),
                timeout_secs: parse_env_or("LLM_TIMEOUT", 30),
                max_retries: parse_env_or("LLM_MAX_RETRIES", 3),
                max_tokens: parse_env_or("LLM_MAX_TOKENS", 150),
                temperature: parse_env_or("LLM_TEMPERATURE", 0.7),
                top_p: parse_env_or("LLM_TOP_P", 0.95),
            }),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Known LLM providers that use OpenAI-compatible APIs
pub const KNOWN_LLM_PROVIDERS: &[&str] = &["openai", "openrouter", "ollama", "lmstudio"];

/// Parse an LLM model name into (provider, model) tuple.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Default to treating the whole string as a local model
    ("local", model)
}
