// Shared fixtures for integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use async_trait::async_trait;
use tokio::sync::Notify;

use mimic::config::ProfileConfig;
use mimic::error::{MimicError, Result};
use mimic::llm::TextGenerator;
use mimic::models::RawPost;
use mimic::processing::{LexiconSentiment, TextNormalizer};
use mimic::services::CloneService;
use mimic::store::ProfileStore;

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Echoes the question back and counts calls.
#[derive(Default)]
pub struct StubGenerator {
    calls: AtomicUsize,
}

impl StubGenerator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, question: &str, voice_example: Option<&str>) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(match voice_example {
            Some(example) => format!("{} [{}]", question.trim(), example),
            None => question.trim().to_string(),
        })
    }
}

/// Always fails the way an unreachable model does.
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _question: &str, _voice_example: Option<&str>) -> Result<String> {
        Err(MimicError::Llm("connection refused".to_string()))
    }
}

/// Drafts `draft[<voice example>]`. The first call parks inside `generate`
/// until [`release`](Self::release) is called.
#[derive(Default)]
pub struct GatedGenerator {
    first_call_done: AtomicBool,
    entered: Notify,
    gate: Notify,
}

impl GatedGenerator {
    /// Resolves once the first call is parked.
    pub async fn wait_until_parked(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl TextGenerator for GatedGenerator {
    async fn generate(&self, _question: &str, voice_example: Option<&str>) -> Result<String> {
        if !self.first_call_done.swap(true, Ordering::SeqCst) {
            self.entered.notify_one();
            self.gate.notified().await;
        }
        Ok(format!("draft[{}]", voice_example.unwrap_or_default()))
    }
}

pub fn profile_config(seed: u64) -> ProfileConfig {
    ProfileConfig {
        seed: Some(seed),
        generation_timeout_secs: 5,
        ..Default::default()
    }
}

pub fn service(generator: Arc<dyn TextGenerator>, store: Option<ProfileStore>) -> CloneService {
    init_test_logger();
    CloneService::new(
        TextNormalizer::new(Arc::new(LexiconSentiment::new())),
        generator,
        store,
        &profile_config(7),
    )
}

pub fn posts(texts: &[&str]) -> Vec<RawPost> {
    texts.iter().map(|text| RawPost::new(*text)).collect()
}

/// A small mixed-language corpus with hashtags, mentions, emoji and URLs.
pub fn sample_corpus() -> Vec<RawPost> {
    posts(&[
        "Sabah kahvesi olmadan güne başlayamam! ☕ #kahve",
        "Bugün deniz kenarında kitap okudum, harika bir gün 😊 #deniz #kitap",
        "Trafik yine berbat... neden hep böyle? @belediye",
        "I love sunny days at the beach! #summer",
        "Yeni kitap önerisi olan var mı? https://example.com/liste #kitap",
        "Kahve ve kitap, mükemmel ikili. #kahve #kitap 😊",
        "I hate waiting in long lines @airport",
    ])
}
