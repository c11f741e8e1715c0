use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::analysis::build_profile;
use crate::config::ProfileConfig;
use crate::error::{MimicError, Result};
use crate::llm::TextGenerator;
use crate::models::{AggregateAnalysis, Corpus, PersonalityProfile, RawPost};
use crate::processing::TextNormalizer;
use crate::search::{ResponseCache, SimilarityIndex};
use crate::services::composer::ResponseComposer;
use crate::store::ProfileStore;

/// Answer given before any usable profile exists.
pub const INSUFFICIENT_DATA_RESPONSE: &str = "Henüz yeterli veri toplanmadı.";
/// Answer given when the draft could not be generated.
pub const APOLOGY_RESPONSE: &str = "Üzgünüm, şu anda yanıt oluşturamıyorum.";

/// Everything one training run produces.
///
/// Answers are memoized per state: a retrain installs a fresh state with an
/// empty cache, and an `ask` still holding the old state can only write into
/// the old cache.
#[derive(Clone)]
pub struct TrainedState {
    pub profile: PersonalityProfile,
    /// `None` for profiles restored from the store.
    pub analysis: Option<AggregateAnalysis>,
    pub corpus: Corpus,
    pub index: SimilarityIndex,
    pub cache: ResponseCache,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub posts: usize,
    pub indexed_posts: usize,
    pub vocabulary_size: usize,
    pub analysis: AggregateAnalysis,
    pub trained_at: DateTime<Utc>,
}

/// Owns the trained profile and answers questions with it.
pub struct CloneService {
    normalizer: TextNormalizer,
    generator: Arc<dyn TextGenerator>,
    store: Option<ProfileStore>,
    state: RwLock<Option<Arc<TrainedState>>>,
    cache_capacity: usize,
    rng: Mutex<StdRng>,
    generation_timeout: Duration,
}

impl CloneService {
    pub fn new(
        normalizer: TextNormalizer,
        generator: Arc<dyn TextGenerator>,
        store: Option<ProfileStore>,
        config: &ProfileConfig,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            normalizer,
            generator,
            store,
            state: RwLock::new(None),
            cache_capacity: config.response_cache_size,
            rng: Mutex::new(rng),
            generation_timeout: Duration::from_secs(config.generation_timeout_secs),
        }
    }

    pub fn is_trained(&self) -> bool {
        self.trained_state().is_some()
    }

    /// Current profile, if one has been trained or loaded.
    pub fn profile(&self) -> Option<PersonalityProfile> {
        self.trained_state().map(|state| state.profile.clone())
    }

    /// Answers memoized for the current profile.
    pub fn cached_responses(&self) -> usize {
        self.trained_state().map_or(0, |state| state.cache.len())
    }

    /// Replace the profile with one trained on `posts` and persist it.
    ///
    /// An empty corpus is not an error: the profile is all zeros and every
    /// question gets the insufficient-data answer. A failed save is reported,
    /// but the freshly trained profile stays in memory.
    pub async fn train(&self, posts: &[RawPost]) -> Result<TrainingReport> {
        info!(posts = posts.len(), "Training profile");

        let corpus = self.normalizer.normalize_corpus(posts);
        let trained = build_profile(&corpus);

        let texts: Vec<&str> = corpus.iter().map(|p| p.cleaned_text.as_str()).collect();
        let index = match SimilarityIndex::build(&texts) {
            Ok(index) => index,
            Err(MimicError::EmptyCorpus(reason)) => {
                warn!(%reason, "Training without a similarity index");
                SimilarityIndex::empty()
            }
            Err(e) => return Err(e),
        };

        let report = TrainingReport {
            posts: corpus.len(),
            indexed_posts: index.len(),
            vocabulary_size: index.vocabulary_size(),
            analysis: trained.analysis.clone(),
            trained_at: Utc::now(),
        };

        let profile = trained.profile.clone();
        self.install(TrainedState {
            profile: trained.profile,
            analysis: Some(trained.analysis),
            corpus,
            index,
            cache: ResponseCache::new(self.cache_capacity),
        });

        info!(
            posts = report.posts,
            indexed = report.indexed_posts,
            vocabulary = report.vocabulary_size,
            "Profile trained"
        );

        if let Some(store) = &self.store {
            if let Err(e) = store.save(&profile).await {
                error!(error = %e, "Failed to persist trained profile");
                return Err(e);
            }
        }

        Ok(report)
    }

    /// Restore the persisted profile. On failure nothing changes.
    pub async fn load(&self) -> Result<()> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| MimicError::Persistence("No profile store configured".to_string()))?;

        let profile = store.load().await.inspect_err(|e| {
            error!(error = %e, path = %store.path().display(), "Failed to load profile");
        })?;

        self.install(TrainedState {
            profile,
            analysis: None,
            corpus: Corpus::default(),
            index: SimilarityIndex::empty(),
            cache: ResponseCache::new(self.cache_capacity),
        });
        info!(path = %store.path().display(), "Profile loaded");
        Ok(())
    }

    /// Answer `question` in the author's voice. Never fails: missing data and
    /// generation failures resolve to fixed fallback strings.
    pub async fn ask(&self, question: &str) -> String {
        let Some(state) = self.trained_state().filter(|s| s.profile.has_data()) else {
            debug!("Ask before a usable profile exists");
            return INSUFFICIENT_DATA_RESPONSE.to_string();
        };

        let key = ResponseCache::canonical_key(question);
        if let Some(cached) = state.cache.get(&key) {
            debug!(key = %key, "Response cache hit");
            return cached;
        }
        debug!(key = %key, "Response cache miss");

        let nearest = state
            .index
            .nearest(question)
            .and_then(|found| state.corpus.get(found.index));

        let voice_example = nearest.map(|post| post.original_text.as_str());
        let draft = match self.draft(question, voice_example).await {
            Ok(draft) => draft,
            Err(e) if e.is_generation_failure() => {
                warn!(error = %e, "Draft generation failed");
                return APOLOGY_RESPONSE.to_string();
            }
            Err(e) => {
                error!(error = %e, "Unexpected failure while drafting");
                return APOLOGY_RESPONSE.to_string();
            }
        };

        let response = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            ResponseComposer::new(&state.profile).compose(
                &draft,
                nearest.map(|post| &post.sentiment),
                &mut *rng,
            )
        };

        state.cache.insert_if_absent(key, response)
    }

    async fn draft(&self, question: &str, voice_example: Option<&str>) -> Result<String> {
        tokio::time::timeout(
            self.generation_timeout,
            self.generator.generate(question, voice_example),
        )
        .await
        .map_err(|_| {
            MimicError::Generation(format!(
                "no draft within {}s",
                self.generation_timeout.as_secs()
            ))
        })?
    }

    fn install(&self, state: TrainedState) {
        let mut slot = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::new(state));
    }

    /// The installed state, shared with in-flight `ask` calls.
    pub fn trained_state(&self) -> Option<Arc<TrainedState>> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
