use std::sync::Arc;

use crate::config::Config;
use crate::llm::LlmProvider;
use crate::services::CloneService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub clone: Arc<CloneService>,
    /// Kept for the health report; answering goes through `clone`.
    pub llm: LlmProvider,
}

impl AppState {
    pub fn new(config: Config, clone: Arc<CloneService>, llm: LlmProvider) -> Self {
        Self {
            config: Arc::new(config),
            clone,
            llm,
        }
    }
}
