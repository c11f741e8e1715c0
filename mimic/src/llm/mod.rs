mod client;
pub mod prompts;
mod provider;

pub use client::{DraftClient, Endpoint};
pub use provider::{LlmProvider, TextGenerator};
