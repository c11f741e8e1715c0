//! Builds a writing-style personality profile from a corpus of social-media
//! posts and answers questions in the author's voice.
//!
//! Training runs the corpus through [`processing`] (cleaning, tokens,
//! sentiment), [`analysis`] (aggregate statistics, style, personality vector)
//! and [`search`] (the TF-IDF index used to find the post nearest a
//! question). [`services::CloneService`] ties these together with a
//! [`llm::TextGenerator`] and the [`store::ProfileStore`].

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod processing;
pub mod search;
pub mod services;
pub mod store;
