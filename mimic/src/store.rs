//! JSON persistence for the trained profile.

use std::path::{Path, PathBuf};

use crate::error::{MimicError, Result};
use crate::models::PersonalityProfile;

/// Reads and writes a [`PersonalityProfile`] as a single JSON document.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    /// Write `profile` atomically: the JSON goes to a sibling temp file that
    /// is renamed over the target.
    pub async fn save(&self, profile: &PersonalityProfile) -> Result<()> {
        let json = serde_json::to_string_pretty(profile)
            .map_err(|e| MimicError::Persistence(format!("Failed to serialize profile: {e}")))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                MimicError::Persistence(format!(
                    "Failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await.map_err(|e| {
            MimicError::Persistence(format!("Failed to write {}: {e}", tmp.display()))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            MimicError::Persistence(format!("Failed to replace {}: {e}", self.path.display()))
        })?;

        tracing::info!(path = %self.path.display(), "Profile saved");
        Ok(())
    }

    /// Read and validate a stored profile.
    pub async fn load(&self) -> Result<PersonalityProfile> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            MimicError::Persistence(format!("Failed to read {}: {e}", self.path.display()))
        })?;
        Self::decode(&raw)
    }

    /// Parse a profile record, rejecting missing fields and impossible values.
    pub fn decode(raw: &str) -> Result<PersonalityProfile> {
        let profile: PersonalityProfile = serde_json::from_str(raw)
            .map_err(|e| MimicError::Persistence(format!("Malformed profile record: {e}")))?;
        profile
            .validate()
            .map_err(|e| MimicError::Persistence(format!("Invalid profile record: {e}")))?;
        Ok(profile)
    }
}
