//! # Prompt Storage
//!
//! This module defines the persistence contract the [`PromptManager`](crate::manager::PromptManager)
//! depends on.
//!
//! Implementations store two kinds of records:
//! - [`Prompt`] records, keyed by prompt id and overwritten on save
//! - [`PromptVersion`] records, appended per prompt and never rewritten
//!
//! Missing records are reported as `Ok(None)` or an empty list. `Err` is reserved
//! for infrastructure failures.

use crate::prompt::{Prompt, PromptVersion, PromptWithVersion};

pub trait PromptStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Prepares whatever the backend needs. Safe to call repeatedly.
    fn init(&self) -> Result<(), Self::Error>;

    /// Inserts or overwrites a prompt by id.
    fn save_prompt(&self, prompt: &Prompt) -> Result<(), Self::Error>;

    /// Stores a new version. Never called for a version that was already stored.
    fn save_version(&self, version: &PromptVersion) -> Result<(), Self::Error>;

    /// Loads a prompt together with its current version.
    fn get_prompt(&self, id: &str) -> Result<Option<PromptWithVersion>, Self::Error>;

    fn get_version(
        &self,
        prompt_id: &str,
        version_id: &str,
    ) -> Result<Option<PromptVersion>, Self::Error>;

    /// All versions of a prompt, ascending by version number.
    fn get_all_versions(&self, prompt_id: &str) -> Result<Vec<PromptVersion>, Self::Error>;

    fn list_prompts(&self) -> Result<Vec<Prompt>, Self::Error>;

    /// The number the next version of `prompt_id` must get: one past the highest
    /// stored number, or 1 for a prompt without versions.
    fn next_version_number(&self, prompt_id: &str) -> Result<u32, Self::Error> {
        let versions = self.get_all_versions(prompt_id)?;
        Ok(versions
            .iter()
            .map(|version| version.version)
            .max()
            .map_or(1, |max| max + 1))
    }

    /// Prompts carrying at least one of `tags`.
    fn get_prompts_by_tag(&self, tags: &[String]) -> Result<Vec<Prompt>, Self::Error> {
        Ok(self
            .list_prompts()?
            .into_iter()
            .filter(|prompt| prompt.has_any_tag(tags))
            .collect())
    }
}
