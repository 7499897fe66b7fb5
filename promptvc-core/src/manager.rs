//! # Prompt Manager
//!
//! The versioning engine. [`PromptManager`] owns the prompt and version lifecycle on
//! top of any [`PromptStorage`]:
//!
//! - creating a prompt writes version 1 before the prompt that points to it
//! - updating only spends a version number when the content actually changes
//! - reverting copies an old version into a new one, history only grows
//!
//! Lookups that find nothing return `Ok(None)`. Storage errors are returned as they
//! are, without retries or rollback. Storage calls within one operation are issued
//! strictly one after another and there is no locking: the manager assumes a single
//! writer per store.

use crate::diff::compare_lines;
use crate::prompt::{
    Prompt, PromptCreateInput, PromptUpdateInput, PromptVersion, PromptWithVersion,
    VersionComparison,
};
use crate::resolver::resolve;
use crate::storage::PromptStorage;
use chrono::Utc;
use uuid::Uuid;

/// Change description given to the first version when the caller supplies none.
pub const INITIAL_VERSION_DESCRIPTION: &str = "Initial version";

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn revert_description(version: u32) -> String {
    format!("Reverted to version {}", version)
}

pub struct PromptManager<S> {
    storage: S,
}

impl<S: PromptStorage> PromptManager<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Creates a prompt and its first version.
    pub fn create_prompt(&self, input: PromptCreateInput) -> Result<PromptWithVersion, S::Error> {
        self.storage.init()?;

        let prompt_id = new_id();
        let now = Utc::now();
        let change_description = input
            .change_description
            .filter(|description| !description.is_empty())
            .unwrap_or_else(|| INITIAL_VERSION_DESCRIPTION.to_string());

        let version = PromptVersion {
            id: new_id(),
            prompt_id: prompt_id.clone(),
            version: 1,
            content: input.content,
            created_at: now,
            created_by: input.created_by,
            change_description: Some(change_description),
            metadata: input.metadata.clone(),
        };

        let prompt = Prompt {
            id: prompt_id,
            name: input.name,
            description: input.description,
            tags: input.tags.unwrap_or_default(),
            current_version_id: version.id.clone(),
            created_at: now,
            updated_at: now,
            metadata: input.metadata,
        };

        // The version goes first so the prompt never points at a missing record
        self.storage.save_version(&version)?;
        self.storage.save_prompt(&prompt)?;

        tracing::info!(prompt_id = %prompt.id, name = %prompt.name, "created prompt");
        Ok(PromptWithVersion::new(prompt, version))
    }

    /// Applies `input` to the prompt `id`.
    ///
    /// A new version is recorded only when `input.content` is set and differs from the
    /// current content. Name, description and tags are applied either way and
    /// `updated_at` is always refreshed.
    pub fn update_prompt(
        &self,
        id: &str,
        input: PromptUpdateInput,
    ) -> Result<Option<PromptWithVersion>, S::Error> {
        let Some(existing) = self.storage.get_prompt(id)? else {
            return Ok(None);
        };

        let now = Utc::now();
        let PromptWithVersion {
            mut prompt,
            mut current_version,
            ..
        } = existing;

        if let Some(content) = input.content.filter(|content| *content != current_version.content)
        {
            let version = PromptVersion {
                id: new_id(),
                prompt_id: prompt.id.clone(),
                version: self.storage.next_version_number(&prompt.id)?,
                content,
                created_at: now,
                created_by: input.created_by,
                change_description: input.change_description,
                metadata: input.metadata,
            };
            self.storage.save_version(&version)?;

            tracing::info!(prompt_id = %prompt.id, version = version.version, "recorded new version");
            prompt.current_version_id = version.id.clone();
            current_version = version;
        }

        if let Some(name) = input.name {
            prompt.name = name;
        }
        if let Some(description) = input.description {
            prompt.description = Some(description);
        }
        if let Some(tags) = input.tags {
            prompt.tags = tags;
        }
        prompt.updated_at = now;

        self.storage.save_prompt(&prompt)?;
        Ok(Some(PromptWithVersion::new(prompt, current_version)))
    }

    /// Loads a prompt with its current version, and its full history when
    /// `include_history` is set.
    pub fn get_prompt(
        &self,
        id: &str,
        include_history: bool,
    ) -> Result<Option<PromptWithVersion>, S::Error> {
        let Some(prompt) = self.storage.get_prompt(id)? else {
            return Ok(None);
        };

        if include_history {
            let versions = self.storage.get_all_versions(id)?;
            return Ok(Some(prompt.with_history(versions)));
        }
        Ok(Some(prompt))
    }

    pub fn list_prompts(&self) -> Result<Vec<Prompt>, S::Error> {
        self.storage.list_prompts()
    }

    /// Prompts carrying at least one of `tags`.
    pub fn list_prompts_by_tag(&self, tags: &[String]) -> Result<Vec<Prompt>, S::Error> {
        self.storage.get_prompts_by_tag(tags)
    }

    /// Every version of the prompt, oldest first. Empty for unknown prompts.
    pub fn get_prompt_versions(&self, id: &str) -> Result<Vec<PromptVersion>, S::Error> {
        self.storage.get_all_versions(id)
    }

    /// Compares two versions of a prompt line by line.
    ///
    /// Both references accept `v<N>` ordinals or raw version ids. Returns `None` when
    /// either one cannot be resolved or loaded.
    pub fn compare_versions(
        &self,
        prompt_id: &str,
        from_ref: &str,
        to_ref: &str,
    ) -> Result<Option<VersionComparison>, S::Error> {
        let Some(from_id) = resolve(&self.storage, prompt_id, from_ref)? else {
            return Ok(None);
        };
        let Some(to_id) = resolve(&self.storage, prompt_id, to_ref)? else {
            return Ok(None);
        };

        let Some(from_version) = self.storage.get_version(prompt_id, &from_id)? else {
            return Ok(None);
        };
        let Some(to_version) = self.storage.get_version(prompt_id, &to_id)? else {
            return Ok(None);
        };

        let changes = compare_lines(&from_version.content, &to_version.content);
        Ok(Some(VersionComparison {
            prompt_id: prompt_id.to_string(),
            from_version,
            to_version,
            changes,
        }))
    }

    /// Makes the content of an earlier version current again by recording it as a
    /// new version. The target version itself is left untouched.
    pub fn revert_to_version(
        &self,
        prompt_id: &str,
        version_ref: &str,
    ) -> Result<Option<PromptWithVersion>, S::Error> {
        let Some(version_id) = resolve(&self.storage, prompt_id, version_ref)? else {
            return Ok(None);
        };
        let Some(existing) = self.storage.get_prompt(prompt_id)? else {
            return Ok(None);
        };
        let Some(target) = self.storage.get_version(prompt_id, &version_id)? else {
            return Ok(None);
        };

        let mut prompt = existing.prompt;
        let now = Utc::now();
        let version = PromptVersion {
            id: new_id(),
            prompt_id: prompt.id.clone(),
            version: self.storage.next_version_number(&prompt.id)?,
            content: target.content,
            created_at: now,
            created_by: None,
            change_description: Some(revert_description(target.version)),
            metadata: target.metadata,
        };
        self.storage.save_version(&version)?;

        prompt.current_version_id = version.id.clone();
        prompt.updated_at = now;
        self.storage.save_prompt(&prompt)?;

        tracing::info!(
            prompt_id = %prompt.id,
            version = version.version,
            reverted_to = target.version,
            "reverted prompt"
        );
        Ok(Some(PromptWithVersion::new(prompt, version)))
    }
}
