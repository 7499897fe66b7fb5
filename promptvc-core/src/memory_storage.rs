//! # Memory Storage
//!
//! A [`PromptStorage`] that keeps every record in process memory.
//!
//! Nothing survives the process, so it is mostly useful for tests and as a
//! reference for writing other backends.
//!
//! # Examples
//!
//! ```rust
//! use promptvc_core::manager::PromptManager;
//! use promptvc_core::memory_storage::MemoryStorage;
//! use promptvc_core::prompt::PromptCreateInput;
//!
//! let manager = PromptManager::new(MemoryStorage::default());
//! let created = manager
//!     .create_prompt(PromptCreateInput::new("greeting", "Hello!"))
//!     .unwrap();
//! assert_eq!(1, created.current_version.version);
//! ```

use crate::prompt::{Prompt, PromptVersion, PromptWithVersion};
use crate::storage::PromptStorage;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Records {
    prompts: BTreeMap<String, Prompt>,
    // prompt id -> version number -> version
    versions: BTreeMap<String, BTreeMap<u32, PromptVersion>>,
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<Records>,
}

impl MemoryStorage {
    fn records(&self) -> MutexGuard<'_, Records> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PromptStorage for MemoryStorage {
    type Error = Infallible;

    fn init(&self) -> Result<(), Infallible> {
        Ok(())
    }

    fn save_prompt(&self, prompt: &Prompt) -> Result<(), Infallible> {
        self.records()
            .prompts
            .insert(prompt.id.clone(), prompt.clone());
        Ok(())
    }

    fn save_version(&self, version: &PromptVersion) -> Result<(), Infallible> {
        self.records()
            .versions
            .entry(version.prompt_id.clone())
            .or_default()
            .insert(version.version, version.clone());
        Ok(())
    }

    fn get_prompt(&self, id: &str) -> Result<Option<PromptWithVersion>, Infallible> {
        let records = self.records();
        let Some(prompt) = records.prompts.get(id) else {
            return Ok(None);
        };
        let current = records.versions.get(id).and_then(|versions| {
            versions
                .values()
                .find(|version| version.id == prompt.current_version_id)
        });

        Ok(current.map(|version| PromptWithVersion::new(prompt.clone(), version.clone())))
    }

    fn get_version(
        &self,
        prompt_id: &str,
        version_id: &str,
    ) -> Result<Option<PromptVersion>, Infallible> {
        Ok(self.records().versions.get(prompt_id).and_then(|versions| {
            versions
                .values()
                .find(|version| version.id == version_id)
                .cloned()
        }))
    }

    fn get_all_versions(&self, prompt_id: &str) -> Result<Vec<PromptVersion>, Infallible> {
        Ok(self
            .records()
            .versions
            .get(prompt_id)
            .map(|versions| versions.values().cloned().collect())
            .unwrap_or_default())
    }

    fn list_prompts(&self) -> Result<Vec<Prompt>, Infallible> {
        Ok(self.records().prompts.values().cloned().collect())
    }
}
