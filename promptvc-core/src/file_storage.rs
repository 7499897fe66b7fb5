//! # File Storage
//!
//! This module provides functionality for storing and retrieving prompts and their
//! versions from the local filesystem.
//!
//! Records are stored as pretty-printed JSON files below a base directory:
//!
//! ```text
//! <base_path>/prompts/<prompt-id>.json
//! <base_path>/versions/<prompt-id>/v<number>.json
//! ```
//!
//! The main component of this module is the [`FileStorage`] struct, which implements the
//! [`PromptStorage`] trait to provide persistent storage capabilities for prompts.
//!
//! # Examples
//!
//! ```rust
//! use promptvc_core::file_storage::FileStorage;
//! use promptvc_core::manager::PromptManager;
//! use promptvc_core::prompt::PromptCreateInput;
//! use tempfile::TempDir;
//!
//! // Create a temporary directory for our tests
//! let temp_dir = TempDir::new().unwrap();
//!
//! let manager = PromptManager::new(FileStorage::new(temp_dir.path()));
//! let created = manager
//!     .create_prompt(PromptCreateInput::new("greeting", "Hello, world!"))
//!     .expect("Failed to create prompt");
//!
//! assert!(temp_dir.path().join("prompts").join(format!("{}.json", created.id)).exists());
//! ```

use crate::prompt::{Prompt, PromptVersion, PromptWithVersion};
use crate::storage::PromptStorage;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::create_dir_all;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::{fs, io};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

const PROMPTS_DIR: &str = "prompts";
const VERSIONS_DIR: &str = "versions";

#[derive(Debug, thiserror::Error)]
pub enum FileStorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid base path: {0}")]
    InvalidBasePath(String),
    #[error("Invalid record id: {0:?}")]
    InvalidRecordId(String),
    #[error("Version {version} of prompt {prompt_id} already exists")]
    VersionExists { prompt_id: String, version: u32 },
    #[error("Failed to persist record: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// A local file storage for prompts and their versions.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// The base directory where records are stored.
    pub base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn ensure_base_directory_exists(&self) -> Result<(), FileStorageError> {
        if !self.base_path.exists() {
            create_dir_all(&self.base_path)?;
        } else if !self.base_path.is_dir() {
            return Err(FileStorageError::InvalidBasePath(
                self.base_path.display().to_string(),
            ));
        }
        Ok(())
    }

    fn prompts_dir(&self) -> PathBuf {
        self.base_path.join(PROMPTS_DIR)
    }

    fn prompt_versions_dir(&self, prompt_id: &str) -> PathBuf {
        self.base_path.join(VERSIONS_DIR).join(prompt_id)
    }

    /// Serializes `record` and moves it into place, so readers never observe a
    /// partially written file.
    fn write_record<T: Serialize>(
        &self,
        dir: &Path,
        file_name: &str,
        record: &T,
        overwrite: bool,
    ) -> Result<PathBuf, FileStorageError> {
        create_dir_all(dir)?;
        let path = dir.join(file_name);
        let serialized_data = serde_json::to_string_pretty(record)?;

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(serialized_data.as_bytes())?;
        file.as_file().sync_data()?;
        if overwrite {
            file.persist(&path)?;
        } else {
            file.persist_noclobber(&path)?;
        }

        tracing::debug!(path = %path.display(), "wrote record");
        Ok(path)
    }

    /// Reads and parses one record. Every read in this module goes through here.
    fn read_record<T: DeserializeOwned>(path: &Path) -> Result<T, FileStorageError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Reads a record, treating a missing, unreadable or malformed file as absent.
    fn lookup<T: DeserializeOwned>(path: &Path) -> Option<T> {
        match Self::read_record(path) {
            Ok(record) => Some(record),
            Err(FileStorageError::Io(err)) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable record");
                None
            }
        }
    }

    fn get_json_files(dir: &Path) -> Vec<walkdir::DirEntry> {
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.file_type().is_file() && e.path().extension().is_some_and(|ext| ext == "json")
            })
            .collect()
    }

    fn read_versions(&self, prompt_id: &str) -> Vec<PromptVersion> {
        Self::get_json_files(&self.prompt_versions_dir(prompt_id))
            .iter()
            .filter_map(|entry| Self::lookup::<PromptVersion>(entry.path()))
            .collect()
    }
}

/// Ids become file and directory names, so anything that could leave the storage
/// directory is rejected.
fn is_valid_record_id(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\', '\0'])
}

impl PromptStorage for FileStorage {
    type Error = FileStorageError;

    /// Creates the base, `prompts` and `versions` directories if they are missing.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If every directory exists afterwards.
    /// * `FileStorageError::InvalidBasePath` - If `base_path` exists but is not a directory.
    fn init(&self) -> Result<(), FileStorageError> {
        self.ensure_base_directory_exists()?;
        create_dir_all(self.prompts_dir())?;
        create_dir_all(self.base_path.join(VERSIONS_DIR))?;
        Ok(())
    }

    /// Saves a prompt record, overwriting any previous record with the same id.
    fn save_prompt(&self, prompt: &Prompt) -> Result<(), FileStorageError> {
        if !is_valid_record_id(&prompt.id) {
            return Err(FileStorageError::InvalidRecordId(prompt.id.clone()));
        }
        self.ensure_base_directory_exists()?;
        self.write_record(
            &self.prompts_dir(),
            &format!("{}.json", prompt.id),
            prompt,
            true,
        )?;
        Ok(())
    }

    /// Saves a version record as `v<number>.json` in its prompt's version directory.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the version is saved.
    /// * `FileStorageError::VersionExists` - If that version number is already recorded;
    ///   stored versions are never replaced.
    fn save_version(&self, version: &PromptVersion) -> Result<(), FileStorageError> {
        if !is_valid_record_id(&version.prompt_id) {
            return Err(FileStorageError::InvalidRecordId(version.prompt_id.clone()));
        }
        self.ensure_base_directory_exists()?;

        let result = self.write_record(
            &self.prompt_versions_dir(&version.prompt_id),
            &format!("v{}.json", version.version),
            version,
            false,
        );
        match result {
            Err(FileStorageError::Persist(err)) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                Err(FileStorageError::VersionExists {
                    prompt_id: version.prompt_id.clone(),
                    version: version.version,
                })
            }
            other => other.map(|_| ()),
        }
    }

    /// Gets a prompt and its current version.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(PromptWithVersion))` - If both records could be read.
    /// * `Ok(None)` - If the prompt is missing or unreadable, or its current version cannot be found.
    fn get_prompt(&self, id: &str) -> Result<Option<PromptWithVersion>, FileStorageError> {
        if !is_valid_record_id(id) {
            return Ok(None);
        }

        let Some(prompt) = Self::lookup::<Prompt>(&self.prompts_dir().join(format!("{}.json", id)))
        else {
            return Ok(None);
        };

        let current = self.get_version(&prompt.id, &prompt.current_version_id)?;
        if current.is_none() {
            tracing::warn!(
                prompt_id = %prompt.id,
                version_id = %prompt.current_version_id,
                "current version of prompt is missing"
            );
        }
        Ok(current.map(|version| PromptWithVersion::new(prompt, version)))
    }

    /// Finds a version by id by scanning the prompt's version directory.
    fn get_version(
        &self,
        prompt_id: &str,
        version_id: &str,
    ) -> Result<Option<PromptVersion>, FileStorageError> {
        if !is_valid_record_id(prompt_id) {
            return Ok(None);
        }

        Ok(self
            .read_versions(prompt_id)
            .into_iter()
            .find(|version| version.id == version_id))
    }

    fn get_all_versions(&self, prompt_id: &str) -> Result<Vec<PromptVersion>, FileStorageError> {
        if !is_valid_record_id(prompt_id) {
            return Ok(Vec::new());
        }

        let mut versions = self.read_versions(prompt_id);
        versions.sort_by_key(|version| version.version);
        Ok(versions)
    }

    /// Gets all prompts stored in the `prompts` directory. Unreadable records are skipped.
    fn list_prompts(&self) -> Result<Vec<Prompt>, FileStorageError> {
        Ok(Self::get_json_files(&self.prompts_dir())
            .iter()
            .filter_map(|entry| Self::lookup::<Prompt>(entry.path()))
            .collect())
    }
}
