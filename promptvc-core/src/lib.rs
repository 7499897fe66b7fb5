//! # promptvc Core
//!
//! This crate provides the core functionality for promptvc, a local version-control
//! tool for text prompts.
//!
//! Every content change of a prompt is recorded as an immutable, numbered version.
//! Versions can be listed, compared line by line and reverted to, and history only
//! ever grows.
//!
//! # Modules
//!
//! - [`diff`] - Positional line comparison between two versions
//! - [`file_storage`] - File-based storage implementation
//! - [`manager`] - The versioning engine
//! - [`memory_storage`] - In-memory storage implementation
//! - [`parser`] - Parsing of `v<N>` version references
//! - [`prompt`] - Prompt and version records
//! - [`resolver`] - Resolution of version references to version ids
//! - [`storage`] - The storage trait every backend implements
//!
//! # Examples
//!
//! ```rust
//! use promptvc_core::file_storage::FileStorage;
//! use promptvc_core::manager::PromptManager;
//! use promptvc_core::prompt::{PromptCreateInput, PromptUpdateInput};
//! use tempfile::TempDir;
//!
//! let temp_dir = TempDir::new().unwrap();
//! let manager = PromptManager::new(FileStorage::new(temp_dir.path()));
//!
//! let prompt = manager
//!     .create_prompt(PromptCreateInput::new("greeting", "Hello, world!"))
//!     .expect("Failed to create prompt");
//! manager
//!     .update_prompt(&prompt.id, PromptUpdateInput::default().with_content("Hello there!"))
//!     .expect("Failed to update prompt");
//!
//! let comparison = manager
//!     .compare_versions(&prompt.id, "v1", "v2")
//!     .expect("Failed to read versions")
//!     .expect("Both versions exist");
//! assert_eq!(1, comparison.changes.modified.len());
//! ```

pub mod diff;
pub mod file_storage;
pub mod manager;
pub mod memory_storage;
pub mod parser;
pub mod prompt;
pub mod resolver;
pub mod storage;
