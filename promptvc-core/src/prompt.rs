//! # Prompt model
//!
//! Records persisted by a [`PromptStorage`](crate::storage::PromptStorage) and the
//! read-only views and inputs the [`PromptManager`](crate::manager::PromptManager)
//! works with.
//!
//! A [`Prompt`] only points at its active content through `current_version_id`;
//! the content itself lives in immutable [`PromptVersion`] snapshots.

use crate::diff::LineChanges;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Deref;

/// Open-ended key/value data attached to prompts and versions.
///
/// Keys are kept sorted so serialized records are deterministic.
pub type Metadata = BTreeMap<String, MetadataValue>;

/// A single metadata value. Only primitive kinds and nested maps are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Map(Metadata),
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Bool(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Number(value.into())
    }
}

impl From<u64> for MetadataValue {
    fn from(value: u64) -> Self {
        MetadataValue::Number(value.into())
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::String(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::String(value)
    }
}

impl From<Metadata> for MetadataValue {
    fn from(value: Metadata) -> Self {
        MetadataValue::Map(value)
    }
}

/// A named prompt. Its content is whatever [`PromptVersion`] `current_version_id` points to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub current_version_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Prompt {
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|tag| tags.contains(tag))
    }
}

/// An immutable snapshot of a prompt's content.
///
/// `version` starts at 1 and grows by one for every snapshot of the same prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptVersion {
    pub id: String,
    pub prompt_id: String,
    pub version: u32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// A prompt together with its current version and, optionally, its full history.
///
/// Built when reading; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptWithVersion {
    #[serde(flatten)]
    pub prompt: Prompt,
    pub current_version: PromptVersion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versions: Option<Vec<PromptVersion>>,
}

impl PromptWithVersion {
    pub fn new(prompt: Prompt, current_version: PromptVersion) -> Self {
        Self {
            prompt,
            current_version,
            versions: None,
        }
    }

    /// Attaches the full history, ordered by ascending version number.
    pub fn with_history(mut self, versions: Vec<PromptVersion>) -> Self {
        self.versions = Some(versions);
        self
    }

    pub fn content(&self) -> &str {
        &self.current_version.content
    }
}

impl Deref for PromptWithVersion {
    type Target = Prompt;

    fn deref(&self) -> &Prompt {
        &self.prompt
    }
}

/// Everything needed to create a prompt and its first version.
#[derive(Debug, Clone, Default)]
pub struct PromptCreateInput {
    pub name: String,
    pub description: Option<String>,
    pub content: String,
    pub tags: Option<Vec<String>>,
    pub change_description: Option<String>,
    pub created_by: Option<String>,
    pub metadata: Option<Metadata>,
}

impl PromptCreateInput {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_change_description(mut self, change_description: impl Into<String>) -> Self {
        self.change_description = Some(change_description.into());
        self
    }

    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = Some(created_by.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// A partial update. Fields left as `None` are not touched.
///
/// `content` only produces a new version when it differs from the current one;
/// `change_description`, `created_by` and `metadata` describe that new version.
#[derive(Debug, Clone, Default)]
pub struct PromptUpdateInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub change_description: Option<String>,
    pub created_by: Option<String>,
    pub metadata: Option<Metadata>,
}

impl PromptUpdateInput {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_change_description(mut self, change_description: impl Into<String>) -> Self {
        self.change_description = Some(change_description.into());
        self
    }

    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = Some(created_by.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Result of comparing two versions of the same prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionComparison {
    pub prompt_id: String,
    pub from_version: PromptVersion,
    pub to_version: PromptVersion,
    pub changes: LineChanges,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_prompt() -> Prompt {
        let now = Utc::now();
        Prompt {
            id: "prompt-1".to_string(),
            name: "greeting".to_string(),
            description: None,
            tags: vec!["chat".to_string(), "support".to_string()],
            current_version_id: "version-1".to_string(),
            created_at: now,
            updated_at: now,
            metadata: None,
        }
    }

    fn sample_version() -> PromptVersion {
        PromptVersion {
            id: "version-1".to_string(),
            prompt_id: "prompt-1".to_string(),
            version: 1,
            content: "Hello!".to_string(),
            created_at: Utc::now(),
            created_by: None,
            change_description: Some("Initial version".to_string()),
            metadata: None,
        }
    }

    #[test]
    fn test_prompt_serializes_camel_case() {
        let json = serde_json::to_string(&sample_prompt()).unwrap();

        assert!(json.contains("\"currentVersionId\":\"version-1\""));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"updatedAt\""));
        // Absent optional fields are left out of the record
        assert!(!json.contains("description"));
        assert!(!json.contains("metadata"));
    }

    #[test]
    fn test_prompt_deserializes_without_optional_fields() {
        let json = r#"{
            "id": "abc",
            "name": "minimal",
            "currentVersionId": "v-abc",
            "createdAt": "2025-09-25T10:30:00Z",
            "updatedAt": "2025-09-25T10:30:00Z"
        }"#;

        let prompt: Prompt = serde_json::from_str(json).unwrap();
        assert_eq!("minimal", prompt.name);
        assert!(prompt.tags.is_empty());
        assert!(prompt.description.is_none());
        assert!(prompt.metadata.is_none());
    }

    #[test]
    fn test_metadata_value_kinds() {
        let json = r#"{"enabled": true, "temperature": 0.7, "retries": 3, "model": "small", "limits": {"tokens": 512}}"#;
        let metadata: Metadata = serde_json::from_str(json).unwrap();

        assert_eq!(Some(&MetadataValue::Bool(true)), metadata.get("enabled"));
        assert_eq!(Some(&MetadataValue::from(3i64)), metadata.get("retries"));
        assert_eq!(Some(&MetadataValue::from("small")), metadata.get("model"));
        match metadata.get("temperature") {
            Some(MetadataValue::Number(n)) => assert_eq!(Some(0.7), n.as_f64()),
            other => panic!("Expected number, got {:?}", other),
        }
        match metadata.get("limits") {
            Some(MetadataValue::Map(limits)) => {
                assert_eq!(Some(&MetadataValue::from(512u64)), limits.get("tokens"))
            }
            other => panic!("Expected nested map, got {:?}", other),
        }
    }

    #[test]
    fn test_metadata_serialization_is_sorted() {
        let mut metadata = Metadata::new();
        metadata.insert("zeta".to_string(), "last".into());
        metadata.insert("alpha".to_string(), "first".into());

        let json = serde_json::to_string(&metadata).unwrap();
        assert_eq!(r#"{"alpha":"first","zeta":"last"}"#, json);
    }

    #[test]
    fn test_prompt_with_version_view() {
        let view = PromptWithVersion::new(sample_prompt(), sample_version());

        assert_eq!("greeting", view.name);
        assert_eq!("Hello!", view.content());
        assert!(view.versions.is_none());

        let view = view.with_history(vec![sample_version()]);
        assert_eq!(1, view.versions.as_ref().map(Vec::len).unwrap_or_default());

        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"currentVersion\""));
        assert!(json.contains("\"name\":\"greeting\""));
    }

    #[test]
    fn test_has_any_tag() {
        let prompt = sample_prompt();

        assert!(prompt.has_any_tag(&["support".to_string()]));
        assert!(prompt.has_any_tag(&["other".to_string(), "chat".to_string()]));
        assert!(!prompt.has_any_tag(&["other".to_string()]));
        assert!(!prompt.has_any_tag(&[]));
    }

    #[test]
    fn test_update_input_builder() {
        let input = PromptUpdateInput::default()
            .with_name("renamed")
            .with_tags(vec!["a".to_string()]);

        assert_eq!(Some("renamed".to_string()), input.name);
        assert_eq!(Some(vec!["a".to_string()]), input.tags);
        assert!(input.content.is_none());
        assert!(input.description.is_none());
    }
}
