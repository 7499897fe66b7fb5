use crate::cli::Commands;
use crate::config::PromptvcConfig;
use crate::display;
use anyhow::{Context, bail};
use promptvc_core::manager::PromptManager;
use promptvc_core::prompt::{PromptCreateInput, PromptUpdateInput};
use promptvc_core::storage::PromptStorage;
use std::fs;
use std::io::Write;
use std::path::Path;

fn read_content(file: &Path) -> anyhow::Result<String> {
    fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

fn copy_to_clipboard(content: &str) -> anyhow::Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("Clipboard is not available")?;
    clipboard
        .set_text(content.to_string())
        .context("Failed to copy to clipboard")
}

/// Runs one prompt command, writing its report to `out`.
pub fn run<S: PromptStorage>(
    cmd: Commands,
    manager: &PromptManager<S>,
    config: &PromptvcConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match cmd {
        Commands::Create {
            name,
            file,
            message,
            description,
            tags,
            author,
        } => {
            let mut input = PromptCreateInput::new(name, read_content(&file)?).with_tags(tags);
            input.change_description = message;
            input.description = description;
            input.created_by = author.or_else(|| config.author.clone());

            let prompt = manager.create_prompt(input)?;
            display::print_created(out, &prompt)?;
        }
        Commands::Update {
            id,
            name,
            file,
            message,
            description,
            tags,
            author,
        } => {
            let input = PromptUpdateInput {
                name,
                description,
                content: file.as_deref().map(read_content).transpose()?,
                tags: (!tags.is_empty()).then_some(tags),
                change_description: message,
                created_by: author.or_else(|| config.author.clone()),
                metadata: None,
            };

            let Some(prompt) = manager.update_prompt(&id, input)? else {
                bail!("Prompt not found");
            };
            display::print_updated(out, &prompt)?;
        }
        Commands::Get { id, verbose, copy } => {
            let Some(prompt) = manager.get_prompt(&id, verbose)? else {
                bail!("Prompt not found");
            };
            display::print_prompt(out, &prompt)?;
            if copy {
                copy_to_clipboard(prompt.content())?;
            }
        }
        Commands::List { tags } => {
            let prompts = if tags.is_empty() {
                manager.list_prompts()?
            } else {
                manager.list_prompts_by_tag(&tags)?
            };
            display::print_prompt_list(out, &prompts)?;
        }
        Commands::Versions { id } => {
            let versions = manager.get_prompt_versions(&id)?;
            display::print_versions(out, &versions)?;
        }
        Commands::Compare { id, from, to } => {
            let Some(comparison) = manager.compare_versions(&id, &from, &to)? else {
                bail!("Could not compare versions. Check that prompt and versions exist.");
            };
            display::print_comparison(out, &comparison)?;
        }
        Commands::Revert { id, version } => {
            let Some(prompt) = manager.revert_to_version(&id, &version)? else {
                bail!("Could not revert to version. Check that prompt and version exist.");
            };
            display::print_reverted(out, &prompt)?;
        }
        Commands::Completions { .. } => bail!("Completions do not need a prompt store"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptvc_core::memory_storage::MemoryStorage;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Harness {
        manager: PromptManager<MemoryStorage>,
        config: PromptvcConfig,
        dir: TempDir,
    }

    impl Harness {
        fn new() -> Self {
            colored::control::set_override(false);
            Self {
                manager: PromptManager::new(MemoryStorage::default()),
                config: PromptvcConfig {
                    data_dir: String::new(),
                    author: Some("configured author".to_string()),
                },
                dir: TempDir::new().unwrap(),
            }
        }

        fn write_file(&self, name: &str, content: &str) -> PathBuf {
            let path = self.dir.path().join(name);
            fs::write(&path, content).unwrap();
            path
        }

        fn run(&self, cmd: Commands) -> anyhow::Result<String> {
            let mut out = Vec::new();
            run(cmd, &self.manager, &self.config, &mut out)?;
            Ok(String::from_utf8(out).unwrap())
        }

        fn create(&self, content: &str) -> String {
            let file = self.write_file("create.txt", content);
            self.run(Commands::Create {
                name: "My Prompt".to_string(),
                file,
                message: None,
                description: None,
                tags: vec![],
                author: None,
            })
            .unwrap();
            self.manager.list_prompts().unwrap()[0].id.clone()
        }

        fn update_content(&self, id: &str, content: &str) -> anyhow::Result<String> {
            let file = self.write_file("update.txt", content);
            self.run(Commands::Update {
                id: id.to_string(),
                name: None,
                file: Some(file),
                message: None,
                description: None,
                tags: vec![],
                author: None,
            })
        }
    }

    #[test]
    fn test_create_reports_first_version() {
        let harness = Harness::new();
        let file = harness.write_file("prompt.txt", "Hello!");

        let output = harness
            .run(Commands::Create {
                name: "Greeting".to_string(),
                file,
                message: Some("Imported".to_string()),
                description: None,
                tags: vec!["chat".to_string()],
                author: None,
            })
            .unwrap();

        assert!(output.contains("✓ Prompt created successfully"));
        assert!(output.contains("Name: Greeting"));
        assert!(output.contains("Version: 1"));

        let prompts = harness.manager.list_prompts().unwrap();
        let created = harness
            .manager
            .get_prompt(&prompts[0].id, false)
            .unwrap()
            .unwrap();
        assert_eq!("Hello!", created.content());
        assert_eq!(vec!["chat".to_string()], created.tags);
        assert_eq!(
            Some("Imported".to_string()),
            created.current_version.change_description
        );
        assert_eq!(
            Some("configured author".to_string()),
            created.current_version.created_by
        );
    }

    #[test]
    fn test_create_with_missing_file() {
        let harness = Harness::new();
        let result = harness.run(Commands::Create {
            name: "Greeting".to_string(),
            file: harness.dir.path().join("missing.txt"),
            message: None,
            description: None,
            tags: vec![],
            author: None,
        });

        assert!(result.unwrap_err().to_string().contains("Failed to read"));
        assert!(harness.manager.list_prompts().unwrap().is_empty());
    }

    #[test]
    fn test_update_and_versions() {
        let harness = Harness::new();
        let id = harness.create("one");

        let output = harness.update_content(&id, "two").unwrap();
        assert!(output.contains("✓ Prompt updated successfully"));
        assert!(output.contains("Version: 2"));

        // Same content keeps the version
        let output = harness.update_content(&id, "two").unwrap();
        assert!(output.contains("Version: 2"));

        let output = harness.run(Commands::Versions { id: id.clone() }).unwrap();
        assert!(output.starts_with("Versions:"));
        assert!(output.contains("v1 - "));
        assert!(output.contains("(Initial version)"));
        assert!(output.contains("v2 - "));
        assert!(!output.contains("v3 - "));
    }

    #[test]
    fn test_update_unknown_prompt() {
        let harness = Harness::new();
        let err = harness.update_content("missing", "content").unwrap_err();
        assert_eq!("Prompt not found", err.to_string());
    }

    #[test]
    fn test_get_prompt_verbose() {
        let harness = Harness::new();
        let id = harness.create("first");
        harness.update_content(&id, "second").unwrap();

        let output = harness
            .run(Commands::Get {
                id: id.clone(),
                verbose: true,
                copy: false,
            })
            .unwrap();
        assert!(output.contains(&format!("ID: {}", id)));
        assert!(output.contains("Current Version: 2"));
        assert!(output.contains("Content:\nsecond\n"));
        assert!(output.contains("Version History:"));

        let output = harness
            .run(Commands::Get {
                id,
                verbose: false,
                copy: false,
            })
            .unwrap();
        assert!(!output.contains("Version History:"));

        let err = harness
            .run(Commands::Get {
                id: "missing".to_string(),
                verbose: false,
                copy: false,
            })
            .unwrap_err();
        assert_eq!("Prompt not found", err.to_string());
    }

    #[test]
    fn test_list() {
        let harness = Harness::new();
        let output = harness.run(Commands::List { tags: vec![] }).unwrap();
        assert_eq!("No prompts found\n", output);

        let id = harness.create("content");
        let output = harness.run(Commands::List { tags: vec![] }).unwrap();
        assert!(output.contains(&format!("{} - My Prompt", id)));

        let output = harness
            .run(Commands::List {
                tags: vec!["unused".to_string()],
            })
            .unwrap();
        assert_eq!("No prompts found\n", output);
    }

    #[test]
    fn test_compare() {
        let harness = Harness::new();
        let id = harness.create("Line 1\nLine 2\nLine 3");
        harness
            .update_content(&id, "Line 1 modified\nLine 2\nLine 3\nLine 4")
            .unwrap();

        let output = harness
            .run(Commands::Compare {
                id: id.clone(),
                from: "v1".to_string(),
                to: "v2".to_string(),
            })
            .unwrap();
        assert!(output.starts_with("Comparing v1 → v2"));
        assert!(output.contains("+ Line 4: Line 4"));
        assert!(output.contains("~ Line 1: \"Line 1\" → \"Line 1 modified\""));
        assert!(!output.contains("Removed:"));

        let err = harness
            .run(Commands::Compare {
                id,
                from: "v99".to_string(),
                to: "v1".to_string(),
            })
            .unwrap_err();
        assert!(err.to_string().starts_with("Could not compare versions"));
    }

    #[test]
    fn test_revert() {
        let harness = Harness::new();
        let id = harness.create("one");
        harness.update_content(&id, "two").unwrap();
        harness.update_content(&id, "three").unwrap();

        let output = harness
            .run(Commands::Revert {
                id: id.clone(),
                version: "V1".to_string(),
            })
            .unwrap();
        assert!(output.contains("✓ Reverted successfully"));
        assert!(output.contains("New version: 4"));

        let current = harness.manager.get_prompt(&id, false).unwrap().unwrap();
        assert_eq!("one", current.content());

        let err = harness
            .run(Commands::Revert {
                id,
                version: "not-a-version".to_string(),
            })
            .unwrap_err();
        assert!(err.to_string().starts_with("Could not revert to version"));
    }
}
