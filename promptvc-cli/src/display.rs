use colored::Colorize;
use promptvc_core::prompt::{Prompt, PromptVersion, PromptWithVersion, VersionComparison};
use std::io::{self, Write};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

fn version_line(version: &PromptVersion) -> String {
    let description = version
        .change_description
        .as_ref()
        .map(|d| format!(" ({})", d))
        .unwrap_or_default();
    format!(
        "v{} - {}{}",
        version.version,
        version.created_at.format(TIME_FORMAT),
        description
    )
}

pub fn print_created(out: &mut impl Write, prompt: &PromptWithVersion) -> io::Result<()> {
    writeln!(out, "{}", "✓ Prompt created successfully".green())?;
    writeln!(out, "ID: {}", prompt.id)?;
    writeln!(out, "Name: {}", prompt.name)?;
    writeln!(out, "Version: {}", prompt.current_version.version)
}

pub fn print_updated(out: &mut impl Write, prompt: &PromptWithVersion) -> io::Result<()> {
    writeln!(out, "{}", "✓ Prompt updated successfully".green())?;
    writeln!(out, "Version: {}", prompt.current_version.version)
}

pub fn print_reverted(out: &mut impl Write, prompt: &PromptWithVersion) -> io::Result<()> {
    writeln!(out, "{}", "✓ Reverted successfully".green())?;
    writeln!(out, "New version: {}", prompt.current_version.version)
}

pub fn print_prompt(out: &mut impl Write, prompt: &PromptWithVersion) -> io::Result<()> {
    writeln!(out, "Name: {}", prompt.name)?;
    writeln!(out, "ID: {}", prompt.id)?;
    if let Some(description) = &prompt.description {
        writeln!(out, "Description: {}", description)?;
    }
    if !prompt.tags.is_empty() {
        writeln!(out, "Tags: {}", prompt.tags.join(", "))?;
    }
    writeln!(out, "Current Version: {}", prompt.current_version.version)?;
    writeln!(out, "Created: {}", prompt.created_at.format(TIME_FORMAT))?;
    writeln!(out, "Updated: {}", prompt.updated_at.format(TIME_FORMAT))?;
    writeln!(out, "\nContent:")?;
    writeln!(out, "{}", prompt.content())?;

    if let Some(versions) = &prompt.versions {
        writeln!(out, "\nVersion History:")?;
        for version in versions {
            writeln!(out, "  {}", version_line(version))?;
        }
    }
    Ok(())
}

pub fn print_prompt_list(out: &mut impl Write, prompts: &[Prompt]) -> io::Result<()> {
    if prompts.is_empty() {
        return writeln!(out, "No prompts found");
    }

    writeln!(out, "Prompts:")?;
    for prompt in prompts {
        writeln!(
            out,
            "  {} - {} (updated: {})",
            prompt.id,
            prompt.name,
            prompt.updated_at.format(TIME_FORMAT)
        )?;
    }
    Ok(())
}

pub fn print_versions(out: &mut impl Write, versions: &[PromptVersion]) -> io::Result<()> {
    if versions.is_empty() {
        return writeln!(out, "No versions found");
    }

    writeln!(out, "Versions:")?;
    for version in versions {
        writeln!(out, "  {}", version_line(version))?;
        writeln!(out, "    ID: {}", version.id)?;
    }
    Ok(())
}

pub fn print_comparison(out: &mut impl Write, comparison: &VersionComparison) -> io::Result<()> {
    writeln!(
        out,
        "Comparing v{} → v{}",
        comparison.from_version.version, comparison.to_version.version
    )?;

    let changes = &comparison.changes;
    if changes.is_empty() {
        return writeln!(out, "No differences");
    }
    if !changes.added.is_empty() {
        writeln!(out, "{}", "\nAdded:".green())?;
        for line in &changes.added {
            writeln!(out, "{}", format!("+ {}", line).green())?;
        }
    }
    if !changes.removed.is_empty() {
        writeln!(out, "{}", "\nRemoved:".red())?;
        for line in &changes.removed {
            writeln!(out, "{}", format!("- {}", line).red())?;
        }
    }
    if !changes.modified.is_empty() {
        writeln!(out, "{}", "\nModified:".yellow())?;
        for line in &changes.modified {
            writeln!(out, "{}", format!("~ {}", line).yellow())?;
        }
    }
    Ok(())
}
