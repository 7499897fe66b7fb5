use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version,
display_name = "promptvc",
bin_name = "promptvc",
about = "Version control for prompts",
long_about = "Version control for prompts.\n\nEvery content change is kept as a numbered version. \
Versions can be referenced as v1, v2, v3... or by their id.",
after_help = "Examples:\n  \
promptvc create -n \"My Prompt\" -f prompt.txt\n  \
promptvc update <id> -f updated-prompt.txt\n  \
promptvc compare <id> v1 v3\n  \
promptvc revert <id> v1")]
pub struct Args {
    /// Directory holding prompts and versions, overrides the configuration
    #[arg(short = 'p', long, global = true)]
    pub storage_path: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Create a new prompt
    Create {
        #[arg(short = 'n', long)]
        name: String,
        /// File containing the prompt content
        #[arg(short = 'f', long)]
        file: PathBuf,
        /// Description of this first version
        #[arg(short = 'm', long)]
        message: Option<String>,
        #[arg(short = 'd', long)]
        description: Option<String>,
        #[arg(short = 't', long = "tag")]
        tags: Vec<String>,
        #[arg(short = 'a', long)]
        author: Option<String>,
    },
    /// Update an existing prompt (creates a new version when the content changes)
    Update {
        id: String,
        #[arg(short = 'n', long)]
        name: Option<String>,
        /// File containing the new prompt content
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,
        /// Description of the change
        #[arg(short = 'm', long)]
        message: Option<String>,
        #[arg(short = 'd', long)]
        description: Option<String>,
        /// Replaces all tags of the prompt
        #[arg(short = 't', long = "tag")]
        tags: Vec<String>,
        #[arg(short = 'a', long)]
        author: Option<String>,
    },
    /// Get a prompt by id
    Get {
        id: String,
        /// Also show the version history
        #[arg(short = 'v', long)]
        verbose: bool,
        /// Copy the current content to the clipboard
        #[arg(short = 'c', long)]
        copy: bool,
    },
    /// List all prompts
    List {
        /// Only prompts with any of these tags
        #[arg(short = 't', long = "tag")]
        tags: Vec<String>,
    },
    /// List all versions of a prompt
    Versions { id: String },
    /// Compare two versions of a prompt
    Compare {
        id: String,
        /// v1, v2, v3... or a version id
        from: String,
        /// v1, v2, v3... or a version id
        to: String,
    },
    /// Revert to a specific version
    Revert {
        id: String,
        /// v1, v2, v3... or a version id
        version: String,
    },
    /// Print a shell completion script
    Completions { shell: Shell },
}
