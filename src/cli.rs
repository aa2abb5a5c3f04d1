use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use related_notes::config::SettingKey;

#[derive(Debug, Parser)]
#[command(
    name = "related-notes",
    about = "Find possible links between your notes"
)]
pub struct Cli {
    /// Override the XDG data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show possible links for a note and browse them interactively
    Links(LinksArgs),
    /// Print the keywords extracted from a note
    Keywords(KeywordsArgs),
    /// Manage stored settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Start MCP server for AI agent integration
    Mcp(McpArgs),
    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsArgs),
}

// -- Links --

#[derive(Debug, Parser)]
pub struct LinksArgs {
    /// Note to scan, relative to the vault (omit for no active note)
    pub note: Option<PathBuf>,

    /// Vault directory (defaults to the stored vault, then the current directory)
    #[arg(long)]
    pub vault: Option<PathBuf>,

    /// Only scan this text instead of the whole note
    #[arg(short = 's', long)]
    pub selection: Option<String>,

    /// Print matches as JSON instead of browsing them
    #[arg(long)]
    pub json: bool,

    /// Do not append a link when a note is chosen
    #[arg(long)]
    pub no_append: bool,
}

// -- Keywords --

#[derive(Debug, Parser)]
pub struct KeywordsArgs {
    /// Note to scan, relative to the vault
    pub note: Option<PathBuf>,

    /// Vault directory
    #[arg(long)]
    pub vault: Option<PathBuf>,

    /// Only scan this text instead of the whole note
    #[arg(short = 's', long)]
    pub selection: Option<String>,
}

// -- Config subcommands --

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show the effective settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change a setting
    Set {
        /// Setting to change
        #[arg(value_enum)]
        key: SettingKey,
        /// New value
        value: String,
    },
    /// Restore every setting to its default
    Reset,
}

// -- MCP --

#[derive(Debug, Parser)]
pub struct McpArgs {
    /// Vault directory
    #[arg(long)]
    pub vault: Option<PathBuf>,
}

// -- Completions --

#[derive(Debug, Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsArgs {
    /// Generate shell completions and print to stdout.
    pub fn generate(&self) {
        let mut cmd = Cli::command();
        clap_complete::generate(
            self.shell,
            &mut cmd,
            "related-notes",
            &mut std::io::stdout(),
        );
    }
}
