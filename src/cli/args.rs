//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Replace string literals with localization keys and write the catalog
//! - `revert`: Restore rewritten files from their `.bak` backups
//! - `clean`: Delete `.bak` backups once the rewrite is accepted
//! - `init`: Initialize ksploc configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.args.common.verbose,
            Some(Command::Revert(cmd)) | Some(Command::Clean(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all project commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Mod project root directory
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Config file to use instead of searching for .ksplocrc.json
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Key prefix, usually the mod name (overrides config file)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Generate numbered keys (<prefix>_1, <prefix>_2, ...) instead of text-derived keys
    #[arg(long)]
    pub numeric_tags: bool,

    /// Maximum length of the text-derived part of a key (overrides config file)
    #[arg(long)]
    pub max_key_length: Option<usize>,

    /// Catalog output directory, relative to the project root (default: Localization)
    #[arg(long)]
    pub out_dir: Option<String>,

    /// Only rewrite C# source files
    #[arg(long, conflicts_with = "cfg_only")]
    pub code_only: bool,

    /// Only rewrite part config files
    #[arg(long)]
    pub cfg_only: bool,

    /// Write code and config keys to separate catalog files
    #[arg(long)]
    pub separate_parts_cfg: bool,

    /// Actually rewrite files (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

impl ExtractArgs {
    /// Apply CLI overrides on top of the loaded config (CLI > config file > defaults).
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref prefix) = self.prefix {
            config.prefix = prefix.clone();
        }
        if let Some(max_key_length) = self.max_key_length {
            config.max_key_length = max_key_length;
        }
        if let Some(ref out_dir) = self.out_dir {
            config.out_dir = Some(out_dir.clone());
        }
        if self.numeric_tags {
            config.numeric_tags = true;
        }
        if self.separate_parts_cfg {
            config.separate_parts_cfg = true;
        }
        // Scope flags replace the file's scope rather than adding to it.
        if self.code_only {
            config.code_only = true;
            config.cfg_only = false;
        }
        if self.cfg_only {
            config.cfg_only = true;
            config.code_only = false;
        }
    }
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub args: ExtractArgs,
}

#[derive(Debug, Parser)]
pub struct BackupArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually restore or delete files (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct BackupCommand {
    #[command(flatten)]
    pub args: BackupArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replace hard-coded strings in C# and .cfg files with localization keys
    Extract(ExtractCommand),
    /// Restore every rewritten file from its .bak backup
    Revert(BackupCommand),
    /// Delete every .bak backup
    Clean(BackupCommand),
    /// Initialize a new .ksplocrc.json configuration file
    Init,
}
