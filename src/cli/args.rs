//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Yurt - Scaffold app projects from remote templates.
#[derive(Debug, Parser)]
#[command(name = "yurt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

pub use super::commands::cache::CacheArgs;

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from a template
    New(NewArgs),

    /// Manage the HTTP response cache
    Cache(CacheArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `new` command.
#[derive(Debug, Clone, clap::Args)]
pub struct NewArgs {
    /// Directory to create the project in
    pub path: PathBuf,

    /// Template to use: a github.com URL, an npm package specifier, or a
    /// local .tgz archive
    #[arg(short, long, conflicts_with = "example")]
    pub template: Option<String>,

    /// Sub-directory of the template repository to extract
    #[arg(long, requires = "template", value_name = "PATH")]
    pub template_path: Option<String>,

    /// Name of an example from the examples repository
    #[arg(short, long)]
    pub example: Option<String>,

    /// Skip prompts and scaffold the default app
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
