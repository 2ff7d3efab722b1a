//! Cache command implementation.
//!
//! Provides `yurt cache list`, `yurt cache clear`, etc. over both cache
//! namespaces (API responses and template tarballs).

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cache::{CacheStore, GITHUB_API_NAMESPACE, TEMPLATE_NAMESPACE};
use crate::ui::{Prompt, PromptResult, PromptType, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Arguments for the cache command.
#[derive(Debug, Clone, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

/// Cache subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CacheSubcommand {
    /// List cached entries.
    List {
        /// Show detailed information.
        #[arg(long)]
        verbose: bool,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Clear the cache.
    Clear {
        /// Only clear expired entries.
        #[arg(long)]
        expired: bool,
        /// Don't prompt for confirmation.
        #[arg(short, long)]
        force: bool,
    },
    /// Show cache statistics.
    Stats,
}

/// The cache command implementation.
pub struct CacheCommand {
    args: CacheArgs,
}

impl CacheCommand {
    /// Create a new cache command.
    pub fn new(args: CacheArgs) -> Self {
        Self { args }
    }
}

fn stores() -> [(&'static str, CacheStore); 2] {
    [
        (GITHUB_API_NAMESPACE, CacheStore::namespaced(GITHUB_API_NAMESPACE)),
        (TEMPLATE_NAMESPACE, CacheStore::namespaced(TEMPLATE_NAMESPACE)),
    ]
}

impl Command for CacheCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let exit_code = match &self.args.command {
            CacheSubcommand::List { verbose, json } => list_cache(*verbose, *json, ui)?,
            CacheSubcommand::Clear { expired, force } => clear_cache(*expired, *force, ui)?,
            CacheSubcommand::Stats => show_stats(ui)?,
        };

        Ok(if exit_code == 0 {
            CommandResult::success()
        } else {
            CommandResult::failure(exit_code)
        })
    }
}

fn list_cache(verbose: bool, json: bool, ui: &mut dyn UserInterface) -> Result<i32> {
    let mut all = Vec::new();
    for (namespace, store) in stores() {
        for entry in store.list()? {
            all.push((namespace, entry));
        }
    }

    if all.is_empty() {
        ui.message("Cache is empty");
        return Ok(0);
    }

    if json {
        let entries: Vec<_> = all.iter().map(|(_, e)| e).collect();
        let output = serde_json::to_string_pretty(&entries)?;
        ui.message(&output);
        return Ok(0);
    }

    ui.message(&format!("{} cached entries:\n", all.len()));

    for (namespace, entry) in all {
        let status = if entry.is_expired() { "expired" } else { "fresh" };
        let ttl_str = match entry.metadata.remaining_ttl() {
            Some(0) => "expired".to_string(),
            Some(secs) => format!("{secs}s left"),
            None => "no expiry".to_string(),
        };

        if verbose {
            ui.message(&format!("  {} [{}]", entry.request_key, namespace));
            ui.message(&format!("    Status: {}", status));
            ui.message(&format!("    TTL: {}", ttl_str));
            ui.message(&format!("    Size: {} bytes", entry.metadata.size_bytes));
            ui.message("");
        } else {
            ui.message(&format!("  {} [{}] {}", entry.request_key, status, ttl_str));
        }
    }

    Ok(0)
}

fn clear_cache(expired_only: bool, force: bool, ui: &mut dyn UserInterface) -> Result<i32> {
    if expired_only {
        let mut removed = 0;
        for (_, store) in stores() {
            removed += store.clear_expired()?;
        }
        ui.success(&format!("Cleared {} expired entries", removed));
        return Ok(0);
    }

    let count: usize = stores()
        .iter()
        .map(|(_, store)| store.list().map(|e| e.len()).unwrap_or(0))
        .sum();
    if count == 0 {
        ui.message("Cache is already empty");
        return Ok(0);
    }

    if !force && ui.is_interactive() {
        let prompt = Prompt {
            key: "clear_cache".to_string(),
            question: format!("Clear {} cached entries?", count),
            prompt_type: PromptType::Confirm,
            default: Some("false".to_string()),
        };

        match ui.prompt(&prompt)? {
            PromptResult::Bool(true) => {}
            _ => {
                ui.message("Cancelled");
                return Ok(0);
            }
        }
    }

    let mut cleared = 0;
    for (_, store) in stores() {
        cleared += store.clear()?;
    }
    ui.success(&format!("Cleared {} entries", cleared));

    Ok(0)
}

fn show_stats(ui: &mut dyn UserInterface) -> Result<i32> {
    ui.message("Cache Statistics:\n");

    for (namespace, store) in stores() {
        let entries = store.list()?;
        let total_size = store.total_size()?;
        let expired_count = entries.iter().filter(|e| e.is_expired()).count();

        ui.message(&format!("  {}:", namespace));
        ui.message(&format!("    Entries: {}", entries.len()));
        ui.message(&format!("    Expired: {}", expired_count));
        ui.message(&format!("    Size: {} bytes", total_size));
        ui.message(&format!("    Location: {}", store.root().display()));
    }

    Ok(0)
}
