//! New-project command: the template acquisition pipeline.
//!
//! `yurt new` resolves the requested template reference, downloads its
//! tarball, extracts the relevant subset into the destination directory,
//! and normalizes the resulting project. Every stage failure is fatal;
//! there are no retries and no partial-state rollback.

use std::fs;
use std::path::Path;

use anyhow::anyhow;

use crate::cache::{CachedClient, TEMPLATE_NAMESPACE};
use crate::cli::args::NewArgs;
use crate::error::{Result, YurtError};
use crate::extract::Extractor;
use crate::fetch::TarballFetcher;
use crate::project;
use crate::template::{classify, ExamplesDirectory, GithubApi, GithubResolver, TemplateArg, TemplateReference};
use crate::ui::{Prompt, PromptOption, PromptType, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// npm template scaffolded when the user asks for the default app.
pub const DEFAULT_TEMPLATE: &str = "yurt-template-blank";

/// Files that may already exist in the destination without conflicting
/// with an extraction.
const ALLOWED_EXISTING: &[&str] = &[".git", ".gitignore", ".DS_Store", "LICENSE", "README.md"];

/// The new-project command implementation.
pub struct NewCommand {
    args: NewArgs,
}

impl NewCommand {
    /// Create a new command.
    pub fn new(args: NewArgs) -> Self {
        Self { args }
    }
}

impl Command for NewCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let api = GithubApi::new();
        let template_client = CachedClient::new(TEMPLATE_NAMESPACE, None);
        let fetcher = TarballFetcher::new(&template_client);

        scaffold(&self.args, &api, &fetcher, ui)?;

        Ok(CommandResult::success())
    }
}

/// Run the whole pipeline: resolve, download, extract, normalize.
pub fn scaffold(
    args: &NewArgs,
    api: &GithubApi,
    fetcher: &TarballFetcher,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    let destination = &args.path;
    ensure_destination_available(destination)?;

    let project_name = project::project_name_for(destination);
    let reference = resolve_reference(args, api, ui)?;
    tracing::debug!(?reference, %project_name, "resolved template reference");

    let mut spinner = ui.start_spinner("Downloading template...");
    let source = match fetcher.acquire(&reference, &project_name) {
        Ok(source) => source,
        Err(e) => {
            spinner.finish_error("Download failed");
            return Err(e);
        }
    };

    spinner.set_message("Extracting template...");
    let written = match Extractor::new(destination).unpack(source) {
        Ok(written) => written,
        Err(e) => {
            spinner.finish_error("Extraction failed");
            return Err(e);
        }
    };
    spinner.finish_success(&format!("Extracted {written} files"));

    let outcome = project::normalize(destination, &project_name)?;
    if !outcome.manifest_rewritten {
        ui.warning("Template has no usable package.json; left manifest untouched");
    }

    ui.success(&format!(
        "Created {} at {}",
        project_name,
        destination.display()
    ));
    ui.message("");
    ui.message("Next steps:");
    ui.message(&format!("  cd {}", destination.display()));
    ui.message("  npm install");
    ui.message("  npm start");

    Ok(())
}

/// Verify the destination is absent, or present without conflicting files.
///
/// Extraction does not roll back on failure, so this check is the only
/// thing standing between a bad invocation and a clobbered directory.
fn ensure_destination_available(destination: &Path) -> Result<()> {
    if !destination.exists() {
        return Ok(());
    }

    if !destination.is_dir() {
        return Err(anyhow!(
            "Destination {} exists and is not a directory",
            destination.display()
        )
        .into());
    }

    let conflicts: Vec<String> = fs::read_dir(destination)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| !ALLOWED_EXISTING.contains(&name.as_str()))
        .collect();

    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(anyhow!(
            "Destination {} already contains conflicting files: {}",
            destination.display(),
            conflicts.join(", ")
        )
        .into())
    }
}

/// Turn the command arguments into a validated template reference.
///
/// `--template` and `--example` are mutually exclusive code paths (clap
/// enforces the exclusion); with neither, the default app is scaffolded
/// unless an interactive terminal lets the user pick.
fn resolve_reference(
    args: &NewArgs,
    api: &GithubApi,
    ui: &mut dyn UserInterface,
) -> Result<TemplateReference> {
    if let Some(raw) = &args.template {
        return match classify(raw) {
            TemplateArg::GithubUrl(url) => {
                GithubResolver::new(api).resolve_url(&url, args.template_path.as_deref())
            }
            TemplateArg::UnsupportedUrl(url) => Err(YurtError::UnsupportedHost { url }),
            TemplateArg::LocalArchive(path) => Ok(TemplateReference::LocalFile { path }),
            TemplateArg::PackageLike(specifier) => {
                Ok(TemplateReference::NpmPackage { specifier })
            }
        };
    }

    if let Some(name) = &args.example {
        let listing = ExamplesDirectory::fetch(api)?;
        listing.ensure(name)?;
        return Ok(TemplateReference::NamedExample { name: name.clone() });
    }

    if args.yes || !ui.is_interactive() {
        return Ok(TemplateReference::NpmPackage {
            specifier: DEFAULT_TEMPLATE.to_string(),
        });
    }

    prompt_for_reference(api, ui)
}

/// Interactive flow: default app, or a filtered example selection.
fn prompt_for_reference(
    api: &GithubApi,
    ui: &mut dyn UserInterface,
) -> Result<TemplateReference> {
    let choice = ui.prompt(&Prompt {
        key: "template_kind".into(),
        question: "How would you like to start?".into(),
        prompt_type: PromptType::Select {
            options: vec![
                PromptOption {
                    label: "Default new app".into(),
                    value: "default".into(),
                },
                PromptOption {
                    label: "Pick an example".into(),
                    value: "example".into(),
                },
            ],
        },
        default: Some("default".into()),
    })?;

    if choice.as_str() != Some("example") {
        return Ok(TemplateReference::NpmPackage {
            specifier: DEFAULT_TEMPLATE.to_string(),
        });
    }

    let listing = ExamplesDirectory::fetch(api)?;

    let pattern = ui.prompt(&Prompt {
        key: "example_filter".into(),
        question: "Filter examples (substring or regex, empty for all)".into(),
        prompt_type: PromptType::Input,
        default: Some(String::new()),
    })?;
    let pattern = pattern.as_str().unwrap_or("").to_string();

    let matches = listing.filter(&pattern);
    if matches.is_empty() {
        // A selection that matches nothing is a terminal error, never a
        // silent fallback to the default app.
        return Err(YurtError::ExampleNotFound { name: pattern });
    }

    let selected = ui.prompt(&Prompt {
        key: "example_name".into(),
        question: "Choose an example".into(),
        prompt_type: PromptType::Select {
            options: matches
                .iter()
                .map(|name| PromptOption {
                    label: (*name).to_string(),
                    value: (*name).to_string(),
                })
                .collect(),
        },
        default: None,
    })?;

    let name = selected
        .as_str()
        .ok_or_else(|| anyhow!("example selection returned no value"))?
        .to_string();

    Ok(TemplateReference::NamedExample { name })
}
