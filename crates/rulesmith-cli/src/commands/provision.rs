//! Implementation of the `rulesmith provision` command.
//!
//! Responsibility: pick the profile and layout, set up the filesystem and
//! scratch space, run the provisioner, and display the summary. No
//! provisioning logic lives here.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, instrument};

use rulesmith_adapters::LocalFilesystem;
use rulesmith_core::{
    application::{CatalogService, Filesystem, ProfileProvisioner, ProvisionLayout, ProvisionSummary},
    domain::Mode,
};

use crate::{
    cli::{GlobalArgs, OutputFormat, ProvisionArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::{ConsoleReporter, OutputManager},
    scratch::{self, Scratch},
};

/// Execute the `rulesmith provision` command.
///
/// Dispatch sequence:
/// 1. Open the catalog and resolve the profile (argument, config, prompt)
/// 2. Resolve the project root and global root
/// 3. For live runs, create the scratch space and arm the interrupt handler
/// 4. Provision, printing one status line per item
/// 5. Print the summary
///
/// Failed artifacts and conversions do not fail the command; a failed
/// directory does.
#[instrument(skip_all)]
pub fn execute(
    args: ProvisionArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Profile
    let service = super::open_catalog(args.catalog.clone(), &config)?;
    let name = select_profile(args.profile.clone(), &config, &service, &global, &output)?;
    let profile = service.resolve(&name)?;

    // 2. Layout
    let layout = resolve_layout(&args, &config)?;
    let mode = Mode::new(args.dry_run);
    debug!(
        profile = %profile.name,
        root = %layout.root.display(),
        global_root = %layout.global_root.display(),
        %mode,
        "provisioning resolved"
    );

    output.header(&format!(
        "Provisioning '{}' into {} ({mode})",
        profile.name,
        layout.root.display()
    ))?;

    // 3. Scratch space (live runs only). Held until the end of this function.
    let scratch = if mode.is_dry_run() || !layout.root.is_dir() {
        None
    } else {
        scratch::install_interrupt_handler();
        Some(Scratch::create_in(&layout.root)?)
    };
    let filesystem: Arc<dyn Filesystem> = match &scratch {
        Some(scratch) => Arc::new(LocalFilesystem::with_staging(scratch.path())),
        None => Arc::new(LocalFilesystem::new()),
    };

    // 4. Provision
    let provisioner = ProfileProvisioner::new(
        filesystem,
        Arc::new(ConsoleReporter::new(output.clone())),
        mode,
        layout,
    );
    let summary = provisioner.provision(&profile).map_err(|e| {
        if e.is_io() {
            CliError::ProvisionAborted {
                profile: profile.name.clone(),
                source: e,
            }
        } else {
            CliError::Core(e)
        }
    })?;

    // 5. Summary
    print_summary(&summary, &output)?;

    drop(scratch);
    Ok(())
}

/// Argument, then `defaults.profile`, then an interactive prompt.
fn select_profile(
    arg: Option<String>,
    config: &AppConfig,
    service: &CatalogService,
    global: &GlobalArgs,
    output: &OutputManager,
) -> CliResult<String> {
    if let Some(name) = arg.or_else(|| config.defaults.profile.clone()) {
        return Ok(name);
    }

    let names = service.names();
    let can_prompt = !global.quiet
        && output.format() != OutputFormat::Json
        && std::io::IsTerminal::is_terminal(&std::io::stdin());

    if can_prompt {
        if let Some(name) = prompt_for_profile(&names)? {
            return Ok(name);
        }
        return Err(CliError::Cancelled);
    }

    Err(CliError::NoProfileSelected { available: names })
}

#[cfg(feature = "interactive")]
fn prompt_for_profile(names: &[String]) -> CliResult<Option<String>> {
    use dialoguer::{FuzzySelect, theme::ColorfulTheme};

    if names.is_empty() {
        return Ok(None);
    }

    let choice = FuzzySelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Profile to provision")
        .items(names)
        .default(0)
        .interact_opt()
        .map_err(std::io::Error::other)
        .with_cli_context(|| "profile selection failed")?;

    Ok(choice.and_then(|index| names.get(index).cloned()))
}

#[cfg(not(feature = "interactive"))]
fn prompt_for_profile(_names: &[String]) -> CliResult<Option<String>> {
    Ok(None)
}

fn resolve_layout(args: &ProvisionArgs, config: &AppConfig) -> CliResult<ProvisionLayout> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().with_cli_context(|| "cannot read current directory")?,
    };

    let global_root: PathBuf = args
        .global_root
        .clone()
        .or_else(|| config.global_root())
        .ok_or(CliError::NoGlobalRoot)?;

    Ok(ProvisionLayout::new(root, global_root))
}

fn print_summary(summary: &ProvisionSummary, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        output.json(summary)?;
        return Ok(());
    }

    let line = format!(
        "{} created, {} skipped, {} simulated, {} failed",
        summary.created(),
        summary.skipped(),
        summary.simulated(),
        summary.failed()
    );

    if summary.has_failures() {
        output.warning(&format!("Done with failures: {line}"))?;
    } else if summary.mode.is_dry_run() {
        output.info(&format!("Dry run, nothing written: {line}"))?;
    } else {
        output.success(&format!("Done: {line}"))?;
    }

    Ok(())
}
