// src/stages/upgrade.rs

//! Upgrade every outdated package, one subprocess per package
//!
//! Each upgrade is judged by its own exit status. A failure is reported
//! and the batch moves on.

use super::Context;
use crate::error::Result;
use crate::output::{self, Category};
use crate::packages::{ToolIo, ToolOp, parse_listing};
use crate::progress::ActionSpinner;
use std::collections::BTreeSet;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeOutcome {
    /// Packages an upgrade was run for, in listing order
    pub attempted: Vec<String>,
    /// Subset of `attempted` whose upgrade exited non-zero
    pub failed: Vec<String>,
    /// Outdated packages left alone because they are in the ledger
    pub skipped: Vec<String>,
}

pub fn run(ctx: &Context<'_>, deprecated: &BTreeSet<String>) -> Result<UpgradeOutcome> {
    output::heading("Checking for Outdated Packages..");

    let listing = ctx.tool.run(&ToolOp::ListOutdated, ToolIo::Capture)?;
    let outdated = parse_listing(&listing.stdout);

    let mut outcome = UpgradeOutcome::default();
    if outdated.is_empty() {
        output::report(Category::Success, "No outdated packages found.");
        return Ok(outcome);
    }

    output::report(
        Category::Warning,
        &format!(
            "{} outdated package{} found.",
            outdated.len(),
            output::plural(outdated.len())
        ),
    );

    for record in &outdated {
        let name = &record.name;

        if ctx.skip_deprecated && deprecated.contains(name) {
            output::report(
                Category::Warning,
                &format!("Skipping deprecated package {}.", output::package(name)),
            );
            outcome.skipped.push(name.clone());
            continue;
        }

        let latest = record.latest_version.as_deref().unwrap_or("latest");
        output::report(
            Category::Progress,
            &format!(
                "Upgrading {} {}",
                name,
                output::muted(&format!("from {} to {}", record.installed_version, latest))
            ),
        );

        let io = if ctx.verbose { ToolIo::Inherit } else { ToolIo::Capture };
        let spinner = ActionSpinner::start(&format!("Installing {}..", name), !ctx.verbose);
        let result = ctx.tool.run(&ToolOp::Upgrade(name.clone()), io)?;
        spinner.finish();

        outcome.attempted.push(name.clone());
        if result.success {
            output::report(Category::Success, "Done.");
        } else {
            warn!("Upgrade of {} exited with {:?}", name, result.code);
            let reason = match result.stderr_summary() {
                Some(line) => line.to_string(),
                None => match result.code {
                    Some(code) => format!("exit status {}", code),
                    None => "terminated by signal".to_string(),
                },
            };
            output::report(
                Category::Error,
                &format!("Failed to upgrade package: {}. Error: {}", name, reason),
            );
            outcome.failed.push(name.clone());
        }
    }

    Ok(outcome)
}
