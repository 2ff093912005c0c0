// src/stages/repair.rs

//! Repair missing and outdated dependencies reported by the consistency check
//!
//! The check's stdout goes to a scratch file, which is then read back line
//! by line. For every recognized issue the *owning* package is upgraded, on
//! the assumption that a fresh install of the owner pulls in a compatible
//! dependency. Parsed pairs are written to a second scratch file as an
//! audit trail. Both scratch files are removed when this function returns,
//! on every path.

use super::Context;
use crate::error::{Error, Result};
use crate::output::{self, Category};
use crate::packages::check::{DependencyIssue, parse_check_line};
use crate::packages::{ToolIo, ToolOp};
use crate::progress::ActionSpinner;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairOutcome {
    /// Issues recognized, in output order
    pub issues: Vec<DependencyIssue>,
    /// Owners whose upgrade exited non-zero, one entry per failed attempt
    pub failed: Vec<String>,
    /// Lines skipped because their shape was not recognized
    pub malformed: usize,
}

fn scratch_file(dir: &Path, prefix: &str) -> Result<NamedTempFile> {
    tempfile::Builder::new()
        .prefix(prefix)
        .suffix(".txt")
        .tempfile_in(dir)
        .map_err(Error::Scratch)
}

pub fn run(ctx: &Context<'_>) -> Result<RepairOutcome> {
    output::heading("Checking for Missing Dependencies..");

    let check_out = scratch_file(ctx.scratch_dir, ".dependencies-tmp")?;
    let mut audit = scratch_file(ctx.scratch_dir, ".dependencies-tmp-2")?;
    debug!(
        "Scratch files: {} {}",
        check_out.path().display(),
        audit.path().display()
    );

    let sink = check_out.as_file().try_clone().map_err(Error::Scratch)?;
    let spinner = ActionSpinner::start("Running dependency check..", true);
    let status = ctx.tool.run(&ToolOp::Check, ToolIo::StdoutTo(sink));
    spinner.finish();
    let status = status?;
    // Non-zero just means problems were found
    debug!("Dependency check exited with {:?}", status.code);

    let bytes = std::fs::read(check_out.path()).map_err(Error::Scratch)?;
    let report = String::from_utf8_lossy(&bytes);

    let mut outcome = RepairOutcome::default();
    for line in report.lines() {
        let issue = match parse_check_line(line) {
            None => continue,
            Some(Ok(issue)) => issue,
            Some(Err(e)) => {
                warn!("{}", e);
                output::report(
                    Category::Warning,
                    &format!("Skipping unrecognized line: {}", line.trim()),
                );
                outcome.malformed += 1;
                continue;
            }
        };

        writeln!(audit, "{}", issue.audit_line()).map_err(Error::Scratch)?;
        repair_one(ctx, &issue, &mut outcome)?;
        outcome.issues.push(issue);
    }

    check_out.close().map_err(Error::Scratch)?;
    audit.close().map_err(Error::Scratch)?;

    if outcome.issues.is_empty() && outcome.malformed == 0 {
        output::report(Category::Success, "No broken requirements found.");
    }

    println!();
    if outcome.failed.is_empty() && outcome.malformed == 0 {
        output::report(
            Category::Success,
            "All packages are updated to their latest version.",
        );
    } else {
        output::report(
            Category::Warning,
            &format!(
                "{} dependency repair{} failed, {} line{} skipped.",
                outcome.failed.len(),
                output::plural(outcome.failed.len()),
                outcome.malformed,
                output::plural(outcome.malformed)
            ),
        );
    }

    Ok(outcome)
}

fn repair_one(ctx: &Context<'_>, issue: &DependencyIssue, outcome: &mut RepairOutcome) -> Result<()> {
    let owner = issue.owner();
    let dependency = issue.dependency();

    match issue {
        DependencyIssue::Missing { .. } => output::report(
            Category::Error,
            &format!("Missing {}, which is required for {}.", dependency, owner),
        ),
        DependencyIssue::Outdated { constraint, .. } => {
            debug!("{} wants {}{}", owner, dependency, constraint);
            output::report(
                Category::Progress,
                &format!("Outdated {} found, which is required for {}.", dependency, owner),
            )
        }
    }

    let spinner = ActionSpinner::start(&format!("Installing {}..", owner), true);
    let result = ctx.tool.run(&ToolOp::Upgrade(owner.to_string()), ToolIo::Capture)?;
    spinner.finish();

    if result.success {
        let verb = if issue.is_missing() { "installed" } else { "upgraded" };
        output::report(
            Category::Success,
            &output::muted(&format!("{} {} successfully.", dependency, verb)),
        );
    } else {
        warn!("Upgrade of {} exited with {:?}", owner, result.code);
        output::report(
            Category::Error,
            &format!(
                "Failed to upgrade {} for {}: {}",
                owner,
                dependency,
                result.stderr_summary().unwrap_or("unknown error")
            ),
        );
        outcome.failed.push(owner.to_string());
    }
    Ok(())
}
