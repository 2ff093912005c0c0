// src/stages/report.rs

//! Count installed packages

use super::Context;
use crate::error::Result;
use crate::output::{self, Category};
use crate::packages::{PackageRecord, ToolIo, ToolOp, parse_listing};
use tracing::debug;

pub fn run(ctx: &Context<'_>) -> Result<Vec<PackageRecord>> {
    output::heading("Fetching all installed packages..");

    let out = ctx.tool.run(&ToolOp::ListInstalled, ToolIo::Capture)?;
    if !out.success {
        debug!("Listing exited with {:?}: {}", out.code, out.stderr.trim());
    }

    let installed = parse_listing(&out.stdout);
    output::report(
        Category::Success,
        &format!("{} installed packages found.", installed.len()),
    );
    Ok(installed)
}
