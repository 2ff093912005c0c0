// src/stages/deprecation.rs

//! Find packages the tool flags as deprecated and record new ones in the ledger

use super::Context;
use crate::error::Result;
use crate::output::{self, Category};
use crate::packages::check::find_deprecated;
use crate::packages::{ToolIo, ToolOp};
use std::collections::BTreeSet;
use tracing::{info, warn};

const GUIDANCE: &[&str] = &[
    "Egg is deprecated and pip 24.3 will enforce the behaviour change.",
    "Discussion can be found at https://github.com/pypa/pip/issues/12330.",
    "Please talk with the developers to update their packages to a newer version or they will become obsolete.",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeprecationOutcome {
    /// Names flagged in this run, first-seen order
    pub found: Vec<String>,
    /// Flagged names that were not yet in the ledger; these were appended
    pub new: BTreeSet<String>,
    /// Previous ledger contents plus `new`
    pub known: BTreeSet<String>,
}

pub fn run(ctx: &Context<'_>) -> Result<DeprecationOutcome> {
    let previous = match ctx.ledger.load() {
        Ok(set) => set,
        Err(e) => {
            warn!("{}", e);
            output::report(
                Category::Warning,
                &format!("Could not read ledger, treating it as empty: {}", e),
            );
            BTreeSet::new()
        }
    };

    output::heading("Checking for Deprecated Packages..");

    let out = ctx.tool.run(&ToolOp::Check, ToolIo::Capture)?;
    let found = find_deprecated(&out.stderr);
    let new: BTreeSet<String> = found
        .iter()
        .filter(|name| !previous.contains(*name))
        .cloned()
        .collect();

    if found.is_empty() {
        output::report(Category::Success, "No deprecated packages found.");
    } else {
        output::report(
            Category::Warning,
            &format!(
                "{} deprecated package{} found.",
                found.len(),
                output::plural(found.len())
            ),
        );
        let names: Vec<String> = found.iter().map(|n| output::package(n)).collect();
        output::report(
            Category::Warning,
            &format!("The following packages are using .egg modules: {}.", names.join(", ")),
        );
        for line in GUIDANCE {
            output::report(Category::Detail, line);
        }
        output::report(Category::Error, "Skipping deprecated packages.");
    }

    match ctx.ledger.append(&new) {
        Ok(written) if written > 0 => info!(
            "Recorded {} new deprecated packages in {}",
            written,
            ctx.ledger.path().display()
        ),
        Ok(_) => {}
        Err(e) => {
            warn!("{}", e);
            output::report(Category::Warning, &format!("Could not update ledger: {}", e));
        }
    }

    let known = previous.union(&new).cloned().collect();
    Ok(DeprecationOutcome { found, new, known })
}
