// src/stages/printer.rs

//! Print the deprecation ledger without touching anything

use crate::error::Result;
use crate::ledger::Ledger;
use crate::output::{self, Category};

/// What the ledger looked like when printed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerReport {
    /// No ledger file yet
    Missing,
    /// File exists but names nothing
    Empty,
    /// Entries in file order
    Listed(Vec<String>),
}

pub fn run(ledger: &Ledger) -> Result<LedgerReport> {
    let report = match ledger.entries()? {
        None => {
            output::report(
                Category::Error,
                &format!("'{}' file not found.", ledger.path().display()),
            );
            LedgerReport::Missing
        }
        Some(entries) if entries.is_empty() => {
            output::report(Category::Success, "No deprecated packages found.");
            LedgerReport::Empty
        }
        Some(entries) => {
            output::report(Category::Progress, "Deprecated packages:");
            for name in &entries {
                println!("  {}", output::package(name));
            }
            LedgerReport::Listed(entries)
        }
    };
    Ok(report)
}
