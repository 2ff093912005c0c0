// src/packages/mod.rs

//! Package tool boundary
//!
//! Everything pipdoctor knows about installed packages comes from an
//! external package tool. [`PackageTool`] is the one seam through which
//! that tool is invoked, so stages can run against a scripted fake in
//! tests and against [`Pip`] for real.

pub mod check;
mod pip;

pub use pip::Pip;

use crate::error::Result;
use serde::Deserialize;
use std::fs::File;
use tracing::warn;

/// An installed package as reported by the tool's JSON listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    #[serde(rename = "version")]
    pub installed_version: String,
    #[serde(default)]
    pub latest_version: Option<String>,
}

/// Operations pipdoctor asks of the package tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOp {
    /// Every installed package, machine readable
    ListInstalled,
    /// Installed packages with a newer release, machine readable
    ListOutdated,
    /// Dependency consistency check
    Check,
    /// Upgrade-install a single package
    Upgrade(String),
}

/// Where the tool's output streams go
#[derive(Debug)]
pub enum ToolIo {
    /// Capture stdout and stderr into [`ToolOutput`]
    Capture,
    /// Let the tool write straight to our terminal
    Inherit,
    /// Send stdout to a file and discard stderr
    StdoutTo(File),
}

/// Result of one tool invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` when killed by a signal
    pub code: Option<i32>,
    pub success: bool,
    /// Empty unless captured
    pub stdout: String,
    /// Empty unless captured
    pub stderr: String,
}

impl ToolOutput {
    /// Last non-empty line of stderr, for one-line failure messages
    pub fn stderr_summary(&self) -> Option<&str> {
        self.stderr.lines().map(str::trim).filter(|l| !l.is_empty()).last()
    }
}

/// The external package manager
pub trait PackageTool {
    /// Run one operation and wait for it to finish
    ///
    /// A non-zero exit is reported through [`ToolOutput::success`], not as
    /// an error. Errors mean the tool could not be run at all.
    fn run(&self, op: &ToolOp, io: ToolIo) -> Result<ToolOutput>;
}

/// Parse a JSON package listing
///
/// Malformed or empty output yields no records; the caller reports zero
/// packages rather than failing.
pub fn parse_listing(stdout: &str) -> Vec<PackageRecord> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        warn!("Package listing was empty");
        return Vec::new();
    }

    match serde_json::from_str::<Vec<PackageRecord>>(trimmed) {
        Ok(records) => records,
        Err(e) => {
            warn!("Could not parse package listing: {}", e);
            Vec::new()
        }
    }
}
