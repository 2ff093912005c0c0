// src/lib.rs

//! pipdoctor
//!
//! Report and remediate the health of a pip environment: count installed
//! packages, record deprecated ones, upgrade outdated ones and repair
//! missing or outdated dependencies.
//!
//! # Architecture
//!
//! - `packages`: the subprocess boundary (`PackageTool`) and parsers for its output
//! - `ledger`: append-only file of deprecated package names
//! - `stages`: one module per stage, plus the `Pipeline` that orders them
//! - `output`: categorized console lines

pub mod cli;
pub mod config;
mod error;
pub mod ledger;
pub mod output;
pub mod packages;
pub mod progress;
pub mod stages;

pub use config::Config;
pub use error::{Error, Result};
pub use ledger::Ledger;
pub use packages::{PackageRecord, PackageTool, Pip, ToolIo, ToolOp, ToolOutput};
pub use stages::{Context, LedgerReport, Pipeline, RunState, RunSummary};
