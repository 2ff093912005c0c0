// src/stages/mod.rs

//! Health-check stages and the pipeline that runs them
//!
//! A full run is Report -> Deprecation -> Upgrade -> Repair. Each stage is a
//! free function taking a [`Context`] (plus whatever earlier stages
//! produced) and returning its own outcome, so stages can be exercised
//! one at a time against a fake [`PackageTool`]. The [`Stage`] impls below
//! thread those outcomes through a shared [`RunState`].
//!
//! The deprecated-report printer is a separate, read-only mode and is not
//! part of the pipeline.

pub mod deprecation;
pub mod printer;
pub mod repair;
pub mod report;
pub mod upgrade;

pub use deprecation::DeprecationOutcome;
pub use printer::LedgerReport;
pub use repair::RepairOutcome;
pub use upgrade::UpgradeOutcome;

use crate::error::Result;
use crate::ledger::Ledger;
use crate::packages::{PackageRecord, PackageTool};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

/// What every stage may need
pub struct Context<'a> {
    pub tool: &'a dyn PackageTool,
    pub ledger: &'a Ledger,
    /// Show the tool's own output during upgrades
    pub verbose: bool,
    /// Leave ledger packages out of the upgrade stage
    pub skip_deprecated: bool,
    /// Where repair scratch files are created
    pub scratch_dir: &'a Path,
}

/// State accumulated across one pipeline run
#[derive(Debug, Default)]
pub struct RunState {
    pub installed: Vec<PackageRecord>,
    pub deprecated: BTreeSet<String>,
    pub summary: RunSummary,
}

/// Counters that decide the exit code of a completed run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub upgrades_attempted: usize,
    pub upgrades_failed: usize,
    pub repairs_attempted: usize,
    pub repairs_failed: usize,
    pub malformed_lines: usize,
}

impl RunSummary {
    /// True when every remediation succeeded and every line was understood
    pub fn is_clean(&self) -> bool {
        self.upgrades_failed == 0 && self.repairs_failed == 0 && self.malformed_lines == 0
    }

    /// 0 for a clean run, 1 when something was reported but not fixed
    pub fn exit_code(&self) -> u8 {
        if self.is_clean() { 0 } else { 1 }
    }
}

/// One step of the pipeline
pub trait Stage {
    fn name(&self) -> &'static str;

    fn run(&self, ctx: &Context<'_>, state: &mut RunState) -> Result<()>;
}

pub struct ReportStage;

impl Stage for ReportStage {
    fn name(&self) -> &'static str {
        "report"
    }

    fn run(&self, ctx: &Context<'_>, state: &mut RunState) -> Result<()> {
        state.installed = report::run(ctx)?;
        Ok(())
    }
}

pub struct DeprecationStage;

impl Stage for DeprecationStage {
    fn name(&self) -> &'static str {
        "deprecation"
    }

    fn run(&self, ctx: &Context<'_>, state: &mut RunState) -> Result<()> {
        state.deprecated = deprecation::run(ctx)?.known;
        Ok(())
    }
}

pub struct UpgradeStage;

impl Stage for UpgradeStage {
    fn name(&self) -> &'static str {
        "upgrade"
    }

    fn run(&self, ctx: &Context<'_>, state: &mut RunState) -> Result<()> {
        let outcome = upgrade::run(ctx, &state.deprecated)?;
        state.summary.upgrades_attempted += outcome.attempted.len();
        state.summary.upgrades_failed += outcome.failed.len();
        Ok(())
    }
}

pub struct RepairStage;

impl Stage for RepairStage {
    fn name(&self) -> &'static str {
        "repair"
    }

    fn run(&self, ctx: &Context<'_>, state: &mut RunState) -> Result<()> {
        let outcome = repair::run(ctx)?;
        state.summary.repairs_attempted += outcome.issues.len();
        state.summary.repairs_failed += outcome.failed.len();
        state.summary.malformed_lines += outcome.malformed;
        Ok(())
    }
}

/// Ordered list of stages
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Report, deprecation, upgrade, repair
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(ReportStage),
            Box::new(DeprecationStage),
            Box::new(UpgradeStage),
            Box::new(RepairStage),
        ])
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage in order, stopping at the first hard error
    pub fn run(&self, ctx: &Context<'_>) -> Result<RunState> {
        let mut state = RunState::default();
        for stage in &self.stages {
            info!("Running {} stage", stage.name());
            stage.run(ctx, &mut state)?;
        }
        info!("Run finished: {:?}", state.summary);
        Ok(state)
    }
}
