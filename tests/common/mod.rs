// tests/common/mod.rs

//! Shared test utilities: a scripted package tool and run contexts.

#![allow(dead_code)]

use pipdoctor::{Context, Error, Ledger, PackageTool, Result, ToolIo, ToolOp, ToolOutput};
use std::cell::RefCell;
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Package tool that replays canned output and records every call.
#[derive(Default)]
pub struct FakeTool {
    pub installed_json: String,
    pub outdated_json: String,
    pub check_stdout: Vec<u8>,
    pub check_stderr: String,
    /// Packages whose upgrade exits non-zero
    pub failing: HashSet<String>,
    /// Make upgrades fail to spawn, as if the tool vanished mid-run
    pub upgrade_spawn_error: bool,
    pub calls: RefCell<Vec<ToolOp>>,
}

impl FakeTool {
    pub fn new() -> Self {
        Self {
            installed_json: "[]".to_string(),
            outdated_json: "[]".to_string(),
            ..Default::default()
        }
    }

    pub fn with_installed(mut self, json: &str) -> Self {
        self.installed_json = json.to_string();
        self
    }

    pub fn with_outdated(mut self, json: &str) -> Self {
        self.outdated_json = json.to_string();
        self
    }

    pub fn with_check(mut self, stdout: &str, stderr: &str) -> Self {
        self.check_stdout = stdout.as_bytes().to_vec();
        self.check_stderr = stderr.to_string();
        self
    }

    /// Check stdout that need not be valid UTF-8
    pub fn with_check_bytes(mut self, stdout: &[u8]) -> Self {
        self.check_stdout = stdout.to_vec();
        self
    }

    pub fn failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    /// Names passed to upgrade, in call order
    pub fn upgrades(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|op| match op {
                ToolOp::Upgrade(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }
}

impl PackageTool for FakeTool {
    fn run(&self, op: &ToolOp, io: ToolIo) -> Result<ToolOutput> {
        self.calls.borrow_mut().push(op.clone());

        let (stdout, stderr, success) = match op {
            ToolOp::ListInstalled => (self.installed_json.clone().into_bytes(), String::new(), true),
            ToolOp::ListOutdated => (self.outdated_json.clone().into_bytes(), String::new(), true),
            ToolOp::Check => (
                self.check_stdout.clone(),
                self.check_stderr.clone(),
                self.check_stdout.iter().all(u8::is_ascii_whitespace),
            ),
            ToolOp::Upgrade(name) => {
                if self.upgrade_spawn_error {
                    return Err(Error::ToolSpawn {
                        program: "pip".to_string(),
                        source: std::io::Error::from(std::io::ErrorKind::NotFound),
                    });
                }
                if self.failing.contains(name) {
                    (
                        Vec::new(),
                        format!("ERROR: Could not install {}\n", name),
                        false,
                    )
                } else {
                    (
                        format!("Successfully installed {}\n", name).into_bytes(),
                        String::new(),
                        true,
                    )
                }
            }
        };
        let code = Some(if success { 0 } else { 1 });

        match io {
            ToolIo::Capture => Ok(ToolOutput {
                code,
                success,
                stdout: String::from_utf8_lossy(&stdout).into_owned(),
                stderr,
            }),
            ToolIo::Inherit => Ok(ToolOutput {
                code,
                success,
                ..Default::default()
            }),
            ToolIo::StdoutTo(mut file) => {
                file.write_all(&stdout).map_err(Error::Scratch)?;
                Ok(ToolOutput {
                    code,
                    success,
                    ..Default::default()
                })
            }
        }
    }
}

/// Temp working area holding the ledger and scratch files.
pub struct Workspace {
    pub dir: TempDir,
    pub ledger: Ledger,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(dir.path().join("deprecated.txt"));
        Self { dir, ledger }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn context<'a>(&'a self, tool: &'a FakeTool, verbose: bool) -> Context<'a> {
        Context {
            tool,
            ledger: &self.ledger,
            verbose,
            skip_deprecated: true,
            scratch_dir: self.dir.path(),
        }
    }

    /// Files left in the workspace other than the ledger
    pub fn leftovers(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p != self.ledger.path())
            .collect()
    }
}

pub const DEPRECATION_FOO: &str =
    "DEPRECATION: Loading egg at /usr/local/lib/python3.11/dist-packages/foo-1.0-py3.11.egg is deprecated.\n";

pub const DEPRECATION_BAR: &str =
    "DEPRECATION: Loading egg at /usr/local/lib/python3.11/dist-packages/bar.egg is deprecated.\n";
