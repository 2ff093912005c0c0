// src/packages/pip.rs

//! Run pip as a subprocess

use super::{PackageTool, ToolIo, ToolOp, ToolOutput};
use crate::config::ToolConfig;
use crate::error::{Error, Result};
use std::process::{Command, Stdio};
use tracing::debug;

/// pip, or anything that speaks its command line
#[derive(Debug, Clone)]
pub struct Pip {
    program: String,
    prefix_args: Vec<String>,
}

impl Pip {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            prefix_args: Vec::new(),
        }
    }

    /// Build from the `[tool]` config section
    pub fn from_config(config: &ToolConfig) -> Self {
        Self {
            program: config.program.clone(),
            prefix_args: config.args.clone(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Check whether the program can be found on PATH
    pub fn is_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    /// Full argument vector for an operation, prefix args included
    pub fn args_for(&self, op: &ToolOp) -> Vec<String> {
        let mut args = self.prefix_args.clone();
        match op {
            ToolOp::ListInstalled => args.extend(["list", "--format=json"].map(String::from)),
            ToolOp::ListOutdated => {
                args.extend(["list", "--outdated", "--format=json"].map(String::from))
            }
            ToolOp::Check => args.push("check".to_string()),
            ToolOp::Upgrade(name) => {
                args.extend(["install", "--upgrade"].map(String::from));
                args.push(name.clone());
            }
        }
        args
    }
}

impl PackageTool for Pip {
    fn run(&self, op: &ToolOp, io: ToolIo) -> Result<ToolOutput> {
        let args = self.args_for(op);
        debug!("Running {} {}", self.program, args.join(" "));

        let mut command = Command::new(&self.program);
        command.args(&args).stdin(Stdio::null());

        let spawn_err = |source| Error::ToolSpawn {
            program: self.program.clone(),
            source,
        };

        let output = match io {
            ToolIo::Capture => {
                let out = command.output().map_err(spawn_err)?;
                ToolOutput {
                    code: out.status.code(),
                    success: out.status.success(),
                    stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
                }
            }
            ToolIo::Inherit => {
                let status = command.status().map_err(spawn_err)?;
                ToolOutput {
                    code: status.code(),
                    success: status.success(),
                    ..Default::default()
                }
            }
            ToolIo::StdoutTo(file) => {
                let status = command
                    .stdout(Stdio::from(file))
                    .stderr(Stdio::null())
                    .status()
                    .map_err(spawn_err)?;
                ToolOutput {
                    code: status.code(),
                    success: status.success(),
                    ..Default::default()
                }
            }
        };

        debug!("{} exited with {:?}", self.program, output.code);
        Ok(output)
    }
}
