// src/config.rs

//! Optional TOML configuration
//!
//! # Example pipdoctor.toml
//!
//! ```toml
//! [tool]
//! program = "python3"
//! args = ["-m", "pip"]
//!
//! [ledger]
//! path = ".pipdoctor/deprecated.txt"
//!
//! [upgrade]
//! skip_deprecated = false
//!
//! [repair]
//! scratch_dir = "/tmp"
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "pipdoctor.toml";

/// Default deprecation ledger file name
pub const DEFAULT_LEDGER_FILE: &str = "deprecated.txt";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub tool: ToolConfig,

    #[serde(default)]
    pub ledger: LedgerConfig,

    #[serde(default)]
    pub upgrade: UpgradeConfig,

    #[serde(default)]
    pub repair: RepairConfig,
}

/// How to invoke the package tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Executable name or path
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments inserted before every subcommand
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: Vec::new(),
        }
    }
}

fn default_program() -> String {
    "pip".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default = "default_ledger_path")]
    pub path: PathBuf,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: default_ledger_path(),
        }
    }
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from(DEFAULT_LEDGER_FILE)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeConfig {
    /// Leave packages recorded in the ledger alone
    #[serde(default = "default_true")]
    pub skip_deprecated: bool,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            skip_deprecated: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairConfig {
    /// Directory that holds the dependency-check scratch files
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: PathBuf,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            scratch_dir: default_scratch_dir(),
        }
    }
}

fn default_scratch_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Config {
    /// Parse a config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Resolve the config for this run
    ///
    /// An explicit path must exist. Otherwise `pipdoctor.toml` in the working
    /// directory is used when present, and built-in defaults when not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!("Loading config from {}", path.display());
            return Self::from_file(path);
        }

        let implicit = Path::new(DEFAULT_CONFIG_FILE);
        if implicit.is_file() {
            debug!("Loading config from {}", implicit.display());
            Self::from_file(implicit)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.tool.program.trim().is_empty() {
            return Err(Error::InvalidConfig("tool.program must not be empty".to_string()));
        }
        if self.ledger.path.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("ledger.path must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tool.program, "pip");
        assert!(config.tool.args.is_empty());
        assert_eq!(config.ledger.path, PathBuf::from("deprecated.txt"));
        assert!(config.upgrade.skip_deprecated);
        assert_eq!(config.repair.scratch_dir, PathBuf::from("."));
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml(
            r#"
[tool]
program = "python3"
args = ["-m", "pip"]

[upgrade]
skip_deprecated = false
"#,
        )
        .unwrap();

        assert_eq!(config.tool.program, "python3");
        assert_eq!(config.tool.args, vec!["-m", "pip"]);
        assert!(!config.upgrade.skip_deprecated);
        assert_eq!(config.ledger.path, PathBuf::from("deprecated.txt"));
    }

    #[test]
    fn test_empty_program_rejected() {
        let err = Config::from_toml("[tool]\nprogram = \"  \"\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = Config::from_toml("[cache]\nsize = 3\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
        assert_eq!(err.exit_code(), 2);
    }
}
