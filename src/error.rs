// src/error.rs
//! Error types for pipdoctor

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while inspecting or remediating packages
#[derive(Error, Debug)]
pub enum Error {
    /// The package tool could not be started at all
    #[error("Failed to run '{program}': {source}. Is it installed and on PATH?")]
    ToolSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A consistency-check line did not have the expected shape
    #[error("Unrecognized dependency line '{line}': {reason}")]
    Parse { line: String, reason: String },

    /// Reading or appending the deprecation ledger failed
    #[error("Ledger I/O error on '{}': {source}", path.display())]
    Ledger {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Creating, writing or reading a scratch file failed
    #[error("Scratch file I/O error: {0}")]
    Scratch(#[source] std::io::Error),

    /// Config file could not be read
    #[error("Failed to read config file '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for our schema
    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config parsed but holds a value we cannot use
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Process exit code for a run aborted by this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::ConfigRead { .. } | Error::ConfigParse(_) | Error::InvalidConfig(_) => 2,
            Error::ToolSpawn { .. } => 3,
            Error::Ledger { .. } | Error::Scratch(_) => 4,
            Error::Parse { .. } => 1,
        }
    }
}

/// Result type for pipdoctor operations
pub type Result<T> = std::result::Result<T, Error>;
