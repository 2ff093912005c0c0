// src/ledger.rs

//! Deprecation ledger
//!
//! A plain text file with one package name per line. It only ever grows:
//! new names are appended and existing content is never rewritten, so the
//! file may hold duplicates written by earlier runs.

use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Handle to the ledger file
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries in file order, duplicates kept; `None` when the file is absent
    ///
    /// Invalid UTF-8 is replaced rather than rejected so one bad line does
    /// not hide the rest of the ledger.
    pub fn entries(&self) -> Result<Option<Vec<String>>> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(
                String::from_utf8_lossy(&bytes)
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(String::from)
                    .collect(),
            )),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(self.io_error(source)),
        }
    }

    /// Known names as a set; an absent file is an empty ledger
    pub fn load(&self) -> Result<BTreeSet<String>> {
        let set: BTreeSet<String> = self.entries()?.unwrap_or_default().into_iter().collect();
        debug!("Loaded {} ledger entries from {}", set.len(), self.path.display());
        Ok(set)
    }

    /// Append names, one per line, creating the file if needed
    pub fn append<'a>(&self, names: impl IntoIterator<Item = &'a String>) -> Result<usize> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        let mut written = 0;
        for name in names {
            writeln!(file, "{}", name).map_err(|e| self.io_error(e))?;
            written += 1;
        }
        debug!("Appended {} entries to {}", written, self.path.display());
        Ok(written)
    }

    fn io_error(&self, source: std::io::Error) -> Error {
        Error::Ledger {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ledger_in(dir: &TempDir) -> Ledger {
        Ledger::new(dir.path().join("deprecated.txt"))
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);
        assert!(ledger.entries().unwrap().is_none());
        assert!(ledger.load().unwrap().is_empty());
    }

    #[test]
    fn test_append_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);

        let first: BTreeSet<String> = ["foo".to_string()].into();
        assert_eq!(ledger.append(&first).unwrap(), 1);

        let second: BTreeSet<String> = ["bar".to_string(), "baz".to_string()].into();
        ledger.append(&second).unwrap();

        assert_eq!(
            ledger.entries().unwrap().unwrap(),
            vec!["foo", "bar", "baz"]
        );
        assert_eq!(ledger.load().unwrap().len(), 3);
    }

    #[test]
    fn test_append_nothing_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);
        assert_eq!(ledger.append(&BTreeSet::new()).unwrap(), 0);
        assert_eq!(ledger.entries().unwrap(), Some(Vec::new()));
    }

    #[test]
    fn test_duplicates_in_file_collapse_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);
        std::fs::write(ledger.path(), "foo\n\nfoo\n  bar  \n").unwrap();

        assert_eq!(ledger.entries().unwrap().unwrap(), vec!["foo", "foo", "bar"]);
        let set = ledger.load().unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec!["bar", "foo"]);
    }

    #[test]
    fn test_invalid_utf8_keeps_valid_entries() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);
        std::fs::write(ledger.path(), b"foo\n\xff\xfe\nbar\n").unwrap();

        let entries = ledger.entries().unwrap().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], "foo");
        assert_eq!(entries[2], "bar");
    }

    #[test]
    fn test_directory_at_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = ledger_in(&dir);
        std::fs::create_dir(ledger.path()).unwrap();

        let err = ledger.load().unwrap_err();
        assert!(matches!(err, Error::Ledger { .. }));
    }

    #[test]
    fn test_append_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(dir.path().join("state").join("deprecated.txt"));
        ledger.append(&BTreeSet::from(["foo".to_string()])).unwrap();
        assert!(ledger.path().exists());
    }
}
