// src/packages/check.rs

//! Parsing of the package tool's consistency-check output
//!
//! `pip check` prints one problem per line on stdout:
//!
//! ```text
//! pkgA 1.0 requires pkgB, which is not installed.
//! pkgC 2.1 has requirement pkgD<2,>=1.4, but you have pkgD 2.3.
//! ```
//!
//! and deprecation notices on stderr:
//!
//! ```text
//! DEPRECATION: Loading egg at /usr/lib/python3/dist-packages/foo-1.0-py3.11.egg is deprecated.
//! ```

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static DEPRECATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"DEPRECATION:.*?/(?:dist|site)-packages/([^./\-\s]+)")
        .expect("valid deprecation regex")
});

/// Line prefix the tool uses for deprecation notices
pub const DEPRECATION_PREFIX: &str = "DEPRECATION";

/// What pip prints when everything is consistent
const NO_BROKEN_REQUIREMENTS: &str = "No broken requirements found.";

/// Characters that start a version constraint after a requirement name
const CONSTRAINT_CHARS: &[char] = &['<', '>', '~', '=', '!', ',', ';', '['];

/// One problem reported by the consistency check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyIssue {
    /// `owner` needs `dependency`, which is not installed
    Missing { owner: String, dependency: String },
    /// `owner` needs `dependency` within `constraint`, and the installed one is not
    Outdated {
        owner: String,
        dependency: String,
        constraint: String,
    },
}

impl DependencyIssue {
    pub fn owner(&self) -> &str {
        match self {
            DependencyIssue::Missing { owner, .. } | DependencyIssue::Outdated { owner, .. } => {
                owner
            }
        }
    }

    pub fn dependency(&self) -> &str {
        match self {
            DependencyIssue::Missing { dependency, .. }
            | DependencyIssue::Outdated { dependency, .. } => dependency,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, DependencyIssue::Missing { .. })
    }

    /// `<owner> <dependency>` as written to the audit scratch file
    pub fn audit_line(&self) -> String {
        format!("{} {}", self.owner(), self.dependency())
    }
}

/// Classify one line of consistency-check output
///
/// Returns `None` for lines that carry no issue (blank lines, deprecation
/// notices and the all-clear message) and an error for lines whose shape
/// is not recognized.
pub fn parse_check_line(line: &str) -> Option<Result<DependencyIssue>> {
    let trimmed = line.trim();
    if trimmed.is_empty()
        || trimmed.starts_with(DEPRECATION_PREFIX)
        || trimmed == NO_BROKEN_REQUIREMENTS
    {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    Some(classify(trimmed, &tokens))
}

fn classify(line: &str, tokens: &[&str]) -> Result<DependencyIssue> {
    let malformed = |reason: &str| Error::Parse {
        line: line.to_string(),
        reason: reason.to_string(),
    };

    let owner = tokens[0].to_string();

    // "<owner> <version> requires <dep>, ..." or "<owner> requires <dep>, ..."
    if let Some(pos) = tokens.iter().take(3).position(|t| *t == "requires") {
        if pos == 0 {
            return Err(malformed("line starts with 'requires'"));
        }
        let raw = tokens
            .get(pos + 1)
            .ok_or_else(|| malformed("nothing follows 'requires'"))?;
        let dependency = strip_qualifier(raw);
        if dependency.is_empty() {
            return Err(malformed("empty dependency name"));
        }
        return Ok(DependencyIssue::Missing {
            owner,
            dependency: dependency.to_string(),
        });
    }

    // "<owner> <version> has requirement <dep><constraint>, but you have ..."
    if tokens.get(2..4) != Some(&["has", "requirement"][..]) {
        return Err(malformed("neither a missing nor a requirement line"));
    }
    let raw = tokens
        .get(4)
        .ok_or_else(|| malformed("nothing follows 'has requirement'"))?;
    let (dependency, constraint) = split_constraint(raw);
    if dependency.is_empty() {
        return Err(malformed("requirement has no package name"));
    }
    Ok(DependencyIssue::Outdated {
        owner,
        dependency: dependency.to_string(),
        constraint: constraint.to_string(),
    })
}

/// `pkgB,` -> `pkgB`
fn strip_qualifier(raw: &str) -> &str {
    raw.split(',').next().unwrap_or_default().trim_end_matches('.')
}

/// `pkgD<2,>=1.4,` -> (`pkgD`, `<2,>=1.4`)
fn split_constraint(raw: &str) -> (&str, &str) {
    match raw.find(CONSTRAINT_CHARS) {
        Some(idx) => (&raw[..idx], raw[idx..].trim_end_matches(',')),
        None => (raw.trim_end_matches(','), ""),
    }
}

/// Package names named in deprecation notices, first-seen order, no repeats
pub fn find_deprecated(diagnostics: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for caps in DEPRECATION_RE.captures_iter(diagnostics) {
        let name = &caps[1];
        if !found.iter().any(|n| n == name) {
            found.push(name.to_string());
        }
    }
    found
}
