//! Inbound usage scanning.
//!
//! Finds references of the form `owner::inbound::<tail>` where `owner` is
//! one of the configured crate identifiers. Two tail shapes are understood:
//!
//! - a path, `staging::StagingUseCasePort` → `StagingUseCasePort`
//! - a braced list, `{StagingUseCasePort, UseCaseContext}` → both names
//!
//! Only the last path segment is recorded, so `RequestContext::anonymous`
//! records `anonymous`. A braced list may also follow module segments
//! (`staging::{A, B}`). The match window only spans identifier, colon,
//! brace, comma and whitespace characters, so multi-line `use` groups are
//! covered. Nesting past the first closing brace is not tracked.

use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{ScanError, SourceTree};
use crate::types::UsageIndex;

/// Scans source roots for references into an inbound module.
#[derive(Debug, Clone)]
pub struct UsageScanner {
    pattern: Regex,
}

impl UsageScanner {
    /// Builds a scanner for the given owner crate identifiers and inbound
    /// segment (usually `"inbound"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the assembled pattern fails to compile.
    pub fn new<I, S>(owner_tokens: I, inbound_segment: &str) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let owners = owner_tokens
            .into_iter()
            .map(|t| regex::escape(t.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(
            r"\b(?:{owners})::{}::([A-Za-z0-9_:{{}}\s,]+)",
            regex::escape(inbound_segment)
        ))?;
        Ok(Self { pattern })
    }

    /// Returns every name referenced through the inbound path in `contents`.
    ///
    /// Names may repeat; callers deduplicate.
    #[must_use]
    pub fn names_in(&self, contents: &str) -> Vec<String> {
        self.pattern
            .captures_iter(contents)
            .filter_map(|caps| caps.get(1))
            .flat_map(|tail| referenced_names(tail.as_str()))
            .collect()
    }

    /// Scans every source file under each root and accumulates
    /// `name → sorted unique referencing files`.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read.
    pub fn scan(&self, tree: &SourceTree, roots: &[PathBuf]) -> Result<UsageIndex, ScanError> {
        let mut index = UsageIndex::new();
        for root in roots {
            self.scan_root(tree, root, &mut index)?;
        }
        debug!("Indexed {} inbound names across {} roots", index.len(), roots.len());
        Ok(index)
    }

    fn scan_root(&self, tree: &SourceTree, root: &Path, index: &mut UsageIndex) -> Result<(), ScanError> {
        for file in tree.files_under(root)? {
            let contents = tree.read(&file)?;
            let names = self.names_in(&contents);
            if names.is_empty() {
                continue;
            }
            let rel = tree.relative(&file);
            debug!("{}: {} inbound references", rel, names.len());
            for name in names {
                index.entry(name).or_default().insert(rel.clone());
            }
        }
        Ok(())
    }
}

/// Interprets the text matched after `inbound::`.
fn referenced_names(tail: &str) -> Vec<String> {
    let mut rest = tail.trim_start();
    if let Some(group) = rest.strip_prefix('{') {
        return group_names(group);
    }

    let mut segments = Vec::new();
    loop {
        let len = ident_len(rest);
        if len == 0 {
            break;
        }
        segments.push(&rest[..len]);
        let after = rest[len..].trim_start();
        let Some(next) = after.strip_prefix("::") else {
            break;
        };
        let next = next.trim_start();
        if let Some(group) = next.strip_prefix('{') {
            return group_names(group);
        }
        rest = next;
    }

    last_segment(&segments).into_iter().collect()
}

/// Names listed in a braced group; `group` starts just after `{`.
fn group_names(group: &str) -> Vec<String> {
    let body = group.split('}').next().unwrap_or_default();
    body.split(',')
        .filter_map(|entry| {
            let segments: Vec<&str> = entry.split("::").map(str::trim).collect();
            last_segment(&segments)
        })
        .collect()
}

/// The referenced item of a path: its last segment, if that is an
/// identifier other than `self`.
fn last_segment(segments: &[&str]) -> Option<String> {
    let last = segments.last()?;
    (is_identifier(last) && *last != "self").then(|| (*last).to_string())
}

fn ident_len(s: &str) -> usize {
    s.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(s.len())
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
