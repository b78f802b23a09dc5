//! Marker-delimited block replacement.
//!
//! A document is split into three regions: everything up to and including
//! the start marker line, the managed interior, and everything from the end
//! marker line on. Only the interior is replaced. Marker lines are matched
//! exactly (surrounding whitespace ignored) and each must occur exactly
//! once; markers are never repaired.

use miette::Diagnostic;
use thiserror::Error;
use tracing::debug;

/// Errors raised when a document's markers are unusable.
#[derive(Debug, Error, Diagnostic)]
pub enum SpliceError {
    /// A marker line is absent.
    #[error("marker `{marker}` not found")]
    #[diagnostic(
        code(arch_inventory::marker_missing),
        help("add the line `{marker}` to the document where the block should live")
    )]
    MissingMarker {
        /// The literal marker line.
        marker: String,
    },

    /// A marker line occurs more than once.
    #[error("marker `{marker}` occurs {count} times, expected exactly 1")]
    #[diagnostic(
        code(arch_inventory::marker_duplicated),
        help("remove the extra `{marker}` lines by hand; the tool never picks one")
    )]
    DuplicateMarker {
        /// The literal marker line.
        marker: String,
        /// Number of occurrences.
        count: usize,
    },

    /// The end marker precedes the start marker.
    #[error("marker `{end}` appears before `{start}`")]
    #[diagnostic(code(arch_inventory::marker_order))]
    MarkerOrder {
        /// Start marker line.
        start: String,
        /// End marker line.
        end: String,
    },
}

/// A start/end marker pair: `%% LABEL %%` … `%% /LABEL %%`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPair {
    start: String,
    end: String,
}

impl MarkerPair {
    /// Builds a pair from distinct start and end labels.
    #[must_use]
    pub fn new(start_label: &str, end_label: &str) -> Self {
        Self {
            start: format!("%% {} %%", start_label.trim()),
            end: format!("%% /{} %%", end_label.trim()),
        }
    }

    /// Builds the conventional pair sharing one label.
    #[must_use]
    pub fn labelled(label: &str) -> Self {
        Self::new(label, label)
    }

    /// The literal start marker line.
    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    /// The literal end marker line.
    #[must_use]
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Replaces the interior of the unique block delimited by this pair.
    ///
    /// The result keeps both marker lines as written and places the trimmed
    /// `replacement` between them, separated by one blank line on each side.
    ///
    /// # Errors
    ///
    /// Returns an error unless each marker line occurs exactly once with
    /// the start before the end.
    pub fn splice(&self, document: &str, replacement: &str) -> Result<String, SpliceError> {
        let start = find_unique_line(document, &self.start)?;
        let end = find_unique_line(document, &self.end)?;
        if end.begin < start.begin {
            return Err(SpliceError::MarkerOrder {
                start: self.start.clone(),
                end: self.end.clone(),
            });
        }

        let start_line = document[start.begin..start.content_end].trim_end();
        let mut out = String::with_capacity(document.len() + replacement.len());
        out.push_str(&document[..start.begin]);
        out.push_str(start_line);
        out.push_str("\n\n");
        out.push_str(replacement.trim());
        out.push_str("\n\n");
        out.push_str(&document[end.begin..]);

        debug!(
            "Spliced {} bytes between {} and {}",
            replacement.len(),
            self.start,
            self.end
        );
        Ok(out)
    }

    /// Returns the current interior of the block, trimmed.
    ///
    /// # Errors
    ///
    /// Same conditions as [`MarkerPair::splice`].
    pub fn interior<'d>(&self, document: &'d str) -> Result<&'d str, SpliceError> {
        let start = find_unique_line(document, &self.start)?;
        let end = find_unique_line(document, &self.end)?;
        if end.begin < start.begin {
            return Err(SpliceError::MarkerOrder {
                start: self.start.clone(),
                end: self.end.clone(),
            });
        }
        Ok(document[start.line_end..end.begin].trim())
    }
}

/// Byte span of one line.
struct LineSpan {
    begin: usize,
    content_end: usize,
    line_end: usize,
}

fn find_unique_line(document: &str, marker: &str) -> Result<LineSpan, SpliceError> {
    let mut found = Vec::new();
    let mut offset = 0;
    for line in document.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        if content.trim() == marker {
            found.push(LineSpan {
                begin: offset,
                content_end: offset + content.len(),
                line_end: offset + line.len(),
            });
        }
        offset += line.len();
    }

    let count = found.len();
    match found.pop() {
        Some(span) if count == 1 => Ok(span),
        Some(_) => Err(SpliceError::DuplicateMarker {
            marker: marker.to_string(),
            count,
        }),
        None => Err(SpliceError::MissingMarker {
            marker: marker.to_string(),
        }),
    }
}
