//! Markdown table rendering.
//!
//! Column order is fixed per table and rows arrive sorted by name, so the
//! output for an unchanged tree is byte-identical across runs.

use std::fmt::Write;

use crate::types::{ClassificationRow, CollisionRow};

/// First cell of the placeholder row rendered for an empty table.
pub const NONE_FOUND: &str = "_(none found)_";

const PORT_HEADER: [&str; 6] = [
    "Item",
    "Kind",
    "Defined in",
    "Used in app/UI (examples)",
    "Suggested target",
    "Notes",
];

/// Port taxonomy rows for one side, in render order.
#[derive(Debug, Clone)]
pub struct PortSection {
    /// Side display name (e.g. `"Engine"`).
    pub side: String,
    /// Classified rows, sorted by name.
    pub rows: Vec<ClassificationRow>,
}

/// Renders inventory blocks.
#[derive(Debug, Clone)]
pub struct TableRenderer {
    regenerate_hint: String,
}

impl TableRenderer {
    /// Creates a renderer whose footer names `regenerate_hint`.
    #[must_use]
    pub fn new(regenerate_hint: impl Into<String>) -> Self {
        Self {
            regenerate_hint: regenerate_hint.into(),
        }
    }

    /// Renders one port taxonomy table.
    #[must_use]
    pub fn port_table(&self, rows: &[ClassificationRow]) -> String {
        let mut out = header(&PORT_HEADER);
        if rows.is_empty() {
            out.push_str(&placeholder_row(PORT_HEADER.len()));
        }
        for row in rows {
            let _ = writeln!(
                out,
                "| `{}` | {} | {} | {} | {} | {} |",
                row.name,
                row.kind,
                row.defining_path,
                row.usage,
                row.target,
                row.note()
            );
        }
        out
    }

    /// Renders the whole port taxonomy block: one headed table per side
    /// followed by the regenerate footer.
    #[must_use]
    pub fn port_block(&self, sections: &[PortSection]) -> String {
        let mut parts = Vec::with_capacity(sections.len() + 1);
        for section in sections {
            parts.push(format!(
                "#### {} inbound taxonomy\n\n{}",
                section.side,
                self.port_table(&section.rows).trim_end()
            ));
        }
        parts.push(self.footer());
        finish(&parts.join("\n\n"))
    }

    /// Renders the DTO ownership table.
    #[must_use]
    pub fn dto_table(&self, first_name: &str, second_name: &str, rows: &[CollisionRow]) -> String {
        let first_col = format!("{first_name} (examples)");
        let second_col = format!("{second_name} (examples)");
        let columns = [
            "Type name",
            first_col.as_str(),
            second_col.as_str(),
            "Suggested owner",
            "Notes",
        ];

        let mut out = header(&columns);
        if rows.is_empty() {
            out.push_str(&placeholder_row(columns.len()));
        }
        for row in rows {
            let _ = writeln!(
                out,
                "| `{}` | {} | {} | {} | {} |",
                row.type_name,
                row.first,
                row.second,
                row.suggested_owner,
                row.note()
            );
        }
        out
    }

    /// Renders the whole DTO ownership block with its footer.
    #[must_use]
    pub fn dto_block(&self, first_name: &str, second_name: &str, rows: &[CollisionRow]) -> String {
        let table = self.dto_table(first_name, second_name, rows);
        finish(&format!("{}\n\n{}", table.trim_end(), self.footer()))
    }

    fn footer(&self) -> String {
        format!("_Regenerate with `{}`._", self.regenerate_hint)
    }
}

fn header(columns: &[&str]) -> String {
    let mut out = format!("| {} |\n", columns.join(" | "));
    out.push('|');
    for _ in columns {
        out.push_str("---|");
    }
    out.push('\n');
    out
}

fn placeholder_row(width: usize) -> String {
    let mut out = format!("| {NONE_FOUND} |");
    for _ in 1..width {
        out.push_str("  |");
    }
    out.push('\n');
    out
}

fn finish(block: &str) -> String {
    format!("{}\n", block.trim())
}
