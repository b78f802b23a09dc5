//! Core types shared by the scanners, the classifiers and the renderer.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Kind of a public declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeclKind {
    /// `pub trait Foo`
    Trait,
    /// `pub struct Foo`
    Struct,
    /// `pub enum Foo`
    Enum,
    /// `pub type Foo = ...;`
    TypeAlias,
}

impl DeclKind {
    /// Maps the declaration keyword to a kind.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "trait" => Some(Self::Trait),
            "struct" => Some(Self::Struct),
            "enum" => Some(Self::Enum),
            "type" => Some(Self::TypeAlias),
            _ => None,
        }
    }

    /// Returns `true` for declarations that describe a data shape.
    #[must_use]
    pub fn is_data_shape(self) -> bool {
        !matches!(self, Self::Trait)
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trait => write!(f, "trait"),
            Self::Struct => write!(f, "struct"),
            Self::Enum => write!(f, "enum"),
            Self::TypeAlias => write!(f, "type"),
        }
    }
}

/// A public type-level declaration found in a source file.
///
/// Ordering is `(name, defining_path, kind)`, which is the order the
/// renderer uses to pick one definition per name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PublicItem {
    /// Declared identifier.
    pub name: String,
    /// Defining file, relative to the workspace root.
    pub defining_path: String,
    /// Declaration kind.
    pub kind: DeclKind,
}

impl PublicItem {
    /// Creates a new item.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: DeclKind, defining_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            defining_path: defining_path.into(),
            kind,
        }
    }
}

/// Referenced name → files that reference it, both sorted.
pub type UsageIndex = BTreeMap<String, BTreeSet<String>>;

/// Declared name → files that declare it, both sorted.
pub type DefinitionIndex = BTreeMap<String, BTreeSet<String>>;

/// A bounded sample of paths with an overflow count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathSample {
    /// Up to `limit` paths, in sorted order.
    pub shown: Vec<String>,
    /// Number of paths left out.
    pub overflow: usize,
}

impl PathSample {
    /// Takes the first `limit` entries of an already sorted sequence.
    #[must_use]
    pub fn from_sorted<'a, I>(paths: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut shown = Vec::new();
        let mut overflow = 0;
        for path in paths {
            if shown.len() < limit {
                shown.push(path.clone());
            } else {
                overflow += 1;
            }
        }
        Self { shown, overflow }
    }

    /// Returns `true` if there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }
}

impl fmt::Display for PathSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.shown.join(", "))?;
        if self.overflow > 0 {
            write!(f, " (+{} more)", self.overflow)?;
        }
        Ok(())
    }
}

/// Suggested placement of an inbound item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortTarget {
    /// Cross-cutting DTO that belongs on the boundary.
    InboundBoundaryDto,
    /// Boundary trait implemented by adapters.
    InboundBoundaryTrait,
    /// Correctly placed inbound port.
    Inbound,
    /// Declared inbound but consumed outside the boundary.
    OutboundMisplaced,
}

impl PortTarget {
    /// Fixed triage note for this verdict.
    #[must_use]
    pub fn note(self) -> &'static str {
        match self {
            Self::OutboundMisplaced => "Move to outbound; update app deps; remove inbound re-export",
            Self::InboundBoundaryDto | Self::InboundBoundaryTrait => {
                "Keep in inbound; ensure it does not leak into services"
            }
            Self::Inbound => "Keep in inbound; ensure only adapters/UI import",
        }
    }
}

impl fmt::Display for PortTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InboundBoundaryDto => write!(f, "inbound (boundary DTO)"),
            Self::InboundBoundaryTrait => write!(f, "inbound (boundary trait)"),
            Self::Inbound => write!(f, "inbound"),
            Self::OutboundMisplaced => write!(f, "outbound (misplaced today)"),
        }
    }
}

/// One row of a port taxonomy table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRow {
    /// Item name.
    pub name: String,
    /// Declaration kind of the chosen definition.
    pub kind: DeclKind,
    /// Chosen defining file.
    pub defining_path: String,
    /// Sample of referencing files.
    pub usage: PathSample,
    /// Suggested placement.
    pub target: PortTarget,
}

impl ClassificationRow {
    /// Triage note derived from the target.
    #[must_use]
    pub fn note(&self) -> &'static str {
        self.target.note()
    }
}

/// Remediation note carried by every collision row.
pub const COLLISION_NOTE: &str =
    "Pick one canonical definition; delete the shadow copy; migrate imports";

/// One row of the DTO ownership table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionRow {
    /// Colliding type name.
    pub type_name: String,
    /// Definitions in the first module.
    pub first: PathSample,
    /// Definitions in the second module.
    pub second: PathSample,
    /// Suggested owner, or `TBD`.
    pub suggested_owner: String,
}

impl CollisionRow {
    /// Remediation note.
    #[must_use]
    pub fn note(&self) -> &'static str {
        COLLISION_NOTE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("src/f{i}.rs")).collect()
    }

    #[test]
    fn sample_truncates_with_overflow() {
        let all = paths(5);
        let sample = PathSample::from_sorted(&all, 3);
        assert_eq!(sample.shown.len(), 3);
        assert_eq!(sample.overflow, 2);
        assert_eq!(
            sample.to_string(),
            "src/f1.rs, src/f2.rs, src/f3.rs (+2 more)"
        );
    }

    #[test]
    fn sample_at_limit_has_no_suffix() {
        let all = paths(3);
        let sample = PathSample::from_sorted(&all, 3);
        assert_eq!(sample.to_string(), "src/f1.rs, src/f2.rs, src/f3.rs");
    }

    #[test]
    fn empty_sample_renders_empty() {
        let sample = PathSample::from_sorted(&Vec::<String>::new(), 3);
        assert!(sample.is_empty());
        assert_eq!(sample.to_string(), "");
    }

    #[test]
    fn public_items_sort_by_name_then_path() {
        let mut items = vec![
            PublicItem::new("B", DeclKind::Struct, "a.rs"),
            PublicItem::new("A", DeclKind::Trait, "z.rs"),
            PublicItem::new("A", DeclKind::Enum, "b.rs"),
        ];
        items.sort();
        assert_eq!(items[0].defining_path, "b.rs");
        assert_eq!(items[1].defining_path, "z.rs");
        assert_eq!(items[2].name, "B");
    }

    #[test]
    fn boundary_verdicts_share_a_note() {
        assert_eq!(
            PortTarget::InboundBoundaryDto.note(),
            PortTarget::InboundBoundaryTrait.note()
        );
        assert_ne!(PortTarget::Inbound.note(), PortTarget::OutboundMisplaced.note());
    }
}
