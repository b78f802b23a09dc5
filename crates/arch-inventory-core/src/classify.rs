//! Port taxonomy classification.
//!
//! The classifier is an ordered list of predicate → verdict rules. The
//! first rule whose predicate holds decides the target; when none fires
//! the item stays `inbound`. Results are hints for a human reviewer: the
//! rules know nothing about aliases, re-exports or indirect references.

use std::collections::BTreeSet;

use crate::config::ClassificationConfig;
use crate::scan::declarations::first_definitions;
use crate::types::{ClassificationRow, PathSample, PortTarget, PublicItem, UsageIndex};

/// Condition tested against an item name and its usage files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Name equals one of these.
    NameIn(BTreeSet<String>),
    /// Name ends with one of these suffixes.
    NameEndsWith(Vec<String>),
    /// At least one usage file lies outside every boundary directory.
    UsedOutsideBoundary(Vec<String>),
}

impl Predicate {
    /// Evaluates the predicate.
    #[must_use]
    pub fn holds(&self, name: &str, usages: &BTreeSet<String>) -> bool {
        match self {
            Self::NameIn(names) => names.contains(name),
            Self::NameEndsWith(suffixes) => suffixes.iter().any(|s| name.ends_with(s.as_str())),
            Self::UsedOutsideBoundary(dirs) => usages
                .iter()
                .any(|path| !dirs.iter().any(|dir| path.contains(dir.as_str()))),
        }
    }
}

/// A single classification rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyRule {
    /// Condition.
    pub predicate: Predicate,
    /// Verdict when the condition holds.
    pub target: PortTarget,
}

/// Ordered rule set for inbound port placement.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<TaxonomyRule>,
    fallback: PortTarget,
}

impl Classifier {
    /// Builds the standard rule order from configuration:
    /// boundary DTO names, boundary trait names, use-case suffixes,
    /// usage outside boundary directories.
    #[must_use]
    pub fn from_config(config: &ClassificationConfig) -> Self {
        let rules = vec![
            TaxonomyRule {
                predicate: Predicate::NameIn(config.boundary_dtos.iter().cloned().collect()),
                target: PortTarget::InboundBoundaryDto,
            },
            TaxonomyRule {
                predicate: Predicate::NameIn(config.boundary_traits.iter().cloned().collect()),
                target: PortTarget::InboundBoundaryTrait,
            },
            TaxonomyRule {
                predicate: Predicate::NameEndsWith(config.inbound_suffixes.clone()),
                target: PortTarget::Inbound,
            },
            TaxonomyRule {
                predicate: Predicate::UsedOutsideBoundary(config.boundary_dirs.clone()),
                target: PortTarget::OutboundMisplaced,
            },
        ];
        Self::with_rules(rules)
    }

    /// Builds a classifier from an explicit rule list.
    #[must_use]
    pub fn with_rules(rules: Vec<TaxonomyRule>) -> Self {
        Self {
            rules,
            fallback: PortTarget::Inbound,
        }
    }

    /// Returns the rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[TaxonomyRule] {
        &self.rules
    }

    /// Suggests a target for one item.
    #[must_use]
    pub fn classify(&self, name: &str, usages: &BTreeSet<String>) -> PortTarget {
        self.rules
            .iter()
            .find(|rule| rule.predicate.holds(name, usages))
            .map_or(self.fallback, |rule| rule.target)
    }

    /// Joins declarations with usages and classifies each declared name.
    ///
    /// `items` must be sorted by `(name, path)`; one row is produced per
    /// name, in name order.
    #[must_use]
    pub fn rows(
        &self,
        items: &[PublicItem],
        usage: &UsageIndex,
        sample_limit: usize,
    ) -> Vec<ClassificationRow> {
        let empty = BTreeSet::new();
        first_definitions(items)
            .into_iter()
            .map(|(name, item)| {
                let used = usage.get(name).unwrap_or(&empty);
                ClassificationRow {
                    name: name.to_string(),
                    kind: item.kind,
                    defining_path: item.defining_path.clone(),
                    usage: PathSample::from_sorted(used, sample_limit),
                    target: self.classify(name, used),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeclKind;

    fn classifier() -> Classifier {
        Classifier::from_config(&ClassificationConfig::default())
    }

    fn used(paths: &[&str]) -> BTreeSet<String> {
        paths.iter().map(|p| (*p).to_string()).collect()
    }

    #[test]
    fn boundary_dto_wins_over_misplaced_usage() {
        let usages = used(&["crates/engine-app/src/services/a.rs"]);
        assert_eq!(
            classifier().classify("UseCaseContext", &usages),
            PortTarget::InboundBoundaryDto
        );
    }

    #[test]
    fn boundary_trait_is_recognised() {
        let usages = used(&["crates/engine-app/src/services/a.rs"]);
        assert_eq!(
            classifier().classify("RequestHandler", &usages),
            PortTarget::InboundBoundaryTrait
        );
    }

    #[test]
    fn use_case_suffix_stays_inbound() {
        let usages = used(&["crates/engine-app/src/services/a.rs"]);
        assert_eq!(
            classifier().classify("StagingUseCasePort", &usages),
            PortTarget::Inbound
        );
    }

    #[test]
    fn usage_outside_boundary_is_misplaced() {
        let usages = used(&[
            "crates/engine-app/src/application/handlers/h.rs",
            "crates/engine-app/src/services/s.rs",
        ]);
        assert_eq!(
            classifier().classify("AppStatePort", &usages),
            PortTarget::OutboundMisplaced
        );
    }

    #[test]
    fn boundary_only_usage_stays_inbound() {
        let usages = used(&[
            "crates/engine-app/src/application/handlers/h.rs",
            "crates/player-ui/src/presentation/view.rs",
            "crates/engine-app/src/routes/api.rs",
        ]);
        assert_eq!(classifier().classify("AppStatePort", &usages), PortTarget::Inbound);
    }

    #[test]
    fn no_usage_defaults_to_inbound() {
        assert_eq!(
            classifier().classify("AppStatePort", &BTreeSet::new()),
            PortTarget::Inbound
        );
    }

    #[test]
    fn custom_rules_apply_in_order() {
        let c = Classifier::with_rules(vec![
            TaxonomyRule {
                predicate: Predicate::NameEndsWith(vec!["Port".into()]),
                target: PortTarget::OutboundMisplaced,
            },
            TaxonomyRule {
                predicate: Predicate::NameIn(used(&["AppStatePort"])),
                target: PortTarget::InboundBoundaryDto,
            },
        ]);
        assert_eq!(c.classify("AppStatePort", &BTreeSet::new()), PortTarget::OutboundMisplaced);
        assert_eq!(c.classify("Other", &BTreeSet::new()), PortTarget::Inbound);
    }

    #[test]
    fn rows_pick_first_definition_and_sample_usage() {
        let items = vec![
            PublicItem::new("AppStatePort", DeclKind::Trait, "ports/a.rs"),
            PublicItem::new("AppStatePort", DeclKind::Trait, "ports/b.rs"),
            PublicItem::new("Unused", DeclKind::Struct, "ports/c.rs"),
        ];
        let mut usage = UsageIndex::new();
        usage.insert(
            "AppStatePort".into(),
            used(&["a/1.rs", "a/2.rs", "a/3.rs", "a/4.rs", "a/5.rs"]),
        );

        let rows = classifier().rows(&items, &usage, 3);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "AppStatePort");
        assert_eq!(rows[0].defining_path, "ports/a.rs");
        assert_eq!(rows[0].usage.to_string(), "a/1.rs, a/2.rs, a/3.rs (+2 more)");
        assert_eq!(rows[0].target, PortTarget::OutboundMisplaced);
        assert_eq!(rows[1].name, "Unused");
        assert!(rows[1].usage.is_empty());
        assert_eq!(rows[1].target, PortTarget::Inbound);
    }
}
