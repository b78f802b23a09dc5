//! DTO collision detection between two boundary modules.

use crate::config::{DtoConfig, OwnerRule, OwnerSide};
use crate::types::{CollisionRow, DefinitionIndex, PathSample};

/// Owner suggested when no rule matches.
pub const UNRESOLVED_OWNER: &str = "TBD";

/// Intersects two definition indexes and suggests an owner per collision.
#[derive(Debug, Clone)]
pub struct CollisionDetector<'a> {
    config: &'a DtoConfig,
}

impl<'a> CollisionDetector<'a> {
    /// Creates a detector over the configured modules and owner rules.
    #[must_use]
    pub fn new(config: &'a DtoConfig) -> Self {
        Self { config }
    }

    /// Suggests which module should own `type_name`.
    #[must_use]
    pub fn suggest_owner(&self, type_name: &str) -> String {
        self.config
            .owner_rules
            .iter()
            .find(|rule| rule_matches(rule, type_name))
            .map_or_else(
                || UNRESOLVED_OWNER.to_string(),
                |rule| {
                    let module = match rule.owner {
                        OwnerSide::First => &self.config.first,
                        OwnerSide::Second => &self.config.second,
                    };
                    format!("{} ({})", module.name, rule.qualifier)
                },
            )
    }

    /// Produces one row per name declared in both modules, in name order.
    #[must_use]
    pub fn collisions(&self, first: &DefinitionIndex, second: &DefinitionIndex) -> Vec<CollisionRow> {
        let limit = self.config.sample_limit;
        first
            .iter()
            .filter_map(|(name, first_paths)| {
                let second_paths = second.get(name)?;
                Some(CollisionRow {
                    type_name: name.clone(),
                    first: PathSample::from_sorted(first_paths, limit),
                    second: PathSample::from_sorted(second_paths, limit),
                    suggested_owner: self.suggest_owner(name),
                })
            })
            .collect()
    }
}

fn rule_matches(rule: &OwnerRule, type_name: &str) -> bool {
    rule.contains.iter().any(|token| type_name.contains(token.as_str()))
        || rule.exact.iter().any(|exact| exact == type_name)
}
