//! Configuration types for arch-inventory.
//!
//! Every field has a default matching the hexagonal layout the tool was
//! written for, so an empty `arch-inventory.toml` is a valid configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Top-level configuration for arch-inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Target document, relative to the workspace root.
    #[serde(default = "default_document")]
    pub document: PathBuf,

    /// Command shown in the regenerate footer and the stale message.
    #[serde(default = "default_regenerate_hint")]
    pub regenerate_hint: String,

    /// Port taxonomy pipeline.
    #[serde(default)]
    pub ports: PortsConfig,

    /// DTO ownership pipeline.
    #[serde(default)]
    pub dto: DtoConfig,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            document: default_document(),
            regenerate_hint: default_regenerate_hint(),
            ports: PortsConfig::default(),
            dto: DtoConfig::default(),
        }
    }
}

impl InventoryConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Validates config consistency.
    ///
    /// # Errors
    ///
    /// Returns error describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ports.marker.trim().is_empty() {
            return Err(ConfigError::Validation("ports.marker is empty".into()));
        }
        if self.dto.marker.trim().is_empty() {
            return Err(ConfigError::Validation("dto.marker is empty".into()));
        }
        if self.ports.marker.trim() == self.dto.marker.trim() {
            return Err(ConfigError::Validation(format!(
                "ports.marker and dto.marker are both '{}'",
                self.ports.marker
            )));
        }
        let classification = &self.ports.classification;
        let lists = [
            ("ports.owner_tokens", &self.ports.owner_tokens),
            ("ports.classification.boundary_dtos", &classification.boundary_dtos),
            ("ports.classification.boundary_traits", &classification.boundary_traits),
            ("ports.classification.inbound_suffixes", &classification.inbound_suffixes),
            ("ports.classification.boundary_dirs", &classification.boundary_dirs),
        ];
        for (key, entries) in lists {
            reject_blank(key, entries)?;
        }
        for (i, rule) in self.dto.owner_rules.iter().enumerate() {
            reject_blank(&format!("dto.owner_rules[{i}].contains"), &rule.contains)?;
            reject_blank(&format!("dto.owner_rules[{i}].exact"), &rule.exact)?;
        }

        if self.ports.owner_tokens.is_empty() {
            return Err(ConfigError::Validation(
                "ports.owner_tokens must name at least one crate".into(),
            ));
        }
        if self.ports.inbound_segment.trim().is_empty() {
            return Err(ConfigError::Validation(
                "ports.inbound_segment is empty".into(),
            ));
        }
        if self.ports.sample_limit == 0 || self.dto.sample_limit == 0 {
            return Err(ConfigError::Validation(
                "sample_limit must be at least 1".into(),
            ));
        }

        let mut seen = HashSet::new();
        for side in &self.ports.sides {
            if !seen.insert(side.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "ports.sides: duplicate side '{}'",
                    side.name
                )));
            }
        }

        if self.dto.first.name == self.dto.second.name {
            return Err(ConfigError::Validation(format!(
                "dto.first and dto.second are both named '{}'",
                self.dto.first.name
            )));
        }

        Ok(())
    }
}

/// Fails if any of `entries` is blank.
fn reject_blank(key: &str, entries: &[String]) -> Result<(), ConfigError> {
    if entries.iter().any(|e| e.trim().is_empty()) {
        return Err(ConfigError::Validation(format!("{key} contains a blank entry")));
    }
    Ok(())
}

/// Port taxonomy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortsConfig {
    /// Marker label delimiting the taxonomy block.
    #[serde(default = "default_ports_marker")]
    pub marker: String,

    /// Crate identifiers whose `inbound` module is tracked.
    #[serde(default = "default_owner_tokens")]
    pub owner_tokens: Vec<String>,

    /// Module segment that follows an owner token.
    #[serde(default = "default_inbound_segment")]
    pub inbound_segment: String,

    /// Maximum number of usage paths shown per cell.
    #[serde(default = "default_sample_limit")]
    pub sample_limit: usize,

    /// One taxonomy table per side, rendered in order.
    #[serde(default = "default_sides")]
    pub sides: Vec<PortSide>,

    /// Exception tables feeding the classifier.
    #[serde(default)]
    pub classification: ClassificationConfig,
}

impl Default for PortsConfig {
    fn default() -> Self {
        Self {
            marker: default_ports_marker(),
            owner_tokens: default_owner_tokens(),
            inbound_segment: default_inbound_segment(),
            sample_limit: default_sample_limit(),
            sides: default_sides(),
            classification: ClassificationConfig::default(),
        }
    }
}

/// A layer whose inbound ports are inventoried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSide {
    /// Display name used in the table heading (e.g. `"Engine"`).
    pub name: String,
    /// Directory holding the inbound port declarations.
    pub inbound_dir: PathBuf,
    /// Directories scanned for inbound references.
    pub usage_roots: Vec<PathBuf>,
}

/// Data tables for the port classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Names always treated as cross-cutting boundary DTOs.
    #[serde(default = "default_boundary_dtos")]
    pub boundary_dtos: Vec<String>,

    /// Names always treated as boundary traits.
    #[serde(default = "default_boundary_traits")]
    pub boundary_traits: Vec<String>,

    /// Name suffixes that denote a use-case port.
    #[serde(default = "default_inbound_suffixes")]
    pub inbound_suffixes: Vec<String>,

    /// Path substrings marking legitimate consumers of inbound ports.
    #[serde(default = "default_boundary_dirs")]
    pub boundary_dirs: Vec<String>,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            boundary_dtos: default_boundary_dtos(),
            boundary_traits: default_boundary_traits(),
            inbound_suffixes: default_inbound_suffixes(),
            boundary_dirs: default_boundary_dirs(),
        }
    }
}

/// DTO ownership configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DtoConfig {
    /// Marker label delimiting the ownership block.
    #[serde(default = "default_dto_marker")]
    pub marker: String,

    /// Maximum number of definition paths shown per cell.
    #[serde(default = "default_sample_limit")]
    pub sample_limit: usize,

    /// First boundary module (left column).
    #[serde(default = "default_dto_first")]
    pub first: DtoModule,

    /// Second boundary module (right column).
    #[serde(default = "default_dto_second")]
    pub second: DtoModule,

    /// Ordered owner suggestion rules; the first match wins.
    #[serde(default = "default_owner_rules")]
    pub owner_rules: Vec<OwnerRule>,
}

impl Default for DtoConfig {
    fn default() -> Self {
        Self {
            marker: default_dto_marker(),
            sample_limit: default_sample_limit(),
            first: default_dto_first(),
            second: default_dto_second(),
            owner_rules: default_owner_rules(),
        }
    }
}

/// A module scanned for data-shape declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DtoModule {
    /// Display name used in column headers and owner suggestions.
    pub name: String,
    /// Source root of the module.
    pub root: PathBuf,
}

/// Which DTO module an owner rule points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerSide {
    /// `dto.first`
    First,
    /// `dto.second`
    Second,
}

/// Suggests an owning module for colliding type names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRule {
    /// Fires when the name contains any of these substrings.
    #[serde(default)]
    pub contains: Vec<String>,
    /// Fires when the name equals any of these.
    #[serde(default)]
    pub exact: Vec<String>,
    /// Suggested owner.
    pub owner: OwnerSide,
    /// Parenthesised qualifier appended to the owner name.
    pub qualifier: String,
}

fn default_document() -> PathBuf {
    PathBuf::from("docs/plans/HEXAGONAL_ARCHITECTURE_REFACTOR_MASTER_PLAN.md")
}

fn default_regenerate_hint() -> String {
    "task arch:inventories".to_string()
}

fn default_ports_marker() -> String {
    "PORT TAXONOMY".to_string()
}

fn default_dto_marker() -> String {
    "DTO OWNERSHIP".to_string()
}

fn default_owner_tokens() -> Vec<String> {
    vec![
        "wrldbldr_engine_ports".to_string(),
        "wrldbldr_player_ports".to_string(),
    ]
}

fn default_inbound_segment() -> String {
    "inbound".to_string()
}

fn default_sample_limit() -> usize {
    3
}

fn default_sides() -> Vec<PortSide> {
    vec![
        PortSide {
            name: "Engine".to_string(),
            inbound_dir: PathBuf::from("crates/engine-ports/src/inbound"),
            usage_roots: vec![PathBuf::from("crates/engine-app/src")],
        },
        PortSide {
            name: "Player".to_string(),
            inbound_dir: PathBuf::from("crates/player-ports/src/inbound"),
            usage_roots: vec![
                PathBuf::from("crates/player-app/src"),
                PathBuf::from("crates/player-ui/src"),
            ],
        },
    ]
}

fn default_boundary_dtos() -> Vec<String> {
    vec!["RequestContext".to_string(), "UseCaseContext".to_string()]
}

fn default_boundary_traits() -> Vec<String> {
    vec!["RequestHandler".to_string()]
}

fn default_inbound_suffixes() -> Vec<String> {
    vec!["UseCasePort".to_string()]
}

fn default_boundary_dirs() -> Vec<String> {
    [
        "/application/handlers/",
        "/application/request_handlers/",
        "/application/requests/",
        "/presentation/",
        "/routes/",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_dto_first() -> DtoModule {
    DtoModule {
        name: "engine-dto".to_string(),
        root: PathBuf::from("crates/engine-dto/src"),
    }
}

fn default_dto_second() -> DtoModule {
    DtoModule {
        name: "engine-ports".to_string(),
        root: PathBuf::from("crates/engine-ports/src"),
    }
}

fn default_owner_rules() -> Vec<OwnerRule> {
    vec![
        OwnerRule {
            contains: vec!["Queue".to_string()],
            exact: vec!["LlmResponse".to_string()],
            owner: OwnerSide::First,
            qualifier: "likely internal glue".to_string(),
        },
        OwnerRule {
            contains: vec!["Proposal".to_string()],
            exact: vec!["ApprovalItem".to_string()],
            owner: OwnerSide::Second,
            qualifier: "likely boundary DTO".to_string(),
        },
    ]
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Config is structurally invalid.
    #[error("config validation: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = InventoryConfig::parse("").expect("parse failed");
        assert_eq!(config.ports.marker, "PORT TAXONOMY");
        assert_eq!(config.dto.marker, "DTO OWNERSHIP");
        assert_eq!(config.ports.sides.len(), 2);
        assert_eq!(config.ports.sides[0].name, "Engine");
        assert_eq!(config.ports.sample_limit, 3);
        assert_eq!(config.dto.owner_rules.len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_overrides_nested_tables() {
        let toml = r#"
document = "docs/ARCH.md"
regenerate_hint = "just inventories"

[ports]
owner_tokens = ["acme_ports"]

[[ports.sides]]
name = "Core"
inbound_dir = "crates/core-ports/src/inbound"
usage_roots = ["crates/core-app/src"]

[ports.classification]
boundary_dtos = ["Envelope"]

[dto]
sample_limit = 2

[dto.first]
name = "core-dto"
root = "crates/core-dto/src"

[[dto.owner_rules]]
contains = ["Event"]
owner = "second"
qualifier = "likely boundary DTO"
"#;
        let config = InventoryConfig::parse(toml).expect("parse failed");
        assert_eq!(config.document, PathBuf::from("docs/ARCH.md"));
        assert_eq!(config.ports.owner_tokens, vec!["acme_ports".to_string()]);
        assert_eq!(config.ports.sides.len(), 1);
        assert_eq!(config.ports.classification.boundary_dtos, vec!["Envelope"]);
        // untouched tables keep their defaults
        assert_eq!(config.ports.classification.boundary_traits, vec!["RequestHandler"]);
        assert_eq!(config.dto.first.name, "core-dto");
        assert_eq!(config.dto.second.name, "engine-ports");
        assert_eq!(config.dto.owner_rules.len(), 1);
        assert_eq!(config.dto.owner_rules[0].owner, OwnerSide::Second);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_rejects_invalid_toml() {
        let err = InventoryConfig::parse("ports = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn validate_catches_duplicate_sides() {
        let mut config = InventoryConfig::default();
        config.ports.sides.push(config.ports.sides[0].clone());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Engine"));
    }

    #[test]
    fn validate_catches_shared_marker() {
        let mut config = InventoryConfig::default();
        config.dto.marker = config.ports.marker.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_catches_zero_sample_limit() {
        let mut config = InventoryConfig::default();
        config.dto.sample_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_catches_blank_owner_token() {
        let config = InventoryConfig::parse("[ports]\nowner_tokens = [\"acme_ports\", \"\"]\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ports.owner_tokens"));
    }

    #[test]
    fn validate_catches_blank_boundary_dir() {
        let mut config = InventoryConfig::default();
        config.ports.classification.boundary_dirs.push("  ".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("boundary_dirs"));
    }

    #[test]
    fn validate_catches_blank_owner_rule_token() {
        let mut config = InventoryConfig::default();
        config.dto.owner_rules[1].contains.push(String::new());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("dto.owner_rules[1].contains"));
    }

    #[test]
    fn validate_catches_missing_owner_tokens() {
        let mut config = InventoryConfig::default();
        config.ports.owner_tokens.clear();
        assert!(config.validate().is_err());
    }
}
