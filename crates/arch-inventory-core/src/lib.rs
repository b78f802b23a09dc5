//! # arch-inventory-core
//!
//! Regenerates architecture inventories for a hexagonal Rust workspace and
//! splices them into a living design document.
//!
//! Two independent pipelines feed the document:
//!
//! - **Port taxonomy**: public declarations in each side's `inbound`
//!   module are joined with the places that reference them through
//!   `owner::inbound::...` paths, then classified as correctly placed,
//!   boundary DTO/trait, or likely misplaced outbound ports.
//! - **DTO ownership**: data-shape declarations present in both boundary
//!   modules are listed with a suggested canonical owner.
//!
//! Both are rendered as markdown tables and written between
//! `%% LABEL %%` / `%% /LABEL %%` marker lines.
//!
//! ```text
//! source tree ─┬─ declarations ─┐
//!              └─ usages ───────┴─ Classifier ─ TableRenderer ─ MarkerPair::splice
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use arch_inventory_core::{Inventory, InventoryConfig, RefreshMode};
//!
//! let inventory = Inventory::builder()
//!     .root(".")
//!     .config(InventoryConfig::default())
//!     .build()?;
//!
//! let outcome = inventory.refresh(RefreshMode::Check)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod classify;
mod config;
mod dto;
mod inventory;
mod render;
mod splice;
mod types;

/// Text scanners for declarations and inbound usages.
pub mod scan;

pub use classify::{Classifier, Predicate, TaxonomyRule};
pub use config::{
    ClassificationConfig, ConfigError, DtoConfig, DtoModule, InventoryConfig, OwnerRule,
    OwnerSide, PortSide, PortsConfig,
};
pub use dto::{CollisionDetector, UNRESOLVED_OWNER};
pub use inventory::{Inventory, InventoryBuilder, InventoryError, RefreshMode, RefreshOutcome};
pub use render::{PortSection, TableRenderer, NONE_FOUND};
pub use splice::{MarkerPair, SpliceError};
pub use types::{
    ClassificationRow, CollisionRow, DeclKind, DefinitionIndex, PathSample, PortTarget,
    PublicItem, UsageIndex, COLLISION_NOTE,
};

/// Compiles a pattern literal embedded in this crate.
#[allow(clippy::expect_used)]
pub(crate) fn compile_pattern(pattern: &str) -> regex::Regex {
    regex::Regex::new(pattern).expect("built-in pattern is valid")
}
