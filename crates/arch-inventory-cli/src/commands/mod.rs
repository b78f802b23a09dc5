//! Subcommand implementations.

pub mod check;
pub mod init;
pub mod render;
pub mod update;

use anyhow::{Context, Result};
use arch_inventory_core::Inventory;

use crate::config_resolver;
use crate::Target;

/// Resolves the configuration for `target` and builds the inventory.
fn load_inventory(target: &Target) -> Result<Inventory> {
    let source = config_resolver::resolve(&target.root, target.config.as_deref());
    let config = source.load()?;

    let mut builder = Inventory::builder().root(&target.root).config(config);
    if let Some(document) = &target.document {
        builder = builder.document(document);
    }
    let inventory = builder.build().context("Failed to build inventory")?;

    tracing::debug!(
        "Inventory target: {} (config: {:?})",
        inventory.document_display(),
        source
    );
    Ok(inventory)
}
