//! Check command implementation.

use anyhow::{Context, Result};
use arch_inventory_core::{RefreshMode, RefreshOutcome};

use crate::Target;

/// Compares the document against freshly rendered blocks without writing.
///
/// Exits with status 1 when the document is stale.
pub fn run(target: &Target) -> Result<()> {
    let inventory = super::load_inventory(target)?;
    let outcome = inventory
        .refresh(RefreshMode::Check)
        .with_context(|| format!("Failed to check {}", inventory.document_display()))?;

    if outcome == RefreshOutcome::Stale {
        println!(
            "Inventories out of date (run `{}`)",
            inventory.config().regenerate_hint
        );
        std::process::exit(1);
    }

    println!("Inventories already up to date");
    Ok(())
}
