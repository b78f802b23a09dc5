//! Update command implementation.

use anyhow::{Context, Result};
use arch_inventory_core::{RefreshMode, RefreshOutcome};

use crate::Target;

/// Regenerates both blocks and writes the document when it changed.
pub fn run(target: &Target, force: bool) -> Result<()> {
    let inventory = super::load_inventory(target)?;
    let mode = if force {
        RefreshMode::ForceWrite
    } else {
        RefreshMode::Write
    };

    let outcome = inventory
        .refresh(mode)
        .with_context(|| format!("Failed to update {}", inventory.document_display()))?;

    match outcome {
        RefreshOutcome::Updated => {
            println!("Updated inventories in: {}", inventory.document_display());
        }
        RefreshOutcome::UpToDate | RefreshOutcome::Stale => {
            println!("Inventories already up to date");
        }
    }
    Ok(())
}
