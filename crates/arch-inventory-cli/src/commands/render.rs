//! Render command implementation.

use anyhow::{Context, Result};

use crate::{Section, Target};

/// Prints the selected blocks to stdout.
pub fn run(target: &Target, section: Section) -> Result<()> {
    let inventory = super::load_inventory(target)?;

    let mut blocks = Vec::new();
    if matches!(section, Section::Ports | Section::All) {
        blocks.push(
            inventory
                .render_port_block()
                .context("Failed to render port taxonomy")?,
        );
    }
    if matches!(section, Section::Dto | Section::All) {
        blocks.push(
            inventory
                .render_dto_block()
                .context("Failed to render DTO ownership")?,
        );
    }

    print!("{}", blocks.join("\n"));
    Ok(())
}
