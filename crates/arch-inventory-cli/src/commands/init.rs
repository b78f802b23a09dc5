//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::config_resolver::PROJECT_CONFIG_NAMES;

const DEFAULT_CONFIG: &str = r#"# arch-inventory configuration
# Every key is optional; the values below are the built-in defaults.

# Document holding the %% PORT TAXONOMY %% and %% DTO OWNERSHIP %% blocks
document = "docs/plans/HEXAGONAL_ARCHITECTURE_REFACTOR_MASTER_PLAN.md"

# Shown in the block footer and when `check` finds the document stale
regenerate_hint = "task arch:inventories"

[ports]
marker = "PORT TAXONOMY"
owner_tokens = ["wrldbldr_engine_ports", "wrldbldr_player_ports"]
inbound_segment = "inbound"
sample_limit = 3

[[ports.sides]]
name = "Engine"
inbound_dir = "crates/engine-ports/src/inbound"
usage_roots = ["crates/engine-app/src"]

[[ports.sides]]
name = "Player"
inbound_dir = "crates/player-ports/src/inbound"
usage_roots = ["crates/player-app/src", "crates/player-ui/src"]

[ports.classification]
boundary_dtos = ["RequestContext", "UseCaseContext"]
boundary_traits = ["RequestHandler"]
inbound_suffixes = ["UseCasePort"]
# Usage paths containing any of these are legitimate inbound consumers
boundary_dirs = [
    "/application/handlers/",
    "/application/request_handlers/",
    "/application/requests/",
    "/presentation/",
    "/routes/",
]

[dto]
marker = "DTO OWNERSHIP"
sample_limit = 3

[dto.first]
name = "engine-dto"
root = "crates/engine-dto/src"

[dto.second]
name = "engine-ports"
root = "crates/engine-ports/src"

# Evaluated in order; a colliding name matching no rule is left as TBD
[[dto.owner_rules]]
contains = ["Queue"]
exact = ["LlmResponse"]
owner = "first"
qualifier = "likely internal glue"

[[dto.owner_rules]]
contains = ["Proposal"]
exact = ["ApprovalItem"]
owner = "second"
qualifier = "likely boundary DTO"
"#;

/// Writes a commented default configuration into `root`.
pub fn run(root: &Path, force: bool) -> Result<()> {
    let config_path = root.join(PROJECT_CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Point `document` and the scan roots at your workspace");
    println!("  2. Add the marker lines to the document");
    println!("  3. Run: arch-inventory update");

    Ok(())
}
