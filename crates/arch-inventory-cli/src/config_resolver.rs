//! Configuration file resolution with global fallback.
//!
//! Priority order:
//!
//! 1. `--config` flag (or `$ARCH_INVENTORY_CONFIG`)
//! 2. `{root}/arch-inventory.toml` or `{root}/.arch-inventory.toml`
//! 3. `$ARCH_INVENTORY_CONFIG_DIR/config.toml`, else `~/.arch-inventory/config.toml`
//! 4. Built-in defaults

use anyhow::{Context, Result};
use arch_inventory_core::InventoryConfig;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line.
    Explicit(PathBuf),
    /// Found in the workspace root.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found; built-in defaults apply.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Reads and parses the resolved file, or returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolved file cannot be read or parsed.
    pub fn load(&self) -> Result<InventoryConfig> {
        let Some(path) = self.path() else {
            tracing::debug!("No config file found, using defaults");
            return Ok(InventoryConfig::default());
        };
        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }
        InventoryConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["arch-inventory.toml", ".arch-inventory.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file for a workspace root.
#[must_use]
pub fn resolve(root: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(root, explicit, global_config_dir())
}

fn resolve_inner(root: &Path, explicit: Option<&Path>, global_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(candidate) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found project config: {}", candidate.display());
        return ConfigSource::Project(candidate);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_CONFIG_NAME)) {
        Some(candidate) if candidate.is_file() => {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        }
        _ => ConfigSource::Default,
    }
}

/// `$ARCH_INVENTORY_CONFIG_DIR`, else `~/.arch-inventory/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("ARCH_INVENTORY_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".arch-inventory"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_wins_even_when_missing() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("arch-inventory.toml"), "").unwrap();

        let explicit = Path::new("/nonexistent/inventory.toml");
        let result = resolve_inner(tmp.path(), Some(explicit), None);
        assert_eq!(result, ConfigSource::Explicit(explicit.to_path_buf()));
    }

    #[test]
    fn plain_name_preferred_over_dotfile() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("arch-inventory.toml"), "").unwrap();
        fs::write(tmp.path().join(".arch-inventory.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(tmp.path().join("arch-inventory.toml"))
        );
    }

    #[test]
    fn dotfile_found_alone() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".arch-inventory.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(tmp.path().join(".arch-inventory.toml"))
        );
    }

    #[test]
    fn global_used_only_without_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Global(global.path().join("config.toml")));

        fs::write(project.path().join("arch-inventory.toml"), "").unwrap();
        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert!(matches!(result, ConfigSource::Project(_)));
    }

    #[test]
    fn empty_global_dir_falls_back_to_defaults() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Default);
        assert!(result.path().is_none());
    }

    #[test]
    fn load_reads_project_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("arch-inventory.toml"),
            "regenerate_hint = \"make inventories\"\n",
        )
        .unwrap();

        let config = resolve_inner(tmp.path(), None, None).load().unwrap();
        assert_eq!(config.regenerate_hint, "make inventories");
    }

    #[test]
    fn load_reports_unparsable_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.toml");
        fs::write(&path, "ports = [").unwrap();

        let err = ConfigSource::Explicit(path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn default_source_loads_defaults() {
        let config = ConfigSource::Default.load().unwrap();
        assert_eq!(config.ports.marker, "PORT TAXONOMY");
    }
}
