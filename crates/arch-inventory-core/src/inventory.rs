//! Pipeline orchestration: scan, classify, render, splice.

use crate::classify::Classifier;
use crate::config::{ConfigError, InventoryConfig};
use crate::dto::CollisionDetector;
use crate::render::{PortSection, TableRenderer};
use crate::scan::{collect_public_items, collect_type_definitions, ScanError, SourceTree, UsageScanner};
use crate::splice::{MarkerPair, SpliceError};
use crate::types::CollisionRow;

use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while refreshing inventories.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Source tree could not be scanned.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Target document markers are unusable.
    #[error("{path}: {source}")]
    Splice {
        /// Target document.
        path: PathBuf,
        /// Underlying marker error.
        source: SpliceError,
    },

    /// The usage pattern assembled from the owner tokens is invalid.
    #[error("Invalid usage pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Target document could not be read or written.
    #[error("Failed to access {path}: {source}")]
    Io {
        /// Target document.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// How [`Inventory::refresh`] treats the target document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// Write only if the content changed.
    Write,
    /// Write even if the content is unchanged.
    ForceWrite,
    /// Never write; report staleness.
    Check,
}

/// Result of [`Inventory::refresh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Document already matched the rendered blocks.
    UpToDate,
    /// Document was written.
    Updated,
    /// Document differs and was left untouched (check mode).
    Stale,
}

/// Builder for configuring an [`Inventory`].
#[derive(Debug, Default)]
pub struct InventoryBuilder {
    root: Option<PathBuf>,
    config: Option<InventoryConfig>,
    document: Option<PathBuf>,
}

impl InventoryBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the workspace root all configured paths are relative to.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: InventoryConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the target document from the configuration.
    #[must_use]
    pub fn document(mut self, path: impl Into<PathBuf>) -> Self {
        self.document = Some(path.into());
        self
    }

    /// Builds the inventory.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> Result<Inventory, InventoryError> {
        let mut config = self.config.unwrap_or_default();
        config.validate()?;
        if let Some(document) = self.document {
            config.document = document;
        }

        let usage_scanner =
            UsageScanner::new(&config.ports.owner_tokens, &config.ports.inbound_segment)?;
        let classifier = Classifier::from_config(&config.ports.classification);
        let renderer = TableRenderer::new(config.regenerate_hint.clone());

        Ok(Inventory {
            tree: SourceTree::new(self.root.unwrap_or_else(|| PathBuf::from("."))),
            usage_scanner,
            classifier,
            renderer,
            config,
        })
    }
}

/// Regenerates the port taxonomy and DTO ownership blocks.
///
/// Use [`Inventory::builder()`] to construct an instance.
#[derive(Debug)]
pub struct Inventory {
    tree: SourceTree,
    usage_scanner: UsageScanner,
    classifier: Classifier,
    renderer: TableRenderer,
    config: InventoryConfig,
}

impl Inventory {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> InventoryBuilder {
        InventoryBuilder::new()
    }

    /// Returns the effective configuration.
    #[must_use]
    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// Absolute (or root-joined) path of the target document.
    #[must_use]
    pub fn document_path(&self) -> PathBuf {
        self.tree.root().join(&self.config.document)
    }

    /// Target document path as shown to users.
    #[must_use]
    pub fn document_display(&self) -> String {
        self.tree.relative(&self.document_path())
    }

    /// Scans and classifies every configured side.
    ///
    /// # Errors
    ///
    /// Returns an error if a source file cannot be read.
    pub fn port_sections(&self) -> Result<Vec<PortSection>, InventoryError> {
        let ports = &self.config.ports;
        let mut sections = Vec::with_capacity(ports.sides.len());
        for side in &ports.sides {
            let items = collect_public_items(&self.tree, &side.inbound_dir)?;
            let usage = self.usage_scanner.scan(&self.tree, &side.usage_roots)?;
            let rows = self.classifier.rows(&items, &usage, ports.sample_limit);
            info!(
                "{} inbound: {} items, {} referenced names",
                side.name,
                rows.len(),
                usage.len()
            );
            sections.push(PortSection {
                side: side.name.clone(),
                rows,
            });
        }
        Ok(sections)
    }

    /// Renders the port taxonomy block.
    ///
    /// # Errors
    ///
    /// Returns an error if a source file cannot be read.
    pub fn render_port_block(&self) -> Result<String, InventoryError> {
        Ok(self.renderer.port_block(&self.port_sections()?))
    }

    /// Finds type names declared in both DTO modules.
    ///
    /// # Errors
    ///
    /// Returns an error if a source file cannot be read.
    pub fn collisions(&self) -> Result<Vec<CollisionRow>, InventoryError> {
        let dto = &self.config.dto;
        let first = collect_type_definitions(&self.tree, &dto.first.root)?;
        let second = collect_type_definitions(&self.tree, &dto.second.root)?;
        let rows = CollisionDetector::new(dto).collisions(&first, &second);
        info!(
            "DTO ownership: {} vs {} types, {} collisions",
            first.len(),
            second.len(),
            rows.len()
        );
        Ok(rows)
    }

    /// Renders the DTO ownership block.
    ///
    /// # Errors
    ///
    /// Returns an error if a source file cannot be read.
    pub fn render_dto_block(&self) -> Result<String, InventoryError> {
        let dto = &self.config.dto;
        Ok(self
            .renderer
            .dto_block(&dto.first.name, &dto.second.name, &self.collisions()?))
    }

    /// Splices freshly rendered blocks into `document`: port taxonomy
    /// first, then DTO ownership.
    ///
    /// # Errors
    ///
    /// Returns an error if scanning fails or either marker pair is unusable.
    pub fn apply(&self, document: &str) -> Result<String, InventoryError> {
        let port_block = self.render_port_block()?;
        let dto_block = self.render_dto_block()?;

        let updated = self.splice(&self.config.ports.marker, document, &port_block)?;
        self.splice(&self.config.dto.marker, &updated, &dto_block)
    }

    fn splice(&self, label: &str, document: &str, block: &str) -> Result<String, InventoryError> {
        MarkerPair::labelled(label)
            .splice(document, block)
            .map_err(|source| InventoryError::Splice {
                path: self.document_path(),
                source,
            })
    }

    /// Reads the target document, regenerates both blocks and, depending on
    /// `mode`, writes the result back.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or written, a
    /// source file cannot be read, or the markers are unusable.
    pub fn refresh(&self, mode: RefreshMode) -> Result<RefreshOutcome, InventoryError> {
        let path = self.document_path();
        let original = std::fs::read_to_string(&path).map_err(|e| InventoryError::Io {
            path: path.clone(),
            source: e,
        })?;

        let updated = self.apply(&original)?;
        let changed = updated != original;
        debug!("{} changed: {}", path.display(), changed);

        match (mode, changed) {
            (RefreshMode::Check, true) => Ok(RefreshOutcome::Stale),
            (RefreshMode::Check | RefreshMode::Write, false) => Ok(RefreshOutcome::UpToDate),
            (RefreshMode::Write | RefreshMode::ForceWrite, _) => {
                write_atomic(&path, &updated)?;
                info!("Wrote {}", path.display());
                Ok(RefreshOutcome::Updated)
            }
        }
    }
}

/// Writes through a sibling temporary file and renames it into place.
fn write_atomic(path: &Path, content: &str) -> Result<(), InventoryError> {
    let io_err = |e: std::io::Error| InventoryError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    let tmp_path = path.with_extension("inventory.tmp");
    let written = std::fs::File::create(&tmp_path)
        .and_then(|mut file| {
            file.write_all(content.as_bytes())?;
            file.sync_all()
        })
        .and_then(|()| std::fs::rename(&tmp_path, path));

    if let Err(e) = written {
        if let Err(cleanup) = std::fs::remove_file(&tmp_path) {
            debug!("Could not remove {}: {}", tmp_path.display(), cleanup);
        }
        return Err(io_err(e));
    }
    Ok(())
}
