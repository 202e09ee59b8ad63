//! Job files: the pieces, groups and catalog settings for one run.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use woodcalc_core::{default_stock_types, Group, Piece, StockSettings, StockType};

/// Contents of a JSON job file.
///
/// Every section is optional; missing settings fall back to the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Job {
    /// Catalog settings.
    pub settings: StockSettings,
    /// Custom stock types, in addition to the built-in ones.
    pub stock_types: Vec<StockType>,
    /// Loose pieces.
    pub pieces: Vec<Piece>,
    /// Grouped pieces.
    pub groups: Vec<Group>,
}

impl Job {
    /// Reads and parses a job file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read job file {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("invalid job file {}", path.display()))
    }

    /// Parses a job from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        let job: Job = serde_json::from_str(content)?;
        log::debug!(
            "job: {} pieces, {} groups, {} custom stock types",
            job.pieces.len(),
            job.groups.len(),
            job.stock_types.len()
        );
        Ok(job)
    }

    /// Loose pieces followed by the pieces of every group.
    pub fn all_pieces(&self) -> Vec<Piece> {
        let mut pieces = self.pieces.clone();
        pieces.extend(Group::flatten(&self.groups));
        pieces
    }

    /// Looks up a stock type by id among custom types, built-in types and
    /// the types referenced by pieces.
    pub fn find_stock_type(&self, id: &str) -> Option<StockType> {
        self.stock_types
            .iter()
            .cloned()
            .chain(default_stock_types())
            .chain(self.all_pieces().into_iter().map(|p| p.stock_type))
            .find(|t| t.id == id)
    }
}
