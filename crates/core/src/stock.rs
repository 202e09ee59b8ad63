//! Stock types and the purchasable bar-length catalog.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a stock type (cross-section).
pub type StockTypeId = String;

/// Tolerance used when walking the length grid up to the catalog maximum.
const GRID_EPSILON: f64 = 1e-9;

/// A cross-section category such as `45×95`.
///
/// Stock types only partition the work: pieces and bars of different stock
/// types are never packed together. Filtering compares [`StockType::id`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StockType {
    /// Opaque identity.
    pub id: StockTypeId,
    /// Display name.
    pub name: String,
    /// First cross-section dimension.
    pub width: f64,
    /// Second cross-section dimension.
    pub height: f64,
    /// Whether this is one of the built-in types.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_default: bool,
}

impl StockType {
    /// Creates a user-defined stock type.
    pub fn new(
        id: impl Into<StockTypeId>,
        name: impl Into<String>,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            width,
            height,
            is_default: false,
        }
    }

    /// Creates a stock type named after its dimensions, e.g. `45×95`.
    pub fn from_dimensions(id: impl Into<StockTypeId>, width: f64, height: f64) -> Self {
        Self::new(id, format!("{}×{}", width, height), width, height)
    }

    /// Returns true if both refer to the same stock type.
    pub fn matches(&self, other: &StockType) -> bool {
        self.id == other.id
    }
}

/// The built-in cross-sections.
pub fn default_stock_types() -> Vec<StockType> {
    [
        (45.0, 45.0),
        (45.0, 70.0),
        (45.0, 95.0),
        (45.0, 145.0),
        (45.0, 195.0),
        (45.0, 220.0),
        (70.0, 70.0),
    ]
    .iter()
    .enumerate()
    .map(|(i, &(w, h))| StockType {
        is_default: true,
        ..StockType::from_dimensions((i + 1).to_string(), w, h)
    })
    .collect()
}

/// Settings describing which bar lengths can be bought.
///
/// Purchasable lengths form the sequence `min_length, min_length + increment,
/// ...` up to and including `max_length`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct StockSettings {
    /// Shortest purchasable bar.
    pub min_length: f64,
    /// Longest purchasable bar. Pieces longer than this are split.
    pub max_length: f64,
    /// Step between purchasable lengths.
    pub increment: f64,
    /// Saw-blade width offered as the default for new pieces.
    pub default_kerf: f64,
    /// Unit label for display.
    pub unit: String,
}

impl Default for StockSettings {
    fn default() -> Self {
        Self {
            min_length: 2700.0,
            max_length: 5400.0,
            increment: 300.0,
            default_kerf: 3.0,
            unit: "mm".to_string(),
        }
    }
}

impl StockSettings {
    /// Creates settings with the default catalog (2700..=5400 step 300 mm).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the length range and step.
    pub fn with_lengths(mut self, min_length: f64, max_length: f64, increment: f64) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self.increment = increment;
        self
    }

    /// Sets the default kerf.
    pub fn with_default_kerf(mut self, kerf: f64) -> Self {
        self.default_kerf = kerf;
        self
    }

    /// Sets the unit label.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Checks that the settings describe a non-empty, finite catalog.
    pub fn validate(&self) -> Result<()> {
        let values = [self.min_length, self.max_length, self.increment, self.default_kerf];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidSettings(format!(
                "values must be finite (min {}, max {}, increment {}, kerf {})",
                self.min_length, self.max_length, self.increment, self.default_kerf
            )));
        }
        if self.min_length <= 0.0 {
            return Err(Error::InvalidSettings(format!(
                "minimum length must be positive, got {}",
                self.min_length
            )));
        }
        if self.increment <= 0.0 {
            return Err(Error::InvalidSettings(format!(
                "increment must be positive, got {}",
                self.increment
            )));
        }
        if self.min_length > self.max_length {
            return Err(Error::InvalidSettings(format!(
                "minimum length {} exceeds maximum length {}",
                self.min_length, self.max_length
            )));
        }
        if self.default_kerf < 0.0 {
            return Err(Error::InvalidSettings(format!(
                "default kerf must not be negative, got {}",
                self.default_kerf
            )));
        }
        Ok(())
    }

    /// Returns the purchasable lengths in ascending order.
    ///
    /// Returns an empty list when the increment is not positive.
    pub fn available_lengths(&self) -> Vec<f64> {
        let grid_is_finite = self.increment.is_finite()
            && self.min_length.is_finite()
            && self.max_length.is_finite();
        if !grid_is_finite || self.increment <= 0.0 {
            return Vec::new();
        }
        (0..)
            .map(|i| self.min_length + i as f64 * self.increment)
            .take_while(|&len| len <= self.max_length + GRID_EPSILON)
            .collect()
    }
}

/// The admissible set of bar lengths a new bar may be given.
#[derive(Debug, Clone, PartialEq)]
pub struct StockCatalog {
    lengths: Vec<f64>,
    max_length: f64,
}

impl StockCatalog {
    /// Builds the catalog described by `settings`.
    ///
    /// The catalog maximum is `settings.max_length` even when it does not lie
    /// on the increment grid.
    pub fn from_settings(settings: &StockSettings) -> Result<Self> {
        settings.validate()?;
        let lengths = settings.available_lengths();
        log::debug!(
            "stock catalog: {} lengths from {} to {} {}",
            lengths.len(),
            settings.min_length,
            settings.max_length,
            settings.unit
        );
        Ok(Self {
            lengths,
            max_length: settings.max_length,
        })
    }

    /// Builds a catalog from an explicit list of purchasable lengths.
    pub fn from_lengths(mut lengths: Vec<f64>) -> Result<Self> {
        if lengths.is_empty() {
            return Err(Error::InvalidSettings("length list is empty".into()));
        }
        if let Some(bad) = lengths.iter().find(|l| !l.is_finite() || **l <= 0.0) {
            return Err(Error::InvalidSettings(format!(
                "lengths must be positive and finite, got {}",
                bad
            )));
        }
        lengths.sort_by(|a, b| a.total_cmp(b));
        lengths.dedup();
        let max_length = lengths[lengths.len() - 1];
        Ok(Self { lengths, max_length })
    }

    /// Purchasable lengths, ascending.
    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    /// Longest purchasable bar.
    pub fn max_length(&self) -> f64 {
        self.max_length
    }

    /// Returns true if a piece of `length` must be split into join parts.
    pub fn is_oversized(&self, length: f64) -> bool {
        length > self.max_length
    }

    /// Smallest catalog length that can hold `length`.
    pub fn smallest_fitting(&self, length: f64) -> Option<f64> {
        self.lengths.iter().copied().find(|&l| l >= length)
    }
}

impl TryFrom<&StockSettings> for StockCatalog {
    type Error = Error;

    fn try_from(settings: &StockSettings) -> Result<Self> {
        Self::from_settings(settings)
    }
}
