//! Requested pieces and groups of pieces.

use crate::error::{Error, Result};
use crate::stock::StockType;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a requested piece.
pub type PieceId = String;

/// A requested length of a given stock type.
///
/// A piece with quantity `n` stands for `n` independent cuts of identical
/// length, kerf, margin and stock type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Piece {
    /// Unique identifier.
    pub id: PieceId,
    /// Cut length.
    pub length: f64,
    /// Cross-section this piece is cut from.
    pub stock_type: StockType,
    /// Number of identical cuts.
    pub quantity: usize,
    /// Material lost to the saw blade per cut.
    #[cfg_attr(feature = "serde", serde(default))]
    pub kerf: f64,
    /// Extra spacing reserved after the piece.
    #[cfg_attr(feature = "serde", serde(default))]
    pub margin: f64,
}

impl Piece {
    /// Creates a single piece with no kerf or margin.
    pub fn new(id: impl Into<PieceId>, length: f64, stock_type: StockType) -> Self {
        Self {
            id: id.into(),
            length,
            stock_type,
            quantity: 1,
            kerf: 0.0,
            margin: 0.0,
        }
    }

    /// Sets the quantity.
    pub fn with_quantity(mut self, quantity: usize) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the kerf.
    pub fn with_kerf(mut self, kerf: f64) -> Self {
        self.kerf = kerf;
        self
    }

    /// Sets the margin.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Total requested length (`length × quantity`), excluding kerf and margin.
    pub fn total_length(&self) -> f64 {
        self.length * self.quantity as f64
    }

    /// Validates the piece against the optimizer's input contract.
    pub fn validate(&self) -> Result<()> {
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(Error::InvalidPiece(format!(
                "piece {} has non-positive length {}",
                self.id, self.length
            )));
        }
        if self.quantity == 0 {
            return Err(Error::InvalidPiece(format!(
                "piece {} has zero quantity",
                self.id
            )));
        }
        if !self.kerf.is_finite() || self.kerf < 0.0 {
            return Err(Error::InvalidPiece(format!(
                "piece {} has negative kerf {}",
                self.id, self.kerf
            )));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(Error::InvalidPiece(format!(
                "piece {} has negative margin {}",
                self.id, self.margin
            )));
        }
        Ok(())
    }
}

/// A named collection of pieces, e.g. everything needed for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Group {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Pieces in this group.
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<Piece>,
}

impl Group {
    /// Creates an empty group.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Adds a piece.
    pub fn with_item(mut self, piece: Piece) -> Self {
        self.items.push(piece);
        self
    }

    /// Iterates over the pieces of this group.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.items.iter()
    }

    /// Collects the pieces of all groups, in group order.
    pub fn flatten(groups: &[Group]) -> Vec<Piece> {
        groups.iter().flat_map(|g| g.items.iter().cloned()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pine() -> StockType {
        StockType::from_dimensions("pine", 45.0, 95.0)
    }

    #[test]
    fn test_piece_builder() {
        let piece = Piece::new("p1", 1200.0, pine())
            .with_quantity(3)
            .with_kerf(3.0)
            .with_margin(5.0);

        assert_eq!(piece.quantity, 3);
        assert_eq!(piece.kerf, 3.0);
        assert_eq!(piece.margin, 5.0);
        assert_eq!(piece.total_length(), 3600.0);
        assert!(piece.validate().is_ok());
    }

    #[test]
    fn test_piece_validation() {
        assert!(Piece::new("p", 0.0, pine()).validate().is_err());
        assert!(Piece::new("p", -10.0, pine()).validate().is_err());
        assert!(Piece::new("p", f64::NAN, pine()).validate().is_err());
        assert!(Piece::new("p", 10.0, pine())
            .with_quantity(0)
            .validate()
            .is_err());
        assert!(Piece::new("p", 10.0, pine())
            .with_kerf(-1.0)
            .validate()
            .is_err());
        assert!(Piece::new("p", 10.0, pine())
            .with_margin(-0.5)
            .validate()
            .is_err());
    }

    #[test]
    fn test_group_flatten() {
        let frame = Group::new("g1", "Frame")
            .with_item(Piece::new("a", 900.0, pine()))
            .with_item(Piece::new("b", 600.0, pine()));
        let shelf = Group::new("g2", "Shelf").with_item(Piece::new("c", 1800.0, pine()));

        assert_eq!(frame.pieces().count(), 2);
        let all = Group::flatten(&[frame, shelf]);
        let ids: Vec<_> = all.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
