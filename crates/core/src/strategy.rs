//! The packing-strategy seam.
//!
//! Splitting oversized pieces and aggregating statistics are fixed steps of
//! the optimizer; how regular unit demands are laid out on bars is delegated
//! to a [`PackingStrategy`], so that a different heuristic (or an exact solver
//! for small instances) can be swapped in without touching the data model.

use crate::id::IdGenerator;
use crate::piece::{Piece, PieceId};
use crate::result::OptimizedStock;
use crate::stock::{StockCatalog, StockType};

/// One unit of demand: a single cut of its originating piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Demand<'a> {
    piece: &'a Piece,
}

impl<'a> Demand<'a> {
    /// Creates a unit demand for `piece`.
    pub fn new(piece: &'a Piece) -> Self {
        Self { piece }
    }

    /// The requested piece this demand expands from.
    pub fn piece(&self) -> &'a Piece {
        self.piece
    }

    /// Id of the originating piece.
    pub fn original_id(&self) -> &'a PieceId {
        &self.piece.id
    }

    /// Cut length.
    pub fn length(&self) -> f64 {
        self.piece.length
    }

    /// Kerf charged per cut.
    pub fn kerf(&self) -> f64 {
        self.piece.kerf
    }

    /// Spacing reserved after the piece.
    pub fn margin(&self) -> f64 {
        self.piece.margin
    }

    /// Cross-section.
    pub fn stock_type(&self) -> &'a StockType {
        &self.piece.stock_type
    }
}

/// Output of a packing strategy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Packing {
    /// Opened bars, in creation order.
    pub stocks: Vec<OptimizedStock>,
    /// Original ids of demands no bar could be opened for.
    pub unplaced: Vec<PieceId>,
}

/// Lays unit demands out on bars drawn from a catalog.
///
/// Implementations receive demands that all share one stock type and all
/// fit within `catalog.max_length()`.
pub trait PackingStrategy: Send + Sync {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Packs `demands` into bars.
    fn pack(
        &self,
        demands: &[Demand<'_>],
        catalog: &StockCatalog,
        ids: &dyn IdGenerator,
    ) -> Packing;
}
