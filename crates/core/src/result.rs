//! Cutting plan representation.

use crate::id::IdGenerator;
use crate::piece::PieceId;
use crate::stock::StockType;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Join metadata for one segment of a piece longer than any purchasable bar.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct JoinPart {
    /// 1-based index of this segment.
    pub part_number: usize,
    /// Number of segments the original piece was split into.
    pub total_parts: usize,
    /// Bar length this segment is cut from.
    pub stock_length: f64,
}

/// A placed instance of a requested piece.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OptimizedPiece {
    /// Unique identifier of this placement.
    pub id: String,
    /// Id of the requested piece this came from.
    pub original_id: PieceId,
    /// Cut length.
    pub length: f64,
    /// Offset from the start of the bar.
    pub position: f64,
    /// Cross-section.
    pub stock_type: StockType,
    /// Always 1: placements are unit demands.
    pub quantity: usize,
    /// Kerf of the requested piece (join parts: charged kerf only).
    pub kerf: f64,
    /// Margin of the requested piece.
    pub margin: f64,
    /// Bar length consumed by this placement, including charged kerf and margin.
    pub footprint: f64,
    /// Present only for segments of a split piece.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub join: Option<JoinPart>,
}

impl OptimizedPiece {
    /// Returns true if this is one segment of a split piece.
    pub fn is_join_part(&self) -> bool {
        self.join.is_some()
    }

    /// End offset of the cut piece itself (excluding kerf and margin).
    pub fn end(&self) -> f64 {
        self.position + self.length
    }
}

/// One purchased bar and the pieces laid out along it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OptimizedStock {
    /// Unique identifier.
    pub id: String,
    /// Purchased length, drawn from the catalog.
    pub length: f64,
    /// Placements in position order.
    pub pieces: Vec<OptimizedPiece>,
    /// Unused length at the end of the bar.
    pub remaining_length: f64,
    /// Cross-section.
    pub stock_type: StockType,
    /// Used length as a percentage of the bar (0-100).
    pub utilization: f64,
}

impl OptimizedStock {
    /// Opens an empty bar.
    pub fn open(id: impl Into<String>, length: f64, stock_type: StockType) -> Self {
        Self {
            id: id.into(),
            length,
            pieces: Vec::new(),
            remaining_length: length,
            stock_type,
            utilization: 0.0,
        }
    }

    /// Appends a placement and charges its footprint against the bar.
    ///
    /// The caller is responsible for the footprint fitting in the remaining length.
    pub fn place(&mut self, piece: OptimizedPiece) {
        self.remaining_length -= piece.footprint;
        self.pieces.push(piece);
        self.utilization = if self.length > 0.0 {
            self.used_length() / self.length * 100.0
        } else {
            0.0
        };
    }

    /// Offset at which the next placement starts.
    pub fn next_position(&self) -> f64 {
        self.length - self.remaining_length
    }

    /// Length consumed by placements, kerf and margin.
    pub fn used_length(&self) -> f64 {
        self.length - self.remaining_length
    }

    /// Number of placed pieces.
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Returns true if nothing has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

/// Result of optimizing one stock type.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CuttingPlan {
    /// Purchased bars, in the order they were opened.
    pub stocks: Vec<OptimizedStock>,
    /// One entry per split piece: its join parts in order.
    pub oversized_pieces: Vec<Vec<OptimizedPiece>>,
    /// Unused length over all bars.
    pub total_waste: f64,
    /// Used length over all bars.
    pub total_used: f64,
    /// `total_used` as a percentage of total bar length, 0 without bars.
    pub overall_utilization: f64,
    /// Original ids of unit demands that no catalog length could hold.
    #[cfg_attr(feature = "serde", serde(default))]
    pub unplaced: Vec<PieceId>,
}

impl CuttingPlan {
    /// Assembles a plan and computes its aggregate statistics.
    pub fn from_parts(
        stocks: Vec<OptimizedStock>,
        oversized_pieces: Vec<Vec<OptimizedPiece>>,
        unplaced: Vec<PieceId>,
    ) -> Self {
        let total_length: f64 = stocks.iter().map(|s| s.length).sum();
        let total_used: f64 = stocks.iter().map(|s| s.used_length()).sum();
        let overall_utilization = if total_length > 0.0 {
            total_used / total_length * 100.0
        } else {
            0.0
        };

        Self {
            stocks,
            oversized_pieces,
            total_waste: total_length - total_used,
            total_used,
            overall_utilization,
            unplaced,
        }
    }

    /// Total purchased length over all bars (excluding join-part bars).
    pub fn total_length(&self) -> f64 {
        self.total_waste + self.total_used
    }

    /// Returns true if every demand was either packed or split.
    pub fn all_placed(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Number of bars opened by packing.
    pub fn bar_count(&self) -> usize {
        self.stocks.len()
    }

    /// Number of pieces packed into bars.
    pub fn placed_piece_count(&self) -> usize {
        self.stocks.iter().map(|s| s.pieces.len()).sum()
    }

    /// Number of join parts over all split pieces.
    pub fn join_part_count(&self) -> usize {
        self.oversized_pieces.iter().map(|g| g.len()).sum()
    }

    /// Bars to buy as `(length, count)` in ascending length, join-part bars included.
    pub fn purchase_list(&self) -> Vec<(f64, usize)> {
        let mut lengths: Vec<f64> = self
            .stocks
            .iter()
            .map(|s| s.length)
            .chain(
                self.oversized_pieces
                    .iter()
                    .flatten()
                    .filter_map(|p| p.join.map(|j| j.stock_length)),
            )
            .collect();
        lengths.sort_by(|a, b| a.total_cmp(b));

        let mut list: Vec<(f64, usize)> = Vec::new();
        for length in lengths {
            match list.last_mut() {
                Some((last, count)) if *last == length => *count += 1,
                _ => list.push((length, 1)),
            }
        }
        list
    }

    /// Returns utilization as a percentage string.
    pub fn utilization_percent(&self) -> String {
        format!("{:.1}%", self.overall_utilization)
    }

    /// Computes summary statistics.
    pub fn summary(&self) -> PlanSummary {
        PlanSummary::from(self)
    }

    /// Replaces every bar and placement id with one drawn from `ids`.
    ///
    /// Ids are drawn in plan order: join parts first, then each bar followed
    /// by its pieces.
    pub fn assign_ids(&mut self, ids: &dyn IdGenerator) {
        for part in self.oversized_pieces.iter_mut().flatten() {
            part.id = ids.next_id();
        }
        for stock in &mut self.stocks {
            stock.id = ids.next_id();
            for piece in &mut stock.pieces {
                piece.id = ids.next_id();
            }
        }
    }
}

/// Summary statistics for a cutting plan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlanSummary {
    /// Bars opened by packing.
    pub bars_used: usize,
    /// Pieces packed into bars.
    pub pieces_placed: usize,
    /// Pieces split into join parts.
    pub oversized_groups: usize,
    /// Join parts over all split pieces.
    pub join_parts: usize,
    /// Unit demands that could not be placed.
    pub unplaced: usize,
    /// Utilization percentage.
    pub utilization_percent: f64,
    /// Total waste.
    pub total_waste: f64,
}

impl From<&CuttingPlan> for PlanSummary {
    fn from(plan: &CuttingPlan) -> Self {
        Self {
            bars_used: plan.bar_count(),
            pieces_placed: plan.placed_piece_count(),
            oversized_groups: plan.oversized_pieces.len(),
            join_parts: plan.join_part_count(),
            unplaced: plan.unplaced.len(),
            utilization_percent: plan.overall_utilization,
            total_waste: plan.total_waste,
        }
    }
}

/// A cutting plan together with the stock type it was computed for.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StockPlan {
    /// Stock type of every bar and piece in `plan`.
    pub stock_type: StockType,
    /// The plan.
    pub plan: CuttingPlan,
}
