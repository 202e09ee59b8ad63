//! Splitting of pieces longer than the longest purchasable bar.
//!
//! An oversized piece becomes a group of join parts, each cut from its own
//! bar and joined end to end after cutting. Every part but the last takes a
//! full maximum-length bar; the last part takes the smallest catalog length
//! that holds what is left. Only the joins consume blade width, so kerf is
//! charged on every part except the last.

use woodcalc_core::{Demand, IdGenerator, JoinPart, OptimizedPiece, StockCatalog};

/// Splits one oversized unit demand into its join parts.
///
/// Parts are returned in order and all carry the final part count. A demand
/// that is not oversized comes back as a single part.
pub fn split_oversized(
    demand: &Demand<'_>,
    catalog: &StockCatalog,
    ids: &dyn IdGenerator,
) -> Vec<OptimizedPiece> {
    let max_length = catalog.max_length();
    let mut parts = Vec::new();
    let mut remaining = demand.length();

    while remaining > 0.0 {
        let (part_length, stock_length) = if remaining <= max_length {
            // Falls back to the maximum when it lies off the increment grid.
            let stock_length = catalog.smallest_fitting(remaining).unwrap_or(max_length);
            (remaining, stock_length)
        } else {
            (max_length, max_length)
        };

        let is_final = part_length >= remaining;
        let kerf = if is_final { 0.0 } else { demand.kerf() };

        parts.push(OptimizedPiece {
            id: ids.next_id(),
            original_id: demand.original_id().clone(),
            length: part_length,
            position: 0.0,
            stock_type: demand.stock_type().clone(),
            quantity: 1,
            kerf,
            margin: demand.margin(),
            footprint: part_length + kerf,
            join: Some(JoinPart {
                part_number: parts.len() + 1,
                total_parts: 0,
                stock_length,
            }),
        });

        remaining -= part_length;
    }

    let total_parts = parts.len();
    for join in parts.iter_mut().filter_map(|p| p.join.as_mut()) {
        join.total_parts = total_parts;
    }

    log::debug!(
        "split piece {} ({}) into {} join parts",
        demand.original_id(),
        demand.length(),
        total_parts
    );

    parts
}
