//! Demand expansion and ordering.

use woodcalc_core::{Demand, Piece, StockType};

/// Expands the pieces of `stock_type` into unit demands.
///
/// Pieces of other stock types are discarded. A piece with quantity `n`
/// yields `n` demands that share its length, kerf and margin.
pub fn expand<'a>(pieces: &'a [Piece], stock_type: &StockType) -> Vec<Demand<'a>> {
    pieces
        .iter()
        .filter(|p| p.stock_type.matches(stock_type))
        .flat_map(|p| std::iter::repeat(Demand::new(p)).take(p.quantity))
        .collect()
}

/// Sorts demands longest first.
///
/// The sort is stable: demands of equal length keep their input order, so
/// identical input always yields identical output.
pub fn sort_decreasing(demands: &mut [Demand<'_>]) {
    demands.sort_by(|a, b| b.length().total_cmp(&a.length()));
}
