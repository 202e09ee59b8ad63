//! First-fit-decreasing bar packing.
//!
//! Demands are taken longest first and each goes into the first open bar
//! with room for it, in the order the bars were opened. When no open bar has
//! room, a new bar is bought with the smallest catalog length that holds the
//! demand.
//!
//! # Charging rules
//!
//! On an open bar, a demand consumes its length plus, when the bar already
//! holds a piece, its kerf (the cut separating it from its neighbour). The
//! margin is consumed after every piece except a bar's first, and is waived
//! when the piece fills the rest of the bar exactly.
//!
//! A freshly bought bar charges its first piece length, kerf and margin
//! unconditionally, clamped to the bar length. Compared with the open-bar
//! rules this reserves more room after the first piece of every bar.
//!
//! # Known weaknesses
//!
//! The heuristic is greedy. It never revisits a placement, picks the first
//! bar that fits rather than the tightest one, and sizes a new bar for the
//! demand that opened it rather than for what could follow. Plans may buy
//! more (or longer) bars than an exact solution would.

use woodcalc_core::{
    Demand, IdGenerator, OptimizedPiece, OptimizedStock, Packing, PackingStrategy, StockCatalog,
};

use crate::demand::sort_decreasing;

/// First-fit-decreasing packing, the default strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFitDecreasing;

impl PackingStrategy for FirstFitDecreasing {
    fn name(&self) -> &'static str {
        "first-fit-decreasing"
    }

    fn pack(
        &self,
        demands: &[Demand<'_>],
        catalog: &StockCatalog,
        ids: &dyn IdGenerator,
    ) -> Packing {
        let mut ordered = demands.to_vec();
        sort_decreasing(&mut ordered);

        let mut packing = Packing::default();

        for demand in &ordered {
            let fit = packing
                .stocks
                .iter_mut()
                .filter(|s| s.stock_type.matches(demand.stock_type()))
                .find_map(|stock| {
                    let charge = open_bar_charge(stock, demand)?;
                    Some((stock, charge))
                });

            if let Some((stock, charge)) = fit {
                let position = stock.next_position();
                stock.place(placement(demand, position, charge, ids));
                continue;
            }

            match catalog.smallest_fitting(demand.length()) {
                Some(length) => {
                    let mut stock =
                        OptimizedStock::open(ids.next_id(), length, demand.stock_type().clone());
                    let charge = new_bar_charge(length, demand);
                    stock.place(placement(demand, 0.0, charge, ids));
                    packing.stocks.push(stock);
                }
                None => {
                    log::warn!(
                        "no stock length can hold piece {} ({}), skipping",
                        demand.original_id(),
                        demand.length()
                    );
                    packing.unplaced.push(demand.original_id().clone());
                }
            }
        }

        packing
    }
}

/// Length an already open bar would consume for `demand`, or `None` if it does not fit.
pub(crate) fn open_bar_charge(stock: &OptimizedStock, demand: &Demand<'_>) -> Option<f64> {
    let occupied = !stock.is_empty();
    let effective = if occupied {
        demand.length() + demand.kerf()
    } else {
        demand.length()
    };
    let flush = stock.remaining_length == effective;
    let margin = if occupied && !flush { demand.margin() } else { 0.0 };

    let charge = effective + margin;
    (stock.remaining_length >= charge).then_some(charge)
}

/// Length a newly bought bar of `length` consumes for its first piece.
pub(crate) fn new_bar_charge(length: f64, demand: &Demand<'_>) -> f64 {
    (demand.length() + demand.kerf() + demand.margin()).min(length)
}

fn placement(
    demand: &Demand<'_>,
    position: f64,
    footprint: f64,
    ids: &dyn IdGenerator,
) -> OptimizedPiece {
    OptimizedPiece {
        id: ids.next_id(),
        original_id: demand.original_id().clone(),
        length: demand.length(),
        position,
        stock_type: demand.stock_type().clone(),
        quantity: 1,
        kerf: demand.kerf(),
        margin: demand.margin(),
        footprint,
        join: None,
    }
}
