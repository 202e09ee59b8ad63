//! Cutting optimizer entry points.

use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;
use woodcalc_core::{
    CuttingPlan, Group, IdGenerator, PackingStrategy, Piece, Result, SequentialIds, StockCatalog,
    StockPlan, StockSettings, StockType, UuidIds,
};

use crate::demand::{expand, sort_decreasing};
use crate::first_fit::FirstFitDecreasing;
use crate::oversize::split_oversized;

/// Linear cutting optimizer.
///
/// Turns requested pieces into a [`CuttingPlan`] for one stock type:
///
/// 1. Keeps the pieces of the requested stock type and expands quantities
///    into unit demands
/// 2. Orders demands longest first
/// 3. Splits demands longer than the catalog maximum into join parts
/// 4. Packs the remaining demands with the configured [`PackingStrategy`]
/// 5. Aggregates waste and utilization
///
/// The optimizer holds no per-call state and can be shared between threads.
pub struct Optimizer {
    strategy: Box<dyn PackingStrategy>,
    ids: Arc<dyn IdGenerator>,
}

impl Optimizer {
    /// Creates an optimizer using first-fit-decreasing packing and random ids.
    pub fn new() -> Self {
        Self {
            strategy: Box::new(FirstFitDecreasing),
            ids: Arc::new(UuidIds),
        }
    }

    /// Replaces the packing strategy.
    pub fn with_strategy(mut self, strategy: impl PackingStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    /// Replaces the id generator used for placements and bars.
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    /// Name of the packing strategy.
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Computes the cutting plan for `stock_type`.
    ///
    /// Returns an error if the settings cannot form a catalog or a piece of
    /// `stock_type` is malformed. Pieces of other stock types are ignored.
    pub fn optimize(
        &self,
        pieces: &[Piece],
        settings: &StockSettings,
        stock_type: &StockType,
    ) -> Result<CuttingPlan> {
        let catalog = StockCatalog::from_settings(settings)?;
        self.optimize_with_catalog(pieces, &catalog, stock_type)
    }

    /// Computes the cutting plan for `stock_type` against an explicit catalog.
    pub fn optimize_with_catalog(
        &self,
        pieces: &[Piece],
        catalog: &StockCatalog,
        stock_type: &StockType,
    ) -> Result<CuttingPlan> {
        let mut plan = self.plan(pieces, catalog, stock_type)?;
        plan.assign_ids(&*self.ids);
        Ok(plan)
    }

    /// Computes one plan per stock type present in `pieces`.
    ///
    /// Plans are returned in order of each stock type's first appearance.
    /// Packing runs in parallel; ids are assigned afterwards in plan order,
    /// so a deterministic id generator yields the same plans on every run.
    pub fn optimize_all(
        &self,
        pieces: &[Piece],
        settings: &StockSettings,
    ) -> Result<Vec<StockPlan>> {
        let catalog = StockCatalog::from_settings(settings)?;

        let mut stock_types: Vec<&StockType> = Vec::new();
        for piece in pieces {
            if !stock_types.iter().any(|t| t.matches(&piece.stock_type)) {
                stock_types.push(&piece.stock_type);
            }
        }

        let mut plans = stock_types
            .par_iter()
            .map(|stock_type| {
                self.plan(pieces, &catalog, stock_type)
                    .map(|plan| StockPlan {
                        stock_type: (*stock_type).clone(),
                        plan,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        for stock_plan in &mut plans {
            stock_plan.plan.assign_ids(&*self.ids);
        }
        Ok(plans)
    }

    /// Computes one plan per stock type over the pieces of all `groups`.
    pub fn optimize_groups(
        &self,
        groups: &[Group],
        settings: &StockSettings,
    ) -> Result<Vec<StockPlan>> {
        self.optimize_all(&Group::flatten(groups), settings)
    }

    /// Packs one stock type. Ids in the returned plan are placeholders.
    fn plan(
        &self,
        pieces: &[Piece],
        catalog: &StockCatalog,
        stock_type: &StockType,
    ) -> Result<CuttingPlan> {
        for piece in pieces.iter().filter(|p| p.stock_type.matches(stock_type)) {
            piece.validate()?;
        }

        let mut demands = expand(pieces, stock_type);
        sort_decreasing(&mut demands);

        let (oversized, regular): (Vec<_>, Vec<_>) = demands
            .into_iter()
            .partition(|d| catalog.is_oversized(d.length()));

        let scratch = SequentialIds::new("tmp");
        let joined: Vec<_> = oversized
            .iter()
            .map(|d| split_oversized(d, catalog, &scratch))
            .collect();

        let packing = self.strategy.pack(&regular, catalog, &scratch);
        let plan = CuttingPlan::from_parts(packing.stocks, joined, packing.unplaced);

        log::debug!(
            "{}: {} demands -> {} bars, {} split pieces, {} unplaced, utilization {}",
            stock_type.name,
            regular.len() + oversized.len(),
            plan.bar_count(),
            plan.oversized_pieces.len(),
            plan.unplaced.len(),
            plan.utilization_percent()
        );

        Ok(plan)
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Optimizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Optimizer")
            .field("strategy", &self.strategy.name())
            .finish_non_exhaustive()
    }
}

/// Computes the cutting plan for `stock_type` with the default optimizer.
///
/// # Example
///
/// ```rust
/// use woodcalc_linear::optimize_cutting;
/// use woodcalc_core::{Piece, StockSettings, StockType};
///
/// let pine = StockType::from_dimensions("pine", 45.0, 95.0);
/// let pieces = vec![Piece::new("rail", 1200.0, pine.clone())
///     .with_quantity(3)
///     .with_kerf(3.0)
///     .with_margin(5.0)];
///
/// let plan = optimize_cutting(&pieces, &StockSettings::default(), &pine).unwrap();
/// assert_eq!(plan.stocks.len(), 2);
/// assert_eq!(plan.stocks[0].remaining_length, 284.0);
/// ```
pub fn optimize_cutting(
    pieces: &[Piece],
    settings: &StockSettings,
    stock_type: &StockType,
) -> Result<CuttingPlan> {
    Optimizer::new().optimize(pieces, settings, stock_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use woodcalc_core::{Demand, Error, IdGenerator, OptimizedStock, Packing, SequentialIds};

    fn pine() -> StockType {
        StockType::from_dimensions("1", 45.0, 95.0)
    }

    fn spruce() -> StockType {
        StockType::from_dimensions("2", 45.0, 145.0)
    }

    fn optimizer() -> Optimizer {
        Optimizer::new().with_id_generator(SequentialIds::new("t"))
    }

    #[test]
    fn test_three_rails() {
        let pieces = vec![Piece::new("rail", 1200.0, pine())
            .with_quantity(3)
            .with_kerf(3.0)
            .with_margin(5.0)];
        let plan = optimizer()
            .optimize(&pieces, &StockSettings::default(), &pine())
            .unwrap();

        assert_eq!(plan.stocks.len(), 2);
        assert_eq!(plan.stocks[0].length, 2700.0);
        assert_eq!(plan.stocks[0].piece_count(), 2);
        assert_eq!(plan.stocks[0].remaining_length, 284.0);
        assert_eq!(plan.stocks[1].length, 2700.0);
        assert_eq!(plan.stocks[1].piece_count(), 1);
        assert_eq!(plan.stocks[1].remaining_length, 1492.0);

        assert_eq!(plan.total_used, 3624.0);
        assert_eq!(plan.total_waste, 1776.0);
        assert!((plan.overall_utilization - 3624.0 / 5400.0 * 100.0).abs() < 1e-9);
        assert!(plan.oversized_pieces.is_empty());
    }

    #[test]
    fn test_oversized_piece() {
        let pieces = vec![Piece::new("ridge", 6000.0, pine())
            .with_kerf(3.0)
            .with_margin(5.0)];
        let plan = optimizer()
            .optimize(&pieces, &StockSettings::default(), &pine())
            .unwrap();

        assert!(plan.stocks.is_empty());
        assert_eq!(plan.overall_utilization, 0.0);
        assert_eq!(plan.oversized_pieces.len(), 1);

        let group = &plan.oversized_pieces[0];
        assert_eq!(group.len(), 2);
        assert_eq!(group[0].length, 5400.0);
        assert_eq!(group[0].kerf, 3.0);
        assert_eq!(group[1].length, 600.0);
        assert_eq!(group[1].kerf, 0.0);
        assert!(group.iter().all(|p| p.join.map(|j| j.total_parts) == Some(2)));
    }

    #[test]
    fn test_empty_input() {
        let plan = optimizer()
            .optimize(&[], &StockSettings::default(), &pine())
            .unwrap();

        assert!(plan.stocks.is_empty());
        assert!(plan.oversized_pieces.is_empty());
        assert_eq!(plan.overall_utilization, 0.0);
        assert_eq!(plan.total_waste, 0.0);
    }

    #[test]
    fn test_other_stock_types_ignored() {
        let pieces = vec![
            Piece::new("a", 1000.0, pine()),
            Piece::new("b", 1000.0, spruce()).with_quantity(4),
        ];
        let plan = optimizer()
            .optimize(&pieces, &StockSettings::default(), &pine())
            .unwrap();

        assert_eq!(plan.placed_piece_count(), 1);
        assert!(plan
            .stocks
            .iter()
            .all(|s| s.stock_type.matches(&pine())));
    }

    #[test]
    fn test_invalid_input_rejected() {
        let settings = StockSettings::new().with_lengths(1000.0, 2000.0, 0.0);
        let err = optimizer().optimize(&[], &settings, &pine()).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));

        let pieces = vec![Piece::new("bad", -1.0, pine())];
        let err = optimizer()
            .optimize(&pieces, &StockSettings::default(), &pine())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPiece(_)));
    }

    #[test]
    fn test_invalid_piece_of_other_type_ignored() {
        let pieces = vec![
            Piece::new("bad", 0.0, spruce()),
            Piece::new("ok", 800.0, pine()),
        ];
        let plan = optimizer()
            .optimize(&pieces, &StockSettings::default(), &pine())
            .unwrap();
        assert_eq!(plan.placed_piece_count(), 1);
    }

    #[test]
    fn test_sequential_ids() {
        let pieces = vec![Piece::new("a", 1000.0, pine())];
        let plan = optimizer()
            .optimize(&pieces, &StockSettings::default(), &pine())
            .unwrap();

        assert_eq!(plan.stocks[0].id, "t-1");
        assert_eq!(plan.stocks[0].pieces[0].id, "t-2");
    }

    #[test]
    fn test_optimize_all_keeps_first_appearance_order() {
        let pieces = vec![
            Piece::new("a", 1000.0, spruce()),
            Piece::new("b", 1000.0, pine()).with_quantity(2),
            Piece::new("c", 7000.0, spruce()),
        ];
        let plans = optimizer()
            .optimize_all(&pieces, &StockSettings::default())
            .unwrap();

        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].stock_type.id, "2");
        assert_eq!(plans[0].plan.placed_piece_count(), 1);
        assert_eq!(plans[0].plan.oversized_pieces.len(), 1);
        assert_eq!(plans[1].stock_type.id, "1");
        assert_eq!(plans[1].plan.placed_piece_count(), 2);
    }

    #[test]
    fn test_optimize_groups() {
        let groups = vec![
            Group::new("g1", "Frame").with_item(Piece::new("a", 1500.0, pine())),
            Group::new("g2", "Shelf").with_item(Piece::new("b", 900.0, pine())),
        ];
        let plans = optimizer()
            .optimize_groups(&groups, &StockSettings::default())
            .unwrap();

        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].plan.placed_piece_count(), 2);
        assert_eq!(plans[0].plan.bar_count(), 1);
    }

    #[test]
    fn test_optimize_all_ids_follow_plan_order() {
        let pieces = vec![
            Piece::new("a", 1000.0, pine()),
            Piece::new("b", 1000.0, spruce()),
            Piece::new("c", 6000.0, spruce()),
        ];
        let plans = optimizer()
            .optimize_all(&pieces, &StockSettings::default())
            .unwrap();

        assert_eq!(plans[0].plan.stocks[0].id, "t-1");
        assert_eq!(plans[0].plan.stocks[0].pieces[0].id, "t-2");
        assert_eq!(plans[1].plan.oversized_pieces[0][0].id, "t-3");
        assert_eq!(plans[1].plan.oversized_pieces[0][1].id, "t-4");
        assert_eq!(plans[1].plan.stocks[0].id, "t-5");
        assert_eq!(plans[1].plan.stocks[0].pieces[0].id, "t-6");
    }

    #[test]
    fn test_optimize_all_repeatable_across_threads() {
        let types: Vec<StockType> = (0..8)
            .map(|i| StockType::from_dimensions(i.to_string(), 45.0, 45.0 + i as f64))
            .collect();
        let pieces: Vec<Piece> = (0..400)
            .map(|i| {
                let length = 300.0 + (i * 37 % 6000) as f64;
                Piece::new(format!("p{}", i), length, types[i % 8].clone())
                    .with_kerf(3.0)
                    .with_margin(2.0)
            })
            .collect();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(8)
            .build()
            .unwrap();
        let run = || {
            pool.install(|| {
                optimizer()
                    .optimize_all(&pieces, &StockSettings::default())
                    .unwrap()
            })
        };

        let first = run();
        for _ in 0..10 {
            assert_eq!(run(), first);
        }
    }

    /// Buys one bar per demand, to check the strategy seam.
    struct OneBarEach;

    impl PackingStrategy for OneBarEach {
        fn name(&self) -> &'static str {
            "one-bar-each"
        }

        fn pack(
            &self,
            demands: &[Demand<'_>],
            catalog: &StockCatalog,
            ids: &dyn IdGenerator,
        ) -> Packing {
            let mut packing = Packing::default();
            for demand in demands {
                let length = catalog.max_length();
                let mut stock =
                    OptimizedStock::open(ids.next_id(), length, demand.stock_type().clone());
                stock.place(woodcalc_core::OptimizedPiece {
                    id: ids.next_id(),
                    original_id: demand.original_id().clone(),
                    length: demand.length(),
                    position: 0.0,
                    stock_type: demand.stock_type().clone(),
                    quantity: 1,
                    kerf: demand.kerf(),
                    margin: demand.margin(),
                    footprint: demand.length(),
                    join: None,
                });
                packing.stocks.push(stock);
            }
            packing
        }
    }

    #[test]
    fn test_custom_strategy() {
        let optimizer = optimizer().with_strategy(OneBarEach);
        assert_eq!(optimizer.strategy_name(), "one-bar-each");

        let pieces = vec![
            Piece::new("a", 500.0, pine()).with_quantity(3),
            Piece::new("big", 8000.0, pine()),
        ];
        let plan = optimizer
            .optimize(&pieces, &StockSettings::default(), &pine())
            .unwrap();

        assert_eq!(plan.bar_count(), 3);
        assert!(plan.stocks.iter().all(|s| s.length == 5400.0));
        assert_eq!(plan.oversized_pieces.len(), 1);
    }

    #[test]
    fn test_default_strategy_name() {
        let optimizer = Optimizer::default();
        assert_eq!(optimizer.strategy_name(), "first-fit-decreasing");
        assert!(format!("{:?}", optimizer).contains("first-fit-decreasing"));
    }
}
