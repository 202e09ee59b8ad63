//! # Woodcalc Linear
//!
//! One-dimensional stock cutting for the Woodcalc optimizer.
//!
//! Given requested pieces of a stock type and the catalog of purchasable bar
//! lengths, this crate decides how many bars to buy, where each piece is cut
//! along its bar (accounting for kerf and margin), and how pieces longer than
//! the longest bar are split into joinable parts.
//!
//! ## Algorithm
//!
//! 1. **Expansion**: Pieces of the requested stock type become unit demands
//! 2. **Ordering**: Demands are sorted longest first (stable)
//! 3. **Oversize splitting**: Demands longer than the catalog maximum become
//!    join-part groups, reported separately from bars
//! 4. **Packing**: Remaining demands go through a [`PackingStrategy`],
//!    [`FirstFitDecreasing`] by default
//! 5. **Aggregation**: Waste and utilization over all bars
//!
//! The result is a greedy heuristic, not an optimal packing; see
//! [`first_fit`] for its known weaknesses.
//!
//! ## Quick Start
//!
//! ```rust
//! use woodcalc_linear::{Optimizer, Piece, SequentialIds, StockSettings, StockType};
//!
//! let pine = StockType::from_dimensions("pine", 45.0, 95.0);
//! let pieces = vec![
//!     Piece::new("leg", 900.0, pine.clone()).with_quantity(4).with_kerf(3.0),
//!     Piece::new("rail", 6200.0, pine.clone()).with_kerf(3.0),
//! ];
//!
//! let optimizer = Optimizer::new().with_id_generator(SequentialIds::new("cut"));
//! let plan = optimizer
//!     .optimize(&pieces, &StockSettings::default(), &pine)
//!     .unwrap();
//!
//! assert_eq!(plan.stocks.len(), 2);
//! assert_eq!(plan.oversized_pieces.len(), 1);
//! println!("Bars: {}, utilization: {}", plan.bar_count(), plan.utilization_percent());
//! ```

pub mod demand;
pub mod first_fit;
pub mod optimizer;
pub mod oversize;

// Re-exports
pub use first_fit::FirstFitDecreasing;
pub use optimizer::{optimize_cutting, Optimizer};
pub use oversize::split_oversized;
pub use woodcalc_core::{
    CuttingPlan, Demand, Error, Group, IdGenerator, JoinPart, OptimizedPiece, OptimizedStock,
    Packing, PackingStrategy, Piece, PlanSummary, Result, SequentialIds, StockCatalog, StockPlan,
    StockSettings, StockType, UuidIds,
};
