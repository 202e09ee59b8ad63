//! # Woodcalc Core
//!
//! Core types and traits for the Woodcalc linear cutting optimizer.
//!
//! This crate holds the value objects shared by the optimizer and its callers:
//! requested pieces, stock types, the purchasable length catalog, and the
//! cutting plan returned by a solve. It performs no I/O and keeps no state.
//!
//! ## Core Components
//!
//! - **Inputs**: [`Piece`], [`Group`], [`StockType`], [`StockSettings`]
//! - **Catalog**: [`StockCatalog`] - admissible bar lengths
//! - **Results**: [`CuttingPlan`], [`OptimizedStock`], [`OptimizedPiece`], [`JoinPart`]
//! - **Strategy seam**: [`PackingStrategy`], [`Demand`], [`Packing`]
//! - **Identity**: [`IdGenerator`], [`SequentialIds`], [`UuidIds`]
//!
//! ## Configuration
//!
//! ```rust
//! use woodcalc_core::{StockCatalog, StockSettings};
//!
//! let settings = StockSettings::new()
//!     .with_lengths(2400.0, 4800.0, 600.0)
//!     .with_default_kerf(2.5);
//!
//! let catalog = StockCatalog::from_settings(&settings).unwrap();
//! assert_eq!(catalog.lengths(), &[2400.0, 3000.0, 3600.0, 4200.0, 4800.0]);
//! assert_eq!(catalog.smallest_fitting(3100.0), Some(3600.0));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod error;
pub mod id;
pub mod piece;
pub mod result;
pub mod stock;
pub mod strategy;

// Re-exports
pub use error::{Error, Result};
pub use id::{IdGenerator, SequentialIds, UuidIds};
pub use piece::{Group, Piece, PieceId};
pub use result::{CuttingPlan, JoinPart, OptimizedPiece, OptimizedStock, PlanSummary, StockPlan};
pub use stock::{default_stock_types, StockCatalog, StockSettings, StockType, StockTypeId};
pub use strategy::{Demand, Packing, PackingStrategy};
