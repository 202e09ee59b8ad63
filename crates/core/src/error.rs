//! Error types for the cutting optimizer.

use thiserror::Error;

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by catalog construction, input validation and solving.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A requested piece violates the input contract (length, quantity, kerf or margin).
    #[error("invalid piece: {0}")]
    InvalidPiece(String),

    /// Stock-length settings or an explicit length list cannot form a catalog.
    #[error("invalid stock settings: {0}")]
    InvalidSettings(String),

    /// Internal invariant violation.
    #[error("internal error: {0}")]
    Internal(String),
}
