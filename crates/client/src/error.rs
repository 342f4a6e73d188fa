//! Error types surfaced by the cart and session layers.

use thiserror::Error;

use crate::api::ApiError;

/// Failure of a cart operation, surfaced to the caller as a typed value
/// rather than a logged-and-swallowed boolean.
///
/// Local persistence failures are deliberately absent: losing durability
/// does not undo the in-memory effect of an operation, so it is logged at
/// the mirror write and never propagated.
#[derive(Debug, Error)]
pub enum CartError {
    /// Malformed input or a stock-ceiling violation, detected before any
    /// mutation. The message is user-facing and names the limit.
    #[error("{0}")]
    Validation(String),

    /// A remote call failed and the operation's policy does not allow a
    /// local fallback.
    #[error(transparent)]
    Remote(#[from] ApiError),
}

/// Result type alias for cart operations.
pub type CartResult<T> = Result<T, CartError>;
