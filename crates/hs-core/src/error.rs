//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `HsError` as one variant
//! where they need to surface configuration problems.

use thiserror::Error;

/// The top-level error type for `hs-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum HsError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `hs-*` crates.
pub type HsResult<T> = Result<T, HsError>;
