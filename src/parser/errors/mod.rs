//! Decoder error handling module
//!
//! Two kinds of failure exist:
//! - [`Diagnostic`]: a recoverable problem, accumulated while decoding continues
//! - [`DecodeError`]: a fatal condition that ends the decode
//!
//! Diagnostics carry categorized error codes, the context stack of the
//! productions being decoded and optional hints.

mod codes;
mod context;
mod error;

pub use codes::ErrorCode;
pub use context::DecodeContext;
pub use error::{Diagnostic, DiagnosticBuilder, Severity};

use thiserror::Error;

/// Fatal decode failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// `peek` past the end of the stream. The grammar always expects a
    /// successor here, so the producer and decoder are out of step.
    #[error("lookahead past end of stream at token {position}")]
    Lookahead { position: usize },

    #[error("decoding cancelled at token {position}")]
    Cancelled { position: usize },

    #[error("nesting deeper than {limit} at token {position}")]
    DepthExceeded { limit: usize, position: usize },

    /// Strict mode and at least one error diagnostic.
    #[error("decoding produced {count} error(s); first: {first}")]
    Rejected { count: usize, first: String },
}

#[cfg(test)]
mod tests;
