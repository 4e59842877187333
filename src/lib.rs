//! # archmodel-base
//!
//! Single-pass decoder from tagged token streams to a typed cyber-physical
//! architecture model.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! term      → Term model and the pre-order token producer
//!   ↓
//! encode    → Model → token stream (round-trip oracle)
//!   ↓
//! parser    → Cursor, diagnostics, domain decoder, dump lexer
//!   ↓
//! model     → Output model: data types, Lustre, architecture, cyber, safety
//!   ↓
//! base      → Primitives (Tag, TypeRegistry, Token, TokenStream)
//! ```

// ============================================================================
// MODULES (dependency order: base → model → parser → encode → term)
// ============================================================================

/// Foundation types: tags, registry, tokens
pub mod base;

/// The decoded architecture model
pub mod model;

/// Decoder: cursor, diagnostics, productions, text dump
pub mod parser;

/// Encoder: the inverse of the decoder
pub mod encode;

/// Term model and token producer
pub mod term;

// Re-export the entry points
pub use encode::encode;
pub use parser::{DecodeError, DecodeOptions, Decoded, Diagnostic, ErrorCode, decode, decode_with};

// Re-export foundation types
pub use base::{Literal, Tag, Token, TokenStream, TypeRegistry};
pub use model::Model;

pub use tokio_util::sync::CancellationToken;
