//! Token-stream decoder for the architecture model
//!
//! The decoder is a hand-written recursive descent over a flat token stream
//! with one token of lookahead and no backtracking.
//!
//! ## Architecture
//!
//! ```text
//! TokenStream (from the producer, or parse_dump)
//!     ↓
//! Cursor → single lookahead, diagnostics, context stack
//!     ↓
//! decode → one function per production
//!     ↓
//! Model + Vec<Diagnostic>
//! ```
//!
//! ## Error Recovery
//!
//! Problems that leave the stream readable are recorded as diagnostics and
//! decoding carries on:
//! 1. A mismatched token is reported and skipped
//! 2. An unknown field skips to the next entry of any active record
//! 3. A missing field is filled with its default
//!
//! Only a lookahead past the end, cancellation and runaway nesting stop the
//! decode.

pub mod cursor;
mod decode;
pub mod dump;
pub mod errors;
mod options;

pub use cursor::Cursor;
pub use decode::{Decoded, decode, decode_with};
pub use dump::{DumpError, parse_dump};
pub use errors::{DecodeContext, DecodeError, Diagnostic, DiagnosticBuilder, ErrorCode, Severity};
pub use options::DecodeOptions;
