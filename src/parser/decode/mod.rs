//! Recursive-descent decoder from tokens to the [`Model`].
//!
//! One function per production, grouped by area:
//! - `root`: the model aggregate
//! - `data_type`: data types and type declarations
//! - `expression`: the expression sub-grammar
//! - `lustre`: programs, nodes, contracts
//! - `architecture`: component types, implementations, connections
//! - `cyber` / `safety`: relations, requirements, missions, events
//!
//! Productions follow three idioms: repeated-wrapper records, indexed arrays
//! (`array`) and options (`common`). Cross-references are checked against the
//! lists populated so far (`references`).

mod architecture;
mod array;
mod common;
mod cyber;
mod data_type;
mod expression;
mod lustre;
mod references;
mod root;
mod safety;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::base::{Tag, TokenStream};
use crate::model::Model;

use super::cursor::Cursor;
use super::errors::{DecodeError, Diagnostic, ErrorCode};
use super::options::DecodeOptions;

use array::{ArrayEntry, IndexedBuffer};
use references::Scope;

pub(crate) type DecodeResult<T> = Result<T, DecodeError>;

/// The result of a decode: a best-effort model and everything that went
/// wrong while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub model: Model,
    pub diagnostics: Vec<Diagnostic>,
}

impl Decoded {
    /// No error-severity diagnostics were produced.
    pub fn ok(&self) -> bool {
        !self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }
}

/// Decode `stream` with default options.
pub fn decode(stream: &TokenStream) -> Result<Decoded, DecodeError> {
    decode_with(stream, &DecodeOptions::default(), None)
}

/// Decode `stream`, checking `cancel` between top-level productions.
pub fn decode_with(
    stream: &TokenStream,
    options: &DecodeOptions,
    cancel: Option<&CancellationToken>,
) -> Result<Decoded, DecodeError> {
    let mut decoder = Decoder::new(stream, options, cancel);
    let model = root::model(&mut decoder)?;
    decoder.finish_stream();

    let diagnostics = decoder.cur.finish();
    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    info!(
        tokens = stream.len(),
        component_types = model.component_types.len(),
        component_impls = model.component_impls.len(),
        errors,
        warnings = diagnostics.len() - errors,
        "decoded model"
    );

    if options.strict && errors > 0 {
        let first = diagnostics
            .iter()
            .find(|d| d.is_error())
            .map(Diagnostic::format)
            .unwrap_or_default();
        return Err(DecodeError::Rejected {
            count: errors,
            first,
        });
    }

    Ok(Decoded { model, diagnostics })
}

// ============================================================================
// DECODER STATE
// ============================================================================

pub(crate) struct Decoder<'t> {
    cur: Cursor<'t>,
    options: &'t DecodeOptions,
    cancel: Option<&'t CancellationToken>,
    depth: usize,
    scope: Scope,
}

impl<'t> Decoder<'t> {
    fn new(
        stream: &'t TokenStream,
        options: &'t DecodeOptions,
        cancel: Option<&'t CancellationToken>,
    ) -> Self {
        Self {
            cur: Cursor::new(stream),
            options,
            cancel,
            depth: 0,
            scope: Scope::default(),
        }
    }

    /// Check for cancellation. Called between top-level productions only.
    fn checkpoint(&self) -> DecodeResult<()> {
        match self.cancel {
            Some(token) if token.is_cancelled() => {
                debug!(position = self.cur.position(), "decode cancelled");
                Err(DecodeError::Cancelled {
                    position: self.cur.position(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Enter a recursive production.
    fn descend(&mut self) -> DecodeResult<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(DecodeError::DepthExceeded {
                limit: self.options.max_depth,
                position: self.cur.position(),
            });
        }
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Everything after the root model must be the terminating `EOF`.
    fn finish_stream(&mut self) {
        if self.cur.at_eof() {
            return;
        }
        let found = self.cur.current();
        self.cur.report(
            ErrorCode::E0103,
            format!(
                "trailing tokens after model, starting with {}({})",
                found.tag.key(),
                found.name
            ),
        );
        self.cur.recover(&[Tag::Eof]);
    }
}
