//! Foundation types for the decoder.
//!
//! This module provides:
//! - [`Tag`] - The closed set of grammar terminals
//! - [`TypeRegistry`] - Key to tag lookup, validated at construction
//! - [`Token`], [`Literal`], [`TokenStream`] - The decoder's input
//! - [`TagSubset`] - Closed per-production enums carved out of [`Tag`]
//!
//! This module has NO dependencies on other archmodel modules.

mod registry;
mod tag;
mod token;

pub use registry::{RegistryError, TypeRegistry};
pub use tag::{Tag, TagSubset};
pub(crate) use tag::tag_subset;
pub use token::{Literal, Token, TokenStream};
