//! The indexed-array idiom.
//!
//! An array field is a run of entries, each wrapped in `ArrayList`:
//!
//! ```text
//! W(r) ArrayList(field) Int(length) int(n)                 -- length entry
//! W(r) ArrayList(field) null(element) int(i) <element>     -- element entry
//! ```
//!
//! Elements carry their own index and may arrive in any order. They are
//! collected in an [`IndexedBuffer`] that checks every index against the
//! declared length and refuses to fill a slot twice.
//!
//! An element entry is at least four tokens, so a declared length is capped
//! at a quarter of the tokens left in the stream before any slot is
//! allocated.

use thiserror::Error;

use crate::base::Tag;

use super::{DecodeResult, Decoder};
use crate::parser::errors::ErrorCode;

/// `W(r) ArrayList(f) null(element) int(i)`, before the element body.
const MIN_ELEMENT_TOKENS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum BufferError {
    #[error("element {index} before the length")]
    NoLength { index: usize },
    #[error("index {index} is out of bounds for length {len}")]
    OutOfBounds { index: usize, len: usize },
    #[error("index {index} filled twice")]
    Duplicate { index: usize },
    #[error("length redeclared from {old} to {new}")]
    LengthRedeclared { old: usize, new: usize },
}

impl BufferError {
    fn code(&self) -> ErrorCode {
        match self {
            BufferError::NoLength { .. } => ErrorCode::E0201,
            BufferError::OutOfBounds { .. } => ErrorCode::E0202,
            BufferError::Duplicate { .. } => ErrorCode::E0203,
            BufferError::LengthRedeclared { .. } => ErrorCode::E0206,
        }
    }
}

/// Pre-sized slots for one array field.
#[derive(Debug)]
pub(crate) struct IndexedBuffer<T> {
    field: Tag,
    len: Option<usize>,
    slots: Vec<Option<T>>,
    filled: usize,
}

impl<T> IndexedBuffer<T> {
    pub fn new(field: Tag) -> Self {
        Self {
            field,
            len: None,
            slots: Vec::new(),
            filled: 0,
        }
    }

    pub fn field(&self) -> Tag {
        self.field
    }

    pub fn len(&self) -> Option<usize> {
        self.len
    }

    pub fn set_len(&mut self, len: usize) -> Result<(), BufferError> {
        match self.len {
            Some(old) if old != len => Err(BufferError::LengthRedeclared { old, new: len }),
            Some(_) => Ok(()),
            None => {
                self.len = Some(len);
                self.slots.resize_with(len, || None);
                Ok(())
            }
        }
    }

    pub fn insert(&mut self, index: usize, value: T) -> Result<(), BufferError> {
        let len = self.len.ok_or(BufferError::NoLength { index })?;
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(BufferError::OutOfBounds { index, len })?;
        if slot.is_some() {
            return Err(BufferError::Duplicate { index });
        }
        *slot = Some(value);
        self.filled += 1;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// The length is known and every slot holds a value.
    pub fn is_complete(&self) -> bool {
        self.len.is_some_and(|len| self.filled == len)
    }

    /// The filled values in index order, and the indices left empty.
    pub fn finish(self) -> (Vec<T>, Vec<usize>) {
        let mut values = Vec::with_capacity(self.filled);
        let mut missing = Vec::new();
        for (index, slot) in self.slots.into_iter().enumerate() {
            match slot {
                Some(value) => values.push(value),
                None => missing.push(index),
            }
        }
        (values, missing)
    }
}

/// What one array entry turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArrayEntry {
    Length(usize),
    Element(usize),
    /// The entry was consumed but its content could not be stored.
    Rejected,
}

impl Decoder<'_> {
    /// Decode one `ArrayList` entry into `buf`. The current token is the
    /// `ArrayList` field token; the token after it tells length from element.
    pub(super) fn array_entry<T>(
        &mut self,
        buf: &mut IndexedBuffer<T>,
        element: impl FnOnce(&mut Self) -> DecodeResult<T>,
    ) -> DecodeResult<ArrayEntry> {
        let is_length = self.cur.peek()?.tag == Tag::Int;
        self.cur.expect(Tag::ArrayList);

        if is_length {
            self.cur.expect(Tag::Int);
            let Some(declared) = self.index_literal() else {
                return Ok(ArrayEntry::Rejected);
            };
            let len = self.bounded_length(buf.field(), declared);
            return Ok(match buf.set_len(len) {
                Ok(()) => ArrayEntry::Length(len),
                Err(err) => {
                    self.buffer_error(buf.field(), err);
                    ArrayEntry::Rejected
                }
            });
        }

        self.cur.expect(Tag::Null);
        let index = self.index_literal();
        let value = element(self)?;
        let Some(index) = index else {
            return Ok(ArrayEntry::Rejected);
        };
        Ok(match buf.insert(index, value) {
            Ok(()) => ArrayEntry::Element(index),
            Err(err) => {
                self.buffer_error(buf.field(), err);
                ArrayEntry::Rejected
            }
        })
    }

    /// Close an array field, compacting and reporting any unfilled slots.
    pub(super) fn finish_array<T>(&mut self, buf: IndexedBuffer<T>) -> Vec<T> {
        let field = buf.field();
        let (values, missing) = buf.finish();
        if !missing.is_empty() {
            self.cur.report(
                ErrorCode::E0204,
                format!(
                    "{} unfilled slot(s) in '{}': {:?}",
                    missing.len(),
                    field.key(),
                    missing
                ),
            );
        }
        values
    }

    /// Close `buf` early once every slot is filled. Bounded records use this
    /// to tell when an array field is present.
    pub(super) fn take_if_complete<T>(&mut self, buf: &mut IndexedBuffer<T>) -> Option<Vec<T>> {
        if !buf.is_complete() {
            return None;
        }
        let field = buf.field();
        let full = std::mem::replace(buf, IndexedBuffer::new(field));
        Some(self.finish_array(full))
    }

    /// An integer literal used as a length or index.
    pub(super) fn index_literal(&mut self) -> Option<usize> {
        let value = self.int_lit();
        match usize::try_from(value) {
            Ok(index) => Some(index),
            Err(_) => {
                self.cur
                    .report(ErrorCode::E0205, format!("negative length or index {value}"));
                None
            }
        }
    }

    /// Clamp a declared length to what the rest of the stream can hold.
    fn bounded_length(&mut self, field: Tag, declared: usize) -> usize {
        let cap = self.cur.remaining() / MIN_ELEMENT_TOKENS;
        if declared <= cap {
            return declared;
        }
        self.cur.report_hinted(
            ErrorCode::E0207,
            format!(
                "array '{}' declares {declared} elements but at most {cap} can follow",
                field.key()
            ),
            format!("length clamped to {cap}"),
        );
        cap
    }

    fn buffer_error(&mut self, field: Tag, err: BufferError) {
        let message = format!("array '{}': {}", field.key(), err);
        match err {
            BufferError::NoLength { .. } => self.cur.report_hinted(
                err.code(),
                message,
                "the length entry must precede the elements",
            ),
            _ => self.cur.report(err.code(), message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_order_inserts() {
        let mut buf = IndexedBuffer::new(Tag::Ports);
        buf.set_len(3).unwrap();
        buf.insert(2, "c").unwrap();
        buf.insert(0, "a").unwrap();
        assert!(!buf.is_complete());
        buf.insert(1, "b").unwrap();
        assert!(buf.is_complete());
        assert_eq!(buf.finish(), (vec!["a", "b", "c"], vec![]));
    }

    #[test]
    fn test_insert_checks() {
        let mut buf = IndexedBuffer::new(Tag::Ports);
        assert_eq!(buf.insert(0, 1), Err(BufferError::NoLength { index: 0 }));

        buf.set_len(2).unwrap();
        assert_eq!(
            buf.insert(2, 1),
            Err(BufferError::OutOfBounds { index: 2, len: 2 })
        );
        buf.insert(1, 1).unwrap();
        assert_eq!(buf.insert(1, 2), Err(BufferError::Duplicate { index: 1 }));
        assert_eq!(
            buf.set_len(5),
            Err(BufferError::LengthRedeclared { old: 2, new: 5 })
        );
        assert_eq!(buf.finish(), (vec![1], vec![0]));
    }

    #[test]
    fn test_buffer_error_codes() {
        assert_eq!(BufferError::Duplicate { index: 0 }.code(), ErrorCode::E0203);
        assert_eq!(
            BufferError::LengthRedeclared { old: 1, new: 2 }.code(),
            ErrorCode::E0206
        );
    }

    #[test]
    fn test_empty_array_is_complete_once_declared() {
        let mut buf: IndexedBuffer<u8> = IndexedBuffer::new(Tag::Ports);
        assert!(!buf.is_complete());
        buf.set_len(0).unwrap();
        assert!(buf.is_complete());
    }
}
