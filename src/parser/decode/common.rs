//! Field bodies shared by every production: literals, identifiers, closed
//! enums, options and required-field bookkeeping.

use crate::base::{Tag, TagSubset};
use crate::parser::errors::{DecodeContext, ErrorCode};

use super::{DecodeResult, Decoder};

impl Decoder<'_> {
    // =========================================================================
    // Record scaffolding
    // =========================================================================

    pub(super) fn enter(&mut self, context: DecodeContext) {
        self.cur.push_context(context);
    }

    pub(super) fn leave(&mut self) {
        self.cur.pop_context();
    }

    pub(super) fn at(&self, tag: Tag) -> bool {
        self.cur.at(tag)
    }

    /// Consume the record wrapper of one entry and return the field the
    /// entry is for.
    pub(super) fn entry(&mut self) -> Option<Tag> {
        self.cur.advance();
        self.cur.semantic()
    }

    /// Report a field the current record does not know and skip to the next
    /// entry of any active record.
    pub(super) fn unknown_field(&mut self, record: Tag) {
        let token = self.cur.current();
        let message = format!(
            "unknown field '{}' ({}) in {}",
            token.name,
            token.tag.key(),
            record.key()
        );
        self.cur
            .report_with(ErrorCode::E0301, self.options.report_unknown_fields, message);
        let mut recovery = self.cur.active_wrappers();
        recovery.push(Tag::Eof);
        self.cur.recover(&recovery);
    }

    /// Unwrap a required field, substituting the default when it never
    /// appeared.
    pub(super) fn required<T: Default>(&mut self, value: Option<T>, field: Tag) -> T {
        value.unwrap_or_else(|| {
            self.missing(field);
            T::default()
        })
    }

    pub(super) fn missing(&mut self, field: Tag) {
        self.cur.report(
            ErrorCode::E0305,
            format!("missing required field '{}'", field.key()),
        );
    }

    /// Store the payload of a tagged union, keeping the first one.
    pub(super) fn set_payload<K, T>(
        &mut self,
        slot: &mut Option<T>,
        kind: Option<K>,
        payload_kind: K,
        value: T,
    ) where
        K: TagSubset + PartialEq,
    {
        if slot.is_some() {
            self.cur.report(
                ErrorCode::E0302,
                format!("second {} payload ignored", payload_kind.key()),
            );
            return;
        }
        if let Some(kind) = kind.filter(|kind| *kind != payload_kind) {
            self.cur.report(
                ErrorCode::E0303,
                format!(
                    "{} payload under kind {}",
                    payload_kind.key(),
                    kind.key()
                ),
            );
        }
        *slot = Some(value);
    }

    // =========================================================================
    // Literals
    // =========================================================================

    fn literal_mismatch(&mut self, expected: Tag) {
        let found = self.cur.current();
        let message = format!("expected {} literal, found {}", expected.key(), found.tag.key());
        self.cur.report(ErrorCode::E0101, message);
        if !self.cur.at_eof() {
            self.cur.advance();
        }
    }

    pub(super) fn string_lit(&mut self) -> String {
        let token = self.cur.current();
        match token.as_str() {
            Some(value) if token.tag == Tag::StringLit || token.tag == Tag::CharLit => {
                self.cur.advance();
                value.to_string()
            }
            _ => {
                self.literal_mismatch(Tag::StringLit);
                String::new()
            }
        }
    }

    pub(super) fn int_lit(&mut self) -> i64 {
        let token = self.cur.current();
        match token.as_int() {
            Some(value) if token.tag == Tag::IntLit => {
                self.cur.advance();
                value
            }
            _ => {
                self.literal_mismatch(Tag::IntLit);
                0
            }
        }
    }

    pub(super) fn float_lit(&mut self) -> f64 {
        let token = self.cur.current();
        match token.as_float() {
            Some(value) if matches!(token.tag, Tag::FloatLit | Tag::RealLit | Tag::IntLit) => {
                self.cur.advance();
                value
            }
            _ => {
                self.literal_mismatch(Tag::FloatLit);
                0.0
            }
        }
    }

    pub(super) fn bool_lit(&mut self) -> bool {
        let token = self.cur.current();
        match token.as_bool() {
            Some(value) if token.tag == Tag::BoolLit => {
                self.cur.advance();
                value
            }
            _ => {
                self.literal_mismatch(Tag::BoolLit);
                false
            }
        }
    }

    // =========================================================================
    // Typed field bodies
    // =========================================================================

    /// `Identifier(field) string(v)`
    pub(super) fn identifier(&mut self) -> String {
        self.cur.expect(Tag::Identifier);
        self.string_lit()
    }

    /// `String(field) string(v)`
    pub(super) fn string_field(&mut self) -> String {
        self.cur.expect(Tag::String);
        self.string_lit()
    }

    /// `Int(field) int(v)`
    pub(super) fn int_field(&mut self) -> i64 {
        self.cur.expect(Tag::Int);
        self.int_lit()
    }

    /// `Real(field) float(v)`
    pub(super) fn real_field(&mut self) -> f64 {
        self.cur.expect(Tag::Real);
        self.float_lit()
    }

    /// `Bool(field) boolean(v)`
    pub(super) fn bool_field(&mut self) -> bool {
        self.cur.expect(Tag::Bool);
        self.bool_lit()
    }

    /// A variant token: its declared name (or failing that, its tag) must
    /// fall inside the closed enum `E`.
    pub(super) fn variant<E: TagSubset>(&mut self) -> Option<E> {
        let token = self.cur.current();
        let variant = self
            .cur
            .semantic()
            .and_then(E::from_tag)
            .or_else(|| E::from_tag(token.tag));
        if variant.is_none() {
            self.cur.report(
                ErrorCode::E0304,
                format!("unknown {} variant '{}'", E::NAME, token.name),
            );
        }
        self.cur.advance();
        variant
    }

    /// `E(field) V(key)`: an enum field whose type token is `type_tag`.
    pub(super) fn enum_field<E: TagSubset>(&mut self, type_tag: Tag) -> Option<E> {
        self.cur.expect(type_tag);
        self.variant::<E>()
    }

    // =========================================================================
    // Options
    // =========================================================================

    /// `Option(field) OptionKind(kind) OptionKind(None|mk_some) <payload>`
    ///
    /// The payload is only decoded for `mk_some`; `None` consumes nothing
    /// beyond the discriminator.
    pub(super) fn option<T>(
        &mut self,
        payload: impl FnOnce(&mut Self) -> DecodeResult<T>,
    ) -> DecodeResult<Option<T>> {
        self.cur.expect(Tag::Option);
        self.cur.expect(Tag::DataKind);

        let discriminator = self.cur.semantic().unwrap_or(self.cur.current().tag);
        match discriminator {
            Tag::Some => {
                self.cur.advance();
                payload(self).map(Some)
            }
            Tag::None | Tag::MkNone => {
                self.cur.advance();
                Ok(None)
            }
            other => {
                self.cur.report(
                    ErrorCode::E0401,
                    format!("option discriminator '{}' is neither None nor mk_some", other.key()),
                );
                if !self.cur.at_eof() {
                    self.cur.advance();
                }
                Ok(None)
            }
        }
    }

    pub(super) fn option_string(&mut self) -> DecodeResult<Option<String>> {
        self.option(|d| Ok(d.string_lit()))
    }

    pub(super) fn option_bool(&mut self) -> DecodeResult<Option<bool>> {
        self.option(|d| Ok(d.bool_lit()))
    }

    pub(super) fn option_int(&mut self) -> DecodeResult<Option<i64>> {
        self.option(|d| Ok(d.int_lit()))
    }

    /// An option whose payload is a single variant token.
    pub(super) fn option_variant<E: TagSubset>(&mut self) -> DecodeResult<Option<E>> {
        Ok(self.option(|d| Ok(d.variant::<E>()))?.flatten())
    }
}
