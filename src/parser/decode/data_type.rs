//! Data types and type declarations.
//!
//! ```text
//! DataType(dt) DataTypeKind(kind) Plain(Plain)
//! DataType(dt) PlainType(plain_type) Int(Int)
//! ```
//!
//! A data type is a bounded record: it ends as soon as its kind and one
//! payload are present, which is what lets a record field's type be a record
//! type in turn.

use crate::base::Tag;
use crate::model::{DataType, DataTypeKind, PlainType, RecordField, TypeDeclaration};
use crate::parser::errors::DecodeContext;

use super::{DecodeResult, Decoder, IndexedBuffer};

impl Decoder<'_> {
    /// `DataType(f)` followed by the data type's entries.
    pub(super) fn data_type_field(&mut self) -> DecodeResult<DataType> {
        self.cur.expect(Tag::DataType);
        self.data_type()
    }

    pub(super) fn data_type(&mut self) -> DecodeResult<DataType> {
        self.descend()?;
        self.enter(DecodeContext::DataType);
        let result = self.data_type_entries();
        self.leave();
        self.ascend();
        result
    }

    fn data_type_entries(&mut self) -> DecodeResult<DataType> {
        let mut kind = None;
        let mut payload = None;
        let mut enum_values = IndexedBuffer::new(Tag::EnumTypeField);
        let mut record_fields = IndexedBuffer::new(Tag::RecordTypeField);

        while self.at(Tag::DataType) && !(kind.is_some() && payload.is_some()) {
            match self.entry() {
                Some(Tag::DataKind) => {
                    kind = self.enum_field::<DataTypeKind>(Tag::DataTypeKind);
                }
                Some(Tag::PlainTypeField) => {
                    if let Some(plain) = self.enum_field::<PlainType>(Tag::PlainType) {
                        self.set_payload(&mut payload, kind, DataTypeKind::Plain, DataType::Plain(plain));
                    }
                }
                Some(Tag::EnumTypeField) => {
                    self.array_entry(&mut enum_values, |d| Ok(d.string_lit()))?;
                    if let Some(values) = self.take_if_complete(&mut enum_values) {
                        self.set_payload(&mut payload, kind, DataTypeKind::Enum, DataType::Enum(values));
                    }
                }
                Some(Tag::SubrangeTypeField) => {
                    self.cur.expect(Tag::SubrangeType);
                    let (lower, upper) = self.subrange()?;
                    self.set_payload(
                        &mut payload,
                        kind,
                        DataTypeKind::Subrange,
                        DataType::Subrange { lower, upper },
                    );
                }
                Some(Tag::RecordTypeField) => {
                    self.array_entry(&mut record_fields, |d| d.record_field())?;
                    if let Some(fields) = self.take_if_complete(&mut record_fields) {
                        self.set_payload(&mut payload, kind, DataTypeKind::Record, DataType::Record(fields));
                    }
                }
                Some(Tag::UserDefinedType) => {
                    self.cur.expect(Tag::TypeDeclaration);
                    let id = self.type_decl_ref();
                    self.set_payload(
                        &mut payload,
                        kind,
                        DataTypeKind::UserDefined,
                        DataType::UserDefined(id),
                    );
                }
                _ => self.unknown_field(Tag::DataType),
            }
        }

        if kind.is_none() {
            self.missing(Tag::DataKind);
        }
        // Arrays that never filled up are still the best payload available.
        if payload.is_none() && enum_values.len().is_some() {
            payload = Some(DataType::Enum(self.finish_array(enum_values)));
        } else if payload.is_none() && record_fields.len().is_some() {
            payload = Some(DataType::Record(self.finish_array(record_fields)));
        }
        Ok(self.required(payload, Tag::DataType))
    }

    /// `SubrangeType(s) Int(lower_bound) int(l)` and the upper bound entry.
    fn subrange(&mut self) -> DecodeResult<(i64, i64)> {
        self.enter(DecodeContext::SubrangeType);
        let mut lower = None;
        let mut upper = None;
        while self.at(Tag::SubrangeType) && !(lower.is_some() && upper.is_some()) {
            match self.entry() {
                Some(Tag::LowerBound) => lower = Some(self.int_field()),
                Some(Tag::UpperBound) => upper = Some(self.int_field()),
                _ => self.unknown_field(Tag::SubrangeType),
            }
        }
        let bounds = (
            self.required(lower, Tag::LowerBound),
            self.required(upper, Tag::UpperBound),
        );
        self.leave();
        Ok(bounds)
    }

    fn record_field(&mut self) -> DecodeResult<RecordField> {
        self.enter(DecodeContext::RecordField);
        let mut name = None;
        let mut dtype = None;
        while self.at(Tag::RecordField) && !(name.is_some() && dtype.is_some()) {
            match self.entry() {
                Some(Tag::Name) => name = Some(self.string_field()),
                Some(Tag::Dtype) => dtype = Some(self.data_type_field()?),
                _ => self.unknown_field(Tag::RecordField),
            }
        }
        let field = RecordField {
            name: self.required(name, Tag::Name),
            dtype: self.required(dtype, Tag::Dtype),
        };
        self.leave();
        Ok(field)
    }

    /// A root-level or program-level type declaration.
    pub(super) fn type_declaration(&mut self) -> DecodeResult<TypeDeclaration> {
        self.enter(DecodeContext::TypeDeclaration);
        let mut name = None;
        let mut definition = None;
        while self.at(Tag::TypeDeclaration) {
            match self.entry() {
                Some(Tag::Name) => {
                    let declared = self.string_field();
                    name = Some(self.options.type_name(declared));
                }
                Some(Tag::Definition) => definition = self.option(|d| d.data_type())?,
                _ => self.unknown_field(Tag::TypeDeclaration),
            }
        }
        let declaration = TypeDeclaration {
            name: self.required(name, Tag::Name),
            definition,
        };
        self.leave();
        Ok(declaration)
    }
}
