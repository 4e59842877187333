//! Model to token stream.
//!
//! The encoder writes exactly the token shapes the decoder reads, in the
//! order a faithful producer emits them: every list's length entry before its
//! elements, every tagged union's kind entry before its payload, and every
//! root list before anything that references into it. Decoding the result of
//! [`encode`] gives back an equal model.

mod architecture;
mod lustre;
mod security;

use smol_str::SmolStr;

use crate::base::{Literal, Tag, TagSubset, Token, TokenStream};
use crate::model::{
    ComponentImplId, ComponentTypeId, DataType, InstanceRef, Model, PortRef, RecordField,
    TypeDeclId, TypeDeclaration,
};

/// Encode `model` into a stream terminated by `EOF`.
pub fn encode(model: &Model) -> TokenStream {
    let mut encoder = Encoder::default();
    encoder.model(model);
    TokenStream::new(encoder.tokens)
}

#[derive(Debug, Default)]
pub(crate) struct Encoder {
    tokens: Vec<Token>,
}

/// Binder names are arbitrary to the decoder; use the wrapper's initials.
fn binder(wrapper: Tag) -> SmolStr {
    let initials: String = wrapper
        .key()
        .chars()
        .filter(char::is_ascii_uppercase)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if initials.is_empty() {
        SmolStr::new_static("x")
    } else {
        SmolStr::new(initials)
    }
}

impl Encoder {
    // =========================================================================
    // Token primitives
    // =========================================================================

    fn token(&mut self, tag: Tag, name: impl Into<SmolStr>) {
        self.tokens.push(Token::new(tag, name));
    }

    fn literal(&mut self, payload: Literal) {
        self.tokens.push(Token::literal(payload));
    }

    fn string(&mut self, value: &str) {
        self.literal(Literal::Str(value.to_string()));
    }

    fn int(&mut self, value: i64) {
        self.literal(Literal::Int(value));
    }

    fn boolean(&mut self, value: bool) {
        self.literal(Literal::Bool(value));
    }

    fn index(&mut self, value: usize) {
        self.int(i64::try_from(value).unwrap_or(i64::MAX));
    }

    /// `W(binder) F(field)`: the head of one record entry.
    fn entry(&mut self, wrapper: Tag, field_tag: Tag, field: Tag) {
        self.token(wrapper, binder(wrapper));
        self.token(field_tag, field.key());
    }

    fn variant<E: TagSubset>(&mut self, value: E) {
        self.token(value.tag(), value.key());
    }

    // =========================================================================
    // Field bodies
    // =========================================================================

    fn string_entry(&mut self, wrapper: Tag, field: Tag, value: &str) {
        self.entry(wrapper, Tag::String, field);
        self.string(value);
    }

    fn identifier_entry(&mut self, wrapper: Tag, field: Tag, value: &str) {
        self.entry(wrapper, Tag::Identifier, field);
        self.string(value);
    }

    fn int_entry(&mut self, wrapper: Tag, field: Tag, value: i64) {
        self.entry(wrapper, Tag::Int, field);
        self.int(value);
    }

    fn real_entry(&mut self, wrapper: Tag, field: Tag, value: f64) {
        self.entry(wrapper, Tag::Real, field);
        self.literal(Literal::Float(value));
    }

    fn bool_entry(&mut self, wrapper: Tag, field: Tag, value: bool) {
        self.entry(wrapper, Tag::Bool, field);
        self.boolean(value);
    }

    fn enum_entry<E: TagSubset>(&mut self, wrapper: Tag, field: Tag, type_tag: Tag, value: E) {
        self.entry(wrapper, type_tag, field);
        self.variant(value);
    }

    /// The kind entry that opens a tagged union.
    fn kind_entry<E: TagSubset>(&mut self, wrapper: Tag, kind_type: Tag, kind: E) {
        self.enum_entry(wrapper, Tag::DataKind, kind_type, kind);
    }

    fn option_entry<T>(
        &mut self,
        wrapper: Tag,
        field: Tag,
        value: Option<&T>,
        payload: impl FnOnce(&mut Self, &T),
    ) where
        T: ?Sized,
    {
        self.entry(wrapper, Tag::Option, field);
        self.token(Tag::OptionKind, Tag::DataKind.key());
        match value {
            Some(value) => {
                self.token(Tag::OptionKind, Tag::Some.key());
                payload(self, value);
            }
            None => self.token(Tag::OptionKind, Tag::None.key()),
        }
    }

    fn option_string(&mut self, wrapper: Tag, field: Tag, value: Option<&String>) {
        self.option_entry(wrapper, field, value, |e, v| e.string(v));
    }

    /// Length entry, then one element entry per item in index order.
    fn array<T>(&mut self, wrapper: Tag, field: Tag, items: &[T], mut element: impl FnMut(&mut Self, &T)) {
        self.entry(wrapper, Tag::ArrayList, field);
        self.token(Tag::Int, "length");
        self.index(items.len());
        for (i, item) in items.iter().enumerate() {
            self.entry(wrapper, Tag::ArrayList, field);
            self.token(Tag::Null, "element");
            self.index(i);
            element(self, item);
        }
    }

    // =========================================================================
    // References
    // =========================================================================

    fn list_step(&mut self, list: Tag, index: usize) {
        self.token(Tag::ArrayList, list.key());
        self.token(Tag::Null, "element");
        self.index(index);
    }

    fn root_reference(&mut self, list: Tag, index: usize) {
        self.token(Tag::Model, binder(Tag::Model));
        self.list_step(list, index);
    }

    fn type_decl_ref(&mut self, id: TypeDeclId) {
        self.root_reference(Tag::TypeDeclarations, id.0);
    }

    fn component_type_ref(&mut self, id: ComponentTypeId) {
        self.root_reference(Tag::ComponentTypes, id.0);
    }

    fn component_impl_ref(&mut self, id: ComponentImplId) {
        self.root_reference(Tag::ComponentImpls, id.0);
    }

    fn port_ref(&mut self, r: PortRef) {
        self.component_type_ref(r.component);
        self.list_step(Tag::Ports, r.port);
    }

    fn instance_ref(&mut self, r: InstanceRef) {
        self.token(Tag::BlockImpl, binder(Tag::BlockImpl));
        self.list_step(Tag::Subcomponents, r.0);
    }

    // =========================================================================
    // Root and data types
    // =========================================================================

    fn model(&mut self, model: &Model) {
        let w = Tag::Model;
        self.string_entry(w, Tag::Name, &model.name);
        self.array(w, Tag::TypeDeclarations, &model.type_declarations, Self::type_declaration);
        self.array(w, Tag::ComponentTypes, &model.component_types, Self::component_type);
        self.array(w, Tag::ComponentImpls, &model.component_impls, Self::component_impl);
        self.array(w, Tag::CyberRequirements, &model.cyber_requirements, Self::cyber_req);
        self.array(w, Tag::SafetyRequirements, &model.safety_requirements, Self::safety_req);
        self.array(w, Tag::Missions, &model.missions, Self::mission);
        self.option_entry(w, Tag::DataflowCode, model.dataflow_code.as_ref(), Self::lustre_program);
    }

    fn type_declaration(&mut self, decl: &TypeDeclaration) {
        let w = Tag::TypeDeclaration;
        self.string_entry(w, Tag::Name, &decl.name);
        self.option_entry(w, Tag::Definition, decl.definition.as_ref(), Self::data_type);
    }

    /// `DataType(f)` and the data type's entries.
    fn data_type_field(&mut self, wrapper: Tag, field: Tag, dtype: &DataType) {
        self.entry(wrapper, Tag::DataType, field);
        self.data_type(dtype);
    }

    fn data_type(&mut self, dtype: &DataType) {
        let w = Tag::DataType;
        self.kind_entry(w, Tag::DataTypeKind, dtype.kind());
        match dtype {
            DataType::Plain(plain) => self.enum_entry(w, Tag::PlainTypeField, Tag::PlainType, *plain),
            DataType::Enum(values) => {
                self.array(w, Tag::EnumTypeField, values, |e, v| e.string(v));
            }
            DataType::Subrange { lower, upper } => {
                self.entry(w, Tag::SubrangeType, Tag::SubrangeTypeField);
                self.int_entry(Tag::SubrangeType, Tag::LowerBound, *lower);
                self.int_entry(Tag::SubrangeType, Tag::UpperBound, *upper);
            }
            DataType::Record(fields) => {
                self.array(w, Tag::RecordTypeField, fields, Self::record_field);
            }
            DataType::UserDefined(id) => {
                self.entry(w, Tag::TypeDeclaration, Tag::UserDefinedType);
                self.type_decl_ref(*id);
            }
        }
    }

    fn record_field(&mut self, field: &RecordField) {
        self.string_entry(Tag::RecordField, Tag::Name, &field.name);
        self.data_type_field(Tag::RecordField, Tag::Dtype, &field.dtype);
    }
}
