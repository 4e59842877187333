//! Data types and type declarations.

use crate::base::tag_subset;

use super::TypeDeclId;

tag_subset! {
    /// Built-in scalar types.
    pub enum PlainType {
        Int => Int,
        Real => Real,
        Bool => Bool,
    }
}

tag_subset! {
    /// Discriminator of [`DataType`].
    pub enum DataTypeKind {
        Plain => Plain,
        Enum => Enum,
        Subrange => Subrange,
        Record => Record,
        UserDefined => UserDefined,
    }
}

/// A data type. Exactly one shape is populated per value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    Plain(PlainType),
    /// Enumeration values, in declared order.
    Enum(Vec<String>),
    Subrange { lower: i64, upper: i64 },
    Record(Vec<RecordField>),
    /// Reference to a root-level [`TypeDeclaration`].
    UserDefined(TypeDeclId),
}

impl DataType {
    pub fn kind(&self) -> DataTypeKind {
        match self {
            DataType::Plain(_) => DataTypeKind::Plain,
            DataType::Enum(_) => DataTypeKind::Enum,
            DataType::Subrange { .. } => DataTypeKind::Subrange,
            DataType::Record(_) => DataTypeKind::Record,
            DataType::UserDefined(_) => DataTypeKind::UserDefined,
        }
    }
}

impl Default for DataType {
    fn default() -> Self {
        DataType::Plain(PlainType::Int)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordField {
    pub name: String,
    pub dtype: DataType,
}

/// A named type. An absent definition declares an abstract type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeDeclaration {
    pub name: String,
    pub definition: Option<DataType>,
}
