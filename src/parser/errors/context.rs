//! Decode context tracking
//!
//! The decoder keeps a stack of contexts, one per production being decoded.
//! The stack serves two purposes: it is recorded in every diagnostic so a
//! message says where in the model it happened, and its wrapper tags are the
//! resynchronization points after an unknown field.

use crate::base::Tag;

/// The production currently being decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeContext {
    Model,
    TypeDeclaration,
    DataType,
    SubrangeType,
    RecordField,

    // Lustre
    LustreProgram,
    ConstantDeclaration,
    VariableDeclaration,
    NodeParameter(Tag),
    Node,
    NodeBody,
    NodeEquation,
    NodeProperty,
    Contract,
    ContractSpec,
    ContractItem,
    ContractMode,
    ContractImport,
    SymbolDefinition,
    Expression,
    BinaryOperation,
    IfThenElse,
    RecordProjection,
    RecordLiteral,
    FieldDefinition,
    NodeCall,

    // Architecture
    ComponentType,
    Port,
    ComponentImpl,
    BlockImpl,
    ComponentInstance,
    Connection,
    ConnectionEnd,
    CompInstPort,
    GenericAttribute,

    // Cyber and safety
    CyberRel,
    CyberReq,
    CyberExpr,
    CiaPort,
    Mission,
    SafetyReq,
    SafetyRel,
    SafetyEvent,
    SafetyExpr,
    IaPort,
}

impl DecodeContext {
    /// The wrapper tag that opens every entry of this production.
    pub fn wrapper(&self) -> Tag {
        match self {
            Self::Model => Tag::Model,
            Self::TypeDeclaration => Tag::TypeDeclaration,
            Self::DataType => Tag::DataType,
            Self::SubrangeType => Tag::SubrangeType,
            Self::RecordField => Tag::RecordField,
            Self::LustreProgram => Tag::LustreProgram,
            Self::ConstantDeclaration => Tag::ConstantDeclaration,
            Self::VariableDeclaration => Tag::VariableDeclaration,
            Self::NodeParameter(wrapper) => *wrapper,
            Self::Node => Tag::Node,
            Self::NodeBody => Tag::NodeBody,
            Self::NodeEquation => Tag::NodeEquation,
            Self::NodeProperty => Tag::NodeProperty,
            Self::Contract => Tag::Contract,
            Self::ContractSpec => Tag::ContractSpec,
            Self::ContractItem => Tag::ContractItem,
            Self::ContractMode => Tag::ContractMode,
            Self::ContractImport => Tag::ContractImport,
            Self::SymbolDefinition => Tag::SymbolDefinition,
            Self::Expression => Tag::Expression,
            Self::BinaryOperation => Tag::BinaryOperation,
            Self::IfThenElse => Tag::IfThenElse,
            Self::RecordProjection => Tag::RecordProjection,
            Self::RecordLiteral => Tag::RecordLiteral,
            Self::FieldDefinition => Tag::FieldDefinition,
            Self::NodeCall => Tag::NodeCall,
            Self::ComponentType => Tag::ComponentType,
            Self::Port => Tag::Port,
            Self::ComponentImpl => Tag::ComponentImpl,
            Self::BlockImpl => Tag::BlockImpl,
            Self::ComponentInstance => Tag::ComponentInstance,
            Self::Connection => Tag::Connection,
            Self::ConnectionEnd => Tag::ConnectionEnd,
            Self::CompInstPort => Tag::CompInstPort,
            Self::GenericAttribute => Tag::GenericAttribute,
            Self::CyberRel => Tag::CyberRel,
            Self::CyberReq => Tag::CyberReq,
            Self::CyberExpr => Tag::CyberExpr,
            Self::CiaPort => Tag::CiaPort,
            Self::Mission => Tag::Mission,
            Self::SafetyReq => Tag::SafetyReq,
            Self::SafetyRel => Tag::SafetyRel,
            Self::SafetyEvent => Tag::SafetyEvent,
            Self::SafetyExpr => Tag::SafetyExpr,
            Self::IaPort => Tag::IaPort,
        }
    }

    /// Get a human-readable description of this context for error messages
    pub fn description(&self) -> String {
        match self {
            Self::NodeParameter(wrapper) => format!("in {}", wrapper.key()),
            other => format!("in {}", other.wrapper().key()),
        }
    }
}
