//! Terminal tags of the token grammar.
//!
//! [`Tag`] is the closed alphabet the decoder dispatches on. Every tag has a
//! unique string key, which is what the token producer writes and what the
//! registry resolves declared names against.
//!
//! Tags fall into a few groups: structural wrappers, literal tags, declared
//! primitive types, record types, enum variants and field names. A field name
//! tag is only ever seen through a token's declared name, never as a token's
//! syntactic tag.

/// Defines [`Tag`] from `Variant => "key"` pairs.
macro_rules! tags {
    ($( $variant:ident => $key:literal ),+ $(,)?) => {
        /// A grammar terminal.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Tag {
            $( $variant ),+
        }

        impl Tag {
            /// Every tag, in declaration order.
            pub const ALL: &'static [Tag] = &[$( Tag::$variant ),+];

            /// The registry key of this tag.
            pub const fn key(self) -> &'static str {
                match self {
                    $( Tag::$variant => $key ),+
                }
            }
        }
    };
}

tags! {
    // =========================================================================
    // Stream structure
    // =========================================================================
    Eof => "EOF",
    Null => "null",
    Model => "Model",
    ArrayList => "ArrayList",
    Option => "Option",
    OptionKind => "OptionKind",
    DataKind => "kind",
    Some => "mk_some",
    MkNone => "mk_none",
    None => "None",

    // =========================================================================
    // Literal tags
    // =========================================================================
    IntLit => "int",
    RealLit => "real",
    FloatLit => "float",
    StringLit => "string",
    BoolLit => "boolean",
    CharLit => "char",

    // =========================================================================
    // Declared primitive types
    // =========================================================================
    Int => "Int",
    Real => "Real",
    Bool => "Bool",
    String => "String",
    Identifier => "Identifier",
    IntegerType => "IntegerType",
    RealType => "RealType",

    // =========================================================================
    // Data types
    // =========================================================================
    DataType => "DataType",
    DataTypeKind => "DataTypeKind",
    Plain => "Plain",
    Enum => "Enum",
    Subrange => "Subrange",
    Record => "Record",
    UserDefined => "UserDefined",
    PlainType => "PlainType",
    SubrangeType => "SubrangeType",
    RecordField => "RecordField",
    TypeDeclaration => "TypeDeclaration",

    // =========================================================================
    // Lustre program
    // =========================================================================
    LustreProgram => "LustreProgram",
    ConstantDeclaration => "ConstantDeclaration",
    VariableDeclaration => "VariableDeclaration",
    Contract => "Contract",
    ContractSpec => "ContractSpec",
    ContractItem => "ContractItem",
    ContractImport => "ContractImport",
    ContractMode => "ContractMode",
    SymbolDefinition => "SymbolDefinition",
    Node => "Node",
    InputParameter => "InputParameter",
    OutputParameter => "OutputParameter",
    NodeBody => "NodeBody",
    NodeEquation => "NodeEquation",
    NodeProperty => "NodeProperty",
    NodeCall => "NodeCall",
    Expression => "Expression",
    ExpressionKind => "ExpressionKind",
    BinaryOperation => "BinaryOperation",
    IfThenElse => "IfThenElse",
    RecordProjection => "RecordProjection",
    RecordLiteral => "RecordLiteral",
    FieldDefinition => "FieldDefinition",

    // Expression kinds (RecordProjection and RecordLiteral double as kinds)
    Id => "Id",
    IntLiteral => "IntLiteral",
    RealLiteral => "RealLiteral",
    BoolLiteral => "BoolLiteral",
    Not => "Not",
    Pre => "Pre",
    Negative => "Negative",
    ToReal => "ToReal",
    ToInt => "ToInt",
    Event => "Event",
    Equal => "Equal",
    NotEqual => "NotEqual",
    And => "And",
    Or => "Or",
    Xor => "Xor",
    Implies => "Implies",
    Plus => "Plus",
    Minus => "Minus",
    Times => "Times",
    Div => "Div",
    IntDiv => "IntDiv",
    Mod => "Mod",
    LessThan => "LessThan",
    LessThanOrEqualTo => "LessThanOrEqualTo",
    GreaterThan => "GreaterThan",
    GreaterThanOrEqualTo => "GreaterThanOrEqualTo",
    Arrow => "Arrow",
    ConditionalExpr => "ConditionalExpr",
    Call => "Call",

    // =========================================================================
    // Architecture
    // =========================================================================
    ComponentType => "ComponentType",
    ComponentImpl => "ComponentImpl",
    ComponentImplKind => "ComponentImplKind",
    BlockImplKind => "Block_Impl",
    DataflowImplKind => "Dataflow_Impl",
    BlockImpl => "BlockImpl",
    ComponentInstance => "ComponentInstance",
    ComponentInstanceKind => "ComponentInstanceKind",
    Specification => "Specification",
    Implementation => "Implementation",
    CompInstPort => "CompInstPort",
    Port => "Port",
    PortMode => "PortMode",
    In => "In",
    Out => "Out",
    Connection => "Connection",
    ConnectionEnd => "ConnectionEnd",
    ConnectionEndKind => "ConnectionEndKind",
    ComponentCe => "ComponentCE",
    SubcomponentCe => "SubcomponentCE",
    GenericAttribute => "GenericAttribute",
    AttributeType => "AttributeType",
    KindOfComponent => "KindOfComponent",
    Software => "Software",
    Hardware => "Hardware",
    Human => "Human",
    Hybrid => "Hybrid",
    ManufacturerType => "ManufacturerType",
    ThirdParty => "ThirdParty",
    InHouse => "InHouse",
    SituatedType => "SituatedType",
    OnBoard => "OnBoard",
    Remote => "Remote",
    PedigreeType => "PedigreeType",
    InternallyDeveloped => "InternallyDeveloped",
    Cots => "COTS",
    Sourced => "Sourced",
    ConnectionType => "ConnectionType",
    Local => "Local",
    FlowType => "FlowType",
    Xdata => "Xdata",
    Control => "Control",
    Request => "Request",

    // =========================================================================
    // Cyber
    // =========================================================================
    CyberReq => "CyberReq",
    CyberRel => "CyberRel",
    CyberExpr => "CyberExpr",
    CyberExprKind => "CyberExprKind",
    CiaPort => "CIAPort",
    Cia => "CIA",
    Confidentiality => "Confidentiality",
    Integrity => "Integrity",
    Availability => "Availability",
    Severity => "Severity",
    Minor => "Minor",
    Major => "Major",
    Hazardous => "Hazardous",
    Catastrophic => "Catastrophic",
    Mission => "Mission",

    // =========================================================================
    // Safety
    // =========================================================================
    SafetyReq => "SafetyReq",
    SafetyRel => "SafetyRel",
    SafetyEvent => "SafetyEvent",
    SafetyExpr => "SafetyExpr",
    SafetyExprKind => "SafetyExprKind",
    IaPort => "IAPort",
    Ia => "IA",
    Fault => "Fault",

    // =========================================================================
    // Field names: shared and data types
    // =========================================================================
    Name => "name",
    IdField => "id",
    Definition => "definition",
    Dtype => "dtype",
    PlainTypeField => "plain_type",
    EnumTypeField => "enum_type",
    SubrangeTypeField => "subrange_type",
    RecordTypeField => "record_type",
    UserDefinedType => "user_defined_type",
    LowerBound => "lower_bound",
    UpperBound => "upper_bound",

    // Field names: expressions
    IdentifierField => "identifier",
    IntLiteralField => "int_literal",
    RealLiteralField => "real_literal",
    BoolLiteralField => "bool_literal",
    Operand => "operand",
    Operation => "operation",
    Conditional => "conditional",
    Projection => "projection",
    LiteralField => "literal",
    CallField => "call",
    LhsOperand => "lhs_operand",
    RhsOperand => "rhs_operand",
    Condition => "condition",
    ThenBranch => "thenBranch",
    ElseBranch => "elseBranch",
    RecordReference => "record_reference",
    FieldId => "field_id",
    FieldDefinitions => "field_definitions",
    FieldValue => "field_value",
    NodeName => "node",
    Arguments => "arguments",

    // Field names: Lustre program
    TypeDeclarations => "type_declarations",
    ConstantDeclarations => "constant_declarations",
    VariableDeclarations => "variable_declarations",
    ContractDeclarations => "contract_declarations",
    NodeDeclarations => "node_declarations",
    InputParameters => "input_parameters",
    OutputParameters => "output_parameters",
    SpecificationField => "specification",
    Assumes => "assumes",
    Guarantees => "guarantees",
    Modes => "modes",
    Imports => "imports",
    Requires => "requires",
    Ensures => "ensures",
    ContractField => "contract",
    InputArguments => "input_arguments",
    OutputArguments => "output_arguments",
    ExpressionField => "expression",
    IsConstant => "is_constant",
    IsFunction => "is_function",
    IsMain => "is_main",
    Body => "body",
    Assertions => "assertions",
    Equations => "equations",
    Properties => "properties",
    Lhs => "lhs",
    Rhs => "rhs",

    // Field names: model root
    ComponentTypes => "component_types",
    ComponentImpls => "component_impl",
    CyberRequirements => "cyber_requirements",
    SafetyRequirements => "safety_requirements",
    Missions => "missions",
    DataflowCode => "dataflow_code",

    // Field names: architecture
    Ports => "ports",
    Category => "category",
    CyberRelations => "cyber_relations",
    SafetyRelations => "safety_relations",
    SafetyEvents => "safety_events",
    Mode => "mode",
    IsEvent => "is_event",
    Probe => "probe",
    Ptype => "ptype",
    Ctype => "ctype",
    BlockImplField => "block_impl",
    DataflowImpl => "dataflow_impl",
    Subcomponents => "subcomponents",
    Connections => "connections",
    ImplementationField => "implementation",
    Attributes => "attributes",
    Source => "source",
    Destination => "destination",
    ComponentPort => "component_port",
    SubcomponentPort => "subcomponent_port",
    Subcomponent => "subcomponent",
    PortField => "port",
    Atype => "atype",
    Value => "value",
    ComponentKindField => "component_type",
    Manufacturer => "manufacturer",
    Situated => "situated",
    Pedigree => "pedigree",
    AdversariallyTested => "adversarially_tested",
    FlowTypeField => "flow_type",
    ConnTypeField => "conn_type",

    // Instance flags
    HasSensitiveInfo => "has_sensitive_info",
    InsideTrustedBoundary => "inside_trusted_boundary",
    BroadcastFromOutsideTb => "broadcast_from_outside_tb",
    WifiFromOutsideTb => "wifi_from_outside_tb",
    Heterogeneity => "heterogeneity",
    Encryption => "encryption",
    AntiJamming => "anti_jamming",
    AntiFlooding => "anti_flooding",
    AntiFuzzing => "anti_fuzzing",
    CanReceiveConfigUpdate => "canReceiveConfigUpdate",
    CanReceiveSwUpdate => "canReceiveSWUpdate",
    ControlReceivedFromUntrusted => "controlReceivedFromUntrusted",
    ControlSentToUntrusted => "controlSentToUntrusted",
    DataReceivedFromUntrusted => "dataReceivedFromUntrusted",
    DataSentToUntrusted => "dataSentToUntrusted",

    // Attacks
    ConfigurationAttack => "Configuration_Attack",
    PhysicalTheftAttack => "Physical_Theft_Attack",
    InterceptionAttack => "Interception_Attack",
    HardwareIntegrityAttack => "Hardware_Integrity_Attack",
    SupplyChainAttack => "Supply_Chain_Attack",
    BruteForceAttack => "Brute_Force_Attack",
    FaultInjectionAttack => "Fault_Injection_Attack",
    IdentitySpoofingAttack => "Identity_Spoofing_Attack",
    ExcessiveAllocationAttack => "Excessive_Allocation_Attack",
    SniffingAttack => "Sniffing_Attack",
    BufferAttack => "Buffer_Attack",
    FloodingAttack => "Flooding_Attack",

    // Defenses
    AuditMessageResponses => "auditMessageResponses",
    DeviceAuthentication => "deviceAuthentication",
    DosProtection => "dosProtection",
    EncryptedStorage => "encryptedStorage",
    InputValidation => "inputValidation",
    Logging => "logging",
    MemoryProtection => "memoryProtection",
    PhysicalAccessControl => "physicalAccessControl",
    RemoveIdentifyingInformation => "removeIdentifyingInformation",
    ResourceAvailability => "resourceAvailability",
    ResourceIsolation => "resourceIsolation",
    SecureBoot => "secureBoot",
    SessionAuthenticity => "sessionAuthenticity",
    StaticCodeAnalysis => "staticCodeAnalysis",
    StrongCryptoAlgorithms => "strongCryptoAlgorithms",
    SupplyChainSecurity => "supplyChainSecurity",
    SystemAccessControl => "systemAccessControl",
    TamperProtection => "tamperProtection",
    UserAuthentication => "userAuthentication",

    // Design assurance levels
    HeterogeneityDal => "heterogeneity_dal",
    EncryptionDal => "encryption_dal",
    AntiJammingDal => "anti_jamming_dal",
    AntiFloodingDal => "anti_flooding_dal",
    AntiFuzzingDal => "anti_fuzzing_dal",
    AuditMessageResponsesDal => "auditMessageResponsesDAL",
    DeviceAuthenticationDal => "deviceAuthenticationDAL",
    DosProtectionDal => "dosProtectionDAL",
    EncryptedStorageDal => "encryptedStorageDAL",
    InputValidationDal => "inputValidationDAL",
    LoggingDal => "loggingDAL",
    MemoryProtectionDal => "memoryProtectionDAL",
    PhysicalAccessControlDal => "physicalAccessControlDAL",
    RemoveIdentifyingInformationDal => "removeIdentifyingInformationDAL",
    ResourceAvailabilityDal => "resourceAvailabilityDAL",
    ResourceIsolationDal => "resourceIsolationDAL",
    SecureBootDal => "secureBootDAL",
    SessionAuthenticityDal => "sessionAuthenticityDAL",
    StaticCodeAnalysisDal => "staticCodeAnalysisDAL",
    StrongCryptoAlgorithmsDal => "strongCryptoAlgorithmsDAL",
    SupplyChainSecurityDal => "supplyChainSecurityDAL",
    SystemAccessControlDal => "systemAccessControlDAL",
    TamperProtectionDal => "tamperProtectionDAL",
    UserAuthenticationDal => "userAuthenticationDAL",

    // Connection properties
    Authenticated => "authenticated",
    DataEncrypted => "data_encrypted",
    TrustedConnection => "trustedConnection",
    EncryptedTransmission => "encryptedTransmission",
    EncryptedTransmissionDal => "encryptedTransmissionDAL",
    ReplayProtection => "replayProtection",

    // Field names: cyber and safety
    Output => "output",
    Inputs => "inputs",
    Comment => "comment",
    Description => "description",
    Phases => "phases",
    Extern => "extern",
    CiaField => "cia",
    SeverityField => "severity",
    AndField => "and",
    OrField => "or",
    NotField => "not",
    CyberReqs => "cyber_reqs",
    FaultSrc => "faultSrc",
    TargetProbability => "targetProbability",
    Probability => "probability",
    FaultField => "fault",
    IaField => "ia",
}

impl Tag {
    /// Whether this tag marks a literal payload token.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Tag::IntLit | Tag::RealLit | Tag::FloatLit | Tag::StringLit | Tag::BoolLit | Tag::CharLit
        )
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

// ============================================================================
// CLOSED SUBSETS
// ============================================================================

/// A closed enum whose variants correspond one-to-one to a subset of [`Tag`].
///
/// Decoding a variant token resolves its declared name to a tag and then
/// narrows it with [`TagSubset::from_tag`]; anything outside the subset is a
/// diagnostic rather than a silent fallthrough.
pub trait TagSubset: Sized + Copy + 'static {
    /// Human-readable name of the subset, used in diagnostics.
    const NAME: &'static str;

    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    fn from_tag(tag: Tag) -> Option<Self>;

    fn tag(self) -> Tag;

    fn key(self) -> &'static str {
        self.tag().key()
    }
}

/// Defines an enum that is a closed subset of [`Tag`].
macro_rules! tag_subset {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $tag:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::base::TagSubset for $name {
            const NAME: &'static str = stringify!($name);
            const ALL: &'static [Self] = &[$( Self::$variant ),+];

            fn from_tag(tag: $crate::base::Tag) -> Option<Self> {
                match tag {
                    $( $crate::base::Tag::$tag => Some(Self::$variant), )+
                    _ => None,
                }
            }

            fn tag(self) -> $crate::base::Tag {
                match self {
                    $( Self::$variant => $crate::base::Tag::$tag ),+
                }
            }
        }
    };
}

pub(crate) use tag_subset;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_tags() {
        assert!(Tag::IntLit.is_literal());
        assert!(Tag::CharLit.is_literal());
        assert!(!Tag::Int.is_literal());
        assert!(!Tag::Identifier.is_literal());
    }

    #[test]
    fn test_display_uses_key() {
        assert_eq!(Tag::BlockImplKind.to_string(), "Block_Impl");
        assert_eq!(Tag::DataKind.to_string(), "kind");
    }
}
