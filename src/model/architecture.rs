//! Component types, implementations, instances and connections.

use indexmap::IndexMap;

use crate::base::tag_subset;

use super::cyber::CyberRel;
use super::data::DataType;
use super::lustre::{ContractSpec, NodeBody};
use super::safety::{SafetyEvent, SafetyRel};
use super::{ComponentImplId, ComponentTypeId, InstanceRef, PortRef};

// ============================================================================
// CLOSED PROPERTY ENUMS
// ============================================================================

tag_subset! {
    pub enum PortMode {
        In => In,
        Out => Out,
    }
}

tag_subset! {
    pub enum ComponentKind {
        Software => Software,
        Hardware => Hardware,
        Human => Human,
        Hybrid => Hybrid,
    }
}

tag_subset! {
    pub enum Manufacturer {
        InHouse => InHouse,
        ThirdParty => ThirdParty,
    }
}

tag_subset! {
    pub enum Situated {
        OnBoard => OnBoard,
        Remote => Remote,
    }
}

tag_subset! {
    pub enum Pedigree {
        InternallyDeveloped => InternallyDeveloped,
        Cots => Cots,
        Sourced => Sourced,
    }
}

tag_subset! {
    pub enum ConnectionType {
        Local => Local,
        Remote => Remote,
    }
}

tag_subset! {
    pub enum FlowType {
        Xdata => Xdata,
        Control => Control,
        Request => Request,
    }
}

tag_subset! {
    pub enum AttributeType {
        Int => Int,
        Real => Real,
        Bool => Bool,
        String => String,
    }
}

tag_subset! {
    /// Boolean properties of a component instance: trust flags, attacks
    /// and defenses.
    pub enum InstanceFlag {
        HasSensitiveInfo => HasSensitiveInfo,
        InsideTrustedBoundary => InsideTrustedBoundary,
        BroadcastFromOutsideTb => BroadcastFromOutsideTb,
        WifiFromOutsideTb => WifiFromOutsideTb,
        Heterogeneity => Heterogeneity,
        Encryption => Encryption,
        AntiJamming => AntiJamming,
        AntiFlooding => AntiFlooding,
        AntiFuzzing => AntiFuzzing,
        CanReceiveConfigUpdate => CanReceiveConfigUpdate,
        CanReceiveSwUpdate => CanReceiveSwUpdate,
        ControlReceivedFromUntrusted => ControlReceivedFromUntrusted,
        ControlSentToUntrusted => ControlSentToUntrusted,
        DataReceivedFromUntrusted => DataReceivedFromUntrusted,
        DataSentToUntrusted => DataSentToUntrusted,
        ConfigurationAttack => ConfigurationAttack,
        PhysicalTheftAttack => PhysicalTheftAttack,
        InterceptionAttack => InterceptionAttack,
        HardwareIntegrityAttack => HardwareIntegrityAttack,
        SupplyChainAttack => SupplyChainAttack,
        BruteForceAttack => BruteForceAttack,
        FaultInjectionAttack => FaultInjectionAttack,
        IdentitySpoofingAttack => IdentitySpoofingAttack,
        ExcessiveAllocationAttack => ExcessiveAllocationAttack,
        SniffingAttack => SniffingAttack,
        BufferAttack => BufferAttack,
        FloodingAttack => FloodingAttack,
        AuditMessageResponses => AuditMessageResponses,
        DeviceAuthentication => DeviceAuthentication,
        DosProtection => DosProtection,
        EncryptedStorage => EncryptedStorage,
        InputValidation => InputValidation,
        Logging => Logging,
        MemoryProtection => MemoryProtection,
        PhysicalAccessControl => PhysicalAccessControl,
        RemoveIdentifyingInformation => RemoveIdentifyingInformation,
        ResourceAvailability => ResourceAvailability,
        ResourceIsolation => ResourceIsolation,
        SecureBoot => SecureBoot,
        SessionAuthenticity => SessionAuthenticity,
        StaticCodeAnalysis => StaticCodeAnalysis,
        StrongCryptoAlgorithms => StrongCryptoAlgorithms,
        SupplyChainSecurity => SupplyChainSecurity,
        SystemAccessControl => SystemAccessControl,
        TamperProtection => TamperProtection,
        UserAuthentication => UserAuthentication,
    }
}

tag_subset! {
    /// Numeric design assurance levels attached to instance properties.
    pub enum DalProperty {
        Heterogeneity => HeterogeneityDal,
        Encryption => EncryptionDal,
        AntiJamming => AntiJammingDal,
        AntiFlooding => AntiFloodingDal,
        AntiFuzzing => AntiFuzzingDal,
        AuditMessageResponses => AuditMessageResponsesDal,
        DeviceAuthentication => DeviceAuthenticationDal,
        DosProtection => DosProtectionDal,
        EncryptedStorage => EncryptedStorageDal,
        InputValidation => InputValidationDal,
        Logging => LoggingDal,
        MemoryProtection => MemoryProtectionDal,
        PhysicalAccessControl => PhysicalAccessControlDal,
        RemoveIdentifyingInformation => RemoveIdentifyingInformationDal,
        ResourceAvailability => ResourceAvailabilityDal,
        ResourceIsolation => ResourceIsolationDal,
        SecureBoot => SecureBootDal,
        SessionAuthenticity => SessionAuthenticityDal,
        StaticCodeAnalysis => StaticCodeAnalysisDal,
        StrongCryptoAlgorithms => StrongCryptoAlgorithmsDal,
        SupplyChainSecurity => SupplyChainSecurityDal,
        SystemAccessControl => SystemAccessControlDal,
        TamperProtection => TamperProtectionDal,
        UserAuthentication => UserAuthenticationDal,
    }
}

tag_subset! {
    pub enum ConnectionFlag {
        Authenticated => Authenticated,
        DataEncrypted => DataEncrypted,
        TrustedConnection => TrustedConnection,
        EncryptedTransmission => EncryptedTransmission,
        ReplayProtection => ReplayProtection,
    }
}

tag_subset! {
    pub enum ComponentImplKind {
        Block => BlockImplKind,
        Dataflow => DataflowImplKind,
    }
}

tag_subset! {
    pub enum ComponentInstanceKind {
        Specification => Specification,
        Implementation => Implementation,
    }
}

tag_subset! {
    pub enum ConnectionEndKind {
        Component => ComponentCe,
        Subcomponent => SubcomponentCe,
    }
}

// ============================================================================
// COMPONENT TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub name: String,
    pub mode: PortMode,
    pub is_event: bool,
    pub probe: bool,
    pub ptype: Option<DataType>,
}

impl Port {
    pub fn new(name: impl Into<String>, mode: PortMode) -> Self {
        Self {
            name: name.into(),
            mode,
            is_event: false,
            probe: false,
            ptype: None,
        }
    }
}

impl Default for Port {
    fn default() -> Self {
        Self::new(String::new(), PortMode::In)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentType {
    pub name: String,
    pub ports: Vec<Port>,
    pub contract: Option<ContractSpec>,
    pub category: Option<String>,
    pub cyber_relations: Vec<CyberRel>,
    pub safety_relations: Vec<SafetyRel>,
    pub safety_events: Vec<SafetyEvent>,
}

impl ComponentType {
    pub fn port_named(&self, name: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == name)
    }
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentImpl {
    pub name: String,
    pub component_type: ComponentTypeId,
    pub body: ImplBody,
}

/// The realization of a component implementation.
#[derive(Debug, Clone, PartialEq)]
pub enum ImplBody {
    Block(BlockImpl),
    Dataflow(NodeBody),
}

impl ImplBody {
    pub fn kind(&self) -> ComponentImplKind {
        match self {
            ImplBody::Block(_) => ComponentImplKind::Block,
            ImplBody::Dataflow(_) => ComponentImplKind::Dataflow,
        }
    }
}

impl Default for ImplBody {
    fn default() -> Self {
        ImplBody::Block(BlockImpl::default())
    }
}

/// Sub-components and the connections wiring them together.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockImpl {
    pub subcomponents: Vec<ComponentInstance>,
    pub connections: Vec<Connection>,
}

impl BlockImpl {
    pub fn instance(&self, r: InstanceRef) -> Option<&ComponentInstance> {
        self.subcomponents.get(r.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstanceProperties {
    pub component_kind: Option<ComponentKind>,
    pub manufacturer: Option<Manufacturer>,
    pub situated: Option<Situated>,
    pub pedigree: Option<Pedigree>,
    pub category: Option<String>,
    pub adversarially_tested: Option<bool>,
    pub flags: IndexMap<InstanceFlag, bool>,
    pub dals: IndexMap<DalProperty, i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentInstance {
    pub name: String,
    pub kind: InstanceKind,
    pub properties: InstanceProperties,
    pub attributes: Vec<GenericAttribute>,
}

/// What a sub-component instantiates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceKind {
    Specification(ComponentTypeId),
    Implementation(ComponentImplId),
}

impl InstanceKind {
    pub fn kind(&self) -> ComponentInstanceKind {
        match self {
            InstanceKind::Specification(_) => ComponentInstanceKind::Specification,
            InstanceKind::Implementation(_) => ComponentInstanceKind::Implementation,
        }
    }
}

// ============================================================================
// CONNECTIONS
// ============================================================================

/// A free-form `name: type = value` property. The value is kept as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericAttribute {
    pub name: String,
    pub atype: AttributeType,
    pub value: String,
}

impl Default for GenericAttribute {
    fn default() -> Self {
        Self {
            name: String::new(),
            atype: AttributeType::String,
            value: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEnd {
    /// A port of the enclosing component type.
    Component(PortRef),
    /// A port of a sub-component instance in the same block.
    Subcomponent { instance: InstanceRef, port: PortRef },
}

impl ConnectionEnd {
    pub fn kind(&self) -> ConnectionEndKind {
        match self {
            ConnectionEnd::Component(_) => ConnectionEndKind::Component,
            ConnectionEnd::Subcomponent { .. } => ConnectionEndKind::Subcomponent,
        }
    }

    pub fn port(&self) -> PortRef {
        match *self {
            ConnectionEnd::Component(port) => port,
            ConnectionEnd::Subcomponent { port, .. } => port,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub name: String,
    pub source: ConnectionEnd,
    pub destination: ConnectionEnd,
    pub flow: Option<FlowType>,
    pub conn_type: Option<ConnectionType>,
    pub flags: IndexMap<ConnectionFlag, bool>,
    pub encrypted_transmission_dal: Option<i64>,
    pub attributes: Vec<GenericAttribute>,
}
