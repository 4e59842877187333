//! The reconstructed architecture model.
//!
//! [`Model`] is the single owner of everything the decoder builds. Anything
//! that points at another node (a port from a connection, a component type
//! from an instance, a type declaration from a data type) stores a handle
//! into one of the root lists, never a copy. The accessors on [`Model`] turn
//! a handle back into a reference to the canonical node.

mod architecture;
mod cyber;
mod data;
mod lustre;
mod safety;

pub use architecture::{
    AttributeType, BlockImpl, ComponentImpl, ComponentImplKind, ComponentInstance,
    ComponentInstanceKind, ComponentKind, ComponentType, Connection, ConnectionEnd,
    ConnectionEndKind, ConnectionFlag, ConnectionType, DalProperty, FlowType, GenericAttribute,
    ImplBody, InstanceFlag, InstanceKind, InstanceProperties, Manufacturer, Pedigree, Port,
    PortMode, Situated,
};
pub use cyber::{Cia, CiaPort, CyberExpr, CyberExprKind, CyberRel, CyberReq, Mission, Severity};
pub use data::{DataType, DataTypeKind, PlainType, RecordField, TypeDeclaration};
pub use lustre::{
    BinaryOp, ConstantDeclaration, Contract, ContractImport, ContractItem, ContractMode,
    ContractSpec, Expression, ExpressionKind, FieldDefinition, LustreProgram, Node, NodeBody,
    NodeEquation, NodeParameter, NodeProperty, SymbolDefinition, UnaryOp, VariableDeclaration,
};
pub use safety::{Ia, IaPort, SafetyEvent, SafetyExpr, SafetyExprKind, SafetyRel, SafetyReq};

// ============================================================================
// HANDLES
// ============================================================================

/// Index into [`Model::type_declarations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TypeDeclId(pub usize);

/// Index into [`Model::component_types`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ComponentTypeId(pub usize);

/// Index into [`Model::component_impls`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ComponentImplId(pub usize);

/// A port, addressed by its component type and its position in that type's
/// port list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PortRef {
    pub component: ComponentTypeId,
    pub port: usize,
}

/// Index into the sub-components of the enclosing [`BlockImpl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct InstanceRef(pub usize);

// ============================================================================
// MODEL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    pub name: String,
    pub type_declarations: Vec<TypeDeclaration>,
    pub component_types: Vec<ComponentType>,
    pub component_impls: Vec<ComponentImpl>,
    pub cyber_requirements: Vec<CyberReq>,
    pub safety_requirements: Vec<SafetyReq>,
    pub missions: Vec<Mission>,
    pub dataflow_code: Option<LustreProgram>,
}

impl Model {
    pub fn type_declaration(&self, id: TypeDeclId) -> Option<&TypeDeclaration> {
        self.type_declarations.get(id.0)
    }

    pub fn component_type(&self, id: ComponentTypeId) -> Option<&ComponentType> {
        self.component_types.get(id.0)
    }

    pub fn component_impl(&self, id: ComponentImplId) -> Option<&ComponentImpl> {
        self.component_impls.get(id.0)
    }

    pub fn port(&self, r: &PortRef) -> Option<&Port> {
        self.component_type(r.component)?.ports.get(r.port)
    }

    /// Follow user-defined type references to the first structural type.
    ///
    /// Stops at an abstract declaration or a dangling handle and returns the
    /// last type reached. Reference cycles are cut after visiting every
    /// declaration once.
    pub fn resolve_data_type<'a>(&'a self, dtype: &'a DataType) -> &'a DataType {
        let mut current = dtype;
        for _ in 0..=self.type_declarations.len() {
            let DataType::UserDefined(id) = current else {
                return current;
            };
            match self.type_declaration(*id).and_then(|d| d.definition.as_ref()) {
                Some(next) => current = next,
                None => return current,
            }
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_port_model() -> Model {
        Model {
            name: "m".into(),
            component_types: vec![ComponentType {
                name: "Sensor".into(),
                ports: vec![Port::new("in1", PortMode::In), Port::new("out1", PortMode::Out)],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_port_handle_resolves_into_canonical_list() {
        let model = two_port_model();
        let r = PortRef {
            component: ComponentTypeId(0),
            port: 1,
        };
        let port = model.port(&r).unwrap();
        assert!(std::ptr::eq(port, &model.component_types[0].ports[1]));
        assert!(model
            .port(&PortRef {
                component: ComponentTypeId(0),
                port: 2
            })
            .is_none());
    }

    #[test]
    fn test_resolve_data_type_follows_chain() {
        let model = Model {
            type_declarations: vec![
                TypeDeclaration {
                    name: "A".into(),
                    definition: Some(DataType::UserDefined(TypeDeclId(1))),
                },
                TypeDeclaration {
                    name: "B".into(),
                    definition: Some(DataType::Plain(PlainType::Real)),
                },
            ],
            ..Default::default()
        };
        let start = DataType::UserDefined(TypeDeclId(0));
        assert_eq!(
            model.resolve_data_type(&start),
            &DataType::Plain(PlainType::Real)
        );
    }

    #[test]
    fn test_resolve_data_type_cuts_cycles() {
        let model = Model {
            type_declarations: vec![TypeDeclaration {
                name: "Loop".into(),
                definition: Some(DataType::UserDefined(TypeDeclId(0))),
            }],
            ..Default::default()
        };
        let start = DataType::UserDefined(TypeDeclId(0));
        assert_eq!(model.resolve_data_type(&start), &start);
    }
}
