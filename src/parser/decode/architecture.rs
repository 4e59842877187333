//! Component types, implementations, instances and connections.

use indexmap::IndexMap;
use tracing::debug;

use crate::base::{Tag, TagSubset};
use crate::model::{
    BlockImpl, ComponentImpl, ComponentImplKind, ComponentInstance, ComponentInstanceKind,
    ComponentKind, ComponentType, Connection, ConnectionEnd, ConnectionEndKind, ConnectionFlag,
    ConnectionType, DalProperty, FlowType, GenericAttribute, ImplBody, InstanceFlag, InstanceKind,
    InstanceProperties, InstanceRef, Manufacturer, Pedigree, Port, PortMode, PortRef, Situated,
};
use crate::parser::errors::DecodeContext;

use super::{ArrayEntry, DecodeResult, Decoder, IndexedBuffer};

impl Decoder<'_> {
    // =========================================================================
    // Component types
    // =========================================================================

    pub(super) fn component_type(&mut self) -> DecodeResult<ComponentType> {
        self.enter(DecodeContext::ComponentType);
        let mut component = ComponentType::default();
        let mut name = None;
        let mut ports = IndexedBuffer::new(Tag::Ports);
        let mut cyber_relations = IndexedBuffer::new(Tag::CyberRelations);
        let mut safety_relations = IndexedBuffer::new(Tag::SafetyRelations);
        let mut safety_events = IndexedBuffer::new(Tag::SafetyEvents);

        while self.at(Tag::ComponentType) {
            match self.entry() {
                Some(Tag::Name) => name = Some(self.string_field()),
                Some(Tag::Ports) => {
                    self.array_entry(&mut ports, |d| d.port())?;
                }
                Some(Tag::ContractField) => {
                    component.contract = self.option(|d| d.contract_spec())?;
                }
                Some(Tag::Category) => component.category = self.option_string()?,
                Some(Tag::CyberRelations) => {
                    self.array_entry(&mut cyber_relations, |d| d.cyber_rel())?;
                }
                Some(Tag::SafetyRelations) => {
                    self.array_entry(&mut safety_relations, |d| d.safety_rel())?;
                }
                Some(Tag::SafetyEvents) => {
                    self.array_entry(&mut safety_events, |d| d.safety_event())?;
                }
                _ => self.unknown_field(Tag::ComponentType),
            }
        }

        component.name = self.required(name, Tag::Name);
        component.ports = self.finish_array(ports);
        component.cyber_relations = self.finish_array(cyber_relations);
        component.safety_relations = self.finish_array(safety_relations);
        component.safety_events = self.finish_array(safety_events);
        debug!(name = %component.name, ports = component.ports.len(), "decoded component type");
        self.leave();
        Ok(component)
    }

    fn port(&mut self) -> DecodeResult<Port> {
        self.enter(DecodeContext::Port);
        let mut port = Port::default();
        let mut name = None;
        let mut mode = None;
        while self.at(Tag::Port) {
            match self.entry() {
                Some(Tag::Name) => name = Some(self.string_field()),
                Some(Tag::Mode) => mode = self.enum_field::<PortMode>(Tag::PortMode),
                Some(Tag::IsEvent) => port.is_event = self.bool_field(),
                Some(Tag::Probe) => port.probe = self.bool_field(),
                Some(Tag::Ptype) => port.ptype = self.option(|d| d.data_type())?,
                _ => self.unknown_field(Tag::Port),
            }
        }
        port.name = self.required(name, Tag::Name);
        if let Some(mode) = mode {
            port.mode = mode;
        } else {
            self.missing(Tag::Mode);
        }
        self.leave();
        Ok(port)
    }

    // =========================================================================
    // Implementations
    // =========================================================================

    pub(super) fn component_impl(&mut self) -> DecodeResult<ComponentImpl> {
        self.enter(DecodeContext::ComponentImpl);
        let mut name = None;
        let mut component_type = None;
        let mut kind = None;
        let mut body = None;

        while self.at(Tag::ComponentImpl) {
            match self.entry() {
                Some(Tag::Name) => name = Some(self.string_field()),
                Some(Tag::Ctype) => {
                    self.cur.expect(Tag::ComponentType);
                    component_type = Some(self.component_type_ref());
                }
                Some(Tag::DataKind) => {
                    kind = self.enum_field::<ComponentImplKind>(Tag::ComponentImplKind);
                }
                Some(Tag::BlockImplField) => {
                    self.cur.expect(Tag::BlockImpl);
                    let block = self.block_impl()?;
                    self.set_payload(&mut body, kind, ComponentImplKind::Block, ImplBody::Block(block));
                }
                Some(Tag::DataflowImpl) => {
                    self.cur.expect(Tag::NodeBody);
                    let dataflow = self.node_body()?;
                    self.set_payload(
                        &mut body,
                        kind,
                        ComponentImplKind::Dataflow,
                        ImplBody::Dataflow(dataflow),
                    );
                }
                _ => self.unknown_field(Tag::ComponentImpl),
            }
        }

        if kind.is_none() {
            self.missing(Tag::DataKind);
        }
        let name = self.required(name, Tag::Name);
        let mut body = self.required(body, Tag::BlockImplField);
        if let ImplBody::Block(block) = &mut body {
            if self.options.qualify_instance_names {
                for instance in &mut block.subcomponents {
                    instance.name = format!("{}_{}", name, instance.name);
                }
            }
        }
        let component_impl = ComponentImpl {
            name,
            component_type: self.required(component_type, Tag::Ctype),
            body,
        };
        debug!(
            name = %component_impl.name,
            kind = component_impl.body.kind().key(),
            "decoded component implementation"
        );
        self.leave();
        Ok(component_impl)
    }

    fn block_impl(&mut self) -> DecodeResult<BlockImpl> {
        self.enter(DecodeContext::BlockImpl);
        self.scope.open_block();
        let result = self.block_impl_entries();
        self.scope.close_block();
        self.leave();
        result
    }

    fn block_impl_entries(&mut self) -> DecodeResult<BlockImpl> {
        let mut subcomponents = IndexedBuffer::new(Tag::Subcomponents);
        let mut connections = IndexedBuffer::new(Tag::Connections);

        while self.at(Tag::BlockImpl) {
            match self.entry() {
                Some(Tag::Subcomponents) => {
                    let entry = self.array_entry(&mut subcomponents, |d| d.component_instance())?;
                    if let (ArrayEntry::Length(len), Some(block)) = (entry, self.scope.block_mut()) {
                        block.declare(len);
                    }
                }
                Some(Tag::Connections) => {
                    self.array_entry(&mut connections, |d| d.connection())?;
                }
                _ => self.unknown_field(Tag::BlockImpl),
            }
        }

        Ok(BlockImpl {
            subcomponents: self.finish_array(subcomponents),
            connections: self.finish_array(connections),
        })
    }

    // =========================================================================
    // Instances
    // =========================================================================

    fn component_instance(&mut self) -> DecodeResult<ComponentInstance> {
        self.enter(DecodeContext::ComponentInstance);
        let mut name = None;
        let mut kind = None;
        let mut instantiates = None;
        let mut properties = InstanceProperties::default();
        let mut attributes = IndexedBuffer::new(Tag::Attributes);

        while self.at(Tag::ComponentInstance) {
            match self.entry() {
                Some(Tag::Name) => name = Some(self.string_field()),
                Some(Tag::DataKind) => {
                    kind = self.enum_field::<ComponentInstanceKind>(Tag::ComponentInstanceKind);
                }
                Some(Tag::SpecificationField) => {
                    self.cur.expect(Tag::ComponentType);
                    let id = self.component_type_ref();
                    self.set_payload(
                        &mut instantiates,
                        kind,
                        ComponentInstanceKind::Specification,
                        InstanceKind::Specification(id),
                    );
                }
                Some(Tag::ImplementationField) => {
                    self.cur.expect(Tag::ComponentImpl);
                    let id = self.component_impl_ref();
                    self.set_payload(
                        &mut instantiates,
                        kind,
                        ComponentInstanceKind::Implementation,
                        InstanceKind::Implementation(id),
                    );
                }
                Some(Tag::Attributes) => {
                    self.array_entry(&mut attributes, |d| d.generic_attribute())?;
                }
                Some(field) => self.instance_property(&mut properties, field)?,
                None => self.unknown_field(Tag::ComponentInstance),
            }
        }

        if kind.is_none() {
            self.missing(Tag::DataKind);
        }
        let instance = ComponentInstance {
            name: self.required(name, Tag::Name),
            kind: match instantiates {
                Some(kind) => kind,
                None => {
                    self.missing(Tag::SpecificationField);
                    InstanceKind::Specification(Default::default())
                }
            },
            properties,
            attributes: self.finish_array(attributes),
        };
        self.leave();
        Ok(instance)
    }

    /// One optional property entry of a component instance.
    fn instance_property(&mut self, properties: &mut InstanceProperties, field: Tag) -> DecodeResult<()> {
        match field {
            Tag::ComponentKindField => {
                properties.component_kind = self.option_variant::<ComponentKind>()?;
            }
            Tag::Manufacturer => properties.manufacturer = self.option_variant::<Manufacturer>()?,
            Tag::Situated => properties.situated = self.option_variant::<Situated>()?,
            Tag::Pedigree => properties.pedigree = self.option_variant::<Pedigree>()?,
            Tag::Category => properties.category = self.option_string()?,
            Tag::AdversariallyTested => properties.adversarially_tested = self.option_bool()?,
            other => {
                if let Some(flag) = InstanceFlag::from_tag(other) {
                    set_flag(&mut properties.flags, flag, self.option_bool()?);
                } else if let Some(dal) = DalProperty::from_tag(other) {
                    set_flag(&mut properties.dals, dal, self.option_int()?);
                } else {
                    self.unknown_field(Tag::ComponentInstance);
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Connections
    // =========================================================================

    fn connection(&mut self) -> DecodeResult<Connection> {
        self.enter(DecodeContext::Connection);
        let mut name = None;
        let mut source = None;
        let mut destination = None;
        let mut flow = None;
        let mut conn_type = None;
        let mut flags = IndexMap::new();
        let mut encrypted_transmission_dal = None;
        let mut attributes = IndexedBuffer::new(Tag::Attributes);

        while self.at(Tag::Connection) {
            match self.entry() {
                Some(Tag::Name) => name = Some(self.string_field()),
                Some(Tag::Source) => source = Some(self.connection_end_field()?),
                Some(Tag::Destination) => destination = Some(self.connection_end_field()?),
                Some(Tag::FlowTypeField) => flow = self.option_variant::<FlowType>()?,
                Some(Tag::ConnTypeField) => conn_type = self.option_variant::<ConnectionType>()?,
                Some(Tag::EncryptedTransmissionDal) => {
                    encrypted_transmission_dal = self.option_int()?;
                }
                Some(Tag::Attributes) => {
                    self.array_entry(&mut attributes, |d| d.generic_attribute())?;
                }
                Some(field) => match ConnectionFlag::from_tag(field) {
                    Some(flag) => set_flag(&mut flags, flag, self.option_bool()?),
                    None => self.unknown_field(Tag::Connection),
                },
                None => self.unknown_field(Tag::Connection),
            }
        }

        let connection = Connection {
            name: self.required(name, Tag::Name),
            source: self.end_or_default(source, Tag::Source),
            destination: self.end_or_default(destination, Tag::Destination),
            flow,
            conn_type,
            flags,
            encrypted_transmission_dal,
            attributes: self.finish_array(attributes),
        };
        self.leave();
        Ok(connection)
    }

    fn end_or_default(&mut self, end: Option<ConnectionEnd>, field: Tag) -> ConnectionEnd {
        end.unwrap_or_else(|| {
            self.missing(field);
            ConnectionEnd::Component(Default::default())
        })
    }

    /// `ConnectionEnd(f)` followed by the end's entries.
    fn connection_end_field(&mut self) -> DecodeResult<ConnectionEnd> {
        self.cur.expect(Tag::ConnectionEnd);
        self.enter(DecodeContext::ConnectionEnd);
        let mut kind = None;
        let mut end = None;

        while self.at(Tag::ConnectionEnd) && !(kind.is_some() && end.is_some()) {
            match self.entry() {
                Some(Tag::DataKind) => {
                    kind = self.enum_field::<ConnectionEndKind>(Tag::ConnectionEndKind);
                }
                Some(Tag::ComponentPort) => {
                    self.cur.expect(Tag::Port);
                    let port = self.port_ref();
                    self.set_payload(
                        &mut end,
                        kind,
                        ConnectionEndKind::Component,
                        ConnectionEnd::Component(port),
                    );
                }
                Some(Tag::SubcomponentPort) => {
                    self.cur.expect(Tag::CompInstPort);
                    let (instance, port) = self.comp_inst_port()?;
                    self.set_payload(
                        &mut end,
                        kind,
                        ConnectionEndKind::Subcomponent,
                        ConnectionEnd::Subcomponent { instance, port },
                    );
                }
                _ => self.unknown_field(Tag::ConnectionEnd),
            }
        }

        if kind.is_none() {
            self.missing(Tag::DataKind);
        }
        let end = self.end_or_default(end, Tag::ConnectionEnd);
        self.leave();
        Ok(end)
    }

    fn comp_inst_port(&mut self) -> DecodeResult<(InstanceRef, PortRef)> {
        self.enter(DecodeContext::CompInstPort);
        let mut instance = None;
        let mut port = None;
        while self.at(Tag::CompInstPort) && !(instance.is_some() && port.is_some()) {
            match self.entry() {
                Some(Tag::Subcomponent) => {
                    self.cur.expect(Tag::ComponentInstance);
                    instance = Some(self.instance_ref());
                }
                Some(Tag::PortField) => {
                    self.cur.expect(Tag::Port);
                    port = Some(self.port_ref());
                }
                _ => self.unknown_field(Tag::CompInstPort),
            }
        }
        let pair = (
            self.required(instance, Tag::Subcomponent),
            self.required(port, Tag::PortField),
        );
        self.leave();
        Ok(pair)
    }

    fn generic_attribute(&mut self) -> DecodeResult<GenericAttribute> {
        self.enter(DecodeContext::GenericAttribute);
        let mut attribute = GenericAttribute::default();
        let mut name = None;
        while self.at(Tag::GenericAttribute) {
            match self.entry() {
                Some(Tag::Name) => name = Some(self.string_field()),
                Some(Tag::Atype) => {
                    if let Some(atype) = self.enum_field(Tag::AttributeType) {
                        attribute.atype = atype;
                    }
                }
                Some(Tag::Value) => attribute.value = self.string_field(),
                _ => self.unknown_field(Tag::GenericAttribute),
            }
        }
        attribute.name = self.required(name, Tag::Name);
        self.leave();
        Ok(attribute)
    }
}

/// Record an optional property; an absent one leaves the bag untouched.
fn set_flag<K: std::hash::Hash + Eq, V>(bag: &mut IndexMap<K, V>, key: K, value: Option<V>) {
    if let Some(value) = value {
        bag.insert(key, value);
    }
}
