//! Component types, implementations, instances and connections.

use crate::base::{Tag, TagSubset};
use crate::model::{
    BlockImpl, ComponentImpl, ComponentInstance, ComponentType, Connection, ConnectionEnd,
    GenericAttribute, ImplBody, InstanceKind, InstanceProperties, Port,
};

use super::Encoder;

impl Encoder {
    pub(super) fn component_type(&mut self, component: &ComponentType) {
        let w = Tag::ComponentType;
        self.string_entry(w, Tag::Name, &component.name);
        self.array(w, Tag::Ports, &component.ports, Self::port);
        self.option_entry(w, Tag::ContractField, component.contract.as_ref(), Self::contract_spec);
        self.option_string(w, Tag::Category, component.category.as_ref());
        self.array(w, Tag::CyberRelations, &component.cyber_relations, Self::cyber_rel);
        self.array(w, Tag::SafetyRelations, &component.safety_relations, Self::safety_rel);
        self.array(w, Tag::SafetyEvents, &component.safety_events, Self::safety_event);
    }

    fn port(&mut self, port: &Port) {
        let w = Tag::Port;
        self.string_entry(w, Tag::Name, &port.name);
        self.enum_entry(w, Tag::Mode, Tag::PortMode, port.mode);
        self.bool_entry(w, Tag::IsEvent, port.is_event);
        self.bool_entry(w, Tag::Probe, port.probe);
        self.option_entry(w, Tag::Ptype, port.ptype.as_ref(), Self::data_type);
    }

    pub(super) fn component_impl(&mut self, component_impl: &ComponentImpl) {
        let w = Tag::ComponentImpl;
        self.string_entry(w, Tag::Name, &component_impl.name);
        self.entry(w, Tag::ComponentType, Tag::Ctype);
        self.component_type_ref(component_impl.component_type);
        self.kind_entry(w, Tag::ComponentImplKind, component_impl.body.kind());
        match &component_impl.body {
            ImplBody::Block(block) => {
                self.entry(w, Tag::BlockImpl, Tag::BlockImplField);
                self.block_impl(block);
            }
            ImplBody::Dataflow(body) => {
                self.entry(w, Tag::NodeBody, Tag::DataflowImpl);
                self.node_body(body);
            }
        }
    }

    fn block_impl(&mut self, block: &BlockImpl) {
        let w = Tag::BlockImpl;
        self.array(w, Tag::Subcomponents, &block.subcomponents, Self::component_instance);
        self.array(w, Tag::Connections, &block.connections, Self::connection);
    }

    fn component_instance(&mut self, instance: &ComponentInstance) {
        let w = Tag::ComponentInstance;
        self.string_entry(w, Tag::Name, &instance.name);
        self.kind_entry(w, Tag::ComponentInstanceKind, instance.kind.kind());
        match instance.kind {
            InstanceKind::Specification(id) => {
                self.entry(w, Tag::ComponentType, Tag::SpecificationField);
                self.component_type_ref(id);
            }
            InstanceKind::Implementation(id) => {
                self.entry(w, Tag::ComponentImpl, Tag::ImplementationField);
                self.component_impl_ref(id);
            }
        }
        self.instance_properties(&instance.properties);
        self.array(w, Tag::Attributes, &instance.attributes, Self::generic_attribute);
    }

    /// Only the properties that are present; the decoder leaves the rest
    /// unset either way.
    fn instance_properties(&mut self, properties: &InstanceProperties) {
        let w = Tag::ComponentInstance;
        self.option_variant(w, Tag::ComponentKindField, properties.component_kind);
        self.option_variant(w, Tag::Manufacturer, properties.manufacturer);
        self.option_variant(w, Tag::Situated, properties.situated);
        self.option_variant(w, Tag::Pedigree, properties.pedigree);
        if let Some(category) = &properties.category {
            self.option_string(w, Tag::Category, Some(category));
        }
        if let Some(tested) = properties.adversarially_tested {
            self.option_entry(w, Tag::AdversariallyTested, Some(&tested), |e, v| e.boolean(*v));
        }
        for (flag, value) in &properties.flags {
            self.option_entry(w, flag.tag(), Some(value), |e, v| e.boolean(*v));
        }
        for (dal, value) in &properties.dals {
            self.option_entry(w, dal.tag(), Some(value), |e, v| e.int(*v));
        }
    }

    fn option_variant<E: TagSubset>(&mut self, wrapper: Tag, field: Tag, value: Option<E>) {
        if let Some(value) = value {
            self.option_entry(wrapper, field, Some(&value), |e, v| e.variant(*v));
        }
    }

    fn connection(&mut self, connection: &Connection) {
        let w = Tag::Connection;
        self.string_entry(w, Tag::Name, &connection.name);
        self.connection_end(Tag::Source, &connection.source);
        self.connection_end(Tag::Destination, &connection.destination);
        self.option_entry(w, Tag::FlowTypeField, connection.flow.as_ref(), |e, v| e.variant(*v));
        self.option_entry(w, Tag::ConnTypeField, connection.conn_type.as_ref(), |e, v| {
            e.variant(*v)
        });
        for (flag, value) in &connection.flags {
            self.option_entry(w, flag.tag(), Some(value), |e, v| e.boolean(*v));
        }
        self.option_entry(
            w,
            Tag::EncryptedTransmissionDal,
            connection.encrypted_transmission_dal.as_ref(),
            |e, v| e.int(*v),
        );
        self.array(w, Tag::Attributes, &connection.attributes, Self::generic_attribute);
    }

    fn connection_end(&mut self, field: Tag, end: &ConnectionEnd) {
        let w = Tag::ConnectionEnd;
        self.entry(Tag::Connection, w, field);
        self.kind_entry(w, Tag::ConnectionEndKind, end.kind());
        match *end {
            ConnectionEnd::Component(port) => {
                self.entry(w, Tag::Port, Tag::ComponentPort);
                self.port_ref(port);
            }
            ConnectionEnd::Subcomponent { instance, port } => {
                let cip = Tag::CompInstPort;
                self.entry(w, cip, Tag::SubcomponentPort);
                self.entry(cip, Tag::ComponentInstance, Tag::Subcomponent);
                self.instance_ref(instance);
                self.entry(cip, Tag::Port, Tag::PortField);
                self.port_ref(port);
            }
        }
    }

    fn generic_attribute(&mut self, attribute: &GenericAttribute) {
        let w = Tag::GenericAttribute;
        self.string_entry(w, Tag::Name, &attribute.name);
        self.enum_entry(w, Tag::Atype, Tag::AttributeType, attribute.atype);
        self.string_entry(w, Tag::Value, &attribute.value);
    }
}
