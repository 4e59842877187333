//! The root `Model` record.

use tracing::debug;

use crate::base::Tag;
use crate::model::Model;
use crate::parser::errors::DecodeContext;

use super::{ArrayEntry, DecodeResult, Decoder, IndexedBuffer};

/// Decode the root record. Cancellation is checked before every entry, so
/// between any two root list elements.
pub(super) fn model(d: &mut Decoder<'_>) -> DecodeResult<Model> {
    d.enter(DecodeContext::Model);
    let mut model = Model::default();
    let mut type_declarations = IndexedBuffer::new(Tag::TypeDeclarations);
    let mut component_types = IndexedBuffer::new(Tag::ComponentTypes);
    let mut component_impls = IndexedBuffer::new(Tag::ComponentImpls);
    let mut cyber_requirements = IndexedBuffer::new(Tag::CyberRequirements);
    let mut safety_requirements = IndexedBuffer::new(Tag::SafetyRequirements);
    let mut missions = IndexedBuffer::new(Tag::Missions);

    while d.at(Tag::Model) {
        d.checkpoint()?;
        let field = d.entry();
        let entry = match field {
            Some(Tag::Name) => {
                model.name = d.string_field();
                continue;
            }
            Some(Tag::DataflowCode) => {
                model.dataflow_code = d.option(|d| d.lustre_program())?;
                continue;
            }
            Some(Tag::TypeDeclarations) => {
                let entry = d.array_entry(&mut type_declarations, |d| d.type_declaration())?;
                if let ArrayEntry::Length(len) = entry {
                    d.scope.type_declarations.declare(len);
                }
                entry
            }
            Some(Tag::ComponentTypes) => {
                let entry = d.array_entry(&mut component_types, |d| d.component_type())?;
                match entry {
                    ArrayEntry::Length(len) => d.scope.component_types.declare(len),
                    ArrayEntry::Element(index) => {
                        if let Some(component) = component_types.get(index) {
                            d.scope.record_ports(index, component.ports.len());
                        }
                    }
                    ArrayEntry::Rejected => {}
                }
                entry
            }
            Some(Tag::ComponentImpls) => {
                let entry = d.array_entry(&mut component_impls, |d| d.component_impl())?;
                if let ArrayEntry::Length(len) = entry {
                    d.scope.component_impls.declare(len);
                }
                entry
            }
            Some(Tag::CyberRequirements) => {
                d.array_entry(&mut cyber_requirements, |d| d.cyber_req())?
            }
            Some(Tag::SafetyRequirements) => {
                d.array_entry(&mut safety_requirements, |d| d.safety_req())?
            }
            Some(Tag::Missions) => d.array_entry(&mut missions, |d| d.mission())?,
            _ => {
                d.unknown_field(Tag::Model);
                continue;
            }
        };
        if let (ArrayEntry::Element(index), Some(list)) = (entry, field) {
            debug!(list = list.key(), index, "decoded root element");
        }
    }

    model.type_declarations = d.finish_array(type_declarations);
    model.component_types = d.finish_array(component_types);
    model.component_impls = d.finish_array(component_impls);
    model.cyber_requirements = d.finish_array(cyber_requirements);
    model.safety_requirements = d.finish_array(safety_requirements);
    model.missions = d.finish_array(missions);
    d.leave();
    Ok(model)
}
