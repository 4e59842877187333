//! Decoder Tests - Concrete Streams
//!
//! Hand-written dumps and encoded fixtures for the array, option and
//! reference idioms.

mod helpers;

use rstest::rstest;

use archmodel::model::{Cia, ComponentTypeId, ConnectionEnd, ImplBody, PortMode, PortRef};
use archmodel::{ErrorCode, encode};

use helpers::diagnostics::{
    assert_has_code, assert_no_diagnostics, codes, decode_clean, decode_dump, decode_stream,
};
use helpers::fixtures::{full_model, sensor_model};

// ============================================================================
// Component type with a cyber relation
// ============================================================================

#[test]
fn test_sensor_component_decodes() {
    let model = decode_clean(&encode(&sensor_model()));

    assert_eq!(model.component_types.len(), 1);
    let component = &model.component_types[0];
    let ports: Vec<_> = component
        .ports
        .iter()
        .map(|p| (p.name.as_str(), p.mode))
        .collect();
    assert_eq!(ports, [("in1", PortMode::In), ("out1", PortMode::Out)]);

    assert_eq!(component.cyber_relations.len(), 1);
    let rel = &component.cyber_relations[0];
    assert_eq!(rel.id, "r1");
    assert_eq!(rel.output.name, "out1");
    assert_eq!(rel.output.cia, Cia::Confidentiality);
}

#[test]
fn test_none_contract_stays_unset() {
    let mut model = sensor_model();
    model.component_types[0].category = Some("sensor".into());
    let decoded = decode_clean(&encode(&model));

    let component = &decoded.component_types[0];
    assert!(component.contract.is_none());
    // The entry after the None option still lands in its own field.
    assert_eq!(component.category.as_deref(), Some("sensor"));
}

// ============================================================================
// Indexed arrays
// ============================================================================

const HEADER: &str = "\
Model(m)
String(name)
string = \"ops\"
";

fn mission_element(index: usize) -> String {
    format!(
        "Model(m)\nArrayList(missions)\nnull(element)\nint = {index}\nMission(m)\nString(id)\nstring = \"m{index}\"\n"
    )
}

fn missions_dump(length: Option<usize>, order: &[usize]) -> String {
    let mut dump = HEADER.to_string();
    if let Some(length) = length {
        dump.push_str(&format!(
            "Model(m)\nArrayList(missions)\nInt(length)\nint = {length}\n"
        ));
    }
    for &index in order {
        dump.push_str(&mission_element(index));
    }
    dump.push_str("EOF(EOF)\n");
    dump
}

#[test]
fn test_element_before_length_is_rejected() {
    let decoded = decode_dump(&missions_dump(None, &[0]));
    assert_eq!(codes(&decoded), [ErrorCode::E0201]);
    assert_eq!(
        decoded.diagnostics[0].hint.as_deref(),
        Some("the length entry must precede the elements")
    );
    assert!(decoded.model.missions.is_empty());
    assert_eq!(decoded.model.name, "ops");
}

#[rstest]
#[case(&[0, 1, 2])]
#[case(&[2, 0, 1])]
#[case(&[1, 2, 0])]
#[case(&[2, 1, 0])]
fn test_index_order_does_not_matter(#[case] order: &[usize]) {
    let decoded = decode_dump(&missions_dump(Some(3), order));
    assert_no_diagnostics(&decoded);
    let ids: Vec<_> = decoded.model.missions.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["m0", "m1", "m2"]);
}

#[test]
fn test_duplicate_index_keeps_first() {
    let decoded = decode_dump(&missions_dump(Some(2), &[1, 0, 1]));
    assert_eq!(codes(&decoded), [ErrorCode::E0203]);
    let ids: Vec<_> = decoded.model.missions.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["m0", "m1"]);
}

#[rstest]
#[case(Some(3), &[0, 2], ErrorCode::E0204)]
#[case(Some(1), &[0, 1], ErrorCode::E0202)]
fn test_array_shape_errors(
    #[case] length: Option<usize>,
    #[case] order: &[usize],
    #[case] code: ErrorCode,
) {
    let decoded = decode_dump(&missions_dump(length, order));
    assert_has_code(&decoded, code);
    assert!(!decoded.ok());
}

#[test]
fn test_unfilled_slots_are_compacted() {
    let decoded = decode_dump(&missions_dump(Some(3), &[2, 0]));
    assert_eq!(codes(&decoded), [ErrorCode::E0204]);
    let ids: Vec<_> = decoded.model.missions.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["m0", "m2"]);
}

#[test]
fn test_stream_ends_before_declared_elements() {
    let decoded = decode_dump(&missions_dump(Some(2), &[0]));
    assert_eq!(codes(&decoded), [ErrorCode::E0204]);
    assert_eq!(decoded.model.missions.len(), 1);
}

#[test]
fn test_huge_length_is_clamped_to_input() {
    let dump = format!(
        "{HEADER}Model(m)\nArrayList(missions)\nInt(length)\nint = 4000000000000\nEOF(EOF)\n"
    );
    let decoded = decode_dump(&dump);
    assert_eq!(codes(&decoded), [ErrorCode::E0207]);
    assert_eq!(decoded.diagnostics[0].hint.as_deref(), Some("length clamped to 0"));
    assert!(decoded.model.missions.is_empty());
    assert_eq!(decoded.model.name, "ops");
}

#[test]
fn test_oversized_length_keeps_arriving_elements() {
    let decoded = decode_dump(&missions_dump(Some(1000), &[0]));
    assert_eq!(codes(&decoded), [ErrorCode::E0207, ErrorCode::E0204]);
    let ids: Vec<_> = decoded.model.missions.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["m0"]);
}

#[test]
fn test_redeclared_length() {
    let mut dump = HEADER.to_string();
    for length in [2, 3] {
        dump.push_str(&format!(
            "Model(m)\nArrayList(missions)\nInt(length)\nint = {length}\n"
        ));
    }
    dump.push_str(&mission_element(0));
    dump.push_str(&mission_element(1));
    dump.push_str("EOF(EOF)\n");

    let decoded = decode_dump(&dump);
    assert_eq!(codes(&decoded), [ErrorCode::E0206]);
    assert_eq!(decoded.model.missions.len(), 2);
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn test_option_discriminator_must_be_known() {
    let dump = format!(
        "{HEADER}Model(m)\nOption(dataflow_code)\nOptionKind(kind)\nOptionKind(Port)\nEOF(EOF)\n"
    );
    let decoded = decode_dump(&dump);
    assert_eq!(codes(&decoded), [ErrorCode::E0401]);
    assert!(decoded.model.dataflow_code.is_none());
}

#[test]
fn test_option_none_consumes_only_discriminator() {
    let dump = format!(
        "Model(m)\nOption(dataflow_code)\nOptionKind(kind)\nOptionKind(None)\n{HEADER}EOF(EOF)\n"
    );
    let decoded = decode_dump(&dump);
    assert_no_diagnostics(&decoded);
    assert!(decoded.model.dataflow_code.is_none());
    assert_eq!(decoded.model.name, "ops");
}

// ============================================================================
// References
// ============================================================================

#[test]
fn test_port_reference_resolves_to_canonical_port() {
    let model = decode_clean(&encode(&full_model()));
    let ImplBody::Block(block) = &model.component_impls[0].body else {
        panic!("expected a block implementation");
    };

    let ConnectionEnd::Subcomponent { instance, port } = block.connections[0].destination else {
        panic!("expected a sub-component end");
    };
    let resolved = model.port(&port).unwrap();
    assert!(std::ptr::eq(resolved, &model.component_types[0].ports[0]));
    assert_eq!(resolved.name, "in1");
    assert_eq!(block.instance(instance).unwrap().name, "front");

    let source = model.port(&block.connections[0].source.port()).unwrap();
    assert!(std::ptr::eq(source, &model.component_types[1].ports[0]));
}

#[test]
fn test_port_reference_out_of_range() {
    let mut model = full_model();
    let ImplBody::Block(block) = &mut model.component_impls[0].body else {
        panic!("expected a block implementation");
    };
    block.connections[1].destination = ConnectionEnd::Component(PortRef {
        component: ComponentTypeId(1),
        port: 9,
    });
    let decoded = decode_stream(&encode(&model));
    assert_eq!(codes(&decoded), [ErrorCode::E0502]);
}
