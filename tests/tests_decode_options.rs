//! Decoder Tests - Options, Limits and Cancellation

mod helpers;

use rstest::rstest;

use archmodel::model::{
    BinaryOp, Expression, ImplBody, LustreProgram, Model, Node, NodeBody, TypeDeclaration, UnaryOp,
};
use archmodel::parser::Severity;
use archmodel::{CancellationToken, DecodeError, DecodeOptions, ErrorCode, decode_with, encode};

use helpers::diagnostics::{codes, decode_dump, decode_dump_with};
use helpers::fixtures::full_model;

const UNKNOWN_FIELD: &str = "\
Model(m)
String(name)
string = \"ops\"
Model(m)
ArrayList(missions)
Int(length)
int = 1
Model(m)
ArrayList(missions)
null(element)
int = 0
Mission(m)
String(colour)
string = \"red\"
Mission(m)
String(id)
string = \"m0\"
EOF(EOF)
";

// ============================================================================
// Unknown fields
// ============================================================================

#[test]
fn test_unknown_field_is_a_warning_and_skipped() {
    let decoded = decode_dump(UNKNOWN_FIELD);
    assert_eq!(codes(&decoded), [ErrorCode::E0301]);
    assert_eq!(decoded.diagnostics[0].severity, Severity::Warning);
    assert!(decoded.ok());
    assert_eq!(decoded.model.missions[0].id, "m0");
}

#[test]
fn test_unknown_field_severity_is_configurable() {
    let options = DecodeOptions::default().with_unknown_field_severity(Severity::Error);
    let decoded = decode_dump_with(UNKNOWN_FIELD, &options);
    assert!(!decoded.ok());
    assert_eq!(decoded.errors().count(), 1);
}

// ============================================================================
// Strict mode
// ============================================================================

#[test]
fn test_strict_rejects_errors() {
    let stream = archmodel::parser::parse_dump(UNKNOWN_FIELD).unwrap();
    let options = DecodeOptions::strict().with_unknown_field_severity(Severity::Error);
    let err = decode_with(&stream, &options, None).unwrap_err();
    assert!(matches!(err, DecodeError::Rejected { count: 1, .. }), "{err}");
}

#[test]
fn test_strict_accepts_warnings() {
    let stream = archmodel::parser::parse_dump(UNKNOWN_FIELD).unwrap();
    let decoded = decode_with(&stream, &DecodeOptions::strict(), None).unwrap();
    assert_eq!(decoded.warnings().count(), 1);
}

// ============================================================================
// Depth limit
// ============================================================================

fn nested_not(depth: usize) -> Model {
    let mut expr = Expression::id("x");
    for _ in 0..depth {
        expr = Expression::unary(UnaryOp::Not, expr);
    }
    let mut model = full_model();
    if let Some(program) = model.dataflow_code.as_mut() {
        if let Some(body) = program.node_declarations[0].body.as_mut() {
            body.assertions.push(expr);
        }
    }
    model
}

#[rstest]
#[case(8)]
#[case(16)]
fn test_depth_limit_is_fatal(#[case] limit: usize) {
    let stream = encode(&nested_not(40));
    let options = DecodeOptions::default().with_max_depth(limit);
    let err = decode_with(&stream, &options, None).unwrap_err();
    assert!(matches!(err, DecodeError::DepthExceeded { limit: l, .. } if l == limit));
}

#[test]
fn test_depth_within_limit() {
    let model = nested_not(40);
    let decoded = decode_with(&encode(&model), &DecodeOptions::default(), None).unwrap();
    assert_eq!(decoded.model, model);
}

// ============================================================================
// Cancellation
// ============================================================================

#[test]
fn test_cancelled_before_start() {
    let token = CancellationToken::new();
    token.cancel();
    let err = decode_with(&encode(&full_model()), &DecodeOptions::default(), Some(&token))
        .unwrap_err();
    assert_eq!(err, DecodeError::Cancelled { position: 0 });
}

#[test]
fn test_uncancelled_token_is_transparent() {
    let token = CancellationToken::new();
    let model = full_model();
    let decoded = decode_with(&encode(&model), &DecodeOptions::default(), Some(&token)).unwrap();
    assert_eq!(decoded.model, model);
}

// ============================================================================
// Naming policies
// ============================================================================

#[test]
fn test_sanitized_type_names() {
    let model = Model {
        type_declarations: vec![TypeDeclaration {
            name: "Pkg.Speed".into(),
            definition: None,
        }],
        ..Default::default()
    };
    let stream = encode(&model);

    let plain = decode_with(&stream, &DecodeOptions::default(), None).unwrap();
    assert_eq!(plain.model.type_declarations[0].name, "Pkg.Speed");

    let options = DecodeOptions::default().with_sanitized_type_names(true);
    let sanitized = decode_with(&stream, &options, None).unwrap();
    assert_eq!(sanitized.model.type_declarations[0].name, "Pkg_dot_Speed");
}

#[test]
fn test_qualified_instance_names() {
    let options = DecodeOptions::default().with_qualified_instance_names(true);
    let decoded = decode_with(&encode(&full_model()), &options, None).unwrap();
    let ImplBody::Block(block) = &decoded.model.component_impls[0].body else {
        panic!("expected a block implementation");
    };
    let names: Vec<_> = block.subcomponents.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["System_Impl_front", "System_Impl_rear"]);
}

// ============================================================================
// Trailing input
// ============================================================================

#[test]
fn test_tokens_after_model_are_reported() {
    let dump = "Model(m)\nString(name)\nstring = \"ops\"\nPort(p)\nint = 1\nEOF(EOF)\n";
    let decoded = decode_dump(dump);
    assert_eq!(codes(&decoded), [ErrorCode::E0103]);
    assert_eq!(decoded.model.name, "ops");
}

// ============================================================================
// Tagged unions
// ============================================================================

fn with_assertion(expr: Expression) -> Model {
    let mut model = Model::default();
    model.dataflow_code = Some(LustreProgram {
        node_declarations: vec![Node {
            name: "n".into(),
            body: Some(NodeBody {
                assertions: vec![expr],
                ..Default::default()
            }),
            ..Default::default()
        }],
        ..Default::default()
    });
    model
}

fn first_assertion(model: &Model) -> &Expression {
    let body = model.dataflow_code.as_ref().unwrap().node_declarations[0]
        .body
        .as_ref()
        .unwrap();
    &body.assertions[0]
}

#[test]
fn test_payload_disagreeing_with_kind_is_kept() {
    let model = with_assertion(Expression::binary(
        BinaryOp::Plus,
        Expression::IntLiteral(1),
        Expression::IntLiteral(2),
    ));
    let dump = encode(&model).to_dump();
    assert_eq!(dump.matches("\nPlus(Plus)\n").count(), 1);
    let decoded = decode_dump(&dump.replace("\nPlus(Plus)\n", "\nNot(Not)\n"));

    assert_eq!(codes(&decoded), [ErrorCode::E0303]);
    assert_eq!(
        first_assertion(&decoded.model),
        &Expression::binary(
            BinaryOp::Equal,
            Expression::IntLiteral(1),
            Expression::IntLiteral(2)
        )
    );
}

#[test]
fn test_unknown_kind_variant() {
    let model = with_assertion(Expression::id("x"));
    let dump = encode(&model).to_dump();
    let decoded = decode_dump(&dump.replace("\nId(Id)\n", "\nPort(Port)\n"));
    assert_eq!(codes(&decoded), [ErrorCode::E0304, ErrorCode::E0305]);
    assert_eq!(first_assertion(&decoded.model), &Expression::id("x"));
}
