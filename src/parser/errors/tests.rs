//! Integration tests for the errors module

use super::*;

#[test]
fn test_display_carries_severity_code_and_context() {
    let diag = Diagnostic::builder(ErrorCode::E0502)
        .message("reference 9 is out of range for 'ports'")
        .at(31)
        .context(&[DecodeContext::Model, DecodeContext::Connection])
        .build();

    assert_eq!(
        diag.to_string(),
        "error E0502: reference 9 is out of range for 'ports' at token 31 in Connection"
    );
    assert_eq!(diag.code.category_description(), "reference error");
}

#[test]
fn test_warning_diagnostic_is_not_an_error() {
    let diag = Diagnostic::builder(ErrorCode::E0301)
        .severity(Severity::Warning)
        .build();

    assert!(!diag.is_error());
    assert_eq!(diag.message, "unknown field");
    assert!(diag.to_string().starts_with("warning E0301: unknown field at token 0"));
}

#[test]
fn test_complete_diagnostic_workflow() {
    // An element arrives for `ports` before its length entry
    let diag = Diagnostic::builder(ErrorCode::E0201)
        .message("element 0 of 'ports' before its length")
        .at(17)
        .context(&[DecodeContext::Model, DecodeContext::ComponentType])
        .hint("emit the length entry before any element")
        .build();

    assert_eq!(diag.code, ErrorCode::E0201);
    assert!(diag.message.contains("ports"));
    assert_eq!(diag.innermost(), Some(DecodeContext::ComponentType));
    assert!(diag.is_error());
}

#[test]
fn test_error_code_exhaustiveness() {
    let codes = [
        ErrorCode::E0101,
        ErrorCode::E0102,
        ErrorCode::E0103,
        ErrorCode::E0201,
        ErrorCode::E0202,
        ErrorCode::E0203,
        ErrorCode::E0204,
        ErrorCode::E0205,
        ErrorCode::E0206,
        ErrorCode::E0207,
        ErrorCode::E0301,
        ErrorCode::E0302,
        ErrorCode::E0303,
        ErrorCode::E0304,
        ErrorCode::E0305,
        ErrorCode::E0401,
        ErrorCode::E0501,
        ErrorCode::E0502,
        ErrorCode::E0503,
    ];

    for code in codes {
        assert!(code.as_str().starts_with('E'));
        assert_eq!(code.as_str().len(), 5);
        assert!(!code.default_message().is_empty());
        assert!(!code.category_description().is_empty());
    }
}

#[test]
fn test_decode_error_messages() {
    let err = DecodeError::Lookahead { position: 9 };
    assert_eq!(err.to_string(), "lookahead past end of stream at token 9");

    let err = DecodeError::DepthExceeded {
        limit: 4,
        position: 30,
    };
    assert_eq!(err.to_string(), "nesting deeper than 4 at token 30");
}
