//! Decode wrappers and diagnostic assertions.

use archmodel::parser::parse_dump;
use archmodel::{DecodeOptions, Decoded, ErrorCode, Model, TokenStream, decode, decode_with};

/// Decode `stream` with default options; fatal errors fail the test.
pub fn decode_stream(stream: &TokenStream) -> Decoded {
    decode(stream).unwrap_or_else(|err| panic!("fatal decode error: {err}"))
}

/// Read a dump fixture and decode it.
pub fn decode_dump(dump: &str) -> Decoded {
    let stream = parse_dump(dump).unwrap_or_else(|err| panic!("bad fixture: {err}"));
    decode_stream(&stream)
}

pub fn decode_dump_with(dump: &str, options: &DecodeOptions) -> Decoded {
    let stream = parse_dump(dump).unwrap_or_else(|err| panic!("bad fixture: {err}"));
    decode_with(&stream, options, None).unwrap_or_else(|err| panic!("fatal decode error: {err}"))
}

/// Decode and require a diagnostic-free result.
pub fn decode_clean(stream: &TokenStream) -> Model {
    let decoded = decode_stream(stream);
    assert_no_diagnostics(&decoded);
    decoded.model
}

pub fn codes(decoded: &Decoded) -> Vec<ErrorCode> {
    decoded.diagnostics.iter().map(|d| d.code).collect()
}

pub fn assert_no_diagnostics(decoded: &Decoded) {
    assert!(
        decoded.diagnostics.is_empty(),
        "Expected no diagnostics, got {}:\n{}",
        decoded.diagnostics.len(),
        decoded
            .diagnostics
            .iter()
            .map(|d| format!("  {}", d.format()))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

pub fn assert_has_code(decoded: &Decoded, code: ErrorCode) {
    assert!(
        codes(decoded).contains(&code),
        "Expected {code:?} among {:?}",
        codes(decoded)
    );
}
