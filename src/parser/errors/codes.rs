//! Error code definitions for decoder diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Token errors (mismatch, stream boundaries)
//! - E02xx: Indexed-array errors
//! - E03xx: Record and tagged-union errors
//! - E04xx: Option errors
//! - E05xx: Reference errors

use std::fmt;

/// Error codes for decoder diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Token errors
    // =========================================================================
    /// Current token does not match the expected tag
    E0101,
    /// Advance requested at end of stream
    E0102,
    /// Tokens left over after the root model
    E0103,

    // =========================================================================
    // E02xx: Indexed-array errors
    // =========================================================================
    /// Array element seen before the array length
    E0201,
    /// Array index not below the declared length
    E0202,
    /// Array index filled twice
    E0203,
    /// Array slots never filled
    E0204,
    /// Negative length or index
    E0205,
    /// Array length declared twice with different values
    E0206,
    /// Declared length larger than the rest of the stream can hold
    E0207,

    // =========================================================================
    // E03xx: Record and tagged-union errors
    // =========================================================================
    /// Field name not known to the record
    E0301,
    /// Second payload for a tagged union
    E0302,
    /// Payload does not agree with the union's kind
    E0303,
    /// Variant key outside the closed enum
    E0304,
    /// Required field missing
    E0305,

    // =========================================================================
    // E04xx: Option errors
    // =========================================================================
    /// Option discriminator is neither None nor Some
    E0401,

    // =========================================================================
    // E05xx: Reference errors
    // =========================================================================
    /// Reference into a list slot that is not populated yet
    E0501,
    /// Reference index out of range
    E0502,
    /// Sub-component reference outside a block implementation
    E0503,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            Self::E0205 => "E0205",
            Self::E0206 => "E0206",
            Self::E0207 => "E0207",
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0305 => "E0305",
            Self::E0401 => "E0401",
            Self::E0501 => "E0501",
            Self::E0502 => "E0502",
            Self::E0503 => "E0503",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 | Self::E0103 => "token error",
            Self::E0201
            | Self::E0202
            | Self::E0203
            | Self::E0204
            | Self::E0205
            | Self::E0206
            | Self::E0207 => "array error",
            Self::E0301 | Self::E0302 | Self::E0303 | Self::E0304 | Self::E0305 => "record error",
            Self::E0401 => "option error",
            Self::E0501 | Self::E0502 | Self::E0503 => "reference error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "unexpected token",
            Self::E0102 => "unexpected end of stream",
            Self::E0103 => "trailing tokens after model",
            Self::E0201 => "array element before length",
            Self::E0202 => "array index out of bounds",
            Self::E0203 => "duplicate array index",
            Self::E0204 => "unfilled array slots",
            Self::E0205 => "negative array length or index",
            Self::E0206 => "array length redeclared",
            Self::E0207 => "array length exceeds remaining input",
            Self::E0301 => "unknown field",
            Self::E0302 => "duplicate variant payload",
            Self::E0303 => "payload does not match kind",
            Self::E0304 => "unknown variant",
            Self::E0305 => "missing required field",
            Self::E0401 => "invalid option discriminator",
            Self::E0501 => "forward reference",
            Self::E0502 => "reference out of range",
            Self::E0503 => "sub-component reference outside block",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E0201.to_string(), "E0201");
        assert_eq!(ErrorCode::E0503.to_string(), "E0503");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::E0102.category_description(), "token error");
        assert_eq!(ErrorCode::E0204.category_description(), "array error");
        assert_eq!(ErrorCode::E0207.category_description(), "array error");
        assert_eq!(ErrorCode::E0401.category_description(), "option error");
    }
}
