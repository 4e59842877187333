//! Decoding options

use super::errors::Severity;

/// Options controlling how a token stream is decoded
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Fail with `DecodeError::Rejected` if any error diagnostic was produced
    pub strict: bool,
    /// Maximum nesting of recursive productions (expressions, data types)
    pub max_depth: usize,
    /// Replace `.` in type declaration names with `_dot_`
    pub sanitize_type_names: bool,
    /// Prefix sub-component instance names with their implementation's name
    pub qualify_instance_names: bool,
    /// Severity reported for field names a record does not know
    pub report_unknown_fields: Severity,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: 256,
            sanitize_type_names: false,
            qualify_instance_names: false,
            report_unknown_fields: Severity::Warning,
        }
    }
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_sanitized_type_names(mut self, enabled: bool) -> Self {
        self.sanitize_type_names = enabled;
        self
    }

    pub fn with_qualified_instance_names(mut self, enabled: bool) -> Self {
        self.qualify_instance_names = enabled;
        self
    }

    pub fn with_unknown_field_severity(mut self, severity: Severity) -> Self {
        self.report_unknown_fields = severity;
        self
    }

    /// Apply the type-name policy to a declared name.
    pub fn type_name(&self, name: String) -> String {
        if self.sanitize_type_names && name.contains('.') {
            name.replace('.', "_dot_")
        } else {
            name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DecodeOptions::default();
        assert!(!options.strict);
        assert_eq!(options.max_depth, 256);
        assert_eq!(options.report_unknown_fields, Severity::Warning);
    }

    #[test]
    fn test_type_name_policy() {
        let plain = DecodeOptions::default();
        assert_eq!(plain.type_name("Pkg.T".into()), "Pkg.T");

        let sanitized = DecodeOptions::default().with_sanitized_type_names(true);
        assert_eq!(sanitized.type_name("Pkg.T".into()), "Pkg_dot_T");
    }
}
