//! Decoder diagnostics
//!
//! Provides rich diagnostic information including:
//! - Error codes for categorization
//! - Severity levels
//! - The token index the problem was found at
//! - The stack of productions being decoded
//! - Hints/suggestions for fixes

use std::fmt;

use super::codes::ErrorCode;
use super::context::DecodeContext;

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum Severity {
    /// An informational hint
    Hint,
    /// A problem the decoder recovered from without losing data
    Warning,
    /// A problem that left the model incomplete or approximate
    #[default]
    Error,
}

impl Severity {
    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Hint => "hint",
        }
    }
}

/// A recoverable decoding problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Human-readable message
    pub message: String,
    /// Index of the token the problem was detected at
    pub position: usize,
    /// Categorized error code
    pub code: ErrorCode,
    /// Severity
    pub severity: Severity,
    /// Productions being decoded, outermost first
    pub context: Vec<DecodeContext>,
    /// Optional suggestion for fixing the problem
    pub hint: Option<String>,
}

impl Diagnostic {
    /// Create a new error with minimal information
    pub fn new(message: impl Into<String>, position: usize, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            position,
            code,
            severity: Severity::Error,
            context: Vec::new(),
            hint: None,
        }
    }

    /// Create a builder for more complex diagnostics
    pub fn builder(code: ErrorCode) -> DiagnosticBuilder {
        DiagnosticBuilder::new(code)
    }

    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }

    /// The innermost production this diagnostic was raised in.
    pub fn innermost(&self) -> Option<DecodeContext> {
        self.context.last().copied()
    }

    /// Format the diagnostic for display
    pub fn format(&self) -> String {
        let mut result = format!("{}: {} at token {}", self.code, self.message, self.position);
        if let Some(ctx) = self.innermost() {
            result.push(' ');
            result.push_str(&ctx.description());
        }
        if let Some(hint) = &self.hint {
            result.push_str(&format!("\n  hint: {}", hint));
        }
        result
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.severity.as_str(), self.format())
    }
}

/// Builder for diagnostics
pub struct DiagnosticBuilder {
    code: ErrorCode,
    message: Option<String>,
    position: usize,
    severity: Severity,
    context: Vec<DecodeContext>,
    hint: Option<String>,
}

impl DiagnosticBuilder {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: None,
            position: 0,
            severity: Severity::Error,
            context: Vec::new(),
            hint: None,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn at(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn context(mut self, context: &[DecodeContext]) -> Self {
        self.context = context.to_vec();
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Build the diagnostic, falling back to the code's default message
    pub fn build(self) -> Diagnostic {
        Diagnostic {
            message: self
                .message
                .unwrap_or_else(|| self.code.default_message().to_string()),
            position: self.position,
            code: self.code,
            severity: self.severity,
            context: self.context,
            hint: self.hint,
        }
    }
}
