//! Single-token-lookahead cursor over a [`TokenStream`].
//!
//! The cursor owns the diagnostic list and the decode context stack, so every
//! problem it reports carries the position and the productions active at the
//! time.

use tracing::{trace, warn};

use crate::base::{Tag, Token, TokenStream, TypeRegistry};

use super::errors::{
    DecodeContext, DecodeError, Diagnostic, DiagnosticBuilder, ErrorCode, Severity,
};

pub struct Cursor<'t> {
    tokens: &'t [Token],
    pos: usize,
    registry: &'t TypeRegistry,
    diagnostics: Vec<Diagnostic>,
    contexts: Vec<DecodeContext>,
}

impl<'t> Cursor<'t> {
    pub fn new(stream: &'t TokenStream) -> Self {
        Self::with_registry(stream, TypeRegistry::global())
    }

    pub fn with_registry(stream: &'t TokenStream, registry: &'t TypeRegistry) -> Self {
        Self {
            tokens: stream.tokens(),
            pos: 0,
            registry,
            diagnostics: Vec::new(),
            contexts: Vec::new(),
        }
    }

    /// Hand back the accumulated diagnostics.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    /// The current token. Past the last token this keeps returning the
    /// terminating `EOF`.
    pub fn current(&self) -> &'t Token {
        let tokens: &'t [Token] = self.tokens;
        match tokens.get(self.pos).or(tokens.last()) {
            Some(token) => token,
            None => eof_token(),
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Tokens from the current one through the terminating `EOF`.
    pub fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.pos)
    }

    /// Syntactic tag match only.
    pub fn at(&self, tag: Tag) -> bool {
        self.current().tag == tag
    }

    pub fn at_eof(&self) -> bool {
        self.at(Tag::Eof) || self.pos >= self.tokens.len()
    }

    /// The tag the current token's declared name resolves to.
    pub fn semantic(&self) -> Option<Tag> {
        self.registry.lookup(&self.current().name)
    }

    /// The dual matching rule: syntactic tag, or registry-resolved name.
    pub fn matches(&self, tag: Tag) -> bool {
        self.at(tag) || self.semantic() == Some(tag)
    }

    /// The token after the current one.
    ///
    /// Running out of tokens here is fatal: every call site is a point where
    /// the grammar guarantees a successor.
    pub fn peek(&self) -> Result<&'t Token, DecodeError> {
        self.tokens
            .get(self.pos + 1)
            .ok_or(DecodeError::Lookahead { position: self.pos })
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    /// Move past the current token and return it. At `EOF` the cursor stays
    /// put and reports the attempt.
    pub fn advance(&mut self) -> &'t Token {
        let token = self.current();
        if self.at_eof() {
            self.report(ErrorCode::E0102, "advance past end of stream");
            return token;
        }
        trace!(position = self.pos, tag = %token.tag, name = %token.name, "advance");
        self.pos += 1;
        token
    }

    pub fn eat(&mut self, tag: Tag) -> bool {
        if self.matches(tag) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Advance over a token matching `tag`. A mismatch is reported and the
    /// cursor advances anyway.
    pub fn expect(&mut self, tag: Tag) -> bool {
        if self.eat(tag) {
            return true;
        }
        let found = self.current();
        let message = if found.name.is_empty() {
            format!("expected {}, found {}", tag.key(), found.tag.key())
        } else {
            format!(
                "expected {}, found {}({})",
                tag.key(),
                found.tag.key(),
                found.name
            )
        };
        self.report(ErrorCode::E0101, message);
        if !self.at_eof() {
            self.advance();
        }
        false
    }

    /// Skip tokens until one whose tag is in `recovery`, or `EOF`. Always
    /// consumes at least one token when not at `EOF`.
    pub fn recover(&mut self, recovery: &[Tag]) -> usize {
        let start = self.pos;
        if !self.at_eof() {
            self.pos += 1;
        }
        while !self.at_eof() && !recovery.contains(&self.current().tag) {
            self.pos += 1;
        }
        self.pos - start
    }

    // =========================================================================
    // Context and diagnostics
    // =========================================================================

    pub fn push_context(&mut self, context: DecodeContext) {
        self.contexts.push(context);
    }

    pub fn pop_context(&mut self) {
        self.contexts.pop();
    }

    pub fn contexts(&self) -> &[DecodeContext] {
        &self.contexts
    }

    /// Wrapper tags of every active production, innermost last.
    pub fn active_wrappers(&self) -> Vec<Tag> {
        self.contexts.iter().map(DecodeContext::wrapper).collect()
    }

    pub fn report(&mut self, code: ErrorCode, message: impl Into<String>) {
        self.report_with(code, Severity::Error, message);
    }

    pub fn report_with(&mut self, code: ErrorCode, severity: Severity, message: impl Into<String>) {
        let diagnostic = self.diagnostic(code, severity, message).build();
        self.push_diagnostic(diagnostic);
    }

    /// Report an error with a suggestion attached.
    pub fn report_hinted(
        &mut self,
        code: ErrorCode,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        let diagnostic = self
            .diagnostic(code, Severity::Error, message)
            .hint(hint)
            .build();
        self.push_diagnostic(diagnostic);
    }

    fn diagnostic(
        &self,
        code: ErrorCode,
        severity: Severity,
        message: impl Into<String>,
    ) -> DiagnosticBuilder {
        Diagnostic::builder(code)
            .message(message)
            .at(self.pos)
            .severity(severity)
            .context(&self.contexts)
    }

    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        warn!(code = %diagnostic.code, position = diagnostic.position, "{}", diagnostic.message);
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

fn eof_token() -> &'static Token {
    static EOF: std::sync::LazyLock<Token> = std::sync::LazyLock::new(Token::eof);
    &EOF
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Literal;

    fn stream(tokens: Vec<Token>) -> TokenStream {
        TokenStream::new(tokens)
    }

    #[test]
    fn test_expect_matches_by_declared_name() {
        // `PortMode(mode)`: the name resolves to the `mode` field tag
        let s = stream(vec![Token::new(Tag::PortMode, "mode")]);
        let mut cursor = Cursor::new(&s);
        assert!(cursor.expect(Tag::Mode));
        assert!(cursor.at_eof());
        assert!(cursor.finish().is_empty());
    }

    #[test]
    fn test_expect_mismatch_reports_and_advances() {
        let s = stream(vec![
            Token::new(Tag::Port, "p"),
            Token::new(Tag::Identifier, "name"),
        ]);
        let mut cursor = Cursor::new(&s);
        assert!(!cursor.expect(Tag::Connection));
        assert_eq!(cursor.position(), 1);
        let diags = cursor.finish();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, ErrorCode::E0101);
        assert_eq!(diags[0].message, "expected Connection, found Port(p)");
    }

    #[test]
    fn test_peek_past_end_is_fatal() {
        let s = stream(vec![Token::literal(Literal::Int(3))]);
        let mut cursor = Cursor::new(&s);
        assert_eq!(cursor.peek().unwrap().tag, Tag::Eof);
        cursor.advance();
        assert_eq!(cursor.peek(), Err(DecodeError::Lookahead { position: 1 }));
    }

    #[test]
    fn test_advance_at_eof_reports() {
        let s = stream(Vec::new());
        let mut cursor = Cursor::new(&s);
        let token = cursor.advance();
        assert_eq!(token.tag, Tag::Eof);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.finish()[0].code, ErrorCode::E0102);
    }

    #[test]
    fn test_recover_stops_at_wrapper() {
        let s = stream(vec![
            Token::new(Tag::Null, "mystery"),
            Token::literal(Literal::Int(1)),
            Token::literal(Literal::Str("x".into())),
            Token::new(Tag::Port, "p"),
        ]);
        let mut cursor = Cursor::new(&s);
        assert_eq!(cursor.recover(&[Tag::Port]), 3);
        assert!(cursor.at(Tag::Port));
    }

    #[test]
    fn test_diagnostics_capture_context() {
        let s = stream(Vec::new());
        let mut cursor = Cursor::new(&s);
        cursor.push_context(DecodeContext::Model);
        cursor.push_context(DecodeContext::Port);
        cursor.report(ErrorCode::E0305, "missing name");
        cursor.pop_context();
        assert_eq!(cursor.contexts(), &[DecodeContext::Model]);
        assert_eq!(cursor.diagnostics().len(), 1);
        cursor.report_hinted(ErrorCode::E0501, "early reference", "declare the list first");
        let diags = cursor.finish();
        assert_eq!(
            diags[0].context,
            vec![DecodeContext::Model, DecodeContext::Port]
        );
        assert_eq!(diags[1].hint.as_deref(), Some("declare the list first"));
        assert_eq!(diags[1].context, vec![DecodeContext::Model]);
    }

    #[test]
    fn test_remaining_counts_through_eof() {
        let s = stream(vec![Token::new(Tag::Model, "m"), Token::new(Tag::Name, "name")]);
        let mut cursor = Cursor::new(&s);
        assert_eq!(cursor.remaining(), 3);
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.remaining(), 1);
    }
}
