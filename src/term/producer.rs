//! Pre-order flattening of a [`TermModel`] into a [`TokenStream`].

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::base::{Literal, Tag, Token, TokenStream, TypeRegistry};

use super::{SymbolDeclaration, Term, TermModel};

/// Options for [`TokenProducer`].
#[derive(Debug, Clone)]
pub struct ProducerOptions {
    /// Subtrees nested deeper than this are skipped.
    pub max_depth: usize,
    /// Walk into the definition of a referenced symbol. When off, a
    /// reference contributes only the symbol's own token.
    pub expand_references: bool,
}

impl Default for ProducerOptions {
    fn default() -> Self {
        Self {
            max_depth: 512,
            expand_references: true,
        }
    }
}

impl ProducerOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_expand_references(mut self, enabled: bool) -> Self {
        self.expand_references = enabled;
        self
    }
}

/// Counts from one [`TokenProducer::produce`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProducerStats {
    pub declarations: usize,
    pub literals: usize,
    /// Declarations whose type name is not a registry key.
    pub unregistered: usize,
    pub unsupported: usize,
    /// Subtrees cut off by the depth limit.
    pub truncated: usize,
}

/// Walks a term model and emits the tokens the decoder consumes.
///
/// Declarations become `lookup(type name)(symbol name)` tokens and literals
/// become literal tokens, in pre-order. Every other node is walked for its
/// children and emits nothing itself.
pub struct TokenProducer<'r> {
    registry: &'r TypeRegistry,
    options: ProducerOptions,
    tokens: Vec<Token>,
    stats: ProducerStats,
    depth: usize,
    /// Declarations whose definition is being walked; a reference back into
    /// one of them does not expand again.
    expanding: FxHashSet<*const SymbolDeclaration>,
}

impl Default for TokenProducer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenProducer<'static> {
    pub fn new() -> Self {
        Self::with_registry(TypeRegistry::global(), ProducerOptions::default())
    }

    pub fn with_options(options: ProducerOptions) -> Self {
        Self::with_registry(TypeRegistry::global(), options)
    }
}

impl<'r> TokenProducer<'r> {
    pub fn with_registry(registry: &'r TypeRegistry, options: ProducerOptions) -> Self {
        Self {
            registry,
            options,
            tokens: Vec::new(),
            stats: ProducerStats::default(),
            depth: 0,
            expanding: FxHashSet::default(),
        }
    }

    /// Flatten `model`. Statistics of the run are available from
    /// [`stats`](Self::stats) afterwards.
    pub fn produce(&mut self, model: &TermModel) -> TokenStream {
        self.tokens.clear();
        self.stats = ProducerStats::default();
        self.depth = 0;
        self.expanding.clear();

        for import in &model.imports {
            trace!(import = %import, "skipping import");
        }
        for symbol in &model.symbols {
            self.term(symbol);
        }

        debug!(
            tokens = self.tokens.len(),
            declarations = self.stats.declarations,
            literals = self.stats.literals,
            unsupported = self.stats.unsupported,
            "produced token stream"
        );
        TokenStream::new(std::mem::take(&mut self.tokens))
    }

    pub fn stats(&self) -> &ProducerStats {
        &self.stats
    }

    fn term(&mut self, term: &Term) {
        if self.depth >= self.options.max_depth {
            self.stats.truncated += 1;
            debug!(limit = self.options.max_depth, "term nesting limit reached, subtree skipped");
            return;
        }
        self.depth += 1;
        self.term_inner(term);
        self.depth -= 1;
    }

    fn term_inner(&mut self, term: &Term) {
        match term {
            Term::Declaration(decl) => self.declaration(decl),
            Term::Reference(decl) => {
                if self.options.expand_references {
                    self.declaration(decl);
                } else {
                    self.declaration_token(decl);
                }
            }
            Term::Number(v) => self.literal(Token::literal(Literal::Int(*v))),
            Term::Float(v) => self.literal(Token::literal(Literal::Float(*v))),
            Term::Str(s) => self.literal(Token::literal(Literal::Str(s.clone()))),
            Term::Char(c) => {
                let mut token = Token::literal(Literal::Str(c.to_string()));
                token.tag = Tag::CharLit;
                self.literal(token);
            }
            Term::Truth(v) => self.literal(Token::literal(Literal::Bool(*v))),
            Term::Selection { receiver, member } => {
                self.term(receiver);
                self.term(member);
            }
            Term::Constructor { binder, body } => {
                self.declaration(binder);
                self.term(body);
            }
            Term::Binary { lhs, rhs, .. } | Term::Atomic { lhs, rhs, .. } => {
                self.term(lhs);
                self.term(rhs);
            }
            Term::Signed { formula, .. } => self.term(formula),
            // Named types describe structure, not values.
            Term::NamedType(_) => {}
            Term::Unsupported { kind, children } => {
                self.stats.unsupported += 1;
                debug!(kind = kind.as_str(), children = children.len(), "untranslated term");
                for child in children {
                    self.term(child);
                }
            }
        }
    }

    fn declaration(&mut self, decl: &SymbolDeclaration) {
        self.declaration_token(decl);

        let key: *const SymbolDeclaration = decl;
        if !self.expanding.insert(key) {
            trace!(name = %decl.name, "recursive reference not expanded");
            return;
        }
        if let Some(definition) = &decl.definition {
            self.term(definition);
        }
        self.expanding.remove(&key);
    }

    fn declaration_token(&mut self, decl: &SymbolDeclaration) {
        let tag = match decl.type_name() {
            Some(name) => self.registry.lookup(name).unwrap_or_else(|| {
                self.stats.unregistered += 1;
                trace!(name = %decl.name, ty = name, "type is not a registry key");
                Tag::Null
            }),
            None => Tag::Null,
        };
        self.stats.declarations += 1;
        self.tokens.push(Token::new(tag, decl.name.clone()));
    }

    fn literal(&mut self, token: Token) {
        self.stats.literals += 1;
        self.tokens.push(token);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::term::{NamedType, UnsupportedKind};

    fn dump(stream: &TokenStream) -> Vec<String> {
        stream.iter().map(Token::to_string).collect()
    }

    #[test]
    fn test_declaration_then_definition_in_pre_order() {
        let decl = SymbolDeclaration::new("m", "Model").with_definition(Term::binary(
            "&&",
            Term::declaration(SymbolDeclaration::new("name", "String")),
            Term::string("cruise"),
        ));
        let model = TermModel::new(vec![Term::declaration(decl)]);

        let mut producer = TokenProducer::new();
        let stream = producer.produce(&model);
        assert_eq!(
            dump(&stream),
            ["Model(m)", "String(name)", "string = \"cruise\"", "EOF(EOF)"]
        );
        assert_eq!(producer.stats().declarations, 2);
        assert_eq!(producer.stats().literals, 1);
    }

    #[test]
    fn test_unregistered_type_yields_null_tag() {
        let model = TermModel::new(vec![
            Term::declaration(SymbolDeclaration::new("x", "NoSuchType")),
            Term::declaration(SymbolDeclaration::untyped("y")),
        ]);
        let mut producer = TokenProducer::new();
        let stream = producer.produce(&model);
        assert_eq!(dump(&stream), ["null(x)", "null(y)", "EOF(EOF)"]);
        assert_eq!(producer.stats().unregistered, 1);
    }

    #[test]
    fn test_unsupported_children_are_walked() {
        let model = TermModel::new(vec![Term::unsupported(
            UnsupportedKind::IfThenElse,
            vec![Term::Truth(true), Term::Number(3)],
        )]);
        let mut producer = TokenProducer::new();
        let stream = producer.produce(&model);
        assert_eq!(dump(&stream), ["boolean = true", "int = 3", "EOF(EOF)"]);
        assert_eq!(producer.stats().unsupported, 1);
    }

    #[test]
    fn test_named_types_emit_nothing() {
        let model = TermModel::new(vec![Term::NamedType(NamedType {
            name: "Port".into(),
            members: vec![Arc::new(SymbolDeclaration::new("mode", "PortMode"))],
        })]);
        let stream = TokenProducer::new().produce(&model);
        assert_eq!(stream.len(), 1);
    }

    #[test]
    fn test_reference_expansion_toggle() {
        let target = Arc::new(
            SymbolDeclaration::new("c", "Int").with_definition(Term::Number(7)),
        );
        let model = TermModel::new(vec![Term::reference(&target)]);

        let expanded = TokenProducer::new().produce(&model);
        assert_eq!(dump(&expanded), ["Int(c)", "int = 7", "EOF(EOF)"]);

        let options = ProducerOptions::default().with_expand_references(false);
        let flat = TokenProducer::with_options(options).produce(&model);
        assert_eq!(dump(&flat), ["Int(c)", "EOF(EOF)"]);
    }

    #[test]
    fn test_depth_limit_truncates() {
        let mut term = Term::Number(1);
        for _ in 0..10 {
            term = Term::Signed {
                negated: false,
                formula: Box::new(term),
            };
        }
        let options = ProducerOptions::default().with_max_depth(4);
        let mut producer = TokenProducer::with_options(options);
        let stream = producer.produce(&TermModel::new(vec![term]));
        assert_eq!(stream.len(), 1);
        assert_eq!(producer.stats().truncated, 1);
    }

    #[test]
    fn test_char_literal_tag() {
        let stream = TokenProducer::new().produce(&TermModel::new(vec![Term::Char('x')]));
        assert_eq!(stream.tokens()[0].tag, Tag::CharLit);
        assert_eq!(stream.tokens()[0].as_str(), Some("x"));
    }
}
