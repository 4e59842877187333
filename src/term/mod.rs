//! The generic term model a token stream is produced from.
//!
//! A formal-modeling toolkit describes a system as symbol declarations whose
//! definitions are formulas over terms. Only a handful of node kinds carry
//! information the decoder needs; they are listed here as a closed enum.
//! Everything else the toolkit can express is kept as [`Term::Unsupported`]
//! so the producer can still walk into it and count it.

mod producer;

use std::sync::Arc;

use smol_str::SmolStr;

pub use producer::{ProducerOptions, ProducerStats, TokenProducer};

/// The declared type of a symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    /// A plain reference to a named type.
    Named(SmolStr),
    /// A function type; only its range names the symbol's tag.
    Function { domain: Vec<SmolStr>, range: SmolStr },
}

impl TypeRef {
    /// The type name a token tag is looked up by.
    pub fn name(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::Function { range, .. } => range,
        }
    }
}

/// A named symbol with an optional type and definition.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolDeclaration {
    pub name: SmolStr,
    pub ty: Option<TypeRef>,
    pub definition: Option<Term>,
    /// Type parameters, visited after the definition.
    pub type_parameters: Vec<NamedType>,
}

impl SymbolDeclaration {
    pub fn new(name: impl Into<SmolStr>, ty: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ty: Some(TypeRef::Named(ty.into())),
            definition: None,
            type_parameters: Vec::new(),
        }
    }

    /// A declaration without a type. Its token carries the `null` tag.
    pub fn untyped(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            definition: None,
            type_parameters: Vec::new(),
        }
    }

    pub fn with_definition(mut self, definition: Term) -> Self {
        self.definition = Some(definition);
        self
    }

    pub fn type_name(&self) -> Option<&str> {
        self.ty.as_ref().map(TypeRef::name)
    }
}

/// A named type declaration. Its members are not part of the token stream.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedType {
    pub name: SmolStr,
    pub members: Vec<Arc<SymbolDeclaration>>,
}

/// Binary connectives and arithmetic operators, kept as written.
pub type Operator = SmolStr;

/// Node kinds that the producer walks without translating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnsupportedKind {
    Assertion,
    IfThenElse,
    Case,
    Sequence,
    Tuple,
    ArrayAccess,
    Lambda,
    Other,
}

impl UnsupportedKind {
    pub fn as_str(self) -> &'static str {
        match self {
            UnsupportedKind::Assertion => "assertion",
            UnsupportedKind::IfThenElse => "if-then-else",
            UnsupportedKind::Case => "case",
            UnsupportedKind::Sequence => "sequence",
            UnsupportedKind::Tuple => "tuple",
            UnsupportedKind::ArrayAccess => "array-access",
            UnsupportedKind::Lambda => "lambda",
            UnsupportedKind::Other => "other",
        }
    }
}

/// One node of a formula or term.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Declaration(Arc<SymbolDeclaration>),
    /// A use of a symbol declared elsewhere.
    Reference(Arc<SymbolDeclaration>),
    Number(i64),
    Float(f64),
    Str(String),
    Char(char),
    Truth(bool),
    /// `receiver.member`
    Selection {
        receiver: Box<Term>,
        member: Box<Term>,
    },
    /// An instance constructor: a binder symbol and the term defining it.
    Constructor {
        binder: Arc<SymbolDeclaration>,
        body: Box<Term>,
    },
    Binary {
        op: Operator,
        lhs: Box<Term>,
        rhs: Box<Term>,
    },
    /// A possibly negated atomic formula.
    Signed {
        negated: bool,
        formula: Box<Term>,
    },
    /// `lhs rel rhs`
    Atomic {
        relation: Operator,
        lhs: Box<Term>,
        rhs: Box<Term>,
    },
    NamedType(NamedType),
    /// Anything the producer does not translate. Its children are still
    /// walked.
    Unsupported {
        kind: UnsupportedKind,
        children: Vec<Term>,
    },
}

impl Term {
    pub fn declaration(decl: SymbolDeclaration) -> Self {
        Term::Declaration(Arc::new(decl))
    }

    pub fn reference(decl: &Arc<SymbolDeclaration>) -> Self {
        Term::Reference(Arc::clone(decl))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Term::Str(value.into())
    }

    pub fn binary(op: impl Into<Operator>, lhs: Term, rhs: Term) -> Self {
        Term::Binary {
            op: op.into(),
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn select(receiver: Term, member: Term) -> Self {
        Term::Selection {
            receiver: Box::new(receiver),
            member: Box::new(member),
        }
    }

    pub fn unsupported(kind: UnsupportedKind, children: Vec<Term>) -> Self {
        Term::Unsupported { kind, children }
    }
}

/// The root of a term model: its top-level symbols in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TermModel {
    pub imports: Vec<SmolStr>,
    pub symbols: Vec<Term>,
}

impl TermModel {
    pub fn new(symbols: Vec<Term>) -> Self {
        Self {
            imports: Vec::new(),
            symbols,
        }
    }

    pub fn push(&mut self, term: Term) {
        self.symbols.push(term);
    }
}
