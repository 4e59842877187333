//! Tokens and token streams.

use std::fmt;

use smol_str::SmolStr;

use super::registry::{RegistryError, TypeRegistry};
use super::tag::Tag;

/// The literal payload carried by a token.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Literal {
    #[default]
    None,
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl Literal {
    pub fn is_none(&self) -> bool {
        matches!(self, Literal::None)
    }

    /// The literal tag a producer uses for this payload.
    pub fn tag(&self) -> Option<Tag> {
        match self {
            Literal::None => None,
            Literal::Int(_) => Some(Tag::IntLit),
            Literal::Float(_) => Some(Tag::FloatLit),
            Literal::Str(_) => Some(Tag::StringLit),
            Literal::Bool(_) => Some(Tag::BoolLit),
        }
    }
}

/// An immutable lexical unit of the decoder's input.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub tag: Tag,
    pub payload: Literal,
    /// Name of the declaration that produced this token. Wrapper and field
    /// tokens carry their semantic identity here; literals leave it empty.
    pub name: SmolStr,
}

impl Token {
    pub fn new(tag: Tag, name: impl Into<SmolStr>) -> Self {
        Self {
            tag,
            payload: Literal::None,
            name: name.into(),
        }
    }

    /// A literal token; the tag follows from the payload.
    pub fn literal(payload: Literal) -> Self {
        let tag = payload.tag().unwrap_or(Tag::Null);
        Self {
            tag,
            payload,
            name: SmolStr::default(),
        }
    }

    pub fn eof() -> Self {
        Self::new(Tag::Eof, Tag::Eof.key())
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.payload {
            Literal::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self.payload {
            Literal::Float(v) => Some(v),
            Literal::Int(v) => Some(v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.payload {
            Literal::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.payload {
            Literal::Bool(b) => Some(b),
            _ => None,
        }
    }
}

/// Renders one line of the token dump format: `Tag(name) = literal`.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag.key())?;
        if !self.name.is_empty() {
            f.write_str("(")?;
            write_escaped(f, &self.name, ')')?;
            f.write_str(")")?;
        }
        match &self.payload {
            Literal::None => Ok(()),
            Literal::Int(v) => write!(f, " = {v}"),
            Literal::Float(v) => write!(f, " = {v:?}"),
            Literal::Bool(v) => write!(f, " = {v}"),
            Literal::Str(s) => {
                f.write_str(" = \"")?;
                write_escaped(f, s, '"')?;
                f.write_str("\"")
            }
        }
    }
}

/// Backslash-escape `closing`, backslashes and line breaks.
fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str, closing: char) -> fmt::Result {
    for ch in text.chars() {
        match ch {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            c if c == closing => write!(f, "\\{c}")?,
            c => write!(f, "{c}")?,
        }
    }
    Ok(())
}

// ============================================================================
// TOKEN STREAM
// ============================================================================

/// An ordered, finite token sequence that always ends with `EOF`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Wrap `tokens`, appending the end-of-stream token if it is missing.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.tag != Tag::Eof) {
            tokens.push(Token::eof());
        }
        Self { tokens }
    }

    /// Build a stream from `(key, payload, declared name)` triples.
    ///
    /// This is the boundary format of external producers. Every key must be
    /// registered.
    pub fn from_raw<'a, I>(registry: &TypeRegistry, raw: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (&'a str, Literal, &'a str)>,
    {
        let tokens = raw
            .into_iter()
            .map(|(key, payload, name)| {
                let tag = registry.require(key)?;
                Ok(Token {
                    tag,
                    payload,
                    name: SmolStr::new(name),
                })
            })
            .collect::<Result<Vec<_>, RegistryError>>()?;
        Ok(Self::new(tokens))
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Number of tokens, including the terminating `EOF`.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.len() <= 1
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Render the stream in the line-oriented dump format.
    pub fn to_dump(&self) -> String {
        let mut out = String::with_capacity(self.tokens.len() * 24);
        for token in &self.tokens {
            out.push_str(&token.to_string());
            out.push('\n');
        }
        out
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_is_terminated() {
        let stream = TokenStream::new(vec![Token::new(Tag::Model, "m")]);
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.tokens()[1].tag, Tag::Eof);
        assert!(stream.tokens()[0].payload.is_none());

        let again = TokenStream::new(stream.clone().into_tokens());
        assert_eq!(again, stream);
    }

    #[test]
    fn test_from_raw_rejects_unknown_key() {
        let raw = vec![("Model", Literal::None, "m"), ("Bogus", Literal::None, "x")];
        let err = TokenStream::from_raw(TypeRegistry::global(), raw).unwrap_err();
        assert_eq!(err, RegistryError::UnknownKey("Bogus".to_string()));
    }

    #[test]
    fn test_display_escapes_strings() {
        let token = Token::literal(Literal::Str("say \"hi\"\\".to_string()));
        assert_eq!(token.to_string(), r#"string = "say \"hi\"\\""#);
    }

    #[test]
    fn test_display_escapes_names() {
        let token = Token::new(Tag::Port, "f(x)\n");
        assert_eq!(token.to_string(), r"Port(f(x\)\n)");
    }

    #[test]
    fn test_display_keeps_float_point() {
        let token = Token::literal(Literal::Float(1.0));
        assert_eq!(token.to_string(), "float = 1.0");
    }
}
