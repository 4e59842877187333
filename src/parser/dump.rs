//! Line-oriented text rendering of a token stream.
//!
//! ```text
//! Model(m)
//! String(name)
//! string = "cruise"
//! EOF(EOF)
//! ```
//!
//! One token per line: the tag key, the declared name in parentheses when
//! there is one, and `= literal` for literal payloads. [`TokenStream::to_dump`]
//! writes it; [`parse_dump`] reads it back. Fixtures are kept in this form.

use std::ops::Range;

use logos::Logos;
use text_size::{TextRange, TextSize};
use thiserror::Error;

use crate::base::{Literal, Token, TokenStream, TypeRegistry};

/// Errors while reading a dump.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DumpError {
    #[error("unrecognized input at {range:?}")]
    Lex { range: TextRange },

    #[error("unknown tag '{key}' at {range:?}")]
    UnknownTag { key: String, range: TextRange },

    #[error("expected {expected} at {range:?}")]
    Unexpected {
        expected: &'static str,
        range: TextRange,
    },

    #[error("malformed literal at {range:?}")]
    BadLiteral { range: TextRange },

    #[error("malformed name at {range:?}")]
    BadName { range: TextRange },
}

/// Logos token enum for the dump format
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r]+")]
enum DumpToken {
    #[regex(r"\n")]
    Newline,

    #[regex(r"#[^\n]*")]
    Comment,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Key,

    #[regex(r"\(([^)\\\n]|\\.)*\)")]
    Name,

    #[token("=")]
    Eq,

    #[token("true")]
    True,

    #[token("false")]
    False,

    #[regex(r"-?[0-9]+")]
    Integer,

    #[regex(r"-?[0-9]+(\.[0-9]+([eE][+-]?[0-9]+)?|[eE][+-]?[0-9]+)")]
    #[token("NaN")]
    #[token("inf")]
    #[token("-inf")]
    Float,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,
}

/// A lexed dump token with its text and source range
#[derive(Debug, Clone)]
struct Lexeme<'a> {
    kind: DumpToken,
    text: &'a str,
    span: Range<usize>,
}

impl Lexeme<'_> {
    fn range(&self) -> TextRange {
        text_range(self.span.clone())
    }
}

fn text_range(span: Range<usize>) -> TextRange {
    let offset = |n: usize| TextSize::from(u32::try_from(n).unwrap_or(u32::MAX));
    TextRange::new(offset(span.start), offset(span.end))
}

fn lex(input: &str) -> Result<Vec<Lexeme<'_>>, DumpError> {
    let mut lexer = DumpToken::lexer(input);
    let mut out = Vec::new();
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(DumpToken::Comment) => {}
            Ok(kind) => out.push(Lexeme {
                kind,
                text: lexer.slice(),
                span,
            }),
            Err(()) => return Err(DumpError::Lex { range: text_range(span) }),
        }
    }
    Ok(out)
}

/// Read a dump back into a token stream. Blank lines and `#` comments are
/// ignored; a missing trailing `EOF` line is supplied.
pub fn parse_dump(input: &str) -> Result<TokenStream, DumpError> {
    parse_dump_with(TypeRegistry::global(), input)
}

pub fn parse_dump_with(registry: &TypeRegistry, input: &str) -> Result<TokenStream, DumpError> {
    let lexemes = lex(input)?;
    let mut tokens = Vec::new();
    let mut iter = lexemes.iter().peekable();
    let end = text_range(input.len()..input.len());

    while let Some(lexeme) = iter.next() {
        match lexeme.kind {
            DumpToken::Newline => continue,
            DumpToken::Key | DumpToken::True | DumpToken::False => {}
            _ => {
                return Err(DumpError::Unexpected {
                    expected: "tag key",
                    range: lexeme.range(),
                });
            }
        }
        let tag = registry.lookup(lexeme.text).ok_or_else(|| DumpError::UnknownTag {
            key: lexeme.text.to_string(),
            range: lexeme.range(),
        })?;
        let mut token = Token::new(tag, "");

        if let Some(name) = iter.next_if(|l| l.kind == DumpToken::Name) {
            let body = &name.text[1..name.text.len() - 1];
            token.name = unescape(body)
                .ok_or(DumpError::BadName {
                    range: name.range(),
                })?
                .into();
        }
        if iter.next_if(|l| l.kind == DumpToken::Eq).is_some() {
            let literal = iter.next().ok_or(DumpError::Unexpected {
                expected: "literal",
                range: end,
            })?;
            token.payload = parse_literal(literal)?;
        }
        match iter.next() {
            None => {}
            Some(l) if l.kind == DumpToken::Newline => {}
            Some(l) => {
                return Err(DumpError::Unexpected {
                    expected: "end of line",
                    range: l.range(),
                });
            }
        }
        tokens.push(token);
    }

    Ok(TokenStream::new(tokens))
}

fn parse_literal(lexeme: &Lexeme<'_>) -> Result<Literal, DumpError> {
    let bad = || DumpError::BadLiteral {
        range: lexeme.range(),
    };
    Ok(match lexeme.kind {
        DumpToken::Integer => Literal::Int(lexeme.text.parse().map_err(|_| bad())?),
        DumpToken::Float => Literal::Float(lexeme.text.parse().map_err(|_| bad())?),
        DumpToken::True => Literal::Bool(true),
        DumpToken::False => Literal::Bool(false),
        DumpToken::String => {
            let body = &lexeme.text[1..lexeme.text.len() - 1];
            Literal::Str(unescape(body).ok_or_else(bad)?)
        }
        _ => {
            return Err(DumpError::Unexpected {
                expected: "literal",
                range: lexeme.range(),
            });
        }
    })
}

fn unescape(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        out.push(match chars.next()? {
            '"' => '"',
            ')' => ')',
            '\\' => '\\',
            'n' => '\n',
            't' => '\t',
            _ => return None,
        });
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Tag;

    #[test]
    fn test_parse_lines() {
        let stream = parse_dump("Model(m)\nString(name)\nstring = \"x\"\n").unwrap();
        let tokens = stream.tokens();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0], Token::new(Tag::Model, "m"));
        assert_eq!(tokens[1].name, "name");
        assert_eq!(tokens[2].payload, Literal::Str("x".into()));
        assert_eq!(tokens[3].tag, Tag::Eof);
    }

    #[test]
    fn test_literals() {
        let stream = parse_dump("int = -3\nfloat = 2.5e-3\nboolean = false\nreal = 1").unwrap();
        let payloads: Vec<_> = stream.iter().map(|t| t.payload.clone()).collect();
        assert_eq!(
            payloads[..4],
            [
                Literal::Int(-3),
                Literal::Float(2.5e-3),
                Literal::Bool(false),
                Literal::Int(1),
            ]
        );
        assert_eq!(stream.tokens()[3].tag, Tag::RealLit);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let stream = parse_dump("# header\n\nModel(m) # trailing\n\n").unwrap();
        assert_eq!(stream.len(), 2);
    }

    #[test]
    fn test_unknown_tag_carries_range() {
        let err = parse_dump("Model(m)\nBogus(x)\n").unwrap_err();
        assert_eq!(
            err,
            DumpError::UnknownTag {
                key: "Bogus".into(),
                range: TextRange::new(9.into(), 14.into()),
            }
        );
    }

    #[test]
    fn test_escapes_survive() {
        let token = Token::literal(Literal::Str("a\"b\\c\nd".into()));
        let stream = parse_dump(&token.to_string()).unwrap();
        assert_eq!(stream.tokens()[0], token);
    }

    #[test]
    fn test_names_with_delimiters_survive() {
        let tokens = vec![
            Token::new(Tag::Port, "f(x)"),
            Token::new(Tag::Identifier, "a\\b\nc"),
        ];
        let stream = TokenStream::new(tokens);
        assert_eq!(parse_dump(&stream.to_dump()).unwrap(), stream);
    }

    #[test]
    fn test_bad_escape_in_name() {
        let err = parse_dump("Port(a\\q)").unwrap_err();
        assert!(matches!(err, DumpError::BadName { .. }));
    }

    #[test]
    fn test_two_tokens_on_one_line() {
        let err = parse_dump("Model(m) Port(p)").unwrap_err();
        assert!(matches!(
            err,
            DumpError::Unexpected {
                expected: "end of line",
                ..
            }
        ));
    }
}
