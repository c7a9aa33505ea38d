//! Tokenizer built on logos.
//!
//! Lexing never fails: malformed input produces diagnostics alongside the
//! best-effort token stream, which always ends in [`TokenKind::Eof`].

use hostc_diagnostic::{DiagId, Diagnostic, DiagnosticArgument};
use hostc_source::{FileId, Span};
use logos::Logos;

/// Raw token from logos, before literal conversion.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r]+")]
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("\n")]
    Newline,

    #[token("let")]
    Let,
    #[token("var")]
    Var,
    #[token("typealias")]
    TypeAlias,
    #[token("true")]
    True,
    #[token("false")]
    False,

    #[token(":")]
    Colon,
    #[token("=")]
    Eq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    #[regex(r#""([^"\\\n]|\\.)*"#)]
    UnterminatedString,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Token kind with literal payloads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Let,
    Var,
    TypeAlias,
    True,
    False,
    Colon,
    Eq,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Comma,
    Int(i64),
    String(String),
    Ident(String),
    Newline,
    Eof,
}

impl TokenKind {
    /// How the token is spelled in messages.
    pub fn describe(&self) -> &str {
        match self {
            TokenKind::Let => "let",
            TokenKind::Var => "var",
            TokenKind::TypeAlias => "typealias",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Colon => ":",
            TokenKind::Eq => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Comma => ",",
            TokenKind::Int(_) => "integer literal",
            TokenKind::String(_) => "string literal",
            TokenKind::Ident(name) => name,
            TokenKind::Newline => "newline",
            TokenKind::Eof => "end of file",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Result of lexing one file.
#[derive(Clone, Debug, Default)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

fn offset(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Lex `source`, tagging spans with `file`.
pub fn lex(source: &str, file: FileId) -> LexOutput {
    let mut output = LexOutput::default();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let span = Span::new(file, offset(range.start), offset(range.end));
        let slice = lexer.slice();

        let kind = match result {
            Ok(RawToken::LineComment) => continue,
            Ok(RawToken::Newline) => TokenKind::Newline,
            Ok(RawToken::Let) => TokenKind::Let,
            Ok(RawToken::Var) => TokenKind::Var,
            Ok(RawToken::TypeAlias) => TokenKind::TypeAlias,
            Ok(RawToken::True) => TokenKind::True,
            Ok(RawToken::False) => TokenKind::False,
            Ok(RawToken::Colon) => TokenKind::Colon,
            Ok(RawToken::Eq) => TokenKind::Eq,
            Ok(RawToken::Plus) => TokenKind::Plus,
            Ok(RawToken::Minus) => TokenKind::Minus,
            Ok(RawToken::Star) => TokenKind::Star,
            Ok(RawToken::Slash) => TokenKind::Slash,
            Ok(RawToken::LParen) => TokenKind::LParen,
            Ok(RawToken::RParen) => TokenKind::RParen,
            Ok(RawToken::Comma) => TokenKind::Comma,
            Ok(RawToken::Ident) => TokenKind::Ident(slice.to_string()),
            Ok(RawToken::Int) => match slice.parse::<i64>() {
                Ok(value) => TokenKind::Int(value),
                Err(_) => {
                    output.diagnostics.push(
                        Diagnostic::new(DiagId::IntegerOverflow)
                            .at(span)
                            .with_arg(DiagnosticArgument::string(slice))
                            .with_range(span),
                    );
                    TokenKind::Int(i64::MAX)
                }
            },
            Ok(RawToken::String) => TokenKind::String(unescape(&slice[1..slice.len() - 1])),
            Ok(RawToken::UnterminatedString) => {
                output.diagnostics.push(
                    Diagnostic::new(DiagId::UnterminatedString)
                        .at(Span::point(file, span.start))
                        .with_range(span),
                );
                TokenKind::String(unescape(&slice[1..]))
            }
            Err(()) => {
                output.diagnostics.push(
                    Diagnostic::new(DiagId::InvalidCharacter)
                        .at(span)
                        .with_arg(DiagnosticArgument::identifier(slice))
                        .with_fixit(span, ""),
                );
                continue;
            }
        };
        output.tokens.push(Token { kind, span });
    }

    output.tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::point(file, offset(source.len())),
    });
    output
}

/// Resolve backslash escapes. Unknown escapes keep the escaped character.
fn unescape(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('0') => result.push('\0'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }
    result
}
