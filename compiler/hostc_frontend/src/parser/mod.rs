//! Recursive-descent parser.
//!
//! One statement per line. A syntax error abandons the rest of the line and
//! parsing resumes at the next one, so a single file can report several
//! independent errors.

use hostc_diagnostic::{DiagId, Diagnostic, DiagnosticArgument};
use hostc_source::{FileId, Span};

use crate::ast::{BinaryOp, BindingKind, Expr, Ident, Stmt};
use crate::lexer::{Token, TokenKind};
use crate::stack::ensure_sufficient_stack;

/// Result of parsing one file.
#[derive(Clone, Debug, Default)]
pub struct ParseOutput {
    pub statements: Vec<Stmt>,
    pub diagnostics: Vec<Diagnostic>,
}

type ParseResult<T> = Result<T, Box<Diagnostic>>;

/// Parse a token stream produced by [`lex`](crate::lexer::lex).
#[tracing::instrument(level = "trace", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &[Token]) -> ParseOutput {
    let mut parser = Parser {
        tokens,
        pos: 0,
        output: ParseOutput::default(),
    };
    parser.parse_file();
    parser.output
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    output: ParseOutput,
}

impl Parser<'_> {
    fn parse_file(&mut self) {
        loop {
            while self.eat(&TokenKind::Newline) {}
            if self.at_eof() {
                break;
            }
            match self.statement() {
                Ok(stmt) => {
                    self.output.statements.push(stmt);
                    if !self.at_line_end() {
                        let diag = self.expected(DiagnosticArgument::string("newline after statement"));
                        self.output.diagnostics.push(diag);
                        self.recover();
                    }
                }
                Err(diag) => {
                    self.output.diagnostics.push(*diag);
                    self.recover();
                }
            }
        }
    }

    // Token access

    fn peek(&self) -> &TokenKind {
        self.peek_at(0)
    }

    fn peek_at(&self, ahead: usize) -> &TokenKind {
        self.tokens.get(self.pos + ahead).map_or(&TokenKind::Eof, |t| &t.kind)
    }

    fn span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(Span::point(FileId::from_raw(0), 0), |t| t.span)
    }

    fn bump(&mut self) -> Span {
        let span = self.span();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        span
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn at_eof(&self) -> bool {
        matches!(self.peek(), TokenKind::Eof)
    }

    fn at_line_end(&self) -> bool {
        matches!(self.peek(), TokenKind::Newline | TokenKind::Eof)
    }

    fn recover(&mut self) {
        while !self.at_line_end() {
            self.bump();
        }
    }

    fn expected(&self, what: DiagnosticArgument) -> Diagnostic {
        Diagnostic::new(DiagId::ExpectedToken)
            .at(self.span())
            .with_arg(what)
    }

    fn expect(&mut self, kind: &TokenKind) -> ParseResult<Span> {
        if self.peek() == kind {
            Ok(self.bump())
        } else {
            Err(Box::new(
                self.expected(DiagnosticArgument::identifier(kind.describe())),
            ))
        }
    }

    fn ident(&mut self) -> Option<Ident> {
        if let TokenKind::Ident(name) = self.peek() {
            let name = name.clone();
            let span = self.bump();
            Some(Ident { name, span })
        } else {
            None
        }
    }

    // Statements

    fn statement(&mut self) -> ParseResult<Stmt> {
        match self.peek() {
            TokenKind::Let => self.binding(BindingKind::Let),
            TokenKind::Var => self.binding(BindingKind::Var),
            TokenKind::TypeAlias => self.type_alias(),
            TokenKind::Ident(_) if matches!(self.peek_at(1), TokenKind::Eq) => {
                let target = self.ident().ok_or_else(|| Box::new(self.expected_expression()))?;
                self.bump();
                let value = self.expr()?;
                Ok(Stmt::Assign { target, value })
            }
            _ => Ok(Stmt::Expr(self.expr()?)),
        }
    }

    fn binding(&mut self, kind: BindingKind) -> ParseResult<Stmt> {
        let keyword = self.bump();
        let what = match kind {
            BindingKind::Let => "constant",
            BindingKind::Var => "variable",
        };
        let name = self.ident().ok_or_else(|| {
            Box::new(
                Diagnostic::new(DiagId::ExpectedIdentifier)
                    .at(self.span())
                    .with_arg(DiagnosticArgument::string(what)),
            )
        })?;
        let ty = if self.eat(&TokenKind::Colon) {
            Some(self.type_name()?)
        } else {
            None
        };
        self.expect(&TokenKind::Eq)?;
        let value = self.expr()?;
        Ok(Stmt::Binding {
            kind,
            keyword,
            name,
            ty,
            value,
        })
    }

    fn type_alias(&mut self) -> ParseResult<Stmt> {
        self.bump();
        let name = self.ident().ok_or_else(|| {
            Box::new(
                Diagnostic::new(DiagId::ExpectedIdentifier)
                    .at(self.span())
                    .with_arg(DiagnosticArgument::string("typealias")),
            )
        })?;
        self.expect(&TokenKind::Eq)?;
        let target = self.type_name()?;
        Ok(Stmt::TypeAlias { name, target })
    }

    fn type_name(&mut self) -> ParseResult<Ident> {
        self.ident()
            .ok_or_else(|| Box::new(Diagnostic::new(DiagId::ExpectedType).at(self.span())))
    }

    // Expressions

    fn expected_expression(&self) -> Diagnostic {
        Diagnostic::new(DiagId::ExpectedExpression).at(self.span())
    }

    fn expr(&mut self) -> ParseResult<Expr> {
        ensure_sufficient_stack(|| self.expr_inner())
    }

    fn expr_inner(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            let op_span = self.bump();
            let rhs = self.term()?;
            lhs = Expr::binary(op, op_span, lhs, rhs);
        }
    }

    fn term(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.primary()?;
        loop {
            let op = match self.peek() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            let op_span = self.bump();
            let rhs = self.primary()?;
            lhs = Expr::binary(op, op_span, lhs, rhs);
        }
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        match self.peek().clone() {
            TokenKind::Int(value) => Ok(Expr::Int(value, self.bump())),
            TokenKind::String(text) => Ok(Expr::Str(text, self.bump())),
            TokenKind::True => Ok(Expr::Bool(true, self.bump())),
            TokenKind::False => Ok(Expr::Bool(false, self.bump())),
            TokenKind::Ident(name) => {
                let span = self.bump();
                let ident = Ident { name, span };
                if self.eat(&TokenKind::LParen) {
                    self.call(ident)
                } else {
                    Ok(Expr::Name(ident))
                }
            }
            TokenKind::LParen => {
                let open = self.bump();
                let inner = self.expr()?;
                let close = self.expect(&TokenKind::RParen)?;
                Ok(Expr::Paren(Box::new(inner), open.merge(close)))
            }
            _ => Err(Box::new(self.expected_expression())),
        }
    }

    fn call(&mut self, callee: Ident) -> ParseResult<Expr> {
        let mut args = Vec::new();
        if !matches!(self.peek(), TokenKind::RParen) {
            loop {
                args.push(self.expr()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        let close = self.expect(&TokenKind::RParen)?;
        Ok(Expr::Call {
            callee,
            args,
            close,
        })
    }
}
