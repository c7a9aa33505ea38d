//! Syntax tree for the statement language the frontend understands.

use std::{fmt, mem};

use hostc_source::Span;

/// A name together with where it was written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BindingKind {
    Let,
    Var,
}

impl BindingKind {
    pub fn keyword(self) -> &'static str {
        match self {
            BindingKind::Let => "let",
            BindingKind::Var => "var",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Int(i64, Span),
    Str(String, Span),
    Bool(bool, Span),
    Name(Ident),
    Call {
        callee: Ident,
        args: Vec<Expr>,
        /// Span of the closing parenthesis.
        close: Span,
    },
    Binary {
        op: BinaryOp,
        op_span: Span,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        /// Both operands.
        span: Span,
    },
    Paren(Box<Expr>, Span),
}

impl Expr {
    /// Full extent of the expression.
    pub fn span(&self) -> Span {
        match self {
            Expr::Int(_, span)
            | Expr::Str(_, span)
            | Expr::Bool(_, span)
            | Expr::Paren(_, span)
            | Expr::Binary { span, .. } => *span,
            Expr::Name(ident) => ident.span,
            Expr::Call { callee, close, .. } => callee.span.merge(*close),
        }
    }

    /// Build `lhs op rhs`, spanning both operands.
    pub fn binary(op: BinaryOp, op_span: Span, lhs: Expr, rhs: Expr) -> Self {
        let span = lhs.span().merge(rhs.span());
        Expr::Binary {
            op,
            op_span,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            span,
        }
    }

    /// Move the direct subexpressions into `into`, leaving leaves behind.
    fn take_children(&mut self, into: &mut Vec<Expr>) {
        match self {
            Expr::Binary { lhs, rhs, span, .. } => {
                into.push(mem::replace(&mut **lhs, Expr::Bool(false, *span)));
                into.push(mem::replace(&mut **rhs, Expr::Bool(false, *span)));
            }
            Expr::Paren(inner, span) => {
                into.push(mem::replace(&mut **inner, Expr::Bool(false, *span)));
            }
            Expr::Call { args, .. } => into.append(args),
            Expr::Int(..) | Expr::Str(..) | Expr::Bool(..) | Expr::Name(_) => {}
        }
    }
}

// Nesting depth is bounded only by input size, so the tree is torn down
// with an explicit worklist instead of recursive drop glue.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.take_children(&mut pending);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    /// `let|var NAME [: TYPE] = EXPR`
    Binding {
        kind: BindingKind,
        keyword: Span,
        name: Ident,
        ty: Option<Ident>,
        value: Expr,
    },
    /// `typealias NAME = TYPE`
    TypeAlias { name: Ident, target: Ident },
    /// `NAME = EXPR`
    Assign { target: Ident, value: Expr },
    Expr(Expr),
}
