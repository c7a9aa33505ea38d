//! Name resolution and type checking.
//!
//! One global scope per file. Values and types live in separate
//! namespaces; user declarations may shadow builtin functions but not
//! builtin types. Diagnostics are produced in source order, followed by
//! the "never mutated" warnings in declaration order.

use hostc_diagnostic::{DiagId, Diagnostic, DiagnosticArgument, TypeArg};
use hostc_source::Span;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::ast::{BinaryOp, BindingKind, Expr, Ident, Stmt};
use crate::registry::EngineRegistry;
use crate::stack::ensure_sufficient_stack;
use crate::suggest::suggest_similar;
use crate::types::{FunctionSig, SpelledTy, Ty};

/// Check `statements`, returning every diagnostic found.
#[tracing::instrument(level = "trace", skip_all, fields(statements = statements.len()))]
pub fn check(statements: &[Stmt], registry: &EngineRegistry) -> Vec<Diagnostic> {
    let mut checker = Checker {
        registry,
        bindings: Vec::new(),
        by_name: FxHashMap::default(),
        aliases: Vec::new(),
        alias_by_name: FxHashMap::default(),
        diagnostics: Vec::new(),
    };
    for stmt in statements {
        checker.statement(stmt);
    }
    checker.unmutated_vars();
    checker.diagnostics
}

struct Binding {
    name: String,
    kind: BindingKind,
    keyword: Span,
    decl: Span,
    ty: SpelledTy,
    mutated: bool,
}

struct Alias {
    name: String,
    decl: Span,
    ty: SpelledTy,
}

enum Value {
    User(usize),
    Builtin(&'static FunctionSig),
    Missing,
}

struct Checker<'r> {
    registry: &'r EngineRegistry,
    bindings: Vec<Binding>,
    by_name: FxHashMap<String, usize>,
    aliases: Vec<Alias>,
    alias_by_name: FxHashMap<String, usize>,
    diagnostics: Vec<Diagnostic>,
}

fn type_arg(ty: &SpelledTy) -> TypeArg {
    match &ty.alias {
        Some(alias) => TypeArg::alias(alias.as_str(), ty.ty.to_string()),
        None => TypeArg::named(ty.ty.to_string()),
    }
}

fn ident_arg(name: &str) -> DiagnosticArgument {
    DiagnosticArgument::identifier(name)
}

impl Checker<'_> {
    fn statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Binding {
                kind,
                keyword,
                name,
                ty,
                value,
            } => {
                let value_ty = self.expr(value);
                let declared = match ty {
                    Some(annotation) => {
                        let annotated = self.resolve_type(annotation);
                        self.check_conversion(DiagId::CannotConvertValue, value, &value_ty, &annotated);
                        annotated
                    }
                    None => value_ty,
                };
                self.declare(name, *kind, *keyword, declared);
            }
            Stmt::TypeAlias { name, target } => {
                let target = self.resolve_type(target);
                self.declare_alias(name, target.ty);
            }
            Stmt::Assign { target, value } => self.assign(target, value),
            Stmt::Expr(expr) => {
                self.expr(expr);
            }
        }
    }

    fn lookup(&self, name: &str) -> Value {
        if let Some(&index) = self.by_name.get(name) {
            Value::User(index)
        } else if let Some(sig) = self.registry.function(name) {
            Value::Builtin(sig)
        } else {
            Value::Missing
        }
    }

    fn declare(&mut self, name: &Ident, kind: BindingKind, keyword: Span, ty: SpelledTy) {
        if let Some(&previous) = self.by_name.get(&name.name) {
            let previous = self.bindings[previous].decl;
            self.redeclaration(name, Some(previous));
            return;
        }
        trace!(name = %name.name, kind = kind.keyword(), ty = %ty.ty, "declare");
        self.by_name.insert(name.name.clone(), self.bindings.len());
        self.bindings.push(Binding {
            name: name.name.clone(),
            kind,
            keyword,
            decl: name.span,
            ty,
            mutated: false,
        });
    }

    fn declare_alias(&mut self, name: &Ident, target: Ty) {
        if let Some(&previous) = self.alias_by_name.get(&name.name) {
            let previous = self.aliases[previous].decl;
            self.redeclaration(name, Some(previous));
            return;
        }
        if self.registry.builtin_type(&name.name).is_some() {
            self.redeclaration(name, None);
            return;
        }
        self.alias_by_name.insert(name.name.clone(), self.aliases.len());
        self.aliases.push(Alias {
            name: name.name.clone(),
            decl: name.span,
            ty: SpelledTy {
                ty: target,
                alias: Some(name.name.clone()),
            },
        });
    }

    fn redeclaration(&mut self, name: &Ident, previous: Option<Span>) {
        let mut diag = Diagnostic::new(DiagId::InvalidRedeclaration)
            .at(name.span)
            .with_arg(ident_arg(&name.name))
            .with_range(name.span);
        if let Some(previous) = previous {
            diag = diag.with_note(
                Diagnostic::new(DiagId::PreviouslyDeclaredHere)
                    .at(previous)
                    .with_arg(ident_arg(&name.name)),
            );
        }
        self.diagnostics.push(diag);
    }

    fn resolve_type(&mut self, name: &Ident) -> SpelledTy {
        if let Some(&index) = self.alias_by_name.get(&name.name) {
            return self.aliases[index].ty.clone();
        }
        if let Some(ty) = self.registry.builtin_type(&name.name) {
            return SpelledTy::plain(ty);
        }
        let candidates = self
            .aliases
            .iter()
            .map(|alias| alias.name.as_str())
            .chain(self.registry.type_names().map(|name| -> &str { name }));
        let suggestion = suggest_similar(&name.name, candidates).map(str::to_string);
        self.report_missing(DiagId::CannotFindTypeInScope, name, suggestion);
        SpelledTy::plain(Ty::Error)
    }

    fn undeclared(&mut self, name: &Ident) {
        let candidates = self
            .bindings
            .iter()
            .map(|binding| binding.name.as_str())
            .chain(self.registry.function_names().map(|name| -> &str { name }));
        let suggestion = suggest_similar(&name.name, candidates).map(str::to_string);
        self.report_missing(DiagId::CannotFindInScope, name, suggestion);
    }

    fn report_missing(&mut self, id: DiagId, name: &Ident, suggestion: Option<String>) {
        let mut diag = Diagnostic::new(id)
            .at(name.span)
            .with_arg(ident_arg(&name.name))
            .with_range(name.span);
        if let Some(suggestion) = suggestion {
            diag = diag.with_note(
                Diagnostic::new(DiagId::DidYouMean)
                    .at(name.span)
                    .with_arg(ident_arg(&suggestion))
                    .with_fixit(name.span, suggestion),
            );
        }
        self.diagnostics.push(diag);
    }

    fn check_conversion(&mut self, id: DiagId, value: &Expr, from: &SpelledTy, to: &SpelledTy) {
        if to.ty.accepts(from.ty) {
            return;
        }
        let span = value.span();
        self.diagnostics.push(
            Diagnostic::new(id)
                .at(span)
                .with_arg(type_arg(from))
                .with_arg(type_arg(to))
                .with_range(span),
        );
    }

    fn assign(&mut self, target: &Ident, value: &Expr) {
        let expected = match self.lookup(&target.name) {
            Value::User(index) => {
                let binding = &mut self.bindings[index];
                match binding.kind {
                    BindingKind::Var => {
                        binding.mutated = true;
                        Some(binding.ty.clone())
                    }
                    BindingKind::Let => {
                        let keyword = binding.keyword;
                        self.diagnostics.push(
                            Diagnostic::new(DiagId::AssignToLet)
                                .at(target.span)
                                .with_arg(ident_arg(&target.name))
                                .with_range(target.span)
                                .with_note(
                                    Diagnostic::new(DiagId::ChangeLetToVar)
                                        .at(keyword)
                                        .with_fixit(keyword, "var"),
                                ),
                        );
                        None
                    }
                }
            }
            Value::Builtin(_) => {
                self.diagnostics.push(
                    Diagnostic::new(DiagId::AssignToLet)
                        .at(target.span)
                        .with_arg(ident_arg(&target.name))
                        .with_range(target.span),
                );
                None
            }
            Value::Missing => {
                self.undeclared(target);
                None
            }
        };

        let value_ty = self.expr(value);
        if let Some(expected) = expected {
            self.check_conversion(DiagId::CannotConvertValue, value, &value_ty, &expected);
        }
    }

    fn expr(&mut self, expr: &Expr) -> SpelledTy {
        ensure_sufficient_stack(|| self.expr_inner(expr))
    }

    fn expr_inner(&mut self, expr: &Expr) -> SpelledTy {
        match expr {
            Expr::Int(..) => Ty::Int.into(),
            Expr::Str(..) => Ty::String.into(),
            Expr::Bool(..) => Ty::Bool.into(),
            Expr::Paren(inner, _) => self.expr(inner),
            Expr::Name(name) => match self.lookup(&name.name) {
                Value::User(index) => self.bindings[index].ty.clone(),
                Value::Builtin(sig) => Ty::Function(sig).into(),
                Value::Missing => {
                    self.undeclared(name);
                    Ty::Error.into()
                }
            },
            Expr::Call {
                callee,
                args,
                close,
            } => self.call(callee, args, *close),
            Expr::Binary {
                op,
                op_span,
                lhs,
                rhs,
                ..
            } => {
                let lhs_ty = self.expr(lhs);
                let rhs_ty = self.expr(rhs);
                if lhs_ty.ty.is_error() || rhs_ty.ty.is_error() {
                    return Ty::Error.into();
                }
                let result = match (op, lhs_ty.ty, rhs_ty.ty) {
                    (BinaryOp::Add, Ty::String, Ty::String) => Some(Ty::String),
                    (_, Ty::Int, Ty::Int) => Some(Ty::Int),
                    _ => None,
                };
                if let Some(result) = result {
                    return result.into();
                }
                self.diagnostics.push(
                    Diagnostic::new(DiagId::BinaryOperandMismatch)
                        .at(*op_span)
                        .with_arg(ident_arg(&op.to_string()))
                        .with_arg(type_arg(&lhs_ty))
                        .with_arg(type_arg(&rhs_ty))
                        .with_range(lhs.span())
                        .with_range(rhs.span()),
                );
                Ty::Error.into()
            }
        }
    }

    fn call(&mut self, callee: &Ident, args: &[Expr], close: Span) -> SpelledTy {
        let sig = match self.lookup(&callee.name) {
            Value::User(index) => match self.bindings[index].ty.ty {
                Ty::Function(sig) => Some(sig),
                Ty::Error => None,
                Ty::Int | Ty::String | Ty::Bool | Ty::Void | Ty::Any => {
                    let ty = type_arg(&self.bindings[index].ty);
                    self.diagnostics.push(
                        Diagnostic::new(DiagId::CallNonFunction)
                            .at(callee.span)
                            .with_arg(ty)
                            .with_range(callee.span),
                    );
                    None
                }
            },
            Value::Builtin(sig) => Some(sig),
            Value::Missing => {
                self.undeclared(callee);
                None
            }
        };
        let arg_tys: Vec<SpelledTy> = args.iter().map(|arg| self.expr(arg)).collect();
        let Some(sig) = sig else {
            return Ty::Error.into();
        };

        let expected = sig.params.len();
        if args.len() < expected {
            let missing = expected - args.len();
            self.diagnostics.push(
                Diagnostic::new(DiagId::CallArgumentCount)
                    .at(close)
                    .with_arg(0i64)
                    .with_arg(missing)
                    .with_arg(ident_arg(&callee.name)),
            );
        } else if let Some(first_extra) = args.get(expected) {
            let extra = args.len() - expected;
            let extent = args[args.len() - 1].span().merge(first_extra.span());
            self.diagnostics.push(
                Diagnostic::new(DiagId::CallArgumentCount)
                    .at(first_extra.span())
                    .with_arg(1i64)
                    .with_arg(extra)
                    .with_arg(ident_arg(&callee.name))
                    .with_range(extent),
            );
        } else {
            for ((param, arg), arg_ty) in sig.params.iter().zip(args).zip(&arg_tys) {
                self.check_conversion(
                    DiagId::ArgumentTypeMismatch,
                    arg,
                    arg_ty,
                    &SpelledTy::plain(*param),
                );
            }
        }
        sig.result.into()
    }

    fn unmutated_vars(&mut self) {
        for binding in &self.bindings {
            if binding.kind == BindingKind::Var && !binding.mutated {
                self.diagnostics.push(
                    Diagnostic::new(DiagId::VarNeverMutated)
                        .at(binding.decl)
                        .with_arg(ident_arg(&binding.name))
                        .with_fixit(binding.keyword, "let"),
                );
            }
        }
    }
}
