//! Message catalog for every diagnostic the engine can emit.
//!
//! Each entry fixes a default kind and a format string. Format strings use
//! `%N` placeholders for arguments (see [`crate::format`]); literal quotes in
//! a format string are part of the message, quotes around arguments come
//! from the [`FormatOptions`](crate::FormatOptions) in effect.

use std::fmt;

use crate::DiagnosticKind;

macro_rules! catalog {
    ($($variant:ident => ($kind:ident, $name:literal, $format:literal),)*) => {
        /// Identifier of a catalog entry.
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub enum DiagId {
            $(
                #[doc = $format]
                $variant,
            )*
        }

        impl DiagId {
            /// All catalog entries, in declaration order.
            pub const ALL: &'static [DiagId] = &[$(DiagId::$variant,)*];

            /// Default kind of diagnostics built from this entry.
            pub const fn kind(self) -> DiagnosticKind {
                match self {
                    $(DiagId::$variant => DiagnosticKind::$kind,)*
                }
            }

            /// Stable snake_case name, used in logs and `Display`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(DiagId::$variant => $name,)*
                }
            }

            /// Format string with `%N` placeholders.
            pub const fn format(self) -> &'static str {
                match self {
                    $(DiagId::$variant => $format,)*
                }
            }
        }
    };
}

catalog! {
    // Driver
    UnknownArgument => (Error, "unknown_argument", "unknown argument: %0"),
    NoInputFiles => (Error, "no_input_files", "no input files"),
    ErrorOpeningInput => (Error, "error_opening_input", "error opening input file %0 (%1)"),

    // Lexing and parsing
    InvalidCharacter => (Error, "invalid_character", "invalid character %0 in source file"),
    UnterminatedString => (Error, "unterminated_string", "unterminated string literal"),
    ExpectedExpression => (Error, "expected_expression", "expected expression"),
    ExpectedToken => (Error, "expected_token", "expected %0"),
    ExpectedIdentifier => (Error, "expected_identifier", "expected identifier in %0 declaration"),
    ExpectedType => (Error, "expected_type", "expected type"),
    IntegerOverflow => (Error, "integer_literal_overflow", "integer literal %0 overflows when stored into 'Int'"),

    // Name lookup and checking
    CannotFindInScope => (Error, "cannot_find_in_scope", "cannot find %0 in scope"),
    CannotFindTypeInScope => (Error, "cannot_find_type_in_scope", "cannot find type %0 in scope"),
    DidYouMean => (Note, "did_you_mean", "did you mean %0?"),
    InvalidRedeclaration => (Error, "invalid_redeclaration", "invalid redeclaration of %0"),
    PreviouslyDeclaredHere => (Note, "previously_declared_here", "%0 previously declared here"),
    AssignToLet => (Error, "assign_to_let", "cannot assign to value: %0 is a 'let' constant"),
    ChangeLetToVar => (Note, "change_let_to_var", "change 'let' to 'var' to make it mutable"),
    VarNeverMutated => (Warning, "var_never_mutated", "variable %0 was never mutated; consider changing to 'let' constant"),
    CannotConvertValue => (Error, "cannot_convert_value", "cannot convert value of type %0 to specified type %1"),
    BinaryOperandMismatch => (Error, "binary_operand_mismatch", "binary operator %0 cannot be applied to operands of type %1 and %2"),
    CallArgumentCount => (Error, "call_argument_count", "%select{missing|extra}0 argument%s1 in call to %2"),
    ArgumentTypeMismatch => (Error, "argument_type_mismatch", "cannot convert value of type %0 to expected argument type %1"),
    CallNonFunction => (Error, "call_non_function", "cannot call value of non-function type %0"),

    // Remarks
    SourceLoaded => (Remark, "source_loaded", "loaded %0 from %1"),

    // Engine invariants
    InvariantViolation => (Bug, "invariant_violation", "compiler invariant violated: %0"),
}

impl fmt::Display for DiagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
