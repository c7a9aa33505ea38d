use pretty_assertions::assert_eq;

use super::*;

static PAIR: FunctionSig = FunctionSig {
    params: &[Ty::Int, Ty::String],
    result: Ty::Bool,
};

#[test]
fn display_function_signature() {
    assert_eq!(Ty::Function(&PAIR).to_string(), "(Int, String) -> Bool");
    assert_eq!(Ty::Void.to_string(), "()");
}

#[test]
fn error_type_is_compatible_both_ways() {
    assert!(Ty::Int.accepts(Ty::Error));
    assert!(Ty::Error.accepts(Ty::String));
    assert!(!Ty::Int.accepts(Ty::String));
    assert!(Ty::Any.accepts(Ty::Bool));
}
