use pretty_assertions::assert_eq;

use super::*;

fn ident(name: &str) -> DiagnosticArgument {
    DiagnosticArgument::identifier(name)
}

#[test]
fn positional_arguments() {
    let args = [ident("a"), DiagnosticArgument::string("b")];
    assert_eq!(render("%1 then %0", &args, &FormatOptions::plain()), "b then 'a'");
}

#[test]
fn percent_escape() {
    assert_eq!(render("100%% sure", &[], &FormatOptions::plain()), "100% sure");
}

#[test]
fn missing_argument_is_left_literal() {
    assert_eq!(render("value %3", &[ident("x")], &FormatOptions::plain()), "value %3");
}

#[test]
fn unknown_directive_is_left_literal() {
    assert_eq!(render("50%x", &[], &FormatOptions::plain()), "50%x");
    assert_eq!(render("trailing %", &[], &FormatOptions::plain()), "trailing %");
}

#[test]
fn custom_quotes() {
    let options = FormatOptions {
        opening_quote: "<<".to_string(),
        closing_quote: ">>".to_string(),
        ..FormatOptions::plain()
    };
    assert_eq!(render("cannot find %0", &[ident("x")], &options), "cannot find <<x>>");
}

#[test]
fn alias_expansion_follows_options() {
    let args = [DiagnosticArgument::from(TypeArg::alias("Meters", "Int"))];
    assert_eq!(
        render("%0", &args, &FormatOptions::plain()),
        "'Meters' (aka 'Int')"
    );
    assert_eq!(
        render("%0", &args, &FormatOptions::markdown()),
        "`Meters` (aka `Int`)"
    );
    assert_eq!(render("%0", &args, &FormatOptions::plain().without_aka()), "'Meters'");
}

#[test]
fn opaque_result_type() {
    let args = [DiagnosticArgument::from(TypeArg::opaque("some Shape", "make()"))];
    assert_eq!(
        render("%0", &args, &FormatOptions::plain()),
        "'some Shape' (result type of 'make()')"
    );
}

#[test]
fn select_picks_branch_by_integer() {
    let format = "%select{missing|extra}0 argument%s1";
    let missing = [DiagnosticArgument::from(0i64), DiagnosticArgument::from(1i64)];
    let extra = [DiagnosticArgument::from(1i64), DiagnosticArgument::from(2i64)];
    assert_eq!(render(format, &missing, &FormatOptions::plain()), "missing argument");
    assert_eq!(render(format, &extra, &FormatOptions::plain()), "extra arguments");
}

#[test]
fn select_branches_may_nest_placeholders() {
    let args = [DiagnosticArgument::from(1i64), ident("f")];
    assert_eq!(
        render("%select{none|call to %1}0", &args, &FormatOptions::plain()),
        "call to 'f'"
    );
}

#[test]
fn select_out_of_range_renders_nothing() {
    let args = [DiagnosticArgument::from(5i64)];
    assert_eq!(render("[%select{a|b}0]", &args, &FormatOptions::plain()), "[]");
}

#[test]
fn unterminated_select_is_left_literal() {
    assert_eq!(
        render("x %select{a|b", &[], &FormatOptions::plain()),
        "x %select{a|b"
    );
}

#[test]
fn integer_argument_renders_decimal() {
    let args = [DiagnosticArgument::from(42usize)];
    assert_eq!(render("%0 items", &args, &FormatOptions::plain()), "42 items");
}

#[test]
fn non_ascii_text_is_preserved() {
    assert_eq!(
        render("héllo %0 → ok", &[ident("ü")], &FormatOptions::plain()),
        "héllo 'ü' → ok"
    );
}
