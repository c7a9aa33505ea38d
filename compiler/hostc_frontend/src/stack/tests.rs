use super::ensure_sufficient_stack;

fn depth(n: u64) -> u64 {
    ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
}

#[test]
fn shallow_call_returns_closure_result() {
    assert_eq!(ensure_sufficient_stack(|| 42), 42);
}

#[test]
fn deep_recursion_grows_instead_of_overflowing() {
    assert_eq!(depth(200_000), 200_000);
}
