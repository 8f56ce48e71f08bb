use super::ensure_sufficient_stack;

#[test]
fn shallow_recursion_returns_value() {
    fn depth(n: u32) -> u32 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
    }

    assert_eq!(depth(16), 16);
}

#[test]
fn nested_brackets_deeper_than_default_stack() {
    // Mirrors the shape of the parser: one frame per open bracket.
    fn count_nesting(bytes: &[u8]) -> usize {
        ensure_sufficient_stack(|| match bytes.first() {
            Some(b'(') => 1 + count_nesting(&bytes[1..]),
            _ => 0,
        })
    }

    let source = "(".repeat(100_000);
    assert_eq!(count_nesting(source.as_bytes()), 100_000);
}

#[test]
fn propagates_result_values() {
    let result: Result<u8, &str> = ensure_sufficient_stack(|| Err("stop"));
    assert_eq!(result, Err("stop"));
}
