//! Escape validation for string literals.

/// Byte ranges (relative to the literal) of malformed `\x` / `\u` escapes.
///
/// `\x` needs two hex digits, `\u` four. Every other escape is accepted.
pub(crate) fn invalid_escapes(literal: &str) -> Vec<(u32, u32)> {
    let bytes = literal.as_bytes();
    let mut out = Vec::new();
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        let start = i;
        let required = match bytes.get(i + 1) {
            Some(b'x') => 2,
            Some(b'u') => 4,
            Some(_) => {
                i += 2;
                continue;
            }
            None => break,
        };
        let digits = bytes[i + 2..]
            .iter()
            .take(required)
            .take_while(|b| b.is_ascii_hexdigit())
            .count();
        i += 2 + digits;
        if digits < required {
            out.push((to_u32(start), to_u32(i)));
        }
    }
    out
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "literal lengths are bounded by the source length which fits in u32"
)]
fn to_u32(n: usize) -> u32 {
    n as u32
}
