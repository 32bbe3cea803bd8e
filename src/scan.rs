//! Byte-level character classification.
//!
//! Stateless predicates over a single input position. The grammar layers
//! above work on the UTF-8 bytes of the input; every non-ASCII byte is
//! treated as "printable" since the input is already valid UTF-8 and the
//! grammar permits any non-ASCII character wherever it permits printable
//! text.

/// Space or horizontal tab.
#[inline]
pub(crate) const fn is_ws(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

#[inline]
pub(crate) const fn is_bare_key_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

#[inline]
pub(crate) const fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

#[inline]
pub(crate) const fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

#[inline]
pub(crate) const fn is_oct_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'7')
}

#[inline]
pub(crate) const fn is_bin_digit(b: u8) -> bool {
    b == b'0' || b == b'1'
}

#[inline]
pub(crate) const fn is_non_ascii(b: u8) -> bool {
    b >= 0x80
}

/// Characters allowed in a comment: tab, printable ASCII, non-ASCII.
#[inline]
pub(crate) const fn is_comment_char(b: u8) -> bool {
    b == b'\t' || matches!(b, 0x20..=0x7e) || is_non_ascii(b)
}

/// Unescaped characters allowed inside a basic string body.
#[inline]
pub(crate) const fn is_basic_unescaped(b: u8) -> bool {
    is_ws(b) || b == b'!' || matches!(b, 0x23..=0x5b | 0x5d..=0x7e) || is_non_ascii(b)
}

/// Characters allowed inside a literal string body.
#[inline]
pub(crate) const fn is_literal_char(b: u8) -> bool {
    b == b'\t' || matches!(b, 0x20..=0x26 | 0x28..=0x7e) || is_non_ascii(b)
}

/// Control characters that must be escaped in basic strings.
#[inline]
pub(crate) const fn is_control(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{a}'..='\u{1f}' | '\u{7f}')
}

#[inline]
pub(crate) fn byte_at(src: &[u8], pos: usize) -> Option<u8> {
    src.get(pos).copied()
}

#[inline]
pub(crate) fn is_byte(src: &[u8], pos: usize, b: u8) -> bool {
    byte_at(src, pos) == Some(b)
}

#[inline]
pub(crate) fn starts_with(src: &[u8], pos: usize, lit: &[u8]) -> bool {
    src.get(pos..).is_some_and(|rest| rest.starts_with(lit))
}

/// Skips spaces and tabs.
#[inline]
pub(crate) fn skip_ws(src: &[u8], mut pos: usize) -> usize {
    while byte_at(src, pos).is_some_and(is_ws) {
        pos += 1;
    }
    pos
}

/// Matches `\n` or `\r\n`.
#[inline]
pub(crate) fn newline(src: &[u8], pos: usize) -> Option<usize> {
    match byte_at(src, pos)? {
        b'\n' => Some(pos + 1),
        b'\r' if is_byte(src, pos + 1, b'\n') => Some(pos + 2),
        _ => None,
    }
}

/// Consumes `n` bytes satisfying `pred`.
#[inline]
pub(crate) fn exactly(src: &[u8], pos: usize, n: usize, pred: fn(u8) -> bool) -> Option<usize> {
    let run = src.get(pos..pos + n)?;
    run.iter().all(|&b| pred(b)).then_some(pos + n)
}

/// Decimal value of `n` digits starting at `pos`. Callers have checked them.
pub(crate) fn digits_value(src: &[u8], pos: usize, n: usize) -> u32 {
    src[pos..pos + n]
        .iter()
        .fold(0, |acc, &b| acc * 10 + u32::from(b - b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newline_forms() {
        assert_eq!(newline(b"\n", 0), Some(1));
        assert_eq!(newline(b"\r\n", 0), Some(2));
        assert_eq!(newline(b"\r", 0), None);
        assert_eq!(newline(b"x", 0), None);
    }

    #[test]
    fn test_skip_ws_stops_at_newline() {
        assert_eq!(skip_ws(b" \t \nx", 0), 3);
        assert_eq!(skip_ws(b"", 0), 0);
    }

    #[test]
    fn test_classes() {
        assert!(is_bare_key_char(b'-'));
        assert!(!is_bare_key_char(b'.'));
        assert!(is_basic_unescaped(b'\''));
        assert!(!is_basic_unescaped(b'"'));
        assert!(!is_basic_unescaped(b'\\'));
        assert!(!is_literal_char(b'\''));
        assert!(!is_comment_char(0x7f));
        assert!(is_comment_char(0xc3));
        assert!(is_control('\u{7f}'));
        assert!(!is_control('\t'));
    }

    #[test]
    fn test_exactly_and_digits() {
        assert_eq!(exactly(b"1979-", 0, 4, is_digit), Some(4));
        assert_eq!(exactly(b"19x9", 0, 4, is_digit), None);
        assert_eq!(exactly(b"19", 0, 4, is_digit), None);
        assert_eq!(digits_value(b"1979", 0, 4), 1979);
    }
}
