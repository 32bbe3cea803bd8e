//! Acceptors: pure recognizers for every production of the grammar.
//!
//! An acceptor takes the input bytes and a cursor and returns the cursor
//! *after* the construct if one starts there, or `None`. Acceptors never
//! allocate and never partially commit: on `None` the caller's cursor is
//! untouched. Every successful match advances by at least one byte.
//!
//! Compound productions try their alternatives left to right and take the
//! first match, so the order of the tables below encodes grammar precedence.
//! [`Literal`], [`StringForm`] and [`StatementForm`] are shared with the
//! [`parse`](crate::parse) layer, which classifies with the same tables before
//! decoding; the two layers cannot disagree about where a construct ends.
//!
//! Semantic range checks that do not need allocation (calendar dates, clock
//! fields, offsets, Unicode scalar values, nesting depth) are made here too,
//! so a literal the acceptor admits always decodes. The only checks left to
//! the parsers are numeric overflow and redefinition of keys.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlet::accept;
//!
//! let src = b"key = [1, 2.5, \"three\"] # trailing";
//! assert_eq!(accept::key(src, 0), Some(3));
//! assert_eq!(accept::array(src, 6), Some(23));
//! assert_eq!(accept::keyval(src, 0), Some(23));
//! assert_eq!(accept::integer(b"1__0", 0), Some(1));
//! assert_eq!(accept::boolean(b"True", 0), None);
//! ```

use crate::scan::{
    byte_at, digits_value, exactly, is_bare_key_char, is_basic_unescaped, is_bin_digit, is_byte,
    is_comment_char, is_digit, is_hex_digit, is_literal_char, is_oct_digit, newline as scan_newline,
    skip_ws, starts_with,
};
use crate::string::StringStyle;

/// Deepest nesting of arrays and inline tables a value may have.
pub const MAX_DEPTH: usize = 128;

/// Signature shared by every acceptor.
pub type Acceptor = fn(&[u8], usize) -> Option<usize>;

/// Value literal kinds, in the order they are tried.
///
/// Date/time forms come first since their leading digits would otherwise be
/// taken by the number productions. Floats precede integers because every
/// float starts with something that looks like an integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Literal {
    OffsetDateTime,
    LocalDateTime,
    LocalDate,
    LocalTime,
    Float,
    Integer,
    Boolean,
    String,
    Array,
    InlineTable,
}

impl Literal {
    pub const ALL: [Literal; 10] = [
        Literal::OffsetDateTime,
        Literal::LocalDateTime,
        Literal::LocalDate,
        Literal::LocalTime,
        Literal::Float,
        Literal::Integer,
        Literal::Boolean,
        Literal::String,
        Literal::Array,
        Literal::InlineTable,
    ];

    /// Human-readable production name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Literal::OffsetDateTime => "an offset date-time",
            Literal::LocalDateTime => "a local date-time",
            Literal::LocalDate => "a local date",
            Literal::LocalTime => "a local time",
            Literal::Float => "a float",
            Literal::Integer => "an integer",
            Literal::Boolean => "a boolean",
            Literal::String => "a string",
            Literal::Array => "an array",
            Literal::InlineTable => "an inline table",
        }
    }

    fn accept_at(self, src: &[u8], pos: usize, depth: usize) -> Option<usize> {
        match self {
            Literal::OffsetDateTime => offset_date_time(src, pos),
            Literal::LocalDateTime => local_date_time(src, pos),
            Literal::LocalDate => local_date(src, pos),
            Literal::LocalTime => local_time(src, pos),
            Literal::Float => float(src, pos),
            Literal::Integer => integer(src, pos),
            Literal::Boolean => boolean(src, pos),
            Literal::String => string(src, pos),
            Literal::Array => array_at(src, pos, depth),
            Literal::InlineTable => inline_table_at(src, pos, depth),
        }
    }
}

/// String literal forms, in the order they are tried.
///
/// The triple-quoted forms must precede their single-quoted counterparts,
/// which would otherwise match `""` as an empty string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StringForm {
    MultiLineBasic,
    Basic,
    MultiLineLiteral,
    Literal,
}

impl StringForm {
    pub const ALL: [StringForm; 4] = [
        StringForm::MultiLineBasic,
        StringForm::Basic,
        StringForm::MultiLineLiteral,
        StringForm::Literal,
    ];

    #[must_use]
    pub fn acceptor(self) -> Acceptor {
        match self {
            StringForm::MultiLineBasic => ml_basic_string,
            StringForm::Basic => basic_string,
            StringForm::MultiLineLiteral => ml_literal_string,
            StringForm::Literal => literal_string,
        }
    }

    #[must_use]
    pub const fn style(self) -> StringStyle {
        match self {
            StringForm::MultiLineBasic | StringForm::Basic => StringStyle::Basic,
            StringForm::MultiLineLiteral | StringForm::Literal => StringStyle::Literal,
        }
    }

    /// Length of the opening (and closing) delimiter.
    #[must_use]
    pub const fn delimiter_len(self) -> usize {
        match self {
            StringForm::MultiLineBasic | StringForm::MultiLineLiteral => 3,
            StringForm::Basic | StringForm::Literal => 1,
        }
    }

    #[must_use]
    pub const fn is_multi_line(self) -> bool {
        self.delimiter_len() == 3
    }
}

/// Top-level statement forms, in the order they are tried.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatementForm {
    ArrayTableHeader,
    TableHeader,
    KeyValue,
}

impl StatementForm {
    pub const ALL: [StatementForm; 3] = [
        StatementForm::ArrayTableHeader,
        StatementForm::TableHeader,
        StatementForm::KeyValue,
    ];

    #[must_use]
    pub fn acceptor(self) -> Acceptor {
        match self {
            StatementForm::ArrayTableHeader => array_table_header,
            StatementForm::TableHeader => table_header,
            StatementForm::KeyValue => keyval,
        }
    }
}

// ---------------------------------------------------------------------------
// Trivia
// ---------------------------------------------------------------------------

/// `\n` or `\r\n`.
pub fn newline(src: &[u8], pos: usize) -> Option<usize> {
    scan_newline(src, pos)
}

/// `#` followed by any run of tab, printable ASCII and non-ASCII characters.
pub fn comment(src: &[u8], pos: usize) -> Option<usize> {
    if !is_byte(src, pos, b'#') {
        return None;
    }
    let mut p = pos + 1;
    while byte_at(src, p).is_some_and(is_comment_char) {
        p += 1;
    }
    Some(p)
}

/// Optional whitespace and comment, then a newline or the end of input.
///
/// May match zero bytes at the end of input, so it is not a public acceptor.
pub(crate) fn line_end(src: &[u8], pos: usize) -> Option<usize> {
    let p = skip_ws(src, pos);
    let p = comment(src, p).unwrap_or(p);
    if p == src.len() {
        Some(p)
    } else {
        scan_newline(src, p)
    }
}

/// Whitespace, comments and newlines between array elements.
pub(crate) fn ws_comment_newline(src: &[u8], mut pos: usize) -> usize {
    loop {
        pos = skip_ws(src, pos);
        let after_comment = comment(src, pos).unwrap_or(pos);
        match scan_newline(src, after_comment) {
            Some(next) => pos = next,
            None => return pos,
        }
    }
}

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

/// Any of the four string forms.
pub fn string(src: &[u8], pos: usize) -> Option<usize> {
    classify_string(src, pos).map(|(_, end)| end)
}

/// Finds which string form starts at `pos` and where it ends.
pub fn classify_string(src: &[u8], pos: usize) -> Option<(StringForm, usize)> {
    StringForm::ALL
        .iter()
        .find_map(|form| form.acceptor()(src, pos).map(|end| (*form, end)))
}

/// `"..."` with escapes; raw control characters are rejected.
pub fn basic_string(src: &[u8], pos: usize) -> Option<usize> {
    if !is_byte(src, pos, b'"') {
        return None;
    }
    let mut p = pos + 1;
    loop {
        match byte_at(src, p)? {
            b'"' => return Some(p + 1),
            b'\\' => p = escape(src, p)?,
            b if is_basic_unescaped(b) => p += 1,
            _ => return None,
        }
    }
}

/// `"""..."""` with escapes, raw newlines and line continuations.
pub fn ml_basic_string(src: &[u8], pos: usize) -> Option<usize> {
    if !starts_with(src, pos, b"\"\"\"") {
        return None;
    }
    let mut p = pos + 3;
    loop {
        match byte_at(src, p)? {
            b'"' => {
                let run = quote_run(src, p, b'"');
                if run >= 3 {
                    // Up to two quotes may sit right before the closing delimiter.
                    return (run <= 5).then_some(p + run);
                }
                p += run;
            }
            b'\\' => p = ml_escape(src, p)?,
            b'\n' | b'\r' => p = scan_newline(src, p)?,
            b if is_basic_unescaped(b) => p += 1,
            _ => return None,
        }
    }
}

/// `'...'`, taken verbatim.
pub fn literal_string(src: &[u8], pos: usize) -> Option<usize> {
    if !is_byte(src, pos, b'\'') {
        return None;
    }
    let mut p = pos + 1;
    loop {
        match byte_at(src, p)? {
            b'\'' => return Some(p + 1),
            b if is_literal_char(b) => p += 1,
            _ => return None,
        }
    }
}

/// `'''...'''`, taken verbatim apart from one leading newline.
pub fn ml_literal_string(src: &[u8], pos: usize) -> Option<usize> {
    if !starts_with(src, pos, b"'''") {
        return None;
    }
    let mut p = pos + 3;
    loop {
        match byte_at(src, p)? {
            b'\'' => {
                let run = quote_run(src, p, b'\'');
                if run >= 3 {
                    return (run <= 5).then_some(p + run);
                }
                p += run;
            }
            b'\n' | b'\r' => p = scan_newline(src, p)?,
            b if is_literal_char(b) => p += 1,
            _ => return None,
        }
    }
}

fn quote_run(src: &[u8], pos: usize, quote: u8) -> usize {
    src[pos..].iter().take_while(|&&b| b == quote).count()
}

/// An escape sequence starting at the backslash at `pos`.
fn escape(src: &[u8], pos: usize) -> Option<usize> {
    match byte_at(src, pos + 1)? {
        b'"' | b'\\' | b'b' | b'f' | b'n' | b'r' | b't' => Some(pos + 2),
        b'u' => unicode_escape(src, pos + 2, 4),
        b'U' => unicode_escape(src, pos + 2, 8),
        _ => None,
    }
}

fn unicode_escape(src: &[u8], pos: usize, len: usize) -> Option<usize> {
    let end = exactly(src, pos, len, is_hex_digit)?;
    let code = src[pos..end].iter().fold(0u32, |acc, &b| {
        // At most eight hex digits, so this cannot overflow.
        acc * 16 + char::from(b).to_digit(16).unwrap_or(0)
    });
    char::from_u32(code).map(|_| end)
}

/// An escape or a line continuation inside a multi-line basic string.
///
/// A continuation is a backslash, optional whitespace, a newline, then every
/// following whitespace character and newline.
fn ml_escape(src: &[u8], pos: usize) -> Option<usize> {
    let after_ws = skip_ws(src, pos + 1);
    match scan_newline(src, after_ws) {
        Some(mut p) => loop {
            p = skip_ws(src, p);
            match scan_newline(src, p) {
                Some(next) => p = next,
                None => return Some(p),
            }
        },
        None => escape(src, pos),
    }
}

// ---------------------------------------------------------------------------
// Numbers and booleans
// ---------------------------------------------------------------------------

/// `true` or `false`, case-sensitive.
pub fn boolean(src: &[u8], pos: usize) -> Option<usize> {
    if starts_with(src, pos, b"true") {
        Some(pos + 4)
    } else if starts_with(src, pos, b"false") {
        Some(pos + 5)
    } else {
        None
    }
}

/// Decimal integer with optional sign, or an unsigned `0x`/`0o`/`0b` form.
pub fn integer(src: &[u8], pos: usize) -> Option<usize> {
    match src.get(pos..pos + 2) {
        Some(b"0x") => digit_run(src, pos + 2, is_hex_digit),
        Some(b"0o") => digit_run(src, pos + 2, is_oct_digit),
        Some(b"0b") => digit_run(src, pos + 2, is_bin_digit),
        _ => dec_int(src, pos),
    }
}

/// Float with a fraction and/or exponent, or a signed `inf`/`nan`.
pub fn float(src: &[u8], pos: usize) -> Option<usize> {
    if let Some(end) = special_float(src, pos) {
        return Some(end);
    }
    let p = dec_int(src, pos)?;
    match byte_at(src, p)? {
        b'.' => {
            let p = digit_run(src, p + 1, is_digit)?;
            Some(exponent(src, p).unwrap_or(p))
        }
        b'e' | b'E' => exponent(src, p),
        _ => None,
    }
}

fn special_float(src: &[u8], pos: usize) -> Option<usize> {
    let p = skip_sign(src, pos);
    (starts_with(src, p, b"inf") || starts_with(src, p, b"nan")).then_some(p + 3)
}

fn exponent(src: &[u8], pos: usize) -> Option<usize> {
    if !matches!(byte_at(src, pos), Some(b'e' | b'E')) {
        return None;
    }
    digit_run(src, skip_sign(src, pos + 1), is_digit)
}

fn skip_sign(src: &[u8], pos: usize) -> usize {
    match byte_at(src, pos) {
        Some(b'+' | b'-') => pos + 1,
        _ => pos,
    }
}

fn dec_int(src: &[u8], pos: usize) -> Option<usize> {
    let p = skip_sign(src, pos);
    match byte_at(src, p)? {
        b'0' => Some(p + 1),
        b'1'..=b'9' => digit_run(src, p, is_digit),
        _ => None,
    }
}

/// `d (d | _ d)*`: underscores only between two digits.
fn digit_run(src: &[u8], pos: usize, pred: fn(u8) -> bool) -> Option<usize> {
    if !byte_at(src, pos).is_some_and(pred) {
        return None;
    }
    let mut p = pos + 1;
    loop {
        match byte_at(src, p) {
            Some(b) if pred(b) => p += 1,
            Some(b'_') if byte_at(src, p + 1).is_some_and(pred) => p += 2,
            _ => return Some(p),
        }
    }
}

// ---------------------------------------------------------------------------
// Dates and times
// ---------------------------------------------------------------------------

/// `dddd-dd-dd`, whatever the field values.
pub(crate) fn date_shape(src: &[u8], pos: usize) -> Option<usize> {
    let p = exactly(src, pos, 4, is_digit)?;
    let p = separator(src, p, b'-')?;
    let p = exactly(src, p, 2, is_digit)?;
    let p = separator(src, p, b'-')?;
    exactly(src, p, 2, is_digit)
}

/// `dd:dd:dd`, whatever the field values.
pub(crate) fn time_shape(src: &[u8], pos: usize) -> Option<usize> {
    let p = exactly(src, pos, 2, is_digit)?;
    let p = separator(src, p, b':')?;
    let p = exactly(src, p, 2, is_digit)?;
    let p = separator(src, p, b':')?;
    exactly(src, p, 2, is_digit)
}

/// `YYYY-MM-DD`, validated against the calendar.
pub fn local_date(src: &[u8], pos: usize) -> Option<usize> {
    let end = date_shape(src, pos)?;
    let year = digits_value(src, pos, 4);
    let month = digits_value(src, pos + 5, 2);
    let day = digits_value(src, pos + 8, 2);
    chrono::NaiveDate::from_ymd_opt(year as i32, month, day).map(|_| end)
}

/// `HH:MM:SS` with an optional fraction of one or more digits.
pub fn local_time(src: &[u8], pos: usize) -> Option<usize> {
    let mut end = time_shape(src, pos)?;
    let hour = digits_value(src, pos, 2);
    let minute = digits_value(src, pos + 3, 2);
    let second = digits_value(src, pos + 6, 2);
    if hour > 23 || minute > 59 || second > 60 {
        return None;
    }
    if is_byte(src, end, b'.') {
        end = plain_digits(src, end + 1)?;
    }
    Some(end)
}

/// A local date and a local time joined by `T`, `t` or a single space.
pub fn local_date_time(src: &[u8], pos: usize) -> Option<usize> {
    let p = local_date(src, pos)?;
    match byte_at(src, p)? {
        b'T' | b't' | b' ' => local_time(src, p + 1),
        _ => None,
    }
}

/// A local date-time followed by `Z`, `z` or `+HH:MM`/`-HH:MM`.
pub fn offset_date_time(src: &[u8], pos: usize) -> Option<usize> {
    let p = local_date_time(src, pos)?;
    match byte_at(src, p)? {
        b'Z' | b'z' => Some(p + 1),
        b'+' | b'-' => {
            let q = exactly(src, p + 1, 2, is_digit)?;
            let q = separator(src, q, b':')?;
            let end = exactly(src, q, 2, is_digit)?;
            let hours = digits_value(src, p + 1, 2);
            let minutes = digits_value(src, p + 4, 2);
            (hours < 24 && minutes < 60).then_some(end)
        }
        _ => None,
    }
}

fn separator(src: &[u8], pos: usize, sep: u8) -> Option<usize> {
    is_byte(src, pos, sep).then_some(pos + 1)
}

fn plain_digits(src: &[u8], pos: usize) -> Option<usize> {
    let run = src
        .get(pos..)?
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    (run > 0).then_some(pos + run)
}

// ---------------------------------------------------------------------------
// Values, arrays and inline tables
// ---------------------------------------------------------------------------

/// Any value literal.
pub fn value(src: &[u8], pos: usize) -> Option<usize> {
    value_at(src, pos, 0)
}

/// Finds which value literal starts at `pos` and where it ends.
pub fn classify_value(src: &[u8], pos: usize) -> Option<(Literal, usize)> {
    classify_value_at(src, pos, 0)
}

pub(crate) fn classify_value_at(src: &[u8], pos: usize, depth: usize) -> Option<(Literal, usize)> {
    let found = Literal::ALL
        .iter()
        .find_map(|lit| lit.accept_at(src, pos, depth).map(|end| (*lit, end)))?;
    // An impossible date or time is not the number in front of its first `-` or `:`.
    let numeric = matches!(found.0, Literal::Integer | Literal::Float);
    if numeric && (date_shape(src, pos).is_some() || time_shape(src, pos).is_some()) {
        return None;
    }
    Some(found)
}

pub(crate) fn value_at(src: &[u8], pos: usize, depth: usize) -> Option<usize> {
    classify_value_at(src, pos, depth).map(|(_, end)| end)
}

/// `[ ... ]`: comma-separated values with optional trailing comma; comments
/// and newlines may appear between any two tokens.
pub fn array(src: &[u8], pos: usize) -> Option<usize> {
    array_at(src, pos, 0)
}

fn array_at(src: &[u8], pos: usize, depth: usize) -> Option<usize> {
    if depth >= MAX_DEPTH || !is_byte(src, pos, b'[') {
        return None;
    }
    let mut p = ws_comment_newline(src, pos + 1);
    if is_byte(src, p, b']') {
        return Some(p + 1);
    }
    loop {
        p = value_at(src, p, depth + 1)?;
        p = ws_comment_newline(src, p);
        match byte_at(src, p)? {
            b',' => {
                p = ws_comment_newline(src, p + 1);
                if is_byte(src, p, b']') {
                    return Some(p + 1);
                }
            }
            b']' => return Some(p + 1),
            _ => return None,
        }
    }
}

/// `{ k = v, ... }` on a single line, without a trailing comma.
pub fn inline_table(src: &[u8], pos: usize) -> Option<usize> {
    inline_table_at(src, pos, 0)
}

fn inline_table_at(src: &[u8], pos: usize, depth: usize) -> Option<usize> {
    if depth >= MAX_DEPTH || !is_byte(src, pos, b'{') {
        return None;
    }
    let mut p = skip_ws(src, pos + 1);
    if is_byte(src, p, b'}') {
        return Some(p + 1);
    }
    loop {
        p = keyval_at(src, p, depth + 1)?;
        p = skip_ws(src, p);
        match byte_at(src, p)? {
            b',' => p = skip_ws(src, p + 1),
            b'}' => return Some(p + 1),
            _ => return None,
        }
    }
}

// ---------------------------------------------------------------------------
// Keys and statements
// ---------------------------------------------------------------------------

/// A bare key, or a single-line basic or literal string.
pub fn simple_key(src: &[u8], pos: usize) -> Option<usize> {
    match byte_at(src, pos)? {
        b'"' => basic_string(src, pos),
        b'\'' => literal_string(src, pos),
        b if is_bare_key_char(b) => {
            let run = src[pos..]
                .iter()
                .take_while(|&&b| is_bare_key_char(b))
                .count();
            Some(pos + run)
        }
        _ => None,
    }
}

/// One or more simple keys joined by `.`, with optional whitespace around dots.
pub fn key(src: &[u8], pos: usize) -> Option<usize> {
    let mut p = simple_key(src, pos)?;
    loop {
        let dot = skip_ws(src, p);
        if !is_byte(src, dot, b'.') {
            return Some(p);
        }
        p = simple_key(src, skip_ws(src, dot + 1))?;
    }
}

/// `key = value`.
pub fn keyval(src: &[u8], pos: usize) -> Option<usize> {
    keyval_at(src, pos, 0)
}

pub(crate) fn keyval_at(src: &[u8], pos: usize, depth: usize) -> Option<usize> {
    let p = skip_ws(src, key(src, pos)?);
    let p = skip_ws(src, separator(src, p, b'=')?);
    value_at(src, p, depth)
}

/// `[ key ]`.
pub fn table_header(src: &[u8], pos: usize) -> Option<usize> {
    let p = skip_ws(src, separator(src, pos, b'[')?);
    let p = skip_ws(src, key(src, p)?);
    separator(src, p, b']')
}

/// `[[ key ]]`.
pub fn array_table_header(src: &[u8], pos: usize) -> Option<usize> {
    if !starts_with(src, pos, b"[[") {
        return None;
    }
    let p = skip_ws(src, key(src, skip_ws(src, pos + 2))?);
    starts_with(src, p, b"]]").then_some(p + 2)
}

/// Any top-level statement: a header or a key/value pair.
pub fn statement(src: &[u8], pos: usize) -> Option<usize> {
    classify_statement(src, pos).map(|(_, end)| end)
}

/// Finds which statement form starts at `pos` and where it ends.
pub fn classify_statement(src: &[u8], pos: usize) -> Option<(StatementForm, usize)> {
    StatementForm::ALL
        .iter()
        .find_map(|form| form.acceptor()(src, pos).map(|end| (*form, end)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(acceptor: Acceptor, input: &str) -> bool {
        acceptor(input.as_bytes(), 0) == Some(input.len())
    }

    #[test]
    fn test_integer_forms() {
        for ok in ["42", "+42", "-17", "0", "-0", "1_000", "5_349_221", "0xDEAD_beef", "0o755", "0b1101"] {
            assert!(full(integer, ok), "{ok}");
        }
        assert_eq!(integer(b"01", 0), Some(1));
        assert_eq!(integer(b"1_", 0), Some(1));
        assert_eq!(integer(b"_1", 0), None);
        assert_eq!(integer(b"+_1", 0), None);
        assert_eq!(integer(b"0x", 0), None);
        assert_eq!(integer(b"-0x1", 0), Some(2));
        assert_eq!(integer(b"0X1F", 0), Some(1));
    }

    #[test]
    fn test_float_forms() {
        for ok in [
            "1.0", "+1.0", "3.1415", "-0.01", "5e+22", "1e06", "-2E-2", "6.626e-34",
            "224_617.445_991", "-4_2.0e0", "inf", "+inf", "-inf", "nan", "+nan", "-nan",
        ] {
            assert!(full(float, ok), "{ok}");
        }
        assert_eq!(float(b"42", 0), None);
        assert_eq!(float(b".5", 0), None);
        assert_eq!(float(b"5.", 0), None);
        assert_eq!(float(b"1.e5", 0), None);
        assert_eq!(float(b"1.5e", 0), Some(3));
        assert_eq!(float(b"03.14", 0), None);
    }

    #[test]
    fn test_basic_strings() {
        assert!(full(basic_string, r#""tab\there""#));
        assert!(full(basic_string, r#""\u00E9 \U0001F600""#));
        assert_eq!(basic_string(br#""\uD800""#, 0), None);
        assert_eq!(basic_string(br#""\x41""#, 0), None);
        assert_eq!(basic_string(b"\"raw\ttab\"", 0), Some(9));
        assert_eq!(basic_string(b"\"line\nbreak\"", 0), None);
        assert_eq!(basic_string(b"\"unterminated", 0), None);
    }

    #[test]
    fn test_ml_basic_strings() {
        assert!(full(ml_basic_string, "\"\"\"\nRoses\nViolets\"\"\""));
        assert!(full(ml_basic_string, "\"\"\"abc\\\n   def\"\"\""));
        assert!(full(ml_basic_string, "\"\"\"abc\\  \n\n\n   def\"\"\""));
        assert!(full(ml_basic_string, "\"\"\"two quotes\"\"\"\"\""));
        assert_eq!(ml_basic_string(b"\"\"\"six\"\"\"\"\"\"", 0), None);
        assert_eq!(ml_basic_string(b"\"\"\"bad \\ escape\"\"\"", 0), None);
    }

    #[test]
    fn test_literal_strings() {
        assert!(full(literal_string, r"'C:\Users\nodejs\templates'"));
        assert!(full(ml_literal_string, "'''\nThe first newline is\ntrimmed.'''"));
        assert!(full(ml_literal_string, "''''That,' she said, 'is still pointless.''''"));
        assert_eq!(literal_string(b"'a\nb'", 0), None);
    }

    #[test]
    fn test_string_form_precedence() {
        assert_eq!(
            classify_string(b"\"\"\"x\"\"\"", 0),
            Some((StringForm::MultiLineBasic, 7))
        );
        assert_eq!(classify_string(b"\"\"", 0), Some((StringForm::Basic, 2)));
        assert_eq!(
            classify_string(b"''''''", 0),
            Some((StringForm::MultiLineLiteral, 6))
        );
    }

    #[test]
    fn test_dates_and_times() {
        assert!(full(offset_date_time, "1979-05-27T07:32:00Z"));
        assert!(full(offset_date_time, "1979-05-27T00:32:00.999999-07:00"));
        assert!(full(offset_date_time, "1979-05-27 07:32:00z"));
        assert!(full(local_date_time, "1979-05-27T07:32:00"));
        assert!(full(local_date, "2024-02-29"));
        assert!(full(local_time, "00:32:00.999999"));
        assert!(full(local_time, "23:59:60"));
        assert_eq!(local_date(b"2023-02-29", 0), None);
        assert_eq!(local_date(b"1979-13-01", 0), None);
        // Not the integer 2023 followed by junk.
        assert_eq!(value(b"2023-02-29", 0), None);
        assert_eq!(value(b"24:00:00", 0), None);
        assert_eq!(value(b"2023", 0), Some(4));
        assert_eq!(local_time(b"24:00:00", 0), None);
        assert_eq!(local_time(b"07:32", 0), None);
        assert_eq!(local_time(b"07:32:00.", 0), None);
        assert_eq!(offset_date_time(b"1979-05-27T07:32:00+24:00", 0), None);
    }

    #[test]
    fn test_value_classification_order() {
        let cases: [(&str, Literal); 10] = [
            ("1979-05-27T07:32:00Z", Literal::OffsetDateTime),
            ("1979-05-27T07:32:00", Literal::LocalDateTime),
            ("1979-05-27", Literal::LocalDate),
            ("07:32:00", Literal::LocalTime),
            ("1e3", Literal::Float),
            ("1979", Literal::Integer),
            ("false", Literal::Boolean),
            ("'x'", Literal::String),
            ("[]", Literal::Array),
            ("{}", Literal::InlineTable),
        ];
        for (input, expected) in cases {
            assert_eq!(
                classify_value(input.as_bytes(), 0),
                Some((expected, input.len())),
                "{input}"
            );
        }
        // A date followed by a comment is not a date-time.
        assert_eq!(
            classify_value(b"1979-05-27 # birthday", 0),
            Some((Literal::LocalDate, 10))
        );
    }

    #[test]
    fn test_arrays() {
        assert!(full(array, "[ 1, 2, 3 ]"));
        assert!(full(array, "[\n  1, # one\n  2,\n]"));
        assert!(full(array, "[ [ 1, 2 ], ['a', \"b\"], { x = 1 } ]"));
        assert_eq!(array(b"[1,,2]", 0), None);
        assert_eq!(array(b"[,]", 0), None);
        assert_eq!(array(b"[1 2]", 0), None);
        assert_eq!(array(b"[1, 2", 0), None);
    }

    #[test]
    fn test_inline_tables() {
        assert!(full(inline_table, "{ first = \"Tom\", last = \"Preston-Werner\" }"));
        assert!(full(inline_table, "{ type.name = \"pug\" }"));
        assert!(full(inline_table, "{ list = [\n 1,\n 2 ] }"));
        assert_eq!(inline_table(b"{ a = 1, }", 0), None);
        assert_eq!(inline_table(b"{ a = 1,\n b = 2 }", 0), None);
        assert_eq!(inline_table(b"{ a = 1 # c\n }", 0), None);
    }

    #[test]
    fn test_nesting_limit() {
        let ok = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(full(array, &ok));
        let deep = format!("{}{}", "[".repeat(MAX_DEPTH + 1), "]".repeat(MAX_DEPTH + 1));
        assert_eq!(array(deep.as_bytes(), 0), None);
    }

    #[test]
    fn test_keys_and_headers() {
        assert!(full(key, "site.\"google.com\""));
        assert!(full(key, "fruit . color"));
        assert!(full(key, "3.14159"));
        assert_eq!(key(b"a.", 0), None);
        assert_eq!(key(b"a = 1", 0), Some(1));
        assert!(full(table_header, "[ j . \"ʞ\" . 'l' ]"));
        assert!(full(array_table_header, "[[fruits.varieties]]"));
        assert_eq!(table_header(b"[]", 0), None);
        assert_eq!(array_table_header(b"[[a] ]", 0), None);
    }

    #[test]
    fn test_statement_classification() {
        assert_eq!(
            classify_statement(b"[[a]]", 0),
            Some((StatementForm::ArrayTableHeader, 5))
        );
        assert_eq!(
            classify_statement(b"[a]", 0),
            Some((StatementForm::TableHeader, 3))
        );
        assert_eq!(
            classify_statement(b"a = 1", 0),
            Some((StatementForm::KeyValue, 5))
        );
    }

    #[test]
    fn test_line_end() {
        assert_eq!(line_end(b"  # note\nnext", 0), Some(9));
        assert_eq!(line_end(b"", 0), Some(0));
        assert_eq!(line_end(b"  x", 0), None);
        assert_eq!(line_end(b"# bad \x7f\n", 0), None);
    }
}
