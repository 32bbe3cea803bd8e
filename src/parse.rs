//! Parsers: materialize the values the acceptors recognize.
//!
//! Every parser has the shape `fn(&str, usize) -> Parsed<T>`. It first runs
//! the matching acceptor from [`accept`](crate::accept); only if that matches
//! does it decode the span, so a parser succeeds exactly where its acceptor
//! does and consumes exactly the same bytes.
//!
//! On failure the returned cursor equals the input cursor and the error
//! points at the innermost position where the input stopped matching (the
//! missing `]` of a nested array, the newline inside an inline table, ...).
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlet::{parse, Value};
//!
//! let (value, end) = parse::value("4_2 # answer", 0);
//! assert_eq!(value.unwrap(), Value::Integer(42));
//! assert_eq!(end, 3);
//!
//! let (result, end) = parse::integer("9223372036854775808", 0);
//! assert!(result.is_err());
//! assert_eq!(end, 0);
//! ```

use crate::accept::{self, Acceptor, Literal, StatementForm, StringForm, MAX_DEPTH};
use crate::assemble;
use crate::datetime::{
    decode_date, decode_offset, decode_time, LocalDate, LocalDateTime, LocalTime, OffsetDateTime,
};
use crate::error::{Error, Result};
use crate::location::Region;
use crate::scan::{byte_at, is_byte, skip_ws, starts_with};
use crate::string::{StringStyle, TomlString};
use crate::value::{Array, Table, Value};

/// A parse result paired with the cursor after it.
///
/// On success the cursor is past the construct; on failure it is unchanged.
pub type Parsed<T> = (Result<T>, usize);

/// One top-level statement of a document.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    /// `a.b = value`
    KeyValue { keys: Vec<String>, value: Value },
    /// `[a.b]`
    TableHeader { keys: Vec<String> },
    /// `[[a.b]]`
    ArrayTableHeader { keys: Vec<String> },
}

/// Runs `acceptor`, then `decode` over the accepted span.
///
/// `diagnose` is only consulted on a mismatch and returns the failing
/// position and the production expected there.
fn run_with<T>(
    src: &str,
    pos: usize,
    acceptor: impl FnOnce(&[u8], usize) -> Option<usize>,
    diagnose: impl FnOnce(&[u8]) -> (usize, String),
    decode: impl FnOnce(usize) -> Result<T>,
) -> Parsed<T> {
    match acceptor(src.as_bytes(), pos) {
        None => {
            let (at, expected) = diagnose(src.as_bytes());
            (Err(Error::syntax(src, at, &expected)), pos)
        }
        Some(end) => match decode(end) {
            Ok(value) => (Ok(value), end),
            Err(err) => (Err(err), pos),
        },
    }
}

fn run<T>(
    src: &str,
    pos: usize,
    acceptor: Acceptor,
    expected: &str,
    decode: impl FnOnce(usize) -> Result<T>,
) -> Parsed<T> {
    run_with(src, pos, acceptor, |_| (pos, expected.to_string()), decode)
}

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

pub fn boolean(src: &str, pos: usize) -> Parsed<bool> {
    run(src, pos, accept::boolean, "`true` or `false`", |_| {
        Ok(is_byte(src.as_bytes(), pos, b't'))
    })
}

pub fn integer(src: &str, pos: usize) -> Parsed<i64> {
    run(src, pos, accept::integer, "an integer", |end| {
        decode_integer(src, pos, end)
    })
}

pub fn float(src: &str, pos: usize) -> Parsed<f64> {
    run(src, pos, accept::float, "a float", |end| {
        decode_float(src, pos, end)
    })
}

fn decode_integer(src: &str, pos: usize, end: usize) -> Result<i64> {
    let text = &src[pos..end];
    let (radix, digits, negative) = match text.get(..2) {
        Some("0x") => (16, &text[2..], false),
        Some("0o") => (8, &text[2..], false),
        Some("0b") => (2, &text[2..], false),
        _ => match text.as_bytes()[0] {
            b'-' => (10, &text[1..], true),
            b'+' => (10, &text[1..], false),
            _ => (10, text, false),
        },
    };
    check_separators(src, pos, digits)?;

    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    let overflow = || {
        Error::range_at(
            src,
            pos,
            end - pos,
            "integer does not fit in a signed 64-bit integer",
        )
    };
    let magnitude = u64::from_str_radix(&cleaned, radix).map_err(|_| overflow())?;
    let signed = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    i64::try_from(signed).map_err(|_| overflow())
}

fn decode_float(src: &str, pos: usize, end: usize) -> Result<f64> {
    let text = &src[pos..end];
    let (negative, unsigned) = match text.as_bytes()[0] {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = match unsigned {
        "inf" => f64::INFINITY,
        "nan" => f64::NAN,
        _ => {
            for run in unsigned.split(['.', 'e', 'E']) {
                check_separators(src, pos, run.trim_start_matches(['+', '-']))?;
            }
            let cleaned: String = unsigned.chars().filter(|&c| c != '_').collect();
            let parsed: f64 = cleaned
                .parse()
                .map_err(|_| Error::internal("accepted float literal failed to decode"))?;
            if parsed.is_infinite() {
                return Err(Error::range_at(
                    src,
                    pos,
                    end - pos,
                    "float literal overflows a 64-bit float",
                ));
            }
            parsed
        }
    };
    Ok(if negative { -magnitude } else { magnitude })
}

/// Rejects `_` that is not between two digits.
fn check_separators(src: &str, pos: usize, digits: &str) -> Result<()> {
    if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return Err(Error::syntax(src, pos, "`_` only between two digits"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

/// Any of the four string forms, keeping the quoting style.
pub fn string(src: &str, pos: usize) -> Parsed<TomlString> {
    match accept::classify_string(src.as_bytes(), pos) {
        Some((form, end)) => match decode_string(src, pos, end, form) {
            Ok(s) => (Ok(s), end),
            Err(err) => (Err(err), pos),
        },
        None => (Err(Error::syntax(src, pos, "a string")), pos),
    }
}

pub fn basic_string(src: &str, pos: usize) -> Parsed<TomlString> {
    string_form(src, pos, StringForm::Basic, "a basic string")
}

pub fn ml_basic_string(src: &str, pos: usize) -> Parsed<TomlString> {
    string_form(
        src,
        pos,
        StringForm::MultiLineBasic,
        "a multi-line basic string",
    )
}

pub fn literal_string(src: &str, pos: usize) -> Parsed<TomlString> {
    string_form(src, pos, StringForm::Literal, "a literal string")
}

pub fn ml_literal_string(src: &str, pos: usize) -> Parsed<TomlString> {
    string_form(
        src,
        pos,
        StringForm::MultiLineLiteral,
        "a multi-line literal string",
    )
}

fn string_form(src: &str, pos: usize, form: StringForm, expected: &str) -> Parsed<TomlString> {
    run(src, pos, form.acceptor(), expected, |end| {
        decode_string(src, pos, end, form)
    })
}

fn decode_string(src: &str, pos: usize, end: usize, form: StringForm) -> Result<TomlString> {
    let delim = form.delimiter_len();
    let mut body = &src[pos + delim..end - delim];
    if form.is_multi_line() {
        body = body
            .strip_prefix("\r\n")
            .or_else(|| body.strip_prefix('\n'))
            .unwrap_or(body);
    }
    let text = match form.style() {
        StringStyle::Literal => body.to_string(),
        StringStyle::Basic => unescape(body)?,
    };
    Ok(TomlString::with_style(text, form.style()))
}

/// Decodes escapes and line continuations of an accepted basic string body.
fn unescape(body: &str) -> Result<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('b') => out.push('\u{8}'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('f') => out.push('\u{c}'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('u') => out.push(hex_scalar(&mut chars, 4)?),
            Some('U') => out.push(hex_scalar(&mut chars, 8)?),
            // Line continuation: drop every following whitespace and newline.
            Some(' ' | '\t' | '\r' | '\n') => {
                while matches!(chars.peek(), Some(' ' | '\t' | '\r' | '\n')) {
                    chars.next();
                }
            }
            _ => return Err(Error::internal("accepted string has an invalid escape")),
        }
    }
    Ok(out)
}

fn hex_scalar(chars: &mut impl Iterator<Item = char>, len: usize) -> Result<char> {
    let digits: String = chars.take(len).collect();
    u32::from_str_radix(&digits, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| Error::internal("accepted unicode escape is not a scalar value"))
}

// ---------------------------------------------------------------------------
// Dates and times
// ---------------------------------------------------------------------------

pub fn local_date(src: &str, pos: usize) -> Parsed<LocalDate> {
    run(src, pos, accept::local_date, "a date (YYYY-MM-DD)", |_| {
        Ok(decode_date(src.as_bytes(), pos))
    })
}

pub fn local_time(src: &str, pos: usize) -> Parsed<LocalTime> {
    run(src, pos, accept::local_time, "a time (HH:MM:SS)", |end| {
        Ok(decode_time(src.as_bytes(), pos, end))
    })
}

pub fn local_date_time(src: &str, pos: usize) -> Parsed<LocalDateTime> {
    run(
        src,
        pos,
        accept::local_date_time,
        "a date-time (YYYY-MM-DDTHH:MM:SS)",
        |end| Ok(decode_local_date_time(src.as_bytes(), pos, end)),
    )
}

pub fn offset_date_time(src: &str, pos: usize) -> Parsed<OffsetDateTime> {
    run(
        src,
        pos,
        accept::offset_date_time,
        "an offset date-time",
        |_| decode_offset_date_time(src.as_bytes(), pos),
    )
}

fn decode_local_date_time(src: &[u8], pos: usize, end: usize) -> LocalDateTime {
    LocalDateTime::new(decode_date(src, pos), decode_time(src, pos + 11, end))
}

fn decode_offset_date_time(src: &[u8], pos: usize) -> Result<OffsetDateTime> {
    let local_end = accept::local_date_time(src, pos)
        .ok_or_else(|| Error::internal("offset date-time without a local part"))?;
    Ok(OffsetDateTime::new(
        decode_local_date_time(src, pos, local_end),
        decode_offset(src, local_end),
    ))
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// Any value literal.
pub fn value(src: &str, pos: usize) -> Parsed<Value> {
    value_at(src, pos, 0)
}

fn value_at(src: &str, pos: usize, depth: usize) -> Parsed<Value> {
    match accept::classify_value_at(src.as_bytes(), pos, depth) {
        None => {
            let (at, expected) = value_failure(src.as_bytes(), pos, depth);
            (Err(Error::syntax(src, at, &expected)), pos)
        }
        Some((literal, end)) => match decode_literal(src, literal, pos, end, depth) {
            Ok(value) => (Ok(value), end),
            Err(err) => (Err(err), pos),
        },
    }
}

fn decode_literal(
    src: &str,
    literal: Literal,
    pos: usize,
    end: usize,
    depth: usize,
) -> Result<Value> {
    let bytes = src.as_bytes();
    Ok(match literal {
        Literal::OffsetDateTime => Value::OffsetDateTime(decode_offset_date_time(bytes, pos)?),
        Literal::LocalDateTime => Value::LocalDateTime(decode_local_date_time(bytes, pos, end)),
        Literal::LocalDate => Value::LocalDate(decode_date(bytes, pos)),
        Literal::LocalTime => Value::LocalTime(decode_time(bytes, pos, end)),
        Literal::Float => Value::Float(decode_float(src, pos, end)?),
        Literal::Integer => Value::Integer(decode_integer(src, pos, end)?),
        Literal::Boolean => Value::Boolean(is_byte(bytes, pos, b't')),
        Literal::String => {
            let (form, _) = accept::classify_string(bytes, pos)
                .ok_or_else(|| Error::internal("string literal lost its form"))?;
            Value::String(decode_string(src, pos, end, form)?)
        }
        Literal::Array => Value::Array(decode_array(src, pos, end, depth)?),
        Literal::InlineTable => Value::Table(decode_inline_table(src, pos, end, depth)?),
    })
}

/// `[ ... ]` with any element types.
pub fn array(src: &str, pos: usize) -> Parsed<Array> {
    run_with(
        src,
        pos,
        accept::array,
        |bytes| array_failure(bytes, pos, 0),
        |end| decode_array(src, pos, end, 0),
    )
}

/// `{ ... }`; the result is an inline table.
pub fn inline_table(src: &str, pos: usize) -> Parsed<Table> {
    run_with(
        src,
        pos,
        accept::inline_table,
        |bytes| inline_table_failure(bytes, pos, 0),
        |end| decode_inline_table(src, pos, end, 0),
    )
}

fn decode_array(src: &str, pos: usize, end: usize, depth: usize) -> Result<Array> {
    let bytes = src.as_bytes();
    let mut items = Vec::new();
    let mut p = accept::ws_comment_newline(bytes, pos + 1);
    while !is_byte(bytes, p, b']') {
        let (item, next) = value_at(src, p, depth + 1);
        items.push(item?);
        p = accept::ws_comment_newline(bytes, next);
        if is_byte(bytes, p, b',') {
            p = accept::ws_comment_newline(bytes, p + 1);
        }
    }
    if p + 1 != end {
        return Err(Error::internal("array parser and acceptor disagree on its end"));
    }
    Ok(Array::from(items))
}

fn decode_inline_table(src: &str, pos: usize, end: usize, depth: usize) -> Result<Table> {
    let bytes = src.as_bytes();
    let mut table = Table::inline();
    let mut p = skip_ws(bytes, pos + 1);
    while !is_byte(bytes, p, b'}') {
        let (pair, next) = keyval_at(src, p, depth + 1);
        let (keys, value) = pair?;
        assemble::insert_dotted(&mut table, &keys, value)
            .map_err(|msg| Error::semantic(src, Region::locate(src, p, next - p), &msg))?;
        p = skip_ws(bytes, next);
        if is_byte(bytes, p, b',') {
            p = skip_ws(bytes, p + 1);
        }
    }
    if p + 1 != end {
        return Err(Error::internal(
            "inline table parser and acceptor disagree on its end",
        ));
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// Keys and statements
// ---------------------------------------------------------------------------

/// A bare or quoted key.
pub fn simple_key(src: &str, pos: usize) -> Parsed<String> {
    run(src, pos, accept::simple_key, "a key", |end| {
        decode_simple_key(src, pos, end)
    })
}

/// A dotted key, one entry per component.
pub fn key(src: &str, pos: usize) -> Parsed<Vec<String>> {
    run(src, pos, accept::key, "a key", |end| decode_key(src, pos, end))
}

/// `key = value`.
pub fn keyval(src: &str, pos: usize) -> Parsed<(Vec<String>, Value)> {
    keyval_at(src, pos, 0)
}

pub fn table_header(src: &str, pos: usize) -> Parsed<Vec<String>> {
    run_with(
        src,
        pos,
        accept::table_header,
        |bytes| header_failure(bytes, pos, false),
        |end| decode_header(src, pos, end, 1),
    )
}

pub fn array_table_header(src: &str, pos: usize) -> Parsed<Vec<String>> {
    run_with(
        src,
        pos,
        accept::array_table_header,
        |bytes| header_failure(bytes, pos, true),
        |end| decode_header(src, pos, end, 2),
    )
}

/// A header or a key/value pair. Trailing whitespace and comments are not
/// part of the statement.
pub fn statement(src: &str, pos: usize) -> Parsed<Statement> {
    match accept::classify_statement(src.as_bytes(), pos) {
        None => {
            let (at, expected) = statement_failure(src.as_bytes(), pos);
            (Err(Error::syntax(src, at, &expected)), pos)
        }
        Some((form, end)) => {
            let decoded = match form {
                StatementForm::ArrayTableHeader => {
                    decode_header(src, pos, end, 2).map(|keys| Statement::ArrayTableHeader { keys })
                }
                StatementForm::TableHeader => {
                    decode_header(src, pos, end, 1).map(|keys| Statement::TableHeader { keys })
                }
                StatementForm::KeyValue => decode_keyval(src, pos, end, 0)
                    .map(|(keys, value)| Statement::KeyValue { keys, value }),
            };
            match decoded {
                Ok(statement) => (Ok(statement), end),
                Err(err) => (Err(err), pos),
            }
        }
    }
}

fn keyval_at(src: &str, pos: usize, depth: usize) -> Parsed<(Vec<String>, Value)> {
    run_with(
        src,
        pos,
        |bytes, p| accept::keyval_at(bytes, p, depth),
        |bytes| keyval_failure(bytes, pos, depth),
        |end| decode_keyval(src, pos, end, depth),
    )
}

fn decode_simple_key(src: &str, pos: usize, end: usize) -> Result<String> {
    match byte_at(src.as_bytes(), pos) {
        Some(b'"') => Ok(decode_string(src, pos, end, StringForm::Basic)?.into_string()),
        Some(b'\'') => Ok(decode_string(src, pos, end, StringForm::Literal)?.into_string()),
        _ => Ok(src[pos..end].to_string()),
    }
}

fn decode_key(src: &str, pos: usize, end: usize) -> Result<Vec<String>> {
    let bytes = src.as_bytes();
    let mut keys = Vec::new();
    let mut p = pos;
    loop {
        let part_end = accept::simple_key(bytes, p)
            .ok_or_else(|| Error::internal("dotted key lost a component"))?;
        keys.push(decode_simple_key(src, p, part_end)?);
        if part_end >= end {
            return Ok(keys);
        }
        // Whitespace, the dot, whitespace.
        p = skip_ws(bytes, skip_ws(bytes, part_end) + 1);
    }
}

fn decode_header(src: &str, pos: usize, end: usize, brackets: usize) -> Result<Vec<String>> {
    let bytes = src.as_bytes();
    let start = skip_ws(bytes, pos + brackets);
    let key_end = accept::key(bytes, start)
        .ok_or_else(|| Error::internal("header lost its key"))?;
    if skip_ws(bytes, key_end) + brackets != end {
        return Err(Error::internal("header parser and acceptor disagree on its end"));
    }
    decode_key(src, start, key_end)
}

fn decode_keyval(src: &str, pos: usize, end: usize, depth: usize) -> Result<(Vec<String>, Value)> {
    let bytes = src.as_bytes();
    let key_end = accept::key(bytes, pos).ok_or_else(|| Error::internal("key/value lost its key"))?;
    let keys = decode_key(src, pos, key_end)?;
    // Past the `=`.
    let value_start = skip_ws(bytes, skip_ws(bytes, key_end) + 1);
    let (value, value_end) = value_at(src, value_start, depth);
    let value = value?;
    if value_end != end {
        return Err(Error::internal(
            "key/value parser and acceptor disagree on its end",
        ));
    }
    Ok((keys, value))
}

// ---------------------------------------------------------------------------
// Diagnostics
//
// Each walker retraces a production that failed to match and returns the
// position where it stopped, plus what was expected there.
// ---------------------------------------------------------------------------

fn value_failure(src: &[u8], pos: usize, depth: usize) -> (usize, String) {
    match byte_at(src, pos) {
        Some(b'[' | b'{') if depth >= MAX_DEPTH => (
            pos,
            format!("a value nested at most {} levels deep", MAX_DEPTH),
        ),
        Some(b'[') => array_failure(src, pos, depth),
        Some(b'{') => inline_table_failure(src, pos, depth),
        Some(b'"' | b'\'') => (pos, "a well-formed string".to_string()),
        _ if accept::date_shape(src, pos).is_some() => (pos, "a valid calendar date".to_string()),
        _ if accept::time_shape(src, pos).is_some() => (pos, "a valid time of day".to_string()),
        _ => (pos, "a value".to_string()),
    }
}

fn array_failure(src: &[u8], pos: usize, depth: usize) -> (usize, String) {
    if !is_byte(src, pos, b'[') {
        return (pos, "`[`".to_string());
    }
    let mut p = accept::ws_comment_newline(src, pos + 1);
    loop {
        if is_byte(src, p, b']') {
            return (p, "a value".to_string());
        }
        match accept::value_at(src, p, depth + 1) {
            None => return value_failure(src, p, depth + 1),
            Some(next) => p = accept::ws_comment_newline(src, next),
        }
        if !is_byte(src, p, b',') {
            return (p, "`,` or `]`".to_string());
        }
        p = accept::ws_comment_newline(src, p + 1);
    }
}

fn inline_table_failure(src: &[u8], pos: usize, depth: usize) -> (usize, String) {
    if !is_byte(src, pos, b'{') {
        return (pos, "`{`".to_string());
    }
    let mut p = skip_ws(src, pos + 1);
    loop {
        match accept::keyval_at(src, p, depth + 1) {
            None => return keyval_failure(src, p, depth + 1),
            Some(next) => p = skip_ws(src, next),
        }
        if !is_byte(src, p, b',') {
            return (p, "`,` or `}`".to_string());
        }
        p = skip_ws(src, p + 1);
    }
}

fn keyval_failure(src: &[u8], pos: usize, depth: usize) -> (usize, String) {
    let Some(key_end) = accept::key(src, pos) else {
        return (pos, "a key".to_string());
    };
    let p = skip_ws(src, key_end);
    if !is_byte(src, p, b'=') {
        return (p, "`=`".to_string());
    }
    value_failure(src, skip_ws(src, p + 1), depth)
}

fn header_failure(src: &[u8], pos: usize, double: bool) -> (usize, String) {
    let open = if double { 2 } else { 1 };
    let start = skip_ws(src, pos + open);
    let Some(key_end) = accept::key(src, start) else {
        return (start, "a key".to_string());
    };
    let close = if double { "`]]`" } else { "`]`" };
    (skip_ws(src, key_end), close.to_string())
}

fn statement_failure(src: &[u8], pos: usize) -> (usize, String) {
    if starts_with(src, pos, b"[[") {
        header_failure(src, pos, true)
    } else if is_byte(src, pos, b'[') {
        header_failure(src, pos, false)
    } else {
        keyval_failure(src, pos, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::Offset;

    fn ok<T>(parsed: Parsed<T>) -> T {
        match parsed {
            (Ok(value), _) => value,
            (Err(err), _) => panic!("unexpected error: {}", err),
        }
    }

    fn expected_at<T: std::fmt::Debug>(parsed: Parsed<T>) -> (String, usize) {
        match parsed.0 {
            Err(Error::Syntax {
                expected, region, ..
            }) => (expected, region.offset),
            other => panic!("expected a syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_integers() {
        let (result, end) = integer("4_2", 0);
        assert_eq!(result.unwrap(), 42);
        assert_eq!(end, 3);
        assert_eq!(ok(integer("-17", 0)), -17);
        assert_eq!(ok(integer("0xDEAD_BEEF", 0)), 0xDEAD_BEEF);
        assert_eq!(ok(integer("0o755", 0)), 0o755);
        assert_eq!(ok(integer("0b1101", 0)), 13);
        assert_eq!(ok(integer("-9223372036854775808", 0)), i64::MIN);
        assert_eq!(ok(integer("9223372036854775807", 0)), i64::MAX);
    }

    #[test]
    fn test_integer_overflow_is_range_error() {
        let (result, end) = integer("9223372036854775808", 0);
        assert!(matches!(result, Err(Error::Range { .. })));
        assert_eq!(end, 0);
        assert!(matches!(
            integer("0x8000000000000000", 0).0,
            Err(Error::Range { .. })
        ));
    }

    #[test]
    fn test_floats() {
        assert_eq!(ok(float("-4_2.0e0", 0)), -42.0);
        assert_eq!(ok(float("6.626e-34", 0)), 6.626e-34);
        assert_eq!(ok(float("-inf", 0)), f64::NEG_INFINITY);
        assert!(ok(float("nan", 0)).is_nan());
        assert!(matches!(float("1e400", 0).0, Err(Error::Range { .. })));
    }

    #[test]
    fn test_escapes() {
        let s = ok(basic_string(r#""\t\né""#, 0));
        assert_eq!(s.as_str(), "\t\né");
        assert_eq!(s.style(), StringStyle::Basic);

        let s = ok(literal_string(r"'\n'", 0));
        assert_eq!(s.as_str(), "\\n");
        assert_eq!(s.style(), StringStyle::Literal);
    }

    #[test]
    fn test_line_continuation() {
        let s = ok(ml_basic_string("\"\"\"abc\\\n   def\"\"\"", 0));
        assert_eq!(s.as_str(), "abcdef");
        let s = ok(ml_basic_string("\"\"\"abc\\  \r\n\n\n  def\"\"\"", 0));
        assert_eq!(s.as_str(), "abcdef");
    }

    #[test]
    fn test_multi_line_trims_first_newline() {
        assert_eq!(ok(ml_basic_string("\"\"\"\nRoses\nViolets\"\"\"", 0)).as_str(), "Roses\nViolets");
        assert_eq!(ok(ml_literal_string("'''\r\nraw \\n'''", 0)).as_str(), "raw \\n");
        assert_eq!(ok(ml_basic_string("\"\"\"quote\"\"\"\"\"", 0)).as_str(), "quote\"\"");
    }

    #[test]
    fn test_string_dispatch_keeps_style() {
        assert_eq!(ok(string("'''x'''", 0)).style(), StringStyle::Literal);
        assert_eq!(ok(string("\"x\"", 0)).style(), StringStyle::Basic);
    }

    #[test]
    fn test_dates() {
        let odt = ok(offset_date_time("1979-05-27T00:32:00.999999-07:00", 0));
        assert_eq!(odt.offset, Offset::Custom { minutes: -420 });
        assert_eq!(odt.datetime.time.nanosecond(), 999_999_000);
        assert_eq!(odt.datetime.time.precision(), 6);

        let ldt = ok(local_date_time("1979-05-27 07:32:00", 0));
        assert_eq!(ldt.date.day(), 27);
        assert_eq!(ldt.time.hour(), 7);
    }

    #[test]
    fn test_arrays_and_inline_tables() {
        let value = ok(value("[ 1, 'two', [3.0], { x = 1 }, ]", 0));
        let arr = value.as_array().unwrap();
        assert_eq!(arr.len(), 4);
        assert_eq!(arr[1].as_str(), Some("two"));

        let table = ok(inline_table("{ type.name = \"pug\", age = 3 }", 0));
        assert_eq!(
            table.get_path(&["type", "name"]).and_then(Value::as_str),
            Some("pug")
        );
    }

    #[test]
    fn test_inline_table_duplicate_key() {
        let (result, end) = inline_table("{ a = 1, a = 2 }", 0);
        assert!(matches!(result, Err(Error::Semantic { .. })));
        assert_eq!(end, 0);
    }

    #[test]
    fn test_keys() {
        assert_eq!(
            ok(key("site . \"google.com\" .'x'", 0)),
            vec!["site", "google.com", "x"]
        );
        assert_eq!(ok(key("3.14159", 0)), vec!["3", "14159"]);
        assert_eq!(ok(table_header("[ a . b ]", 0)), vec!["a", "b"]);
        assert_eq!(ok(array_table_header("[[a]]", 0)), vec!["a"]);
    }

    #[test]
    fn test_statements() {
        assert_eq!(
            ok(statement("x.y = true # c", 0)),
            Statement::KeyValue {
                keys: vec!["x".into(), "y".into()],
                value: Value::Boolean(true)
            }
        );
        assert_eq!(
            ok(statement("[[products]]", 0)),
            Statement::ArrayTableHeader {
                keys: vec!["products".into()]
            }
        );
    }

    #[test]
    fn test_innermost_failure_positions() {
        assert_eq!(expected_at(value("[1, 2", 0)), ("`,` or `]`".into(), 5));
        assert_eq!(
            expected_at(inline_table("{ a = 1,\n b = 2 }", 0)),
            ("a key".into(), 8)
        );
        assert_eq!(
            expected_at(inline_table("{ a = 1\n}", 0)),
            ("`,` or `}`".into(), 7)
        );
        assert_eq!(expected_at(statement("a 1", 0)), ("`=`".into(), 2));
        assert_eq!(expected_at(statement("a = ", 0)), ("a value".into(), 4));
        assert_eq!(expected_at(statement("[a", 0)), ("`]`".into(), 2));
        assert_eq!(expected_at(statement("[[a]", 0)), ("`]]`".into(), 3));
    }

    #[test]
    fn test_failure_keeps_cursor() {
        assert_eq!(value("x = ]", 4).1, 4);
        assert_eq!(boolean("True", 0).1, 0);
    }
}
