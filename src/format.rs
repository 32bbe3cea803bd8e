//! Canonical text output for value trees.
//!
//! Encoding choices depend only on the value and the [`FormatOptions`]:
//!
//! - A table's plain entries are written as `key = value` lines first, then
//!   its child tables as `[a.b]` sections and arrays of tables as `[[a.b]]`
//!   blocks. A section header is left out when the table holds nothing but
//!   sub-sections.
//! - Inline tables, and every table under `force_inline`, are written as
//!   `{ k = v, ... }`.
//! - Basic strings use `"..."`, or `"""` when the text has a newline.
//!   Literal strings use `'...'` or `'''`, falling back to basic form when
//!   the text cannot be written literally.
//! - Floats always carry a `.` or an exponent; specials print as `inf`,
//!   `-inf` and `nan`.

use crate::document::{CommentMap, Comments, Document, PathSegment};
use crate::options::FormatOptions;
use crate::scan::{is_bare_key_char, is_control};
use crate::string::{StringStyle, TomlString};
use crate::value::{Table, TableKind, Value};

const ARRAY_INDENT: &str = "    ";

/// Renders `table` as a document.
pub(crate) fn format_table(table: &Table, options: &FormatOptions) -> String {
    Emitter::new(options, None).document(table)
}

/// Renders a parsed document with its preserved comments.
pub(crate) fn format_document(doc: &Document, options: &FormatOptions) -> String {
    let comments = if options.comments {
        Some(doc.comment_map())
    } else {
        None
    };
    Emitter::new(options, comments).document(doc.root())
}

/// Renders any value on a single line (apart from multi-line strings).
pub(crate) fn format_inline(value: &Value, options: &FormatOptions) -> String {
    let mut out = String::new();
    write_inline(&mut out, value, options);
    out
}

struct Emitter<'a> {
    options: &'a FormatOptions,
    comments: Option<&'a CommentMap>,
    out: String,
}

impl<'a> Emitter<'a> {
    fn new(options: &'a FormatOptions, comments: Option<&'a CommentMap>) -> Self {
        Emitter {
            options,
            comments,
            out: String::new(),
        }
    }

    fn document(mut self, root: &Table) -> String {
        log_debug!("formatting a table with {} top-level entries", root.len());
        let mut path = Vec::new();
        let mut keys = Vec::new();
        self.table_body(root, &mut path, &mut keys);
        self.out
    }

    /// Whether `value` is written as its own `[...]` or `[[...]]` section.
    fn is_section(&self, value: &Value) -> bool {
        if self.options.force_inline {
            return false;
        }
        match value {
            Value::Table(table) => table.kind() != TableKind::Inline,
            Value::Array(items) => items.is_all_tables(),
            _ => false,
        }
    }

    fn table_body(&mut self, table: &Table, path: &mut Vec<PathSegment>, keys: &mut Vec<String>) {
        let (sections, lines): (Vec<_>, Vec<_>) = table
            .stable_entries()
            .into_iter()
            .partition(|(_, value)| self.is_section(value));

        for (key, value) in lines {
            path.push(PathSegment::Key(key.clone()));
            self.leading_comments(path);
            let prefix = format!("{} = ", format_key(key));
            self.out.push_str(&prefix);
            self.key_value(prefix.chars().count(), value);
            self.end_line(path);
            path.pop();
        }

        for (key, value) in sections {
            path.push(PathSegment::Key(key.clone()));
            keys.push(key.clone());
            match value {
                Value::Table(child) => self.table_section(child, path, keys),
                Value::Array(items) => {
                    for (index, item) in items.iter().enumerate() {
                        if let Value::Table(child) = item {
                            path.push(PathSegment::Index(index));
                            self.header(path, keys, "[[", "]]");
                            self.table_body(child, path, keys);
                            path.pop();
                        }
                    }
                }
                _ => {}
            }
            keys.pop();
            path.pop();
        }
    }

    fn table_section(&mut self, table: &Table, path: &mut Vec<PathSegment>, keys: &mut Vec<String>) {
        let has_lines = table.values().any(|v| !self.is_section(v));
        if has_lines || table.is_empty() || self.comments_at(path).is_some() {
            self.header(path, keys, "[", "]");
        }
        self.table_body(table, path, keys);
    }

    fn header(&mut self, path: &[PathSegment], keys: &[String], open: &str, close: &str) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.leading_comments(path);
        self.out.push_str(open);
        let names: Vec<String> = keys.iter().map(|k| format_key(k)).collect();
        self.out.push_str(&names.join("."));
        self.out.push_str(close);
        self.end_line(path);
    }

    /// Writes an inline value, breaking a long non-empty array one element
    /// per line.
    fn key_value(&mut self, prefix_width: usize, value: &Value) {
        let inline = format_inline(value, self.options);
        match value {
            Value::Array(items)
                if !items.is_empty() && prefix_width + inline.chars().count() > self.options.width =>
            {
                self.out.push_str("[\n");
                for item in items.iter() {
                    self.out.push_str(ARRAY_INDENT);
                    write_inline(&mut self.out, item, self.options);
                    self.out.push_str(",\n");
                }
                self.out.push(']');
            }
            _ => self.out.push_str(&inline),
        }
    }

    fn comments_at(&self, path: &[PathSegment]) -> Option<&'a Comments> {
        self.comments?.get(path)
    }

    fn leading_comments(&mut self, path: &[PathSegment]) {
        if let Some(comments) = self.comments_at(path) {
            for line in &comments.leading {
                self.out.push('#');
                self.out.push_str(line);
                self.out.push('\n');
            }
        }
    }

    fn end_line(&mut self, path: &[PathSegment]) {
        if let Some(text) = self.comments_at(path).and_then(|c| c.trailing.as_deref()) {
            self.out.push_str(" #");
            self.out.push_str(text);
        }
        self.out.push('\n');
    }
}

fn write_inline(out: &mut String, value: &Value, options: &FormatOptions) {
    match value {
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Integer(i) => out.push_str(&i.to_string()),
        Value::Float(f) => out.push_str(&format_float(*f, options.float_precision)),
        Value::String(s) => write_string(out, s),
        Value::LocalDate(d) => out.push_str(&d.to_string()),
        Value::LocalTime(t) => out.push_str(&t.to_string()),
        Value::LocalDateTime(dt) => out.push_str(&dt.to_string()),
        Value::OffsetDateTime(dt) => out.push_str(&dt.to_string()),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_inline(out, item, options);
            }
            out.push(']');
        }
        Value::Table(table) if table.is_empty() => out.push_str("{}"),
        Value::Table(table) => {
            out.push_str("{ ");
            for (i, (key, item)) in table.stable_entries().into_iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&format_key(key));
                out.push_str(" = ");
                write_inline(out, item, options);
            }
            out.push_str(" }");
        }
    }
}

/// Shortest round-tripping form, or a fixed number of fractional digits.
pub(crate) fn format_float(value: f64, precision: Option<usize>) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let mut text = match precision {
        Some(digits) => format!("{:.*}", digits, value),
        None => format!("{:?}", value),
    };
    if !text.contains(['.', 'e', 'E']) {
        text.push_str(".0");
    }
    text
}

/// A bare key when possible, a basic-quoted key otherwise.
pub(crate) fn format_key(key: &str) -> String {
    if !key.is_empty() && key.bytes().all(is_bare_key_char) {
        return key.to_string();
    }
    let mut out = String::with_capacity(key.len() + 2);
    out.push('"');
    escape_into(&mut out, key, false);
    out.push('"');
    out
}

fn write_string(out: &mut String, s: &TomlString) {
    if s.style() == StringStyle::Literal && write_literal(out, s.as_str()) {
        return;
    }
    write_basic(out, s.as_str());
}

/// Writes `text` in a literal form if one can hold it verbatim.
fn write_literal(out: &mut String, text: &str) -> bool {
    let representable = !text.contains("'''")
        && !has_lone_cr(text)
        && text
            .chars()
            .all(|c| matches!(c, '\n' | '\r') || !is_control(c));
    if !representable {
        return false;
    }
    if text.contains(['\n', '\'']) {
        out.push_str("'''\n");
        out.push_str(text);
        out.push_str("'''");
    } else {
        out.push('\'');
        out.push_str(text);
        out.push('\'');
    }
    true
}

fn has_lone_cr(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes
        .iter()
        .enumerate()
        .any(|(i, &b)| b == b'\r' && bytes.get(i + 1) != Some(&b'\n'))
}

fn write_basic(out: &mut String, text: &str) {
    if text.contains('\n') {
        out.push_str("\"\"\"\n");
        escape_into(out, text, true);
        // A continuation swallows the newline before the closing quotes.
        out.push_str("\\\n\"\"\"");
    } else {
        out.push('"');
        escape_into(out, text, false);
        out.push('"');
    }
}

fn escape_into(out: &mut String, text: &str, multi_line: bool) {
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\u{c}' => out.push_str("\\f"),
            '\n' if multi_line => out.push('\n'),
            '\r' if multi_line && chars.peek() == Some(&'\n') => out.push('\r'),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if is_control(c) => out.push_str(&format!("\\u{:04X}", u32::from(c))),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Array, ArrayKind};

    fn render(src: &str) -> String {
        crate::parse(src).unwrap().to_string()
    }

    #[test]
    fn test_key_lines_before_sections() {
        let mut root = Table::new();
        let mut server = Table::new();
        server.insert("port".into(), Value::Integer(8080));
        root.insert("server".into(), Value::Table(server));
        root.insert("name".into(), Value::from("demo"));
        assert_eq!(
            format_table(&root, &FormatOptions::default()),
            "name = \"demo\"\n\n[server]\nport = 8080\n"
        );
    }

    #[test]
    fn test_implicit_headers_are_skipped() {
        assert_eq!(render("[a.b.c]\nx = 1\n"), "[a.b.c]\nx = 1\n");
        assert_eq!(render("[a]\n[a.b]\n"), "[a.b]\n");
        assert_eq!(render("[empty]\n"), "[empty]\n");
    }

    #[test]
    fn test_arrays_of_tables() {
        let src = "[[fruit]]\nname = \"apple\"\n\n[fruit.physical]\ncolor = \"red\"\n\n[[fruit]]\nname = \"pear\"\n";
        assert_eq!(render(src), src);
    }

    #[test]
    fn test_inline_tables_stay_inline() {
        assert_eq!(
            render("point = { x = 1, y = { z = [] } }\nempty = {}\n"),
            "point = { x = 1, y = { z = [] } }\nempty = {}\n"
        );
    }

    #[test]
    fn test_force_inline() {
        let doc = crate::parse("[a]\nb = 1\n[[c]]\nd = 2\n").unwrap();
        let text = doc.to_string_with_options(&FormatOptions::new().with_force_inline(true));
        assert_eq!(text, "a = { b = 1 }\nc = [{ d = 2 }]\n");
    }

    #[test]
    fn test_long_arrays_break() {
        let doc = crate::parse("xs = [1, 2, 3]\n").unwrap();
        let text = doc.to_string_with_options(&FormatOptions::new().with_width(10));
        assert_eq!(text, "xs = [\n    1,\n    2,\n    3,\n]\n");
        assert_eq!(crate::parse(&text).unwrap(), doc);
    }

    #[test]
    fn test_floats() {
        assert_eq!(format_float(1.0, None), "1.0");
        assert_eq!(format_float(-0.0, None), "-0.0");
        assert_eq!(format_float(1e300, None), "1e300");
        assert_eq!(format_float(f64::NEG_INFINITY, None), "-inf");
        assert_eq!(format_float(f64::NAN, None), "nan");
        assert_eq!(format_float(3.14159, Some(2)), "3.14");
        assert_eq!(format_float(2.0, Some(0)), "2.0");
    }

    #[test]
    fn test_keys() {
        assert_eq!(format_key("bare-key_1"), "bare-key_1");
        assert_eq!(format_key("a.b"), "\"a.b\"");
        assert_eq!(format_key(""), "\"\"");
        assert_eq!(format_key("ʎǝʞ"), "\"ʎǝʞ\"");
    }

    #[test]
    fn test_basic_strings() {
        let opts = FormatOptions::default();
        let s = Value::from("tab\tquote\"back\\slash\u{1}");
        assert_eq!(
            format_inline(&s, &opts),
            r#""tab\tquote\"back\\slash\u0001""#
        );
        let s = Value::from("line one\nline two\n");
        assert_eq!(
            format_inline(&s, &opts),
            "\"\"\"\nline one\nline two\n\\\n\"\"\""
        );
    }

    #[test]
    fn test_literal_strings() {
        let opts = FormatOptions::default();
        let lit = |text: &str| format_inline(&Value::String(TomlString::literal(text)), &opts);
        assert_eq!(lit(r"C:\path"), r"'C:\path'");
        assert_eq!(lit("it's"), "'''\nit's'''");
        assert_eq!(lit("a\nb"), "'''\na\nb'''");
        // Not representable literally.
        assert_eq!(lit("bell\u{7}"), "\"bell\\u0007\"");
        assert_eq!(lit("'''"), "\"'''\"");
        assert_eq!(lit("cr\ronly"), "\"cr\\ronly\"");
    }

    #[test]
    fn test_strings_round_trip() {
        for text in ["", "plain", "a\nb", "\nlead", "trail\n", "  \\\n  x", "q\"\"\"q", "crlf\r\nend", "'''", "x''"] {
            for style in [StringStyle::Basic, StringStyle::Literal] {
                let value = Value::String(TomlString::with_style(text, style));
                let rendered = format_inline(&value, &FormatOptions::default());
                let back: Value = rendered.parse().unwrap();
                assert_eq!(back.as_str(), Some(text), "{:?} as {:?}", text, style);
            }
        }
    }

    #[test]
    fn test_mixed_array_stays_inline() {
        let mut root = Table::new();
        let mut items = Array::of_tables();
        items.push(Value::Table(Table::new()));
        items.push(Value::Integer(1));
        root.insert("mixed".into(), Value::Array(items));
        assert_eq!(format_table(&root, &FormatOptions::default()), "mixed = [{}, 1]\n");
        assert_eq!(
            Array::of_tables().kind(),
            ArrayKind::OfTables
        );
    }

    #[test]
    fn test_comments_round_trip() {
        let options = crate::ParseOptions::new().with_comments(crate::CommentPolicy::Preserve);
        let src = "# top\ntitle = \"x\" # t\n\n# server section\n[server] # s\nport = 1\n";
        let doc = Document::parse_with_options(src, &options).unwrap();
        assert_eq!(doc.to_string(), src);
        assert_eq!(
            doc.to_string_with_options(&FormatOptions::new().without_comments()),
            "title = \"x\"\n\n[server]\nport = 1\n"
        );
    }
}
