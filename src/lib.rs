//! # serde_tomlet
//!
//! A strict parser and canonical serializer for TOML-style configuration
//! documents, with a Serde bridge for typed records.
//!
//! ## What's Inside?
//!
//! The crate is built in layers, each usable on its own:
//!
//! - **Acceptors** ([`accept`]): allocation-free recognizers for every
//!   production of the grammar, returning the cursor after a match
//! - **Parsers** ([`parse`]): the same productions, materializing typed
//!   values; a parser consumes exactly what its acceptor recognizes
//! - **Documents** ([`Document`]): the assembled root table plus source
//!   regions and (optionally) preserved comments for every statement
//! - **Values** ([`Value`]): a closed tree of booleans, 64-bit integers,
//!   floats, styled strings, four date/time kinds, arrays and tables
//! - **Formatter**: deterministic text output that parses back to an equal
//!   tree
//! - **Serde**: [`from_str`] / [`to_string`] for any `Deserialize` /
//!   `Serialize` type
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! serde_tomlet = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Typed Records
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_tomlet::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Config {
//!     name: String,
//!     port: u16,
//!     tags: Vec<String>,
//! }
//!
//! let config = Config {
//!     name: "api".to_string(),
//!     port: 8080,
//!     tags: vec!["prod".to_string()],
//! };
//!
//! let text = to_string(&config).unwrap();
//! assert_eq!(text, "name = \"api\"\nport = 8080\ntags = [\"prod\"]\n");
//!
//! let back: Config = from_str(&text).unwrap();
//! assert_eq!(config, back);
//! ```
//!
//! ### Documents
//!
//! ```rust
//! use serde_tomlet::{parse, Value};
//!
//! let doc = parse("[server]\nhost = 'localhost'\nports = [80, 443]\n").unwrap();
//! assert_eq!(doc.get("server.host").and_then(Value::as_str), Some("localhost"));
//!
//! let ports: &serde_tomlet::Array = doc.get_as("server.ports").unwrap();
//! assert_eq!(ports.len(), 2);
//! ```
//!
//! ### Diagnostics
//!
//! Every failure names what was expected, what was found and where:
//!
//! ```rust
//! use serde_tomlet::parse;
//!
//! let err = parse("a = 1\nb = [1 2]\n").unwrap_err();
//! let region = err.region().unwrap();
//! assert_eq!(region.line, 2);
//! assert!(err.to_string().contains("expected `,` or `]`"));
//! ```
//!
//! ### Dynamic Values with the toml! Macro
//!
//! ```rust
//! use serde_tomlet::{toml, Value};
//!
//! let data = toml!({
//!     "name": "Alice",
//!     "tags": ["rust", "serde"]
//! });
//!
//! if let Value::Table(table) = data {
//!     assert_eq!(table.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! }
//! ```
//!
//! ## Features
//!
//! - **`logging`**: emits `log` records (debug for parse/emit boundaries,
//!   trace for table transitions)
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Typed records in and out
//! - **`macro.rs`** - Building values with the toml! macro
//! - **`documents.rs`** - Regions, comments and redefinition errors
//! - **`dynamic_values.rs`** - Working with `Value` dynamically
//! - **`custom_options.rs`** - Width, float precision and inline output
//!
//! Run any example with: `cargo run --example <name>`

#[macro_use]
mod macros;

pub mod accept;
mod assemble;
pub mod datetime;
pub mod de;
pub mod document;
pub mod error;
mod format;
pub mod location;
pub mod map;
pub mod options;
pub mod parse;
mod scan;
pub mod ser;
pub mod string;
pub mod syntax;
pub mod value;

pub use datetime::{LocalDate, LocalDateTime, LocalTime, Offset, OffsetDateTime};
pub use de::Deserializer;
pub use document::{Comments, Document, PathSegment};
pub use error::{Error, Result};
pub use location::Region;
pub use map::{Map, TableOrder};
pub use options::{CommentPolicy, FormatOptions, ParseOptions};
pub use ser::{to_value, ValueSerializer};
pub use string::{StringStyle, TomlString};
pub use value::{Array, ArrayKind, Table, TableKind, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Parses a complete document.
///
/// # Examples
///
/// ```rust
/// let doc = serde_tomlet::parse("title = \"demo\"").unwrap();
/// assert_eq!(doc.root().len(), 1);
/// ```
///
/// # Errors
///
/// Returns a syntax error for malformed input, a semantic error for
/// redefined keys or tables, and a range error for out-of-range numbers.
pub fn parse(src: &str) -> Result<Document> {
    Document::parse(src)
}

/// Parses a complete document with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_tomlet::{parse_with_options, CommentPolicy, ParseOptions, PathSegment};
///
/// let options = ParseOptions::new().with_comments(CommentPolicy::Preserve);
/// let doc = parse_with_options("# the answer\nx = 42\n", &options).unwrap();
/// let comments = doc.comments(&[PathSegment::from("x")]).unwrap();
/// assert_eq!(comments.leading, vec![" the answer".to_string()]);
/// ```
///
/// # Errors
///
/// Same as [`parse`]; errors carry the configured source name.
pub fn parse_with_options(src: &str, options: &ParseOptions) -> Result<Document> {
    Document::parse_with_options(src, options)
}

/// Serializes any `T: Serialize` to document text.
///
/// # Examples
///
/// ```rust
/// use serde_tomlet::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let text = to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(text, "x = 1\ny = 2\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented, or if it is not a
/// table (a document root is always a table).
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &FormatOptions::default())
}

/// Serializes any `T: Serialize` to document text with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_tomlet::{to_string_with_options, FormatOptions};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Reading { celsius: f64 }
///
/// let options = FormatOptions::new().with_float_precision(2);
/// let text = to_string_with_options(&Reading { celsius: 21.456 }, &options).unwrap();
/// assert_eq!(text, "celsius = 21.46\n");
/// ```
///
/// # Errors
///
/// Same as [`to_string`].
pub fn to_string_with_options<T>(value: &T, options: &FormatOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    match to_value(value)? {
        Value::Table(table) => Ok(format::format_table(&table, options)),
        other => Err(Error::unsupported_type(&format!(
            "a document root must be a table, found {}",
            other.type_name()
        ))),
    }
}

/// Serializes any `T: Serialize` to a writer.
///
/// # Examples
///
/// ```rust
/// use serde_tomlet::to_writer;
/// use std::collections::BTreeMap;
///
/// let mut map = BTreeMap::new();
/// map.insert("answer", 42);
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &map).unwrap();
/// assert_eq!(buffer, b"answer = 42\n");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &FormatOptions::default())
}

/// Serializes any `T: Serialize` to a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &FormatOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserializes an instance of type `T` from document text.
///
/// # Examples
///
/// ```rust
/// use serde_tomlet::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns the parse error for invalid documents, or a conversion error if
/// the tree does not fit `T`.
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(Deserializer::from_str(s)?)
}

/// Deserializes an instance of type `T` from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use serde_tomlet::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"x = 1\ny = 2")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input is not a valid document, or
/// the data does not fit `T`.
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserializes an instance of type `T` from UTF-8 bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not a valid document,
/// or do not fit `T`.
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserializes an instance of type `T` from a value tree.
///
/// # Examples
///
/// ```rust
/// use serde_tomlet::{from_value, toml};
///
/// let ports: Vec<u16> = from_value(toml!([80, 443])).unwrap();
/// assert_eq!(ports, vec![80, 443]);
/// ```
///
/// # Errors
///
/// Returns an error if the tree does not fit `T`.
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(Deserializer::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
        home: Point,
    }

    fn sample_user() -> User {
        User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
            home: Point { x: 3, y: -4 },
        }
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&point).unwrap();
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let user = sample_user();
        let text = to_string(&user).unwrap();
        assert!(text.contains("[home]\n"));
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_to_value() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        match value {
            Value::Table(table) => {
                assert_eq!(table.get("x"), Some(&Value::Integer(1)));
                assert_eq!(table.get("y"), Some(&Value::Integer(2)));
            }
            _ => panic!("Expected table"),
        }
    }

    #[test]
    fn test_non_table_root() {
        assert!(matches!(
            to_string(&vec![1, 2, 3]),
            Err(Error::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_custom_options() {
        let user = sample_user();
        let options = FormatOptions::new().with_force_inline(true);
        let text = to_string_with_options(&user, &options).unwrap();
        assert!(text.contains("home = { x = 3, y = -4 }"));
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        assert!(from_slice::<Point>(&[0x78, 0x20, 0x3d, 0x20, 0xff]).is_err());
    }

    #[test]
    fn test_writer() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
        let back: Point = from_reader(buffer.as_slice()).unwrap();
        assert_eq!(back, Point { x: 1, y: 2 });
    }
}
