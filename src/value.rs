//! Dynamic value representation for TOML data.
//!
//! This module provides the [`Value`] enum which represents any TOML value,
//! plus the two container nodes [`Array`] and [`Table`].
//!
//! ## Core Types
//!
//! - [`Value`]: a closed sum over booleans, 64-bit integers, floats, strings,
//!   the four date/time kinds, arrays and tables
//! - [`Array`]: an ordered sequence of values, tagged with an [`ArrayKind`]
//! - [`Table`]: a [`Map`] of keys to values, tagged with a [`TableKind`]
//!
//! Kinds record how a container was written (a `[[header]]` array, an inline
//! `{ ... }` table, ...). They steer the serializer and the redefinition rules
//! but never take part in equality.
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use serde_tomlet::{toml, Value};
//!
//! // From primitives
//! let boolean = Value::from(true);
//! let number = Value::from(42);
//! let text = Value::from("hello");
//!
//! // Using the toml! macro
//! let table = toml!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! assert!(table.is_table());
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use serde_tomlet::{Error, Value};
//! use std::convert::TryFrom;
//!
//! let value = Value::from(42);
//! assert_eq!(value.as_integer(), Some(42));
//!
//! // Integers never coerce to floats
//! assert_eq!(value.as_float(), None);
//! let err = f64::try_from(&value).unwrap_err();
//! assert!(matches!(err, Error::TypeMismatch { .. }));
//! ```
//!
//! ### Converting from Rust Types
//!
//! ```rust
//! use serde_tomlet::{to_value, Value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let value: Value = to_value(&Point { x: 10, y: 20 }).unwrap();
//! assert_eq!(value.get("x").and_then(Value::as_integer), Some(10));
//! ```

use crate::datetime::{LocalDate, LocalDateTime, LocalTime, OffsetDateTime};
use crate::error::{Error, Result};
use crate::map::{Map, TableOrder};
use crate::string::TomlString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

/// Any TOML value.
///
/// # Examples
///
/// ```rust
/// use serde_tomlet::Value;
///
/// let value: Value = "[1, 2.5, 'three']".parse().unwrap();
/// let items = value.as_array().unwrap();
/// assert!(items[0].is_integer());
/// assert!(items[1].is_float());
/// assert_eq!(items[2].as_str(), Some("three"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(TomlString),
    LocalDate(LocalDate),
    LocalTime(LocalTime),
    LocalDateTime(LocalDateTime),
    OffsetDateTime(OffsetDateTime),
    Array(Array),
    Table(Table),
}

/// How an array was written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ArrayKind {
    /// A `[ ... ]` literal; closed once its statement ends.
    #[default]
    Static,
    /// Built from `[[header]]` statements; extended by each new header.
    OfTables,
}

/// An ordered sequence of values.
#[derive(Clone, Debug, Default)]
pub struct Array {
    items: Vec<Value>,
    kind: ArrayKind,
}

/// How a table came into existence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TableKind {
    /// Created as an ancestor of a `[a.b]` header; may still be defined by
    /// its own header later.
    Implicit,
    /// Opened by a `[header]` (or built programmatically).
    #[default]
    Header,
    /// Created by a dotted key such as `a.b = 1`.
    Dotted,
    /// A `{ ... }` literal; closed once its statement ends.
    Inline,
}

/// A map from keys to values.
#[derive(Clone, Debug, Default)]
pub struct Table {
    map: Map,
    kind: TableKind,
}

impl Value {
    /// Name of the value's kind, as used in type mismatch diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::LocalDate(_) => "local date",
            Value::LocalTime(_) => "local time",
            Value::LocalDateTime(_) => "local date-time",
            Value::OffsetDateTime(_) => "offset date-time",
            Value::Array(_) => "array",
            Value::Table(_) => "table",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` for any of the four date/time kinds.
    #[inline]
    #[must_use]
    pub const fn is_datetime(&self) -> bool {
        matches!(
            self,
            Value::LocalDate(_)
                | Value::LocalTime(_)
                | Value::LocalDateTime(_)
                | Value::OffsetDateTime(_)
        )
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlet::Value;
    ///
    /// assert_eq!(Value::Boolean(true).as_bool(), Some(true));
    /// assert_eq!(Value::from(42).as_bool(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is a string, returns its text. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlet::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// If the value is a string, returns it with its quoting style.
    #[inline]
    #[must_use]
    pub fn as_toml_string(&self) -> Option<&TomlString> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_toml_string_mut(&mut self) -> Option<&mut TomlString> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_local_date(&self) -> Option<&LocalDate> {
        match self {
            Value::LocalDate(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_local_time(&self) -> Option<&LocalTime> {
        match self {
            Value::LocalTime(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_local_datetime(&self) -> Option<&LocalDateTime> {
        match self {
            Value::LocalDateTime(dt) => Some(dt),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_offset_datetime(&self) -> Option<&OffsetDateTime> {
        match self {
            Value::OffsetDateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is a table, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    #[inline]
    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Looks up `key` if the value is a table.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_table().and_then(|table| table.get(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.as_table_mut().and_then(|table| table.get_mut(key))
    }

    /// Returns `true` for a non-empty array whose elements are all tables.
    #[must_use]
    pub fn is_array_of_tables(&self) -> bool {
        match self {
            Value::Array(arr) => arr.is_all_tables(),
            _ => false,
        }
    }

    /// Switches every table in this subtree to the given backing.
    pub fn set_order(&mut self, order: TableOrder) {
        match self {
            Value::Table(table) => table.set_order_recursive(order),
            Value::Array(arr) => arr.iter_mut().for_each(|v| v.set_order(order)),
            _ => {}
        }
    }
}

impl Array {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty array that prints as `[[header]]` tables.
    #[must_use]
    pub fn of_tables() -> Self {
        Array {
            items: Vec::new(),
            kind: ArrayKind::OfTables,
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Array {
            items: Vec::with_capacity(capacity),
            kind: ArrayKind::Static,
        }
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ArrayKind {
        self.kind
    }

    #[inline]
    pub fn set_kind(&mut self, kind: ArrayKind) {
        self.kind = kind;
    }

    /// Returns `true` if the array is non-empty and every element is a table.
    #[must_use]
    pub fn is_all_tables(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(Value::is_table)
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }
}

impl Deref for Array {
    type Target = Vec<Value>;

    fn deref(&self) -> &Vec<Value> {
        &self.items
    }
}

impl DerefMut for Array {
    fn deref_mut(&mut self) -> &mut Vec<Value> {
        &mut self.items
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl From<Vec<Value>> for Array {
    fn from(items: Vec<Value>) -> Self {
        Array {
            items,
            kind: ArrayKind::Static,
        }
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Array::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Table {
    /// Creates an empty insertion-ordered `Header` table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table that prints as `{ ... }`.
    #[must_use]
    pub fn inline() -> Self {
        Self::with_kind(TableKind::Inline)
    }

    #[must_use]
    pub fn with_kind(kind: TableKind) -> Self {
        Table {
            map: Map::new(),
            kind,
        }
    }

    #[must_use]
    pub fn with_order(order: TableOrder) -> Self {
        Table {
            map: Map::with_order(order),
            kind: TableKind::Header,
        }
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> TableKind {
        self.kind
    }

    #[inline]
    pub fn set_kind(&mut self, kind: TableKind) {
        self.kind = kind;
    }

    #[must_use]
    pub fn into_map(self) -> Map {
        self.map
    }

    /// Switches this table and every table below it to the given backing.
    pub fn set_order_recursive(&mut self, order: TableOrder) {
        self.map.set_order(order);
        for value in self.map.values_mut() {
            value.set_order(order);
        }
    }

    /// Follows `keys` through nested tables.
    #[must_use]
    pub fn get_path<S: AsRef<str>>(&self, keys: &[S]) -> Option<&Value> {
        let (first, rest) = keys.split_first()?;
        let mut current = self.get(first.as_ref())?;
        for key in rest {
            current = current.get(key.as_ref())?;
        }
        Some(current)
    }
}

impl Deref for Table {
    type Target = Map;

    fn deref(&self) -> &Map {
        &self.map
    }
}

impl DerefMut for Table {
    fn deref_mut(&mut self) -> &mut Map {
        &mut self.map
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl From<Map> for Table {
    fn from(map: Map) -> Self {
        Table {
            map,
            kind: TableKind::Header,
        }
    }
}

impl FromIterator<(String, Value)> for Table {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Table::from(iter.into_iter().collect::<Map>())
    }
}

impl IntoIterator for Table {
    type Item = (String, Value);
    type IntoIter = crate::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Value);
    type IntoIter = crate::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

/// Renders tables as document text and every other value in inline form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = crate::options::FormatOptions::default();
        match self {
            Value::Table(table) => f.write_str(&crate::format::format_table(table, &options)),
            other => f.write_str(&crate::format::format_inline(other, &options)),
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = crate::options::FormatOptions::default();
        f.write_str(&crate::format::format_table(self, &options))
    }
}

/// Parses a single value literal, e.g. `"[1, 2]"` or `"1979-05-27"`.
impl FromStr for Value {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (result, end) = crate::parse::value(s, 0);
        let value = result?;
        match crate::accept::line_end(s.as_bytes(), end) {
            Some(rest) if rest == s.len() => Ok(value),
            _ => Err(Error::syntax(s, end, "end of input")),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::LocalDate(d) => d.serialize(serializer),
            Value::LocalTime(t) => t.serialize(serializer),
            Value::LocalDateTime(dt) => dt.serialize(serializer),
            Value::OffsetDateTime(dt) => dt.serialize(serializer),
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Table(table) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(table.len()))?;
                for (k, v) in table.stable_entries() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid TOML value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Value, E> {
                Ok(Value::Boolean(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Value, E> {
                Ok(Value::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(Value::Integer)
                    .map_err(|_| E::custom(format!("integer {} out of range for i64", value)))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Value, E> {
                Ok(Value::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Value, E> {
                Ok(Value::from(value))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Value, E> {
                Ok(Value::from(value))
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            // Date and time nodes arrive wrapped around their text.
            fn visit_newtype_struct<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                match Value::deserialize(deserializer)? {
                    Value::String(text) => match text.parse::<Value>() {
                        Ok(value) if value.is_datetime() => Ok(value),
                        _ => Ok(Value::String(text)),
                    },
                    other => Ok(other),
                }
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut array = Array::new();
                while let Some(elem) = seq.next_element()? {
                    array.push(elem);
                }
                Ok(Value::Array(array))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut table = Table::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    table.insert(key, value);
                }
                Ok(Value::Table(table))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.stable_entries() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Table(table) => Ok(table),
            other => Err(serde::de::Error::custom(format!(
                "expected a table, found {}",
                other.type_name()
            ))),
        }
    }
}

// TryFrom implementations for extracting values; every failure is a type mismatch.
macro_rules! impl_try_from_copy {
    ($($target:ty => $variant:ident, $expected:literal;)*) => {$(
        impl TryFrom<&Value> for $target {
            type Error = Error;

            fn try_from(value: &Value) -> Result<Self> {
                match value {
                    Value::$variant(inner) => Ok(*inner),
                    other => Err(Error::type_mismatch($expected, other.type_name())),
                }
            }
        }
    )*};
}

impl_try_from_copy! {
    bool => Boolean, "boolean";
    i64 => Integer, "integer";
    f64 => Float, "float";
    LocalDate => LocalDate, "local date";
    LocalTime => LocalTime, "local time";
    LocalDateTime => LocalDateTime, "local date-time";
    OffsetDateTime => OffsetDateTime, "offset date-time";
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = Error;

    fn try_from(value: &'a Value) -> Result<Self> {
        value
            .as_str()
            .ok_or_else(|| Error::type_mismatch("string", value.type_name()))
    }
}

impl<'a> TryFrom<&'a Value> for &'a TomlString {
    type Error = Error;

    fn try_from(value: &'a Value) -> Result<Self> {
        value
            .as_toml_string()
            .ok_or_else(|| Error::type_mismatch("string", value.type_name()))
    }
}

impl<'a> TryFrom<&'a Value> for &'a Array {
    type Error = Error;

    fn try_from(value: &'a Value) -> Result<Self> {
        value
            .as_array()
            .ok_or_else(|| Error::type_mismatch("array", value.type_name()))
    }
}

impl<'a> TryFrom<&'a Value> for &'a Table {
    type Error = Error;

    fn try_from(value: &'a Value) -> Result<Self> {
        value
            .as_table()
            .ok_or_else(|| Error::type_mismatch("table", value.type_name()))
    }
}

macro_rules! impl_try_from_owned {
    ($($target:ty => $variant:ident, $expected:literal, $conv:expr;)*) => {$(
        impl TryFrom<Value> for $target {
            type Error = Error;

            fn try_from(value: Value) -> Result<Self> {
                match value {
                    Value::$variant(inner) => Ok($conv(inner)),
                    other => Err(Error::type_mismatch($expected, other.type_name())),
                }
            }
        }
    )*};
}

impl_try_from_owned! {
    bool => Boolean, "boolean", |b| b;
    i64 => Integer, "integer", |i| i;
    f64 => Float, "float", |f| f;
    String => String, "string", TomlString::into_string;
    TomlString => String, "string", |s| s;
    Array => Array, "array", |a| a;
    Table => Table, "table", |t| t;
}

// From implementations for creating values from primitives
macro_rules! impl_from_integer {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::Integer(i64::from(value))
            }
        }
    )*};
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl TryFrom<u64> for Value {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self> {
        i64::try_from(value)
            .map(Value::Integer)
            .map_err(|_| Error::range(&format!("integer {} out of range for i64", value)))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(TomlString::new(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(TomlString::new(value))
    }
}

impl From<TomlString> for Value {
    fn from(value: TomlString) -> Self {
        Value::String(value)
    }
}

impl From<LocalDate> for Value {
    fn from(value: LocalDate) -> Self {
        Value::LocalDate(value)
    }
}

impl From<LocalTime> for Value {
    fn from(value: LocalTime) -> Self {
        Value::LocalTime(value)
    }
}

impl From<LocalDateTime> for Value {
    fn from(value: LocalDateTime) -> Self {
        Value::LocalDateTime(value)
    }
}

impl From<OffsetDateTime> for Value {
    fn from(value: OffsetDateTime) -> Self {
        Value::OffsetDateTime(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(Array::from(value))
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Value::Table(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Table(Table::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string::StringStyle;
    use std::convert::TryFrom;

    #[test]
    fn test_tryfrom_ref() {
        let value = Value::Integer(42);
        assert_eq!(i64::try_from(&value).unwrap(), 42);
        assert!(matches!(
            f64::try_from(&value),
            Err(Error::TypeMismatch { .. })
        ));

        let value = Value::from("text");
        let s: &str = TryFrom::try_from(&value).unwrap();
        assert_eq!(s, "text");
        let err = bool::try_from(&value).unwrap_err();
        assert_eq!(
            err.to_string(),
            "type mismatch: expected boolean, found string"
        );
    }

    #[test]
    fn test_tryfrom_owned() {
        let value = Value::from("hello");
        assert_eq!(String::try_from(value).unwrap(), "hello");
        assert!(String::try_from(Value::Integer(1)).is_err());
        assert!(Table::try_from(Value::from(vec![Value::from(1)])).is_err());
    }

    #[test]
    fn test_u64_range() {
        assert_eq!(Value::try_from(7u64).unwrap(), Value::Integer(7));
        assert!(matches!(
            Value::try_from(u64::MAX),
            Err(Error::Range { .. })
        ));
    }

    #[test]
    fn test_kinds_ignored_by_equality() {
        let mut inline = Table::inline();
        inline.insert("a".to_string(), Value::from(1));
        let mut header = Table::new();
        header.insert("a".to_string(), Value::from(1));
        assert_eq!(inline, header);

        let mut aot = Array::of_tables();
        aot.push(Value::Table(Table::new()));
        let plain = Array::from(vec![Value::Table(Table::new())]);
        assert_eq!(aot, plain);
    }

    #[test]
    fn test_string_style_ignored_by_equality() {
        let basic = Value::from(TomlString::new("x"));
        let literal = Value::from(TomlString::with_style("x", StringStyle::Literal));
        assert_eq!(basic, literal);
    }

    #[test]
    fn test_array_of_tables_detection() {
        assert!(!Value::from(Vec::new()).is_array_of_tables());
        assert!(Value::from(vec![Value::Table(Table::new())]).is_array_of_tables());
        assert!(!Value::from(vec![Value::Table(Table::new()), Value::from(1)]).is_array_of_tables());
    }

    #[test]
    fn test_get_path() {
        let mut inner = Table::new();
        inner.insert("c".to_string(), Value::from(3));
        let mut middle = Table::new();
        middle.insert("b".to_string(), Value::Table(inner));
        let mut root = Table::new();
        root.insert("a".to_string(), Value::Table(middle));
        assert_eq!(root.get_path(&["a", "b", "c"]), Some(&Value::Integer(3)));
        assert_eq!(root.get_path(&["a", "x"]), None);
        assert_eq!(root.get_path::<&str>(&[]), None);
    }

    #[test]
    fn test_set_order_recursive() {
        let mut inner = Table::new();
        inner.insert("k".to_string(), Value::from(1));
        let mut root = Table::new();
        root.insert(
            "list".to_string(),
            Value::from(vec![Value::Table(inner.clone())]),
        );
        root.insert("t".to_string(), Value::Table(inner));
        root.set_order_recursive(TableOrder::Hashed);
        assert_eq!(root.order(), TableOrder::Hashed);
        let t = root.get("t").and_then(Value::as_table).unwrap();
        assert_eq!(t.order(), TableOrder::Hashed);
        let element = &root.get("list").and_then(Value::as_array).unwrap()[0];
        assert_eq!(element.as_table().map(|t| t.order()), Some(TableOrder::Hashed));
    }

    #[test]
    fn test_from_str_single_value() {
        assert_eq!("42".parse::<Value>().unwrap(), Value::Integer(42));
        assert_eq!("  true  ".trim_start().parse::<Value>().unwrap(), Value::Boolean(true));
        assert!("42 43".parse::<Value>().is_err());
        assert!("".parse::<Value>().is_err());
    }

    #[test]
    fn test_deserialize_from_json() {
        let value: Value = serde_json::from_str(r#"{"a": [1, 2.5, "x"], "b": true}"#).unwrap();
        let table = value.as_table().unwrap();
        assert_eq!(table.get("a").and_then(Value::as_array).map(|a| a.len()), Some(3));
        assert_eq!(table.get("b"), Some(&Value::Boolean(true)));
        assert!(serde_json::from_str::<Value>("null").is_err());
    }

    #[test]
    fn test_dates_survive_from_value() {
        let mut table = Table::new();
        table.insert("born".to_string(), "1979-05-27".parse().unwrap());
        table.insert("label".to_string(), Value::from("1979-05-27"));
        let back: Value = crate::from_value(Value::Table(table.clone())).unwrap();
        assert!(back.get("born").and_then(Value::as_local_date).is_some());
        assert_eq!(back, Value::Table(table));
    }
}
