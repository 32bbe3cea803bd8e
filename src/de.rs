//! Deserialization from documents and value trees.
//!
//! This module provides the [`Deserializer`], which walks an owned
//! [`Value`] tree and feeds it to any type implementing `Deserialize`.
//!
//! ## Overview
//!
//! Text is first parsed into a [`Document`](crate::Document); the root table
//! is then handed to the deserializer. Mapping rules:
//!
//! - **Scalars**: booleans, integers and floats visit their native types;
//!   serde's primitive visitors narrow integers with range checks
//! - **Dates and times**: handed over as their canonical text, so they land
//!   in `String`, in this crate's date types, or in `chrono` types; a
//!   [`Value`] target keeps their date/time kind
//! - **Arrays**: visited as sequences
//! - **Tables**: visited as maps (and therefore structs)
//! - **Enums**: a string selects a unit variant; a one-entry table selects
//!   a variant carrying data
//!
//! TOML has no null, so an `Option` field is `None` exactly when its key is
//! absent.
//!
//! ## Usage
//!
//! ```rust
//! use serde_tomlet::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server { host: String, port: u16 }
//!
//! let server: Server = from_str("host = \"localhost\"\nport = 8080").unwrap();
//! assert_eq!(server, Server { host: "localhost".into(), port: 8080 });
//! ```

use crate::document::Document;
use crate::value::{Table, Value};
use crate::{Error, Result};
use serde::de::IntoDeserializer;
use serde::{de, forward_to_deserialize_any};

/// Deserializer over an owned value tree.
///
/// Created from text with [`Deserializer::from_str`] or from an existing
/// tree with [`Deserializer::new`].
pub struct Deserializer {
    value: Value,
}

impl Deserializer {
    /// Wraps a value for deserialization.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Deserializer { value }
    }

    /// Parses `input` as a document and wraps its root table.
    ///
    /// # Errors
    ///
    /// Returns the syntax or semantic error of the failed parse.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Result<Self> {
        let document = Document::parse(input)?;
        Ok(Deserializer::from(document.into_table()))
    }
}

impl From<Table> for Deserializer {
    fn from(table: Table) -> Self {
        Deserializer::new(Value::Table(table))
    }
}

impl From<Document> for Deserializer {
    fn from(document: Document) -> Self {
        Deserializer::from(document.into_table())
    }
}

impl<'de> de::Deserializer<'de> for Deserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Boolean(b) => visitor.visit_bool(b),
            Value::Integer(i) => visitor.visit_i64(i),
            Value::Float(f) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s.into_string()),
            Value::LocalDate(d) => visit_datetime(d.to_string(), visitor),
            Value::LocalTime(t) => visit_datetime(t.to_string(), visitor),
            Value::LocalDateTime(dt) => visit_datetime(dt.to_string(), visitor),
            Value::OffsetDateTime(dt) => visit_datetime(dt.to_string(), visitor),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr.into_vec())),
            Value::Table(table) => visitor.visit_map(MapDeserializer::new(table)),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_string(self, visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::LocalDate(d) => visitor.visit_string(d.to_string()),
            Value::LocalTime(t) => visitor.visit_string(t.to_string()),
            Value::LocalDateTime(dt) => visitor.visit_string(dt.to_string()),
            Value::OffsetDateTime(dt) => visitor.visit_string(dt.to_string()),
            other => de::Deserializer::deserialize_any(Deserializer::new(other), visitor),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Table(ref table) if table.is_empty() => visitor.visit_unit(),
            Value::Array(ref arr) if arr.is_empty() => visitor.visit_unit(),
            other => Err(Error::type_mismatch("an empty table", other.type_name())),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_unit(self, visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_enum(EnumDeserializer {
                variant: s.into_string(),
                value: None,
            }),
            Value::Table(table) => {
                if table.len() != 1 {
                    return Err(Error::custom(format!(
                        "expected a table with exactly one key for an enum, found {} keys",
                        table.len()
                    )));
                }
                let mut entries = table.into_map().into_iter();
                match entries.next() {
                    Some((variant, value)) => visitor.visit_enum(EnumDeserializer {
                        variant,
                        value: Some(value),
                    }),
                    None => Err(Error::internal("one-entry table yielded no entry")),
                }
            }
            other => Err(Error::type_mismatch(
                "a string or a one-entry table",
                other.type_name(),
            )),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char
        bytes byte_buf seq tuple tuple_struct map struct identifier ignored_any
    }
}

/// Date and time nodes reach self-describing visitors as a newtype around
/// their canonical text, so [`Value`] can restore their kind. Visitors asking
/// for a string get the text directly.
fn visit_datetime<'de, V>(text: String, visitor: V) -> Result<V::Value>
where
    V: de::Visitor<'de>,
{
    visitor.visit_newtype_struct(Deserializer::new(Value::from(text)))
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = Deserializer;

    fn into_deserializer(self) -> Deserializer {
        Deserializer::new(self)
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(Deserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: crate::map::IntoIter,
    len: usize,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(table: Table) -> Self {
        let len = table.len();
        MapDeserializer {
            iter: table.into_map().into_iter(),
            len,
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.len -= 1;
                self.value = Some(value);
                seed.deserialize(key.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(Deserializer::new(value)),
            None => Err(Error::custom("value is missing")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.len)
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Value>,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, VariantDeserializer)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = self.variant.into_deserializer();
        let visitor = VariantDeserializer { value: self.value };
        seed.deserialize(variant).map(|v| (v, visitor))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            None => Ok(()),
            Some(Value::Table(table)) if table.is_empty() => Ok(()),
            Some(other) => Err(Error::type_mismatch("a unit variant", other.type_name())),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(Deserializer::new(value)),
            None => Err(Error::type_mismatch("a newtype variant", "string")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Array(arr)) => visitor.visit_seq(SeqDeserializer::new(arr.into_vec())),
            Some(other) => Err(Error::type_mismatch("array", other.type_name())),
            None => Err(Error::type_mismatch("a tuple variant", "string")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Table(table)) => visitor.visit_map(MapDeserializer::new(table)),
            Some(other) => Err(Error::type_mismatch("table", other.type_name())),
            None => Err(Error::type_mismatch("a struct variant", "string")),
        }
    }
}
