//! Serialization into value trees and documents.
//!
//! This module provides the [`ValueSerializer`], which converts any type
//! implementing `Serialize` into a [`Value`] tree. The crate-level
//! [`to_string`](crate::to_string) family then renders that tree with the
//! formatter.
//!
//! ## Mapping
//!
//! - Integers must fit in `i64`; larger unsigned values are a range error
//! - Sequences and tuples become arrays, maps and structs become tables
//! - A unit variant becomes its name; a variant carrying data becomes a
//!   one-entry table `{ Variant = ... }`
//! - `None` has no representation: struct fields and map entries holding
//!   it are left out, anywhere else it is [`Error::UnsupportedNone`]
//! - The crate's date and time types keep their kind
//!
//! ## Usage
//!
//! ```rust
//! use serde_tomlet::{to_value, Value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let value = to_value(&Point { x: 1, y: 2 }).unwrap();
//! assert_eq!(value.get("x"), Some(&Value::Integer(1)));
//! ```

use crate::value::{Array, Table, Value};
use crate::{Error, Result};
use serde::{ser, Serialize};

/// Newtype-struct name under which date and time nodes travel through serde.
///
/// Other serializers see a plain string; [`ValueSerializer`] turns the text
/// back into the matching date/time value.
pub(crate) const DATETIME_NAME: &str = "$__serde_tomlet_private_datetime";

/// Serializer producing an owned [`Value`].
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
    variant: Option<&'static str>,
}

pub struct SerializeMap {
    table: Table,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Boolean(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Integer(i64::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Integer(i64::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Integer(i64::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Integer(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        i64::try_from(v)
            .map(Value::Integer)
            .map_err(|_| Error::range(&format!("integer {} does not fit in 64 bits", v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Integer(i64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Integer(i64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Integer(i64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Value::try_from(v)
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        i64::try_from(v)
            .map(Value::Integer)
            .map_err(|_| Error::range(&format!("integer {} does not fit in 64 bits", v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Float(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::from(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let arr: Array = v.iter().map(|&b| Value::Integer(i64::from(b))).collect();
        Ok(Value::Array(arr))
    }

    fn serialize_none(self) -> Result<Value> {
        Err(Error::UnsupportedNone)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Err(Error::unsupported_type("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value> {
        Err(Error::unsupported_type(&format!("unit struct `{}`", name)))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let inner = value.serialize(self)?;
        if name != DATETIME_NAME {
            return Ok(inner);
        }
        let text = inner
            .as_str()
            .ok_or_else(|| Error::internal("date/time marker must wrap a string"))?;
        text.parse::<Value>()
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut table = Table::new();
        table.insert(variant.to_string(), to_value(value)?);
        Ok(Value::Table(table))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(Some(variant)))
    }
}

/// Wraps `value` as `{ variant = value }` when serializing an enum variant.
fn wrap_variant(variant: Option<&'static str>, value: Value) -> Value {
    match variant {
        Some(name) => {
            let mut table = Table::new();
            table.insert(name.to_string(), value);
            Value::Table(table)
        }
        None => value,
    }
}

impl SerializeVec {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn finish(self) -> Value {
        wrap_variant(self.variant, Value::Array(Array::from(self.vec)))
    }
}

impl SerializeMap {
    fn new(variant: Option<&'static str>) -> Self {
        SerializeMap {
            table: Table::new(),
            current_key: None,
            variant,
        }
    }

    /// Inserts an entry; a value that is itself `None` leaves the key out.
    /// A `None` nested deeper inside the value is still an error.
    fn insert<T: ?Sized + Serialize>(&mut self, key: String, value: &T) -> Result<()> {
        match to_value(value) {
            Ok(value) => {
                self.table.insert(key, value);
                Ok(())
            }
            Err(Error::UnsupportedNone) if is_none(value) => {
                log_trace!("skipping `None` entry `{}`", key);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn finish(self) -> Value {
        wrap_variant(self.variant, Value::Table(self.table))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = match to_value(key)? {
            Value::String(s) => s.into_string(),
            Value::Integer(i) => i.to_string(),
            Value::Boolean(b) => b.to_string(),
            other => {
                return Err(Error::unsupported_type(&format!(
                    "map key of type {}",
                    other.type_name()
                )))
            }
        };
        self.current_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::internal("serialize_value called without serialize_key"))?;
        self.insert(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

/// Whether `value` serializes as a bare `None` (through any `Some` or
/// newtype wrappers).
fn is_none<T: ?Sized + Serialize>(value: &T) -> bool {
    matches!(value.serialize(IsNone), Ok(true))
}

struct IsNone;

fn not_scalar<T>() -> Result<T> {
    Err(Error::internal("compound value"))
}

macro_rules! not_none {
    ($($method:ident($($arg:ty),*);)*) => {$(
        fn $method(self, $(_: $arg),*) -> Result<bool> {
            Ok(false)
        }
    )*};
}

impl ser::Serializer for IsNone {
    type Ok = bool;
    type Error = Error;

    type SerializeSeq = ser::Impossible<bool, Error>;
    type SerializeTuple = ser::Impossible<bool, Error>;
    type SerializeTupleStruct = ser::Impossible<bool, Error>;
    type SerializeTupleVariant = ser::Impossible<bool, Error>;
    type SerializeMap = ser::Impossible<bool, Error>;
    type SerializeStruct = ser::Impossible<bool, Error>;
    type SerializeStructVariant = ser::Impossible<bool, Error>;

    not_none! {
        serialize_bool(bool);
        serialize_i8(i8);
        serialize_i16(i16);
        serialize_i32(i32);
        serialize_i64(i64);
        serialize_u8(u8);
        serialize_u16(u16);
        serialize_u32(u32);
        serialize_u64(u64);
        serialize_f32(f32);
        serialize_f64(f64);
        serialize_char(char);
        serialize_str(&str);
        serialize_bytes(&[u8]);
        serialize_unit();
        serialize_unit_struct(&'static str);
        serialize_unit_variant(&'static str, u32, &'static str);
    }

    fn serialize_none(self) -> Result<bool> {
        Ok(true)
    }

    fn serialize_some<T>(self, value: &T) -> Result<bool>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<bool>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<bool>
    where
        T: ?Sized + Serialize,
    {
        Ok(false)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        not_scalar()
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        not_scalar()
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        not_scalar()
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        not_scalar()
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        not_scalar()
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        not_scalar()
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        not_scalar()
    }
}

/// Converts any serializable value into a [`Value`].
///
/// # Errors
///
/// Fails on `None` outside a struct field or map entry, on unit values,
/// on integers outside the `i64` range and on map keys that are not
/// strings, integers or booleans.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocalDate;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Server {
        host: String,
        port: u16,
        alias: Option<String>,
    }

    #[test]
    fn test_struct_to_table() {
        let server = Server {
            host: "localhost".into(),
            port: 8080,
            alias: None,
        };
        let value = to_value(&server).unwrap();
        let table = value.as_table().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("port"), Some(&Value::Integer(8080)));
        assert!(table.get("alias").is_none());
    }

    #[test]
    fn test_none_outside_field() {
        let items: Vec<Option<i32>> = vec![Some(1), None];
        assert!(matches!(to_value(&items), Err(Error::UnsupportedNone)));
        assert!(matches!(to_value(&None::<i32>), Err(Error::UnsupportedNone)));
    }

    #[test]
    fn test_nested_none_in_field_is_an_error() {
        #[derive(Serialize)]
        struct Holder {
            name: &'static str,
            values: Vec<Option<i32>>,
            maybe: Option<Option<i32>>,
        }

        let holder = Holder {
            name: "x",
            values: vec![Some(1), None],
            maybe: None,
        };
        assert!(matches!(to_value(&holder), Err(Error::UnsupportedNone)));

        let holder = Holder {
            name: "x",
            values: vec![Some(1)],
            maybe: Some(None),
        };
        let value = to_value(&holder).unwrap();
        assert!(value.get("maybe").is_none());
        assert_eq!(value.get("values").and_then(Value::as_array).map(|a| a.len()), Some(1));
        assert!(is_none(&Some(None::<i32>)));
        assert!(!is_none(&Some(vec![None::<i32>])));
    }

    #[test]
    fn test_u64_range() {
        assert_eq!(to_value(&42u64).unwrap(), Value::Integer(42));
        assert!(matches!(to_value(&u64::MAX), Err(Error::Range { .. })));
        assert!(matches!(to_value(&(i128::MAX)), Err(Error::Range { .. })));
    }

    #[test]
    fn test_unit_rejected() {
        assert!(matches!(to_value(&()), Err(Error::UnsupportedType(_))));
    }

    #[test]
    fn test_enum_variants() {
        #[derive(Serialize)]
        enum Shape {
            Empty,
            Circle(f64),
            Pair(i32, i32),
            Rect { w: i32, h: i32 },
        }

        assert_eq!(to_value(&Shape::Empty).unwrap(), Value::from("Empty"));

        let circle = to_value(&Shape::Circle(1.5)).unwrap();
        assert_eq!(circle.get("Circle"), Some(&Value::Float(1.5)));

        let pair = to_value(&Shape::Pair(1, 2)).unwrap();
        assert_eq!(pair.get("Pair").and_then(Value::as_array).map(|a| a.len()), Some(2));

        let rect = to_value(&Shape::Rect { w: 3, h: 4 }).unwrap();
        let inner = rect.get("Rect").unwrap();
        assert_eq!(inner.get("h"), Some(&Value::Integer(4)));
    }

    #[test]
    fn test_map_keys() {
        let mut map = BTreeMap::new();
        map.insert(1, "one");
        map.insert(2, "two");
        let value = to_value(&map).unwrap();
        assert_eq!(value.get("2").and_then(Value::as_str), Some("two"));

        let mut bad = BTreeMap::new();
        bad.insert(vec![1], 1);
        assert!(to_value(&bad).is_err());
    }

    #[test]
    fn test_dates_keep_kind() {
        let date = LocalDate::new(1979, 5, 27).unwrap();
        assert_eq!(to_value(&date).unwrap(), Value::LocalDate(date));

        let through_value = to_value(&Value::LocalDate(date)).unwrap();
        assert!(through_value.as_local_date().is_some());
    }
}
