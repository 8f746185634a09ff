//! Row deserialization.
//!
//! This module turns [`Record`]s into any type implementing
//! [`Deserialize`](serde::Deserialize):
//!
//! - **Structs and maps** are filled by attribute name
//! - **Tuples and sequences** are filled by attribute position
//! - **Missing values** (`?`) become `None` for `Option` fields
//! - **Nominal values** can target unit-only enums, matched by variant name
//! - **Whole-number values** fit integer fields; `TRUE`/`FALSE` text fits `bool`
//! - **Dates** are presented as RFC 3339 strings, so `chrono::DateTime<Utc>`
//!   fields work out of the box
//!
//! Most users go through [`Reader::deserialize`](crate::Reader::deserialize).
//!
//! ## Examples
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_arff::{from_record, Attribute, DataRow, Record, Relation, Value};
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! enum Outlook { Sunny, Overcast, Rainy }
//!
//! let relation = Relation::new("w")
//!     .with_attribute(Attribute::nominal("outlook", ["Sunny", "Overcast", "Rainy"]))
//!     .unwrap()
//!     .with_attribute(Attribute::numeric("temperature"))
//!     .unwrap();
//! let row = DataRow::new(vec![Value::from("Rainy"), Value::Number(70.0)]);
//!
//! let (outlook, temperature): (Outlook, u8) =
//!     from_record(Record::from_row(&relation, row)).unwrap();
//! assert_eq!(outlook, Outlook::Rainy);
//! assert_eq!(temperature, 70);
//! ```

use crate::value::format_date;
use crate::{Error, Record, Result, Value};
use chrono::SecondsFormat;
use serde::de::{self, DeserializeOwned, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// Deserializes one record into `T`.
///
/// # Errors
///
/// Returns [`Error::Custom`] when the record does not fit `T`.
pub fn from_record<T: DeserializeOwned>(record: Record) -> Result<T> {
    T::deserialize(RecordDeserializer { record })
}

/// Deserializes a single value into `T`.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    T::deserialize(ValueDeserializer::new(value))
}

struct RecordDeserializer {
    record: Record,
}

impl<'de> de::Deserializer<'de> for RecordDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(MapDeserializer::new(self.record))
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let values: Vec<Value> = self.record.into_iter().map(|(_, v)| v).collect();
        visitor.visit_seq(SeqDeserializer::new(values))
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct map struct enum identifier ignored_any
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
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(record: Record) -> Self {
        MapDeserializer {
            iter: record.into_iter(),
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
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }

    /// Whole floats are handed to integer visitors as integers.
    fn visit_whole<'de, V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Number(f) if f.fract() == 0.0 && f >= 0.0 && f <= u64::MAX as f64 => {
                visitor.visit_u64(f as u64)
            }
            Value::Number(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < 0.0 => {
                visitor.visit_i64(f as i64)
            }
            _ => de::Deserializer::deserialize_any(self, visitor),
        }
    }
}

macro_rules! deserialize_whole {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                self.visit_whole(visitor)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Missing => visitor.visit_none(),
            Value::Number(f) => visitor.visit_f64(f),
            Value::Integer(i) => visitor.visit_i64(i),
            Value::Unsigned(u) => visitor.visit_u64(u),
            Value::Text(s) => visitor.visit_string(s),
            Value::Date(dt) => visitor.visit_string(dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }

    deserialize_whole! {
        deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64
        deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match &self.value {
            Value::Text(s) if s.eq_ignore_ascii_case("true") => visitor.visit_bool(true),
            Value::Text(s) if s.eq_ignore_ascii_case("false") => visitor.visit_bool(false),
            _ => self.deserialize_any(visitor),
        }
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            // keep the on-disk layout when a date lands in a plain String
            Value::Date(dt) => visitor.visit_string(format_date(&dt)),
            _ => self.deserialize_any(visitor),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Missing => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Missing => visitor.visit_unit(),
            _ => self.deserialize_any(visitor),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
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
            Value::Text(s) => visitor.visit_enum(s.into_deserializer()),
            other => Err(Error::custom(format!(
                "expected nominal value for enum, found {}",
                other.kind()
            ))),
        }
    }

    forward_to_deserialize_any! {
        i128 u128 f32 f64 char str
        bytes byte_buf unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}
