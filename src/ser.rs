//! Serialization of Rust data into ARFF values and rows.
//!
//! This module provides two [`Serializer`](serde::Serializer) implementations:
//!
//! - [`ValueSerializer`] turns a single scalar into a [`Value`]
//! - [`RecordSerializer`] turns a struct, map, tuple or sequence into the values
//!   of one data row, ordered by the relation's attributes
//!
//! ## Value mapping
//!
//! | Rust | Value |
//! |------|-------|
//! | integers | [`Value::Integer`] / [`Value::Unsigned`] |
//! | `f32`, `f64` | [`Value::Number`] |
//! | `char`, `&str`, `String` | [`Value::Text`] |
//! | `None`, `()` | [`Value::Missing`] |
//! | unit enum variants | [`Value::Text`] holding the variant name |
//! | `bool`, bytes, nested compounds | [`Error::UnsupportedValueType`] |
//!
//! Structs and maps are matched to attributes by name; attributes the record does
//! not mention are written as missing. Tuples and sequences are positional.
//!
//! ## Examples
//!
//! ```rust
//! use serde_arff::{to_value, Value};
//!
//! assert_eq!(to_value(&3u8).unwrap(), Value::Unsigned(3));
//! assert_eq!(to_value(&Some("x")).unwrap(), Value::from("x"));
//! assert_eq!(to_value(&None::<f64>).unwrap(), Value::Missing);
//! assert!(to_value(&true).is_err());
//! ```

use crate::value::parse_date;
use crate::{DataType, Error, Relation, Result, Value};
use chrono::{DateTime, Timelike, Utc};
use indexmap::IndexMap;
use serde::ser::{self, Impossible, Serialize};

/// Converts a scalar into a [`Value`].
///
/// # Errors
///
/// Returns [`Error::UnsupportedValueType`] for data with no ARFF encoding.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serializes `record` into one value per attribute of `relation`.
///
/// Text offered for a `DATE` attribute is parsed as RFC 3339 (the form
/// `chrono::DateTime<Utc>` serializes to) or as the ARFF date layout.
pub(crate) fn to_row<T>(relation: &Relation, record: &T) -> Result<Vec<Value>>
where
    T: ?Sized + Serialize,
{
    let values = record.serialize(RecordSerializer::new(relation))?;
    let types = relation
        .attributes
        .iter()
        .map(|attr| attr.data_type)
        .chain(std::iter::repeat(DataType::String));
    values
        .into_iter()
        .zip(types)
        .map(|(value, data_type)| match (data_type, value) {
            (DataType::Date, Value::Text(s)) => coerce_date(&s)
                .map(Value::Date)
                .ok_or(Error::NotDate { line: 0, token: s }),
            (_, value) => Ok(value),
        })
        .collect()
}

fn coerce_date(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .filter(|dt| dt.nanosecond() < 1_000_000_000)
        .or_else(|| parse_date(text))
}

/// Serializer producing a single [`Value`].
pub struct ValueSerializer;

fn unsupported(value: &str, kind: &str) -> Error {
    Error::unsupported_value(value, kind)
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = Impossible<Value, Error>;
    type SerializeTuple = Impossible<Value, Error>;
    type SerializeTupleStruct = Impossible<Value, Error>;
    type SerializeTupleVariant = Impossible<Value, Error>;
    type SerializeMap = Impossible<Value, Error>;
    type SerializeStruct = Impossible<Value, Error>;
    type SerializeStructVariant = Impossible<Value, Error>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Err(Error::unsupported_value(v, "bool"))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Integer(v as i64))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Integer(v as i64))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Integer(v as i64))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Integer(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Unsigned(v as u64))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Unsigned(v as u64))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Unsigned(v as u64))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::Unsigned(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::Text(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::Text(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Err(Error::unsupported_value(format!("{:?}", v), "bytes"))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Missing)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Missing)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Missing)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::Text(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_value(
            format!("{}::{}", name, variant),
            "newtype variant",
        ))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(unsupported("[..]", "sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(unsupported("(..)", "tuple"))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(unsupported(name, "tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_value(
            format!("{}::{}", name, variant),
            "tuple variant",
        ))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(unsupported("{..}", "map"))
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(unsupported(name, "struct"))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_value(
            format!("{}::{}", name, variant),
            "struct variant",
        ))
    }
}

/// Serializer producing the values of one data row.
///
/// The output has one value per attribute for structs and maps, and one value
/// per element for tuples and sequences; [`Writer::append`](crate::Writer::append)
/// checks the count.
pub struct RecordSerializer<'a> {
    relation: &'a Relation,
}

impl<'a> RecordSerializer<'a> {
    #[must_use]
    pub fn new(relation: &'a Relation) -> Self {
        RecordSerializer { relation }
    }

    fn not_a_record(kind: &str) -> Error {
        Error::custom(format!(
            "expected a struct, map, tuple or sequence as a row, found {}",
            kind
        ))
    }
}

pub struct PositionalRow {
    values: Vec<Value>,
}

pub struct NamedRow<'a> {
    relation: &'a Relation,
    fields: IndexMap<String, Value>,
    current_key: Option<String>,
}

impl<'a> ser::Serializer for RecordSerializer<'a> {
    type Ok = Vec<Value>;
    type Error = Error;

    type SerializeSeq = PositionalRow;
    type SerializeTuple = PositionalRow;
    type SerializeTupleStruct = PositionalRow;
    type SerializeTupleVariant = Impossible<Vec<Value>, Error>;
    type SerializeMap = NamedRow<'a>;
    type SerializeStruct = NamedRow<'a>;
    type SerializeStructVariant = Impossible<Vec<Value>, Error>;

    fn serialize_bool(self, _v: bool) -> Result<Vec<Value>> {
        Err(Self::not_a_record("bool"))
    }

    fn serialize_i8(self, _v: i8) -> Result<Vec<Value>> {
        Err(Self::not_a_record("i8"))
    }

    fn serialize_i16(self, _v: i16) -> Result<Vec<Value>> {
        Err(Self::not_a_record("i16"))
    }

    fn serialize_i32(self, _v: i32) -> Result<Vec<Value>> {
        Err(Self::not_a_record("i32"))
    }

    fn serialize_i64(self, _v: i64) -> Result<Vec<Value>> {
        Err(Self::not_a_record("i64"))
    }

    fn serialize_u8(self, _v: u8) -> Result<Vec<Value>> {
        Err(Self::not_a_record("u8"))
    }

    fn serialize_u16(self, _v: u16) -> Result<Vec<Value>> {
        Err(Self::not_a_record("u16"))
    }

    fn serialize_u32(self, _v: u32) -> Result<Vec<Value>> {
        Err(Self::not_a_record("u32"))
    }

    fn serialize_u64(self, _v: u64) -> Result<Vec<Value>> {
        Err(Self::not_a_record("u64"))
    }

    fn serialize_f32(self, _v: f32) -> Result<Vec<Value>> {
        Err(Self::not_a_record("f32"))
    }

    fn serialize_f64(self, _v: f64) -> Result<Vec<Value>> {
        Err(Self::not_a_record("f64"))
    }

    fn serialize_char(self, _v: char) -> Result<Vec<Value>> {
        Err(Self::not_a_record("char"))
    }

    fn serialize_str(self, _v: &str) -> Result<Vec<Value>> {
        Err(Self::not_a_record("string"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Vec<Value>> {
        Err(Self::not_a_record("bytes"))
    }

    fn serialize_none(self) -> Result<Vec<Value>> {
        Err(Self::not_a_record("none"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Vec<Value>>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Vec<Value>> {
        Err(Self::not_a_record("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Vec<Value>> {
        Err(Self::not_a_record(name))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Vec<Value>> {
        Err(Self::not_a_record(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Vec<Value>>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<Vec<Value>>
    where
        T: ?Sized + Serialize,
    {
        Err(Self::not_a_record(variant))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<PositionalRow> {
        Ok(PositionalRow {
            values: Vec::with_capacity(len.unwrap_or(self.relation.len())),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<PositionalRow> {
        Ok(PositionalRow {
            values: Vec::with_capacity(len),
        })
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<PositionalRow> {
        self.serialize_tuple(len)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Self::not_a_record(variant))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<NamedRow<'a>> {
        Ok(NamedRow {
            relation: self.relation,
            fields: IndexMap::with_capacity(self.relation.len()),
            current_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<NamedRow<'a>> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Self::not_a_record(variant))
    }
}

impl ser::SerializeSeq for PositionalRow {
    type Ok = Vec<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.values.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Vec<Value>> {
        Ok(self.values)
    }
}

impl ser::SerializeTuple for PositionalRow {
    type Ok = Vec<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Vec<Value>> {
        Ok(self.values)
    }
}

impl ser::SerializeTupleStruct for PositionalRow {
    type Ok = Vec<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Vec<Value>> {
        Ok(self.values)
    }
}

impl NamedRow<'_> {
    fn insert(&mut self, key: String, value: Value) -> Result<()> {
        if self.relation.position(&key).is_none() {
            return Err(Error::custom(format!(
                "no attribute `{}` in relation `{}`",
                key, self.relation.name
            )));
        }
        self.fields.insert(key, value);
        Ok(())
    }

    fn finish(mut self) -> Vec<Value> {
        self.relation
            .attributes
            .iter()
            .map(|attr| self.fields.swap_remove(&attr.name).unwrap_or_default())
            .collect()
    }
}

impl ser::SerializeMap for NamedRow<'_> {
    type Ok = Vec<Value>;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            Value::Text(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            _ => Err(Error::custom("Map keys must be strings")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        let value = to_value(value)?;
        self.insert(key, value)
    }

    fn end(self) -> Result<Vec<Value>> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for NamedRow<'_> {
    type Ok = Vec<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let value = to_value(value)?;
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Vec<Value>> {
        Ok(self.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Attribute;
    use chrono::TimeZone;
    use serde::Serialize;
    use std::collections::BTreeMap;

    fn relation() -> Relation {
        Relation::new("r")
            .with_attribute(Attribute::numeric("id"))
            .unwrap()
            .with_attribute(Attribute::string("name"))
            .unwrap()
            .with_attribute(Attribute::date("seen"))
            .unwrap()
    }

    #[derive(Serialize)]
    struct Row {
        name: String,
        id: u32,
        seen: Option<DateTime<Utc>>,
    }

    #[derive(Serialize)]
    enum Color {
        Red,
        Rgb(u8, u8, u8),
    }

    #[test]
    fn test_scalars() {
        assert_eq!(to_value(&-4i16).unwrap(), Value::Integer(-4));
        assert_eq!(to_value(&2.5f32).unwrap(), Value::Number(2.5));
        assert_eq!(to_value(&'c').unwrap(), Value::from("c"));
        assert_eq!(to_value(&()).unwrap(), Value::Missing);
        assert_eq!(to_value(&Color::Red).unwrap(), Value::from("Red"));
    }

    #[test]
    fn test_unsupported() {
        assert_eq!(
            to_value(&false).unwrap_err(),
            Error::UnsupportedValueType {
                value: "false".to_string(),
                kind: "bool".to_string()
            }
        );
        assert_eq!(
            to_value(&vec![1, 2]).unwrap_err(),
            Error::unsupported_value("[..]", "sequence")
        );
        assert_eq!(
            to_value(&Pair { a: 1 }).unwrap_err(),
            Error::unsupported_value("Pair", "struct")
        );
        assert!(matches!(
            to_value(&Color::Rgb(1, 2, 3)),
            Err(Error::UnsupportedValueType { .. })
        ));
        assert!(matches!(
            to_value(&Bytes),
            Err(Error::UnsupportedValueType { .. })
        ));
    }

    struct Bytes;

    #[derive(Serialize)]
    struct Pair {
        a: u8,
    }

    impl Serialize for Bytes {
        fn serialize<S: ser::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
            s.serialize_bytes(b"ab")
        }
    }

    #[test]
    fn test_struct_is_ordered_by_attribute() {
        let row = Row {
            name: "x".to_string(),
            id: 7,
            seen: Some(Utc.timestamp_opt(1_414_141_414, 0).unwrap()),
        };
        let values = to_row(&relation(), &row).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Unsigned(7),
                Value::from("x"),
                Value::Date(Utc.timestamp_opt(1_414_141_414, 0).unwrap()),
            ]
        );
    }

    #[test]
    fn test_absent_fields_are_missing() {
        let mut map = BTreeMap::new();
        map.insert("name", "only");
        let values = to_row(&relation(), &map).unwrap();
        assert_eq!(values, vec![Value::Missing, Value::from("only"), Value::Missing]);
    }

    #[test]
    fn test_unknown_field_fails() {
        let mut map = BTreeMap::new();
        map.insert("nope", 1);
        assert!(matches!(to_row(&relation(), &map), Err(Error::Custom(_))));
    }

    #[test]
    fn test_tuple_is_positional_and_dates_coerced() {
        let values = to_row(&relation(), &(1, "a", "2014-10-24T09:03:34")).unwrap();
        assert_eq!(values[2], Value::Date(Utc.timestamp_opt(1_414_141_414, 0).unwrap()));

        // leap seconds have no ARFF spelling
        assert!(to_row(&relation(), &(1, "a", "2016-12-31T23:59:60Z")).is_err());

        let err = to_row(&relation(), &(1, "a", "yesterday")).unwrap_err();
        assert_eq!(
            err,
            Error::NotDate {
                line: 0,
                token: "yesterday".to_string()
            }
        );
    }

    #[test]
    fn test_scalar_row_rejected() {
        assert!(to_row(&relation(), &5).is_err());
    }
}
