//! Typed cell values and data rows.
//!
//! This module provides the [`Value`] enum, the closed set of values a data row
//! can hold, and [`DataRow`], one row of values plus its optional weight. It also
//! implements the value codec: [`Attribute::parse_value`] turns a raw token into a
//! [`Value`] according to the attribute's declared type, and the [`Display`]
//! implementation of [`Value`] produces the token written back to a file.
//!
//! ## Parsing
//!
//! | Declared type | Token | Value |
//! |---------------|-------|-------|
//! | any | `?` | [`Value::Missing`] |
//! | `NUMERIC` | `85`, `-0.6`, `1e3` | [`Value::Number`] |
//! | `DATE` | `2014-10-24T09:03:34` | [`Value::Date`] (UTC) |
//! | `STRING`, nominal | `sunny`, `'light blue'` | [`Value::Text`] (unquoted) |
//!
//! ## Examples
//!
//! ```rust
//! use serde_arff::{Attribute, Value};
//!
//! let temperature = Attribute::numeric("temperature");
//! assert_eq!(temperature.parse_value("85").unwrap(), Value::Number(85.0));
//! assert_eq!(temperature.parse_value("?").unwrap(), Value::Missing);
//!
//! assert_eq!(Value::Number(85.0).to_string(), "85");
//! assert_eq!(Value::from("light blue").to_string(), "'light blue'");
//! ```
//!
//! [`Display`]: std::fmt::Display

use crate::quoting::{quote, unquote};
use crate::{Attribute, DataType, Error, Relation, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Date layout used for `DATE` attributes: ISO 8601, second precision, no offset.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// The token standing for a missing value.
pub const MISSING: &str = "?";

/// A single cell of a data row.
///
/// Reading produces [`Value::Missing`], [`Value::Number`], [`Value::Text`] and
/// [`Value::Date`]. The integer variants exist so callers can write whole numbers
/// without going through `f64`.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Missing,
    Number(f64),
    Integer(i64),
    Unsigned(u64),
    Text(String),
    Date(DateTime<Utc>),
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Returns the value as `f64` for any of the numeric variants.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_arff::Value;
    ///
    /// assert_eq!(Value::Number(3.5).as_f64(), Some(3.5));
    /// assert_eq!(Value::Integer(-2).as_f64(), Some(-2.0));
    /// assert_eq!(Value::from("x").as_f64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            Value::Unsigned(u) => Some(*u as f64),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Date(dt) => Some(dt),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Missing => "missing",
            Value::Number(_) => "f64",
            Value::Integer(_) => "i64",
            Value::Unsigned(_) => "u64",
            Value::Text(_) => "string",
            Value::Date(_) => "date",
        }
    }
}

/// Formats a float in plain decimal notation, without trailing fractional zeros.
pub(crate) fn format_number(f: f64) -> String {
    let mut s = f.to_string();
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    s
}

pub(crate) fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format(DATE_FORMAT).to_string()
}

/// Checks the fixed zero-padded `YYYY-MM-DDTHH:MM:SS` shape before chrono sees
/// the token. Seconds stay below 60.
fn has_date_layout(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() == 19
        && bytes.iter().enumerate().all(|(i, &b)| match i {
            4 | 7 => b == b'-',
            10 => b == b'T',
            13 | 16 => b == b':',
            _ => b.is_ascii_digit(),
        })
        && bytes[17] < b'6'
}

pub(crate) fn parse_date(token: &str) -> Option<DateTime<Utc>> {
    if !has_date_layout(token) {
        return None;
    }
    NaiveDateTime::parse_from_str(token, DATE_FORMAT)
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => f.write_str(MISSING),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Unsigned(u) => write!(f, "{}", u),
            Value::Text(s) => f.write_str(&quote(s)),
            Value::Date(dt) => f.write_str(&format_date(dt)),
        }
    }
}

impl Attribute {
    /// Parses a raw token according to this attribute's declared type.
    ///
    /// Nominal values are not checked against the declared set; see
    /// [`ReaderOptions::with_strict_nominal`](crate::ReaderOptions::with_strict_nominal)
    /// for the opt-in check. Errors carry line 0; the reader replaces it with
    /// the input line.
    pub fn parse_value(&self, token: &str) -> Result<Value> {
        let token = token.trim();
        if token == MISSING {
            return Ok(Value::Missing);
        }

        match self.data_type {
            DataType::Numeric => {
                token
                    .parse::<f64>()
                    .map(Value::Number)
                    .map_err(|_| Error::NotNumeric {
                        line: 0,
                        token: token.to_string(),
                    })
            }
            DataType::Date => parse_date(token).map(Value::Date).ok_or_else(|| {
                Error::NotDate {
                    line: 0,
                    token: token.to_string(),
                }
            }),
            DataType::String | DataType::Nominal => Ok(Value::Text(unquote(token))),
        }
    }

    /// Returns `true` if `value` is one of the declared nominal values.
    ///
    /// Missing values, non-nominal attributes and nominal attributes with an empty
    /// value list accept anything.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        if self.data_type != DataType::Nominal || self.nominal_values.is_empty() {
            return true;
        }
        match value {
            Value::Missing => true,
            Value::Text(s) => self.nominal_values.iter().any(|v| v == s),
            _ => false,
        }
    }
}

/// One data row: a value per attribute, plus an optional weight.
///
/// A weight of `0.0` means "not weighted" and is not written out.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataRow {
    pub values: Vec<Value>,
    pub weight: f64,
}

impl DataRow {
    pub fn new(values: Vec<Value>) -> Self {
        DataRow {
            values,
            weight: 0.0,
        }
    }

    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    #[inline]
    #[must_use]
    pub fn is_weighted(&self) -> bool {
        self.weight != 0.0
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

static MISSING_VALUE: Value = Value::Missing;

/// A whole ARFF document: the relation and every data row, in file order.
///
/// Returned by [`from_str`](crate::from_str) and friends, consumed by
/// [`to_string`](crate::to_string) and [`to_writer`](crate::to_writer).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub relation: Relation,
    pub rows: Vec<DataRow>,
}

impl Dataset {
    pub fn new(relation: Relation) -> Self {
        Dataset {
            relation,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: DataRow) {
        self.rows.push(row);
    }

    /// Values of the named attribute, one per row.
    ///
    /// Returns `None` if the relation has no such attribute.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.relation.position(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.values.get(index).unwrap_or(&MISSING_VALUE))
                .collect(),
        )
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Missing => serializer.serialize_none(),
            Value::Number(f) => serializer.serialize_f64(*f),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Unsigned(u) => serializer.serialize_u64(*u),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Date(dt) => serializer.serialize_str(&format_date(dt)),
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
                formatter.write_str("a number, a string or nothing")
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Value, E> {
                Ok(Value::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Value, E> {
                Ok(Value::Unsigned(value))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Value, E> {
                Ok(Value::Number(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Value, E>
            where
                E: de::Error,
            {
                Ok(Value::Text(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Value, E> {
                Ok(Value::Text(value))
            }

            fn visit_none<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::Missing)
            }

            fn visit_unit<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::Missing)
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Unsigned(value as u64)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Unsigned(value as u64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Unsigned(value as u64)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Unsigned(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Date(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Missing, Into::into)
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| Error::custom(format!("expected number, found {:?}", value)))
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Text(s) => Ok(s),
            _ => Err(Error::custom(format!("expected string, found {:?}", value))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_parse_numeric() {
        let attr = Attribute::numeric("n");
        assert_eq!(attr.parse_value("85").unwrap(), Value::Number(85.0));
        assert_eq!(attr.parse_value("-0.6").unwrap(), Value::Number(-0.6));
        assert_eq!(attr.parse_value("1e3").unwrap(), Value::Number(1000.0));
        assert_eq!(attr.parse_value("?").unwrap(), Value::Missing);
        assert_eq!(
            attr.parse_value("abc").unwrap_err(),
            Error::NotNumeric {
                line: 0,
                token: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_parse_date() {
        let attr = Attribute::date("d");
        assert_eq!(
            attr.parse_value("2014-10-24T09:03:34").unwrap(),
            Value::Date(date(1_414_141_414))
        );
        assert_eq!(attr.parse_value("?").unwrap(), Value::Missing);
        for bad in [
            "2014-10-24",
            "2014-10-24T09:03:34Z",
            "2014-10-24T09:03:34.5",
            "2014-13-01T00:00:00",
            "2014-1-2T3:4:5",
            "+2014-10-24T09:03:34",
            "2014-10-24T23:59:60",
            "2014-10-24 09:03:34",
            "2014/10/24T09:03:34",
        ] {
            assert!(
                matches!(attr.parse_value(bad), Err(Error::NotDate { .. })),
                "{} should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_parse_text_unquotes_and_ignores_nominal_set() {
        let attr = Attribute::nominal("n", ["a", "b"]);
        assert_eq!(
            attr.parse_value("'light blue'").unwrap(),
            Value::from("light blue")
        );
        assert_eq!(attr.parse_value("zzz").unwrap(), Value::from("zzz"));
        assert_eq!(attr.parse_value("'?'").unwrap(), Value::from("?"));
        assert_eq!(attr.parse_value("?").unwrap(), Value::Missing);

        let attr = Attribute::string("s");
        assert_eq!(
            attr.parse_value(r"'ruby\nred'").unwrap(),
            Value::from("ruby\nred")
        );
    }

    #[test]
    fn test_accepts() {
        let attr = Attribute::nominal("n", ["a", "b"]);
        assert!(attr.accepts(&Value::from("a")));
        assert!(attr.accepts(&Value::Missing));
        assert!(!attr.accepts(&Value::from("c")));
        assert!(Attribute::nominal("e", Vec::<String>::new()).accepts(&Value::from("c")));
        assert!(Attribute::string("s").accepts(&Value::from("c")));
    }

    #[test]
    fn test_encode() {
        assert_eq!(Value::Missing.to_string(), "?");
        assert_eq!(Value::Number(85.0).to_string(), "85");
        assert_eq!(Value::Number(10.0).to_string(), "10");
        assert_eq!(Value::Number(2.3).to_string(), "2.3");
        assert_eq!(Value::Number(-0.6).to_string(), "-0.6");
        assert_eq!(Value::Number(1e21).to_string(), "1000000000000000000000");
        assert_eq!(Value::Integer(-7).to_string(), "-7");
        assert_eq!(Value::Unsigned(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(Value::from("?").to_string(), "'?'");
        assert_eq!(Value::from("ruby\nred").to_string(), r"'ruby\nred'");
        assert_eq!(
            Value::Date(date(1_414_141_414)).to_string(),
            "2014-10-24T09:03:34"
        );
    }

    #[test]
    fn test_format_number_strips_fraction_zeros_only() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(5.3), "5.3");
    }

    #[test]
    fn test_serde_json_bridge() {
        let row = DataRow::new(vec![
            Value::from("sunny"),
            Value::Number(85.0),
            Value::Missing,
            Value::Date(date(0)),
        ])
        .with_weight(2.0);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(
            json,
            r#"{"values":["sunny",85.0,null,"1970-01-01T00:00:00"],"weight":2.0}"#
        );

        let back: DataRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back.values[1], Value::Number(85.0));
        assert_eq!(back.values[2], Value::Missing);
        assert_eq!(back.weight, 2.0);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(Some(3i32)), Value::Integer(3));
        assert_eq!(Value::from(None::<f64>), Value::Missing);
        assert_eq!(f64::try_from(Value::Unsigned(4)).unwrap(), 4.0);
        assert!(String::try_from(Value::Number(1.0)).is_err());
    }
}
