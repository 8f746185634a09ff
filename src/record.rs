//! Name-keyed view of a data row.
//!
//! This module provides [`Record`], an [`IndexMap`] from attribute name to
//! [`Value`] that keeps the relation's attribute order. It is what
//! [`Reader::records`](crate::Reader::records) yields and what row
//! deserialization works from.
//!
//! ## Examples
//!
//! ```rust
//! use serde_arff::{Attribute, DataRow, Record, Relation, Value};
//!
//! let relation = Relation::new("weather")
//!     .with_attribute(Attribute::string("outlook"))
//!     .unwrap()
//!     .with_attribute(Attribute::numeric("temperature"))
//!     .unwrap();
//! let row = DataRow::new(vec![Value::from("sunny"), Value::Number(85.0)]);
//!
//! let record = Record::from_row(&relation, row);
//! assert_eq!(record.get("temperature"), Some(&Value::Number(85.0)));
//!
//! let keys: Vec<_> = record.keys().cloned().collect();
//! assert_eq!(keys, vec!["outlook", "temperature"]);
//! ```

use crate::{DataRow, Relation, Value};
use indexmap::IndexMap;

/// One data row keyed by attribute name, in attribute order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: IndexMap<String, Value>,
    weight: f64,
}

impl Record {
    /// Creates an empty, unweighted record.
    #[must_use]
    pub fn new() -> Self {
        Record {
            fields: IndexMap::new(),
            weight: 0.0,
        }
    }

    /// Pairs each value of `row` with its attribute name.
    ///
    /// Values beyond the relation's attribute count are dropped.
    #[must_use]
    pub fn from_row(relation: &Relation, row: DataRow) -> Self {
        let fields = relation
            .attributes
            .iter()
            .map(|attr| attr.name.clone())
            .zip(row.values)
            .collect();
        Record {
            fields,
            weight: row.weight,
        }
    }

    /// Converts back into a positional row, in insertion order.
    #[must_use]
    pub fn into_row(self) -> DataRow {
        DataRow {
            values: self.fields.into_values().collect(),
            weight: self.weight,
        }
    }

    pub fn insert(&mut self, name: String, value: Value) -> Option<Value> {
        self.fields.insert(name, value)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.fields.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.fields.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.fields.iter()
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
