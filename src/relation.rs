//! Relation schema: the named, ordered list of typed attributes.
//!
//! A [`Relation`] is built once, either by the header parser while reading or by
//! the caller before writing, and stays fixed afterwards. Attribute order is
//! significant: it defines the positional mapping of every data row.
//!
//! ## Examples
//!
//! ```rust
//! use serde_arff::{Attribute, DataType, Relation};
//!
//! let relation = Relation::new("weather")
//!     .with_attribute(Attribute::nominal("outlook", ["sunny", "overcast", "rainy"]))
//!     .unwrap()
//!     .with_attribute(Attribute::numeric("temperature"))
//!     .unwrap();
//!
//! assert_eq!(relation.len(), 2);
//! assert_eq!(relation.position("temperature"), Some(1));
//! assert_eq!(relation.attributes[0].data_type, DataType::Nominal);
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared type of an attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Numeric,
    String,
    Date,
    Nominal,
}

impl DataType {
    /// Matches a header type keyword, ignoring case.
    ///
    /// `REAL` and `INTEGER` are accepted as aliases of `NUMERIC`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_arff::DataType;
    ///
    /// assert_eq!(DataType::from_keyword("real"), Some(DataType::Numeric));
    /// assert_eq!(DataType::from_keyword("Date"), Some(DataType::Date));
    /// assert_eq!(DataType::from_keyword("blob"), None);
    /// ```
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "NUMERIC" | "REAL" | "INTEGER" => Some(DataType::Numeric),
            "STRING" => Some(DataType::String),
            "DATE" => Some(DataType::Date),
            "NOMINAL" => Some(DataType::Nominal),
            _ => None,
        }
    }

    /// Returns the canonical keyword used when writing headers.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DataType::Numeric => "NUMERIC",
            DataType::String => "STRING",
            DataType::Date => "DATE",
            DataType::Nominal => "NOMINAL",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One typed column definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub data_type: DataType,
    /// Declared values, populated for nominal attributes only.
    pub nominal_values: Vec<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Attribute {
            name: name.into(),
            data_type,
            nominal_values: Vec::new(),
        }
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Numeric)
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, DataType::String)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, DataType::Date)
    }

    pub fn nominal<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Attribute {
            name: name.into(),
            data_type: DataType::Nominal,
            nominal_values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// The named schema of a dataset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

impl Relation {
    /// Creates a relation with no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Relation {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Appends an attribute, rejecting names that are already declared.
    ///
    /// Names are compared exactly (case-sensitive). The returned error carries
    /// line 0; the header parser replaces it with the input line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_arff::{DataType, Error, Relation};
    ///
    /// let mut relation = Relation::new("r");
    /// relation.add_attribute("a", DataType::Numeric, Vec::new()).unwrap();
    /// let err = relation.add_attribute("a", DataType::String, Vec::new()).unwrap_err();
    /// assert!(matches!(err, Error::AttributeRedefined { .. }));
    /// ```
    pub fn add_attribute(
        &mut self,
        name: impl Into<String>,
        data_type: DataType,
        nominal_values: Vec<String>,
    ) -> Result<()> {
        self.push(Attribute {
            name: name.into(),
            data_type,
            nominal_values,
        })
    }

    /// Builder-style variant of [`Relation::add_attribute`].
    pub fn with_attribute(mut self, attribute: Attribute) -> Result<Self> {
        self.push(attribute)?;
        Ok(self)
    }

    fn push(&mut self, attribute: Attribute) -> Result<()> {
        if self.position(&attribute.name).is_some() {
            return Err(Error::AttributeRedefined {
                line: 0,
                name: attribute.name,
            });
        }
        self.attributes.push(attribute);
        Ok(())
    }

    /// Looks up an attribute by exact name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Returns the column index of the named attribute.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|attr| attr.name == name)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Checks that the relation can be written.
    ///
    /// The relation and every attribute need a non-empty name, and attribute names
    /// must be unique. Line numbers in the errors refer to the header layout the
    /// [`Writer`](crate::Writer) produces: the relation on line 1, a blank line,
    /// then one attribute per line.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::MissingRelationName { line: 1 });
        }
        for (i, attr) in self.attributes.iter().enumerate() {
            let line = i + 3;
            if attr.name.trim().is_empty() {
                return Err(Error::MissingAttributeName { line });
            }
            if self.attributes[..i].iter().any(|a| a.name == attr.name) {
                return Err(Error::AttributeRedefined {
                    line,
                    name: attr.name.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_names_rejected_regardless_of_type() {
        let mut relation = Relation::new("r");
        relation
            .add_attribute("a", DataType::Numeric, Vec::new())
            .unwrap();
        let err = relation
            .add_attribute("a", DataType::Nominal, vec!["x".to_string()])
            .unwrap_err();
        assert_eq!(
            err,
            Error::AttributeRedefined {
                line: 0,
                name: "a".to_string()
            }
        );
        assert_eq!(relation.len(), 1);

        // case-sensitive
        relation
            .add_attribute("A", DataType::Numeric, Vec::new())
            .unwrap();
        assert_eq!(relation.len(), 2);
    }

    #[test]
    fn test_validate() {
        assert!(matches!(
            Relation::new("").validate(),
            Err(Error::MissingRelationName { line: 1 })
        ));

        let relation = Relation {
            name: "r".to_string(),
            attributes: vec![Attribute::numeric("a"), Attribute::string("")],
        };
        assert!(matches!(
            relation.validate(),
            Err(Error::MissingAttributeName { line: 4 })
        ));

        let relation = Relation {
            name: "r".to_string(),
            attributes: vec![Attribute::numeric("a"), Attribute::date("a")],
        };
        assert!(matches!(
            relation.validate(),
            Err(Error::AttributeRedefined { line: 4, .. })
        ));
    }

    #[test]
    fn test_lookup() {
        let relation = Relation::new("r")
            .with_attribute(Attribute::numeric("a"))
            .unwrap()
            .with_attribute(Attribute::nominal("b", ["x", "y"]))
            .unwrap();
        assert_eq!(relation.position("b"), Some(1));
        assert_eq!(
            relation.attribute("b").map(|a| a.nominal_values.len()),
            Some(2)
        );
        assert!(relation.attribute("c").is_none());
    }

    #[test]
    fn test_schema_serializes_to_json() {
        let relation = Relation::new("r")
            .with_attribute(Attribute::nominal("b", ["x"]))
            .unwrap();
        let json = serde_json::to_value(&relation).unwrap();
        assert_eq!(json["name"], "r");
        assert_eq!(json["attributes"][0]["data_type"], "Nominal");
        assert_eq!(json["attributes"][0]["nominal_values"][0], "x");
    }
}
