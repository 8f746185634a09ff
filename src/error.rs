//! Error types for ARFF reading and writing.
//!
//! Every failure the crate can produce is a variant of [`Error`]. Variants raised
//! while scanning input carry the 1-based line number they occurred on, together
//! with the offending token or name, so messages point straight at the bad input.
//!
//! ## Error Categories
//!
//! - **Header errors**: [`Error::BadSyntax`], the `Missing*` variants,
//!   [`Error::InvalidAttributeType`], [`Error::AttributeRedefined`] and
//!   [`Error::UnexpectedEof`] (the header block ended before `@DATA`)
//! - **Row errors**: [`Error::AttributeMismatch`], [`Error::InvalidWeight`],
//!   [`Error::NotNumeric`], [`Error::NotDate`], [`Error::NotNominal`]
//! - **Write errors**: [`Error::UnsupportedValueType`] plus the header and row
//!   checks above, reported against the output line they would have produced
//! - **I/O errors**: failures of the underlying stream
//!
//! ## Examples
//!
//! ```rust
//! use serde_arff::{Error, Reader};
//!
//! let err = Reader::new("@relation x\nnot a keyword\n".as_bytes()).err().unwrap();
//! assert!(matches!(err, Error::BadSyntax { line: 2, .. }));
//! assert_eq!(err.line(), Some(2));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while reading or writing ARFF.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// The stream ended inside the header block, before `@DATA`
    #[error("line {line}: unexpected end of input, expected @DATA")]
    UnexpectedEof { line: usize },

    /// A header line starts with an unknown keyword
    #[error("line {line}: bad syntax, unexpected `{keyword}`")]
    BadSyntax { line: usize, keyword: String },

    #[error("line {line}: missing relation name")]
    MissingRelationName { line: usize },

    #[error("line {line}: missing attribute name")]
    MissingAttributeName { line: usize },

    #[error("line {line}: missing data-type for attribute `{name}`")]
    MissingAttributeType { line: usize, name: String },

    #[error("line {line}: invalid data-type `{data_type}` for attribute `{name}`")]
    InvalidAttributeType {
        line: usize,
        name: String,
        data_type: String,
    },

    #[error("line {line}: redefined attribute `{name}`")]
    AttributeRedefined { line: usize, name: String },

    /// A row has too few values, or more than one trailing token
    #[error("line {line}: attribute mismatch, expected {expected} values, found {found}")]
    AttributeMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid weight definition `{token}`")]
    InvalidWeight { line: usize, token: String },

    #[error("line {line}: value `{token}` is not numeric")]
    NotNumeric { line: usize, token: String },

    #[error("line {line}: value `{token}` is not an ISO8601 date")]
    NotDate { line: usize, token: String },

    /// Only raised when strict nominal checking is enabled
    #[error("line {line}: value `{token}` is not declared for nominal attribute `{attribute}`")]
    NotNominal {
        line: usize,
        token: String,
        attribute: String,
    },

    /// A value offered for writing has no textual representation
    #[error("invalid value {value} ({kind})")]
    UnsupportedValueType { value: String, kind: String },

    /// Custom error, mostly raised through serde
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Returns the 1-based line number the error refers to, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_arff::Error;
    ///
    /// assert_eq!(Error::MissingRelationName { line: 1 }.line(), Some(1));
    /// assert_eq!(Error::custom("boom").line(), None);
    /// ```
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::UnexpectedEof { line }
            | Error::BadSyntax { line, .. }
            | Error::MissingRelationName { line }
            | Error::MissingAttributeName { line }
            | Error::MissingAttributeType { line, .. }
            | Error::InvalidAttributeType { line, .. }
            | Error::AttributeRedefined { line, .. }
            | Error::AttributeMismatch { line, .. }
            | Error::InvalidWeight { line, .. }
            | Error::NotNumeric { line, .. }
            | Error::NotDate { line, .. }
            | Error::NotNominal { line, .. } => Some(*line),
            Error::Io(_)
            | Error::UnsupportedValueType { .. }
            | Error::Custom(_) => None,
        }
    }

    /// Re-targets a line-bearing error at `line`.
    ///
    /// Value parsing happens without knowledge of the input position; the reader
    /// stamps the real line number on afterwards.
    pub(crate) fn at_line(mut self, at: usize) -> Self {
        match &mut self {
            Error::UnexpectedEof { line }
            | Error::BadSyntax { line, .. }
            | Error::MissingRelationName { line }
            | Error::MissingAttributeName { line }
            | Error::MissingAttributeType { line, .. }
            | Error::InvalidAttributeType { line, .. }
            | Error::AttributeRedefined { line, .. }
            | Error::AttributeMismatch { line, .. }
            | Error::InvalidWeight { line, .. }
            | Error::NotNumeric { line, .. }
            | Error::NotDate { line, .. }
            | Error::NotNominal { line, .. } => *line = at,
            Error::Io(_) | Error::UnsupportedValueType { .. } | Error::Custom(_) => {}
        }
        self
    }

    /// Creates an unsupported value error, reporting the value and its kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_arff::Error;
    ///
    /// let err = Error::unsupported_value(true, "bool");
    /// assert_eq!(err.to_string(), "invalid value true (bool)");
    /// ```
    pub fn unsupported_value<T: fmt::Display>(value: T, kind: &str) -> Self {
        Error::UnsupportedValueType {
            value: value.to_string(),
            kind: kind.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for stream reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
