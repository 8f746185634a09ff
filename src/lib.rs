//! # serde_arff
//!
//! A reader and writer for ARFF (Attribute-Relation File Format) datasets, with
//! Serde bridges for typed rows.
//!
//! ## What is ARFF?
//!
//! ARFF is the line-oriented text format used by Weka and related tools to
//! exchange labeled datasets. A file declares a named relation with typed
//! attributes, followed by one comma-separated row per line. See [`format`] for
//! the full syntax.
//!
//! ## Key Features
//!
//! - **Streaming**: [`Reader`] pulls one row at a time; [`Writer`] pushes one row
//!   at a time and flushes after each
//! - **Typed values**: numeric, string, date and nominal attributes map onto the
//!   closed [`Value`] enum
//! - **Serde compatible**: rows deserialize into your own structs and tuples, and
//!   any `Serialize` record can be appended
//! - **Precise errors**: every parse error carries the 1-based input line
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! serde_arff = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Reading rows
//!
//! ```rust
//! use serde_arff::{Reader, Value};
//!
//! let input = "\
//! @relation weather
//! @attribute outlook {sunny,overcast,rainy}
//! @attribute temperature numeric
//! @data
//! sunny,85
//! rainy,?
//! ";
//!
//! let mut reader = Reader::new(input.as_bytes()).unwrap();
//! for row in &mut reader {
//!     let row = row.unwrap();
//!     println!("{:?}", row.values);
//! }
//! assert_eq!(reader.relation().attributes.len(), 2);
//! ```
//!
//! ### Typed records
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_arff::Reader;
//!
//! #[derive(Deserialize, Debug)]
//! struct Weather {
//!     outlook: String,
//!     temperature: Option<f64>,
//! }
//!
//! let input = "@relation w\n@attribute outlook string\n@attribute temperature real\n@data\nsunny,85\n";
//! let mut reader = Reader::new(input.as_bytes()).unwrap();
//! let first: Weather = reader.deserialize().next().unwrap().unwrap();
//! assert_eq!(first.temperature, Some(85.0));
//! ```
//!
//! ### Writing
//!
//! ```rust
//! use serde_arff::{row, Attribute, Relation, Writer};
//!
//! let relation = Relation::new("scores")
//!     .with_attribute(Attribute::string("player"))
//!     .unwrap()
//!     .with_attribute(Attribute::numeric("points"))
//!     .unwrap();
//!
//! let mut out = Vec::new();
//! let mut writer = Writer::new(&mut out, &relation).unwrap();
//! writer.append(&row!["ada", 12]).unwrap();
//! writer.close().unwrap();
//!
//! assert!(String::from_utf8(out).unwrap().ends_with("@DATA\nada,12\n"));
//! ```
//!
//! ## Logging
//!
//! The crate reports header parsing, row counts and read failures through
//! [`tracing`](https://docs.rs/tracing). It never installs a subscriber.

pub mod de;
pub mod error;
pub mod format;
pub mod header;
pub mod macros;
pub mod options;
pub mod quoting;
pub mod reader;
pub mod record;
pub mod relation;
pub mod scanner;
pub mod ser;
pub mod value;
pub mod writer;

pub use de::{from_record, from_value};
pub use error::{Error, Result};
pub use options::{ReaderOptions, Terminator, WriterOptions};
pub use reader::Reader;
pub use record::Record;
pub use relation::{Attribute, DataType, Relation};
pub use ser::{to_value, RecordSerializer, ValueSerializer};
pub use value::{DataRow, Dataset, Value};
pub use writer::Writer;

use std::io;

/// Serializes a whole dataset into an ARFF string.
///
/// # Examples
///
/// ```rust
/// use serde_arff::{row, to_string, Attribute, Dataset, Relation};
///
/// let mut dataset = Dataset::new(
///     Relation::new("tiny").with_attribute(Attribute::numeric("x")).unwrap(),
/// );
/// dataset.push(row![1.5]);
///
/// assert_eq!(
///     to_string(&dataset).unwrap(),
///     "@RELATION tiny\n\n@ATTRIBUTE x NUMERIC\n\n@DATA\n1.5\n"
/// );
/// ```
///
/// # Errors
///
/// Returns an error if the relation is malformed or a row does not match it.
pub fn to_string(dataset: &Dataset) -> Result<String> {
    to_string_with_options(dataset, WriterOptions::default())
}

pub fn to_string_with_options(dataset: &Dataset, options: WriterOptions) -> Result<String> {
    let mut buf = Vec::with_capacity(128 + dataset.rows.len() * 32);
    to_writer_with_options(&mut buf, dataset, options)?;
    String::from_utf8(buf).map_err(|e| Error::io(&e.to_string()))
}

/// Writes a whole dataset to `writer`.
///
/// # Errors
///
/// Returns an error if the relation is malformed, a row does not match it, or
/// writing fails.
pub fn to_writer<W>(writer: W, dataset: &Dataset) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, dataset, WriterOptions::default())
}

pub fn to_writer_with_options<W>(writer: W, dataset: &Dataset, options: WriterOptions) -> Result<()>
where
    W: io::Write,
{
    let mut writer = Writer::with_options(writer, &dataset.relation, options)?;
    for row in &dataset.rows {
        writer.append(row)?;
    }
    writer.close()
}

/// Reads a whole ARFF document from a string.
///
/// # Examples
///
/// ```rust
/// use serde_arff::{from_str, Value};
///
/// let dataset = from_str("@relation r\n@attribute x real\n@data\n1\n?\n").unwrap();
/// assert_eq!(dataset.relation.name, "r");
/// assert_eq!(dataset.column("x").unwrap(), vec![&Value::Number(1.0), &Value::Missing]);
/// ```
///
/// # Errors
///
/// Returns the first header or row error, with its line number.
pub fn from_str(s: &str) -> Result<Dataset> {
    from_reader(s.as_bytes())
}

/// Reads a whole ARFF document from any byte source.
///
/// # Errors
///
/// Returns the first header or row error, with its line number, and
/// [`Error::Io`] if the source fails or is not valid UTF-8.
pub fn from_reader<R>(reader: R) -> Result<Dataset>
where
    R: io::Read,
{
    let mut reader = Reader::new(io::BufReader::new(reader))?;
    let rows = reader.read_all()?;
    Ok(Dataset {
        relation: reader.relation().clone(),
        rows,
    })
}

/// Reads a whole ARFF document from bytes.
///
/// # Errors
///
/// Same as [`from_reader`].
pub fn from_slice(v: &[u8]) -> Result<Dataset> {
    from_reader(v)
}
