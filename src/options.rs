//! Configuration options for reading and writing.
//!
//! - [`ReaderOptions`]: how strictly data rows are checked
//! - [`WriterOptions`]: how output lines are terminated
//!
//! ## Examples
//!
//! ```rust
//! use serde_arff::{ReaderOptions, Terminator, WriterOptions};
//!
//! let reader = ReaderOptions::new().with_strict_nominal(true);
//! assert!(reader.strict_nominal);
//!
//! let writer = WriterOptions::new().with_terminator(Terminator::CrLf);
//! assert_eq!(writer.terminator.as_str(), "\r\n");
//! ```

/// Line terminator written after every header and data line.
///
/// Readers accept both forms regardless of this setting.
///
/// # Examples
///
/// ```rust
/// use serde_arff::Terminator;
///
/// assert_eq!(Terminator::Lf.as_str(), "\n");
/// assert_eq!(Terminator::CrLf.as_str(), "\r\n");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Terminator {
    #[default]
    Lf,
    CrLf,
}

impl Terminator {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Terminator::Lf => "\n",
            Terminator::CrLf => "\r\n",
        }
    }
}

/// Options for [`Reader`](crate::Reader).
#[derive(Clone, Debug, Default)]
pub struct ReaderOptions {
    /// Reject nominal values that are not in the attribute's declared set.
    ///
    /// Off by default: declared nominal values are descriptive only.
    pub strict_nominal: bool,
}

impl ReaderOptions {
    /// Creates default options (permissive nominal values).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables nominal membership checks.
    ///
    /// When enabled, a text value for a nominal attribute with a non-empty
    /// declared set fails with [`Error::NotNominal`](crate::Error::NotNominal)
    /// unless it matches one of the declared values exactly. Missing values and
    /// attributes declared as `{}` are always accepted.
    #[must_use]
    pub fn with_strict_nominal(mut self, strict: bool) -> Self {
        self.strict_nominal = strict;
        self
    }
}

/// Options for [`Writer`](crate::Writer).
#[derive(Clone, Debug, Default)]
pub struct WriterOptions {
    pub terminator: Terminator,
}

impl WriterOptions {
    /// Creates default options (`\n` line endings).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }
}
