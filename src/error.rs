//! Error types for CSV export.
//!
//! Building a table in memory almost never fails. The few failure classes are:
//!
//! - **Configuration**: an empty separator is rejected when the table is built
//! - **Record mapping**: a record passed to [`CsvExport::add_rows`] has a shape
//!   that cannot be flattened into a single row
//! - **I/O**: the writer or file behind an export failed
//!
//! Calling [`CsvExport::set_field`] before [`CsvExport::add_row`] is not an
//! error; the value is dropped.
//!
//! ## Examples
//!
//! ```rust
//! use csv_export::{CsvExport, Error, ExportOptions, Separator};
//!
//! let options = ExportOptions::new().with_separator(Separator::Custom(String::new()));
//! let result = CsvExport::with_options(options);
//! assert!(matches!(result, Err(Error::InvalidSeparator(_))));
//! ```
//!
//! [`CsvExport::add_rows`]: crate::CsvExport::add_rows
//! [`CsvExport::set_field`]: crate::CsvExport::set_field
//! [`CsvExport::add_row`]: crate::CsvExport::add_row

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while building or exporting a table.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error while writing the export to a file or writer
    #[error("IO error: {0}")]
    Io(String),

    /// The configured separator cannot delimit fields
    #[error("Invalid separator: {0}")]
    InvalidSeparator(String),

    /// A record or record field that cannot be mapped onto a row
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error raised by a `Serialize` implementation
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an invalid separator error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use csv_export::Error;
    ///
    /// let err = Error::invalid_separator("separator must not be empty");
    /// assert!(err.to_string().contains("must not be empty"));
    /// ```
    pub fn invalid_separator(msg: &str) -> Self {
        Error::InvalidSeparator(msg.to_string())
    }

    /// Creates an unsupported type error for values that cannot become a row or a cell.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
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

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion_keeps_message() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only volume");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("read-only volume"));
    }

    #[test]
    fn test_serde_custom_error() {
        let err = <Error as serde::ser::Error>::custom("bad record");
        assert_eq!(err.to_string(), "Error: bad record");
    }
}
