//! # csv_export
//!
//! A small, permissive CSV builder for producing files that spreadsheet tools
//! open correctly on the first try.
//!
//! ## Key Features
//!
//! - **Sparse rows**: set any columns on any row; columns appear in first-seen
//!   order and missing cells are left empty
//! - **Excel friendly**: `sep=` preamble, CRLF line endings, UTF-8 BOM and a
//!   30,000 character cap per cell
//! - **Separator-aware quoting**: values are quoted when they contain the
//!   configured separator, a double quote or a line break
//! - **Serde records**: any flat `#[derive(Serialize)]` struct becomes a row
//! - **Streaming**: lines are produced lazily and can be written straight to
//!   any `std::io::Write`
//!
//! ## Quick Start
//!
//! ```rust
//! use csv_export::CsvExport;
//!
//! let mut export = CsvExport::new();
//!
//! export.add_row();
//! export.set_field("Region", "Los Angeles, USA");
//! export.set_field("Sales", 100000);
//!
//! export.add_row();
//! export.set_field("Region", "Canberra \"in\" Australia");
//! export.set_field("Sales", 50000);
//!
//! let csv = export.export();
//! assert_eq!(
//!     csv,
//!     "sep=,\r\nRegion,Sales\r\n\"Los Angeles, USA\",100000\r\n\"Canberra \"\"in\"\" Australia\",50000\r\n"
//! );
//! ```
//!
//! ### Exporting Records
//!
//! ```rust
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Product {
//!     id: u32,
//!     name: String,
//! }
//!
//! let products = vec![
//!     Product { id: 1, name: "Widget".to_string() },
//!     Product { id: 2, name: "Gadget, large".to_string() },
//! ];
//!
//! let csv = csv_export::to_string(&products).unwrap();
//! assert_eq!(csv, "sep=,\r\nid,name\r\n1,Widget\r\n2,\"Gadget, large\"\r\n");
//! ```
//!
//! ## Output Format
//!
//! ```text
//! sep=<separator>            optional, on by default
//! <header>                   optional, on by default, omitted with no columns
//! <row 1>
//! ...
//! ```
//!
//! Every line ends with `\r\n`. Byte and file exports start with the
//! byte-order marker of the chosen [`Encoding`] (UTF-8 by default).
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: `trace`
//! for dropped fields, `debug` for table construction and exports. Install any
//! `log` backend to see them.

pub mod emit;
pub mod encoding;
pub mod error;
pub mod format;
pub mod macros;
pub mod options;
pub mod record;
pub mod registry;
pub mod row;
pub mod table;
pub mod value;

pub use emit::{Lines, LINE_ENDING};
pub use encoding::Encoding;
pub use error::{Error, Result};
pub use format::{escape, format_value, MAX_FIELD_CHARS};
pub use options::{ExportOptions, Separator};
pub use registry::ColumnRegistry;
pub use row::Row;
pub use table::CsvExport;
pub use value::{Number, Value};

use serde::Serialize;
use std::io;

/// Exports serde records as CSV text with default options.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let csv = csv_export::to_string(&[Point { x: 1, y: 2 }]).unwrap();
/// assert_eq!(csv, "sep=,\r\nx,y\r\n1,2\r\n");
/// ```
///
/// # Errors
///
/// Returns an error if a record cannot be mapped onto a row.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<I, T>(records: I) -> Result<String>
where
    I: IntoIterator<Item = T>,
    T: Serialize,
{
    to_string_with_options(records, ExportOptions::default())
}

/// Exports serde records as CSV text with custom options.
///
/// # Examples
///
/// ```rust
/// use csv_export::{to_string_with_options, ExportOptions, Separator};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let options = ExportOptions::new()
///     .with_separator(Separator::Tab)
///     .with_preamble(false);
/// let tsv = to_string_with_options(&[Point { x: 1, y: 2 }], options).unwrap();
/// assert_eq!(tsv, "x\ty\r\n1\t2\r\n");
/// ```
///
/// # Errors
///
/// Returns an error if the options are invalid or a record cannot be mapped.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<I, T>(records: I, options: ExportOptions) -> Result<String>
where
    I: IntoIterator<Item = T>,
    T: Serialize,
{
    let mut export = CsvExport::with_options(options)?;
    export.add_rows(records)?;
    Ok(export.export())
}

/// Exports serde records as BOM-prefixed UTF-8 bytes.
///
/// # Errors
///
/// Returns an error if a record cannot be mapped onto a row.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_bytes<I, T>(records: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = T>,
    T: Serialize,
{
    let mut export = CsvExport::new();
    export.add_rows(records)?;
    Ok(export.export_to_bytes())
}

/// Exports serde records to a writer with default options.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// csv_export::to_writer(&mut buffer, &[Point { x: 1, y: 2 }]).unwrap();
/// assert!(buffer.starts_with(&[0xEF, 0xBB, 0xBF]));
/// ```
///
/// # Errors
///
/// Returns an error if a record cannot be mapped or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, I, T>(writer: W, records: I) -> Result<()>
where
    W: io::Write,
    I: IntoIterator<Item = T>,
    T: Serialize,
{
    to_writer_with_options(writer, records, ExportOptions::default())
}

/// Exports serde records to a writer with custom options.
///
/// # Errors
///
/// Returns an error if the options are invalid, a record cannot be mapped, or
/// writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, I, T>(writer: W, records: I, options: ExportOptions) -> Result<()>
where
    W: io::Write,
    I: IntoIterator<Item = T>,
    T: Serialize,
{
    let mut export = CsvExport::with_options(options)?;
    export.add_rows(records)?;
    export.export_to_writer(writer)
}
