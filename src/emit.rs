//! Line emission.
//!
//! [`Lines`] walks a table once and yields its logical lines without line
//! terminators:
//!
//! 1. `sep=<separator>` when the preamble is enabled
//! 2. the escaped column names when the header is enabled and at least one
//!    column exists
//! 3. one line per row, in insertion order, with exactly one cell per
//!    registered column
//!
//! Every materialized form (text, bytes, writer, file) is built by draining a
//! `Lines` and terminating each line with CRLF, whatever the host platform.

use crate::format::escape;
use crate::{ColumnRegistry, Encoding, ExportOptions, Result, Row};
use std::io;
use std::iter::FusedIterator;

/// Line terminator used by every export.
pub const LINE_ENDING: &str = "\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Preamble,
    Header,
    Rows(usize),
    Done,
}

/// Lazy, single-pass sequence of a table's output lines.
///
/// Created by [`CsvExport::lines`](crate::CsvExport::lines).
///
/// # Examples
///
/// ```rust
/// use csv_export::CsvExport;
///
/// let mut export = CsvExport::new();
/// export.add_row();
/// export.set_field("Id", 1);
///
/// let lines: Vec<String> = export.lines().collect();
/// assert_eq!(lines, vec!["sep=,", "Id", "1"]);
/// ```
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    options: &'a ExportOptions,
    registry: &'a ColumnRegistry,
    rows: &'a [Row],
    stage: Stage,
}

impl<'a> Lines<'a> {
    pub(crate) fn new(
        options: &'a ExportOptions,
        registry: &'a ColumnRegistry,
        rows: &'a [Row],
    ) -> Self {
        Lines {
            options,
            registry,
            rows,
            stage: Stage::Preamble,
        }
    }

    fn separator(&self) -> &'a str {
        self.options.separator.as_str()
    }

    fn header_line(&self) -> String {
        let separator = self.separator();
        let mut line = String::new();
        for (i, name) in self.registry.names().enumerate() {
            if i > 0 {
                line.push_str(separator);
            }
            line.push_str(&escape(name, separator));
        }
        line
    }

    fn row_line(&self, row: &Row) -> String {
        let separator = self.separator();
        let mut line = String::with_capacity(row.stored_len() * 8);
        for position in 0..self.registry.len() {
            if position > 0 {
                line.push_str(separator);
            }
            line.push_str(row.get(position));
        }
        line
    }
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stage {
                Stage::Preamble => {
                    self.stage = Stage::Header;
                    if self.options.include_preamble {
                        return Some(format!("sep={}", self.separator()));
                    }
                }
                Stage::Header => {
                    self.stage = Stage::Rows(0);
                    if self.options.include_header && !self.registry.is_empty() {
                        return Some(self.header_line());
                    }
                }
                Stage::Rows(index) => match self.rows.get(index) {
                    Some(row) => {
                        self.stage = Stage::Rows(index + 1);
                        return Some(self.row_line(row));
                    }
                    None => self.stage = Stage::Done,
                },
                Stage::Done => return None,
            }
        }
    }
}

impl FusedIterator for Lines<'_> {}

/// Joins lines into CRLF-terminated text.
pub(crate) fn collect_text(lines: Lines<'_>) -> String {
    let mut output = String::with_capacity(256);
    for line in lines {
        output.push_str(&line);
        output.push_str(LINE_ENDING);
    }
    output
}

/// Encodes lines into a byte buffer that starts with the encoding's BOM.
pub(crate) fn collect_bytes(lines: Lines<'_>, encoding: Encoding) -> Vec<u8> {
    let mut output = Vec::with_capacity(256);
    output.extend_from_slice(encoding.bom());
    for line in lines {
        encode_line(&line, encoding, &mut output);
    }
    output
}

/// Streams the BOM and encoded lines to `writer`, one line at a time.
pub(crate) fn write_lines<W: io::Write>(
    lines: Lines<'_>,
    writer: &mut W,
    encoding: Encoding,
) -> Result<()> {
    writer.write_all(encoding.bom())?;

    let mut buf = Vec::with_capacity(256);
    for line in lines {
        buf.clear();
        encode_line(&line, encoding, &mut buf);
        writer.write_all(&buf)?;
    }
    writer.flush()?;
    Ok(())
}

#[inline]
fn encode_line(line: &str, encoding: Encoding, out: &mut Vec<u8>) {
    encoding.encode_into(line, out);
    encoding.encode_into(LINE_ENDING, out);
}
