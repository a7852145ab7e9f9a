//! A single row of formatted fields.

/// One row's fields, stored by column position.
///
/// Fields are already formatted when stored. The backing vector only grows
/// as far as the highest position written; positions beyond it, including
/// columns registered after the row was filled, read back as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<String>,
}

impl Row {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Row {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Stores `field` at `position`, padding any gap with empty fields.
    pub(crate) fn set(&mut self, position: usize, field: String) {
        if position >= self.fields.len() {
            self.fields.resize_with(position + 1, String::new);
        }
        self.fields[position] = field;
    }

    /// Returns the formatted field at `position`, or `""` past the stored end.
    #[must_use]
    pub fn get(&self, position: usize) -> &str {
        self.fields.get(position).map_or("", String::as_str)
    }

    /// Number of positions physically stored in this row.
    #[must_use]
    pub fn stored_len(&self) -> usize {
        self.fields.len()
    }
}
