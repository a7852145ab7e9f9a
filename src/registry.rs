//! Ordered column registry.
//!
//! [`ColumnRegistry`] remembers every column name a table has seen and the
//! position it was given. It wraps an [`IndexSet`], so:
//!
//! - **Stable positions**: a name keeps the index it got on first use
//! - **First-seen order**: iteration follows registration order
//! - **Constant-time lookup**: re-registering a known name is a hash probe
//!
//! There is no removal. Rows store fields by position, so dropping a column
//! would shift every later column in every row.
//!
//! ## Examples
//!
//! ```rust
//! use csv_export::ColumnRegistry;
//!
//! let mut registry = ColumnRegistry::new();
//! assert_eq!(registry.ensure("Region"), 0);
//! assert_eq!(registry.ensure("Sales"), 1);
//! assert_eq!(registry.ensure("Region"), 0);
//!
//! let names: Vec<_> = registry.names().collect();
//! assert_eq!(names, vec!["Region", "Sales"]);
//! ```

use indexmap::IndexSet;

/// Ordered, deduplicated set of column names with stable positions.
#[derive(Debug, Clone, Default)]
pub struct ColumnRegistry(IndexSet<String>);

impl ColumnRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        ColumnRegistry(IndexSet::new())
    }

    /// Returns the position of `name`, registering it at the end if unseen.
    pub fn ensure(&mut self, name: &str) -> usize {
        if let Some(position) = self.0.get_index_of(name) {
            return position;
        }
        self.0.insert_full(name.to_string()).0
    }

    /// Returns the position of `name` if it has been registered.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.get_index_of(name)
    }

    /// Returns the number of registered columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no column has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the column names in position order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    /// Returns `(position, name)` pairs in position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.names().enumerate()
    }
}
