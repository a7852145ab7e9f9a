/// Adds a row to a [`CsvExport`](crate::CsvExport) and sets its fields.
///
/// Each value goes through `Into<Value>`, exactly as with
/// [`set_field`](crate::CsvExport::set_field).
///
/// ```rust
/// use csv_export::{csv_row, CsvExport};
///
/// let mut export = CsvExport::new();
/// csv_row!(export, { "Region" => "Los Angeles, USA", "Sales" => 100000 });
/// csv_row!(export, { "Region" => "Canberra" });
///
/// assert_eq!(export.row_count(), 2);
/// assert_eq!(export.lines().nth(3).unwrap(), "Canberra,");
/// ```
#[macro_export]
macro_rules! csv_row {
    // Handle a row with no fields
    ($table:expr, {}) => {{
        let table: &mut $crate::CsvExport = &mut $table;
        table.add_row();
    }};

    ($table:expr, { $($name:expr => $value:expr),+ $(,)? }) => {{
        let table: &mut $crate::CsvExport = &mut $table;
        table.add_row();
        $(
            table.set_field($name, $value);
        )+
    }};
}

#[cfg(test)]
mod tests {
    use crate::CsvExport;

    #[test]
    fn test_csv_row_macro() {
        let mut export = CsvExport::new();
        csv_row!(export, { "id" => 1, "name" => "Alice" });
        csv_row!(export, {});
        csv_row!(export, { "name" => "Bob", });

        let lines: Vec<_> = export.lines().collect();
        assert_eq!(lines, vec!["sep=,", "id,name", "1,Alice", ",", ",Bob"]);
    }

    #[test]
    fn test_csv_row_macro_through_reference() {
        fn fill(export: &mut CsvExport) {
            csv_row!(*export, { "n" => None::<i32> });
        }

        let mut export = CsvExport::new();
        fill(&mut export);
        assert_eq!(export.export(), "sep=,\r\nn\r\n\r\n");
    }
}
