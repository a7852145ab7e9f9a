//! Building a CSV export by hand and from serde records.
//!
//! Run with: cargo run --example basic

use chrono::NaiveDate;
use csv_export::{CsvExport, Encoding, ExportOptions, Separator};
use serde::Serialize;
use std::error::Error;

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    email: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut export = CsvExport::new();

    export.add_row();
    export.set_field("Region", "Los Angeles, USA");
    export.set_field("Sales", 100000);
    export.set_field("Date Opened", NaiveDate::from_ymd_opt(2003, 12, 31).unwrap());

    export.add_row();
    export.set_field("Region", "Canberra \"in\" Australia");
    export.set_field("Sales", 50000);
    export.set_field(
        "Date Opened",
        NaiveDate::from_ymd_opt(2005, 1, 1)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap(),
    );

    println!("Manual rows:\n{}", export.export());

    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: Some("alice@example.com".to_string()),
        },
        User {
            id: 43,
            name: "Smith; Bob".to_string(),
            email: None,
        },
    ];

    // Semicolon separated, as expected by spreadsheet tools in many European locales
    let options = ExportOptions::new()
        .with_separator(Separator::Semicolon)
        .with_encoding(Encoding::Utf16Le);
    let mut records = CsvExport::with_options(options)?;
    records.add_rows(&users)?;

    println!("Records:\n{}", records.export());

    let path = std::env::temp_dir().join("csv_export_demo.csv");
    records.export_to_file(&path)?;
    println!("Wrote {} bytes to {}", records.export_to_bytes().len(), path.display());

    Ok(())
}
