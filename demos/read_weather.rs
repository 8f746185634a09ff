//! Streams the weather dataset row by row.
//!
//! Run with: cargo run --example read_weather [path/to/file.arff]

use serde_arff::{Reader, Value};
use std::error::Error;

const DEFAULT_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/weather.arff");

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_PATH.to_string());
    let mut reader = Reader::open(&path)?;

    let relation = reader.relation().clone();
    println!("Relation: {}", relation.name);
    for attr in &relation.attributes {
        println!("  {} ({})", attr.name, attr.data_type);
    }
    println!();

    let mut missing = 0;
    while let Some(row) = reader.read_row()? {
        missing += row.values.iter().filter(|v| v.is_missing()).count();
        let cells: Vec<String> = row.values.iter().map(Value::to_string).collect();
        if row.is_weighted() {
            println!("{}  (weight {})", cells.join(" "), row.weight);
        } else {
            println!("{}", cells.join(" "));
        }
    }

    println!("\nRead up to line {}, {} missing values", reader.line(), missing);
    reader.close()?;
    Ok(())
}
