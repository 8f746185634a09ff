//! Builds a relation in code and writes it to stdout.
//!
//! Run with: cargo run --example write_relation

use chrono::{TimeZone, Utc};
use serde_arff::{row, Attribute, Relation, Terminator, Writer, WriterOptions};
use std::error::Error;
use std::io;

fn main() -> Result<(), Box<dyn Error>> {
    let relation = Relation::new("data relation")
        .with_attribute(Attribute::nominal("outlook", ["sunny", "overcast", "rainy"]))?
        .with_attribute(Attribute::numeric("temperature"))?
        .with_attribute(Attribute::date("observed"))?
        .with_attribute(Attribute::string("note"))?;

    let stdout = io::stdout();
    let options = WriterOptions::new().with_terminator(Terminator::Lf);
    let mut writer = Writer::with_options(stdout.lock(), &relation, options)?;

    let observed = Utc.with_ymd_and_hms(2014, 10, 24, 9, 3, 34).single();
    writer.append(&row!["sunny", 85, observed, "clear skies"])?;
    writer.append(&row!["overcast", 83.5, None::<f64>, "it's cloudy"])?;
    writer.append(&row!["rainy", None::<f64>, observed, "?"; 2.5])?;

    let rows = writer.rows();
    writer.close()?;
    eprintln!("wrote {} rows", rows);
    Ok(())
}
