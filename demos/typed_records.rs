//! Writes Serde structs to an ARFF file and reads them back.
//!
//! Run with: cargo run --example typed_records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_arff::{Attribute, Reader, Relation, Writer};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
enum Species {
    #[serde(rename = "iris setosa")]
    Setosa,
    #[serde(rename = "iris virginica")]
    Virginica,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Flower {
    species: Species,
    petal_length: f64,
    petal_width: Option<f64>,
    measured: DateTime<Utc>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let relation = Relation::new("iris")
        .with_attribute(Attribute::numeric("petal_length"))?
        .with_attribute(Attribute::numeric("petal_width"))?
        .with_attribute(Attribute::date("measured"))?
        .with_attribute(Attribute::nominal("species", ["iris setosa", "iris virginica"]))?;

    let flowers = vec![
        Flower {
            species: Species::Setosa,
            petal_length: 1.4,
            petal_width: Some(0.2),
            measured: "2016-03-01T12:00:00Z".parse()?,
        },
        Flower {
            species: Species::Virginica,
            petal_length: 6.0,
            petal_width: None,
            measured: "2016-03-02T08:30:15Z".parse()?,
        },
    ];

    let dir = std::env::temp_dir().join("serde_arff_typed_records");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("iris.arff");

    let mut writer = Writer::create(&path, &relation)?;
    for (i, flower) in flowers.iter().enumerate() {
        // weight the second observation double
        writer.append_record(flower, if i == 1 { 2.0 } else { 0.0 })?;
    }
    writer.close()?;

    println!("{}", std::fs::read_to_string(&path)?);

    let mut reader = Reader::open(&path)?;
    let back: Vec<Flower> = reader.deserialize().collect::<Result<_, _>>()?;
    assert_eq!(back, flowers);
    println!("✓ Round-trip successful ({} flowers)", back.len());

    Ok(())
}
