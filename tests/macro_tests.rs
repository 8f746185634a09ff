use chrono::{TimeZone, Utc};
use serde_arff::{row, Attribute, DataRow, Relation, Value, Writer};

#[test]
fn test_row_macro_empty() {
    let r = row![];
    assert!(r.is_empty());
    assert!(!r.is_weighted());
}

#[test]
fn test_row_macro_mixed_values() {
    let seen = Utc.with_ymd_and_hms(2014, 10, 24, 9, 3, 34).unwrap();
    let r = row![1.5f32, -2i64, 3u16, "text", String::from("owned"), seen, None::<i32>];
    assert_eq!(
        r.values,
        vec![
            Value::Number(1.5),
            Value::Integer(-2),
            Value::Unsigned(3),
            Value::from("text"),
            Value::from("owned"),
            Value::Date(seen),
            Value::Missing,
        ]
    );
}

#[test]
fn test_row_macro_expressions() {
    let base = 10;
    let label = "x";
    let r = row![base * 2, format!("{}-{}", label, base); f64::from(base) / 4.0];
    assert_eq!(r, DataRow::new(vec![Value::Integer(20), Value::from("x-10")]).with_weight(2.5));
}

#[test]
fn test_row_macro_feeds_writer() {
    let relation = Relation::new("r")
        .with_attribute(Attribute::string("s"))
        .unwrap()
        .with_attribute(Attribute::numeric("n"))
        .unwrap();
    let mut writer = Writer::new(Vec::new(), &relation).unwrap();
    writer.append(&row!["a b", Some(1)]).unwrap();
    writer.append(&row!["?", None::<f64>; 0.25]).unwrap();
    let out = String::from_utf8(writer.into_inner()).unwrap();
    assert!(out.ends_with("@DATA\n'a b',1\n'?',?,{0.25}\n"));
}
