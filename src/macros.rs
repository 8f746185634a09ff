/// Builds a [`DataRow`](crate::DataRow) from a list of values.
///
/// Each element goes through [`Value::from`](crate::Value), so numbers, strings,
/// dates and `Option`s can be mixed freely. A trailing `; weight` sets the row
/// weight.
///
/// # Examples
///
/// ```rust
/// use serde_arff::{row, Value};
///
/// let r = row!["sunny", 85, None::<f64>];
/// assert_eq!(r.values, vec![Value::from("sunny"), Value::Integer(85), Value::Missing]);
/// assert!(!r.is_weighted());
///
/// let r = row!["rainy", 70.5; 2.0];
/// assert_eq!(r.weight, 2.0);
/// ```
#[macro_export]
macro_rules! row {
    // Weighted row
    ($($value:expr),+ ; $weight:expr) => {
        $crate::DataRow::new(vec![$($crate::Value::from($value)),+]).with_weight($weight)
    };

    ($($value:expr),* $(,)?) => {
        $crate::DataRow::new(vec![$($crate::Value::from($value)),*])
    };
}
