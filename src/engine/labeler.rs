//! Column-name suffixes derived from coordinate values.

use std::fmt::Display;

/// Label each coordinate value as `{value}{unit}`.
///
/// The unit is dropped when absent, empty, or the dimensionless `"1"`.
/// Labels keep the order of `values`. Uniqueness is not checked here; the
/// flattener reports collisions.
pub fn labels<T: Display>(values: impl IntoIterator<Item = T>, unit: Option<&str>) -> Vec<String> {
    let unit = match unit {
        Some("1") | None => "",
        Some(u) => u,
    };
    values
        .into_iter()
        .map(|value| format!("{}{}", value, unit))
        .collect()
}
