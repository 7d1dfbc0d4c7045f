//! Multi-table mode: one table per dimension signature.

use super::{group_by_signature, IndexAxis, Table};
use crate::data::{Dataset, Signature, Variable};
use crate::error::{NcflattenError, Result};

/// How the output key of the scalar (zero-dimension) table is formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalarKey {
    /// Reuse the base name unchanged.
    #[default]
    BaseName,
    /// Append an empty dimension suffix, giving `"{base}."`. Matches output
    /// trees written by converters that always add the suffix separator.
    EmptySuffix,
}

/// Output key for a signature: the base suffixed with the dot-joined
/// dimension names.
pub fn output_key(base: &str, signature: &Signature, scalar_key: ScalarKey) -> String {
    match (signature.is_empty(), scalar_key) {
        (true, ScalarKey::BaseName) => base.to_string(),
        (true, ScalarKey::EmptySuffix) => format!("{}.", base),
        (false, _) => format!("{}.{}", base, signature.key_suffix()),
    }
}

/// Split a dataset into one table per distinct dimension signature.
///
/// Tables come in the order their signature first appears among the
/// dataset's variables. Each is keyed by [`output_key`] with the default
/// [`ScalarKey`].
pub fn partition(dataset: &Dataset, base: &str) -> Result<Vec<(String, Table)>> {
    partition_with(dataset, base, ScalarKey::default())
}

/// [`partition`] with an explicit scalar key convention.
pub fn partition_with(
    dataset: &Dataset,
    base: &str,
    scalar_key: ScalarKey,
) -> Result<Vec<(String, Table)>> {
    dataset.validate()?;

    group_by_signature(dataset)
        .iter()
        .map(|(signature, names)| -> Result<(String, Table)> {
            let table = if signature.is_empty() {
                scalar_table(dataset, names)?
            } else {
                signature_table(dataset, signature, names)?
            };
            let key = output_key(base, signature, scalar_key);
            tracing::debug!(
                key = %key,
                rows = table.row_count(),
                columns = names.len(),
                "partitioned group"
            );
            Ok((key, table))
        })
        .collect()
}

/// Table indexed by the cartesian product of `signature`'s coordinates.
fn signature_table(dataset: &Dataset, signature: &Signature, names: &[String]) -> Result<Table> {
    let first = names.first().map(String::as_str).unwrap_or_default();
    let dims = dataset.resolve(first, signature)?;
    let mut table = Table::new(dims.into_iter().map(IndexAxis::from).collect());
    for name in names {
        let var = lookup(dataset, name)?;
        table.push_column(name.as_str(), var.data.clone())?;
    }
    Ok(table)
}

/// Single-row table holding every scalar variable.
///
/// A product over zero dimensions still has one (empty) tuple, so the
/// table has one row rather than none.
pub fn scalar_table(dataset: &Dataset, names: &[String]) -> Result<Table> {
    let mut table = Table::new(Vec::new());
    for name in names {
        let var = lookup(dataset, name)?;
        if var.ndim() != 0 {
            return Err(NcflattenError::RankMismatch {
                variable: name.clone(),
                rank: var.data.ndim(),
                expected: 0,
            });
        }
        table.push_column(name.as_str(), var.data.clone())?;
    }
    Ok(table)
}

pub(crate) fn lookup<'a>(dataset: &'a Dataset, name: &str) -> Result<&'a Variable> {
    dataset
        .variable(name)
        .ok_or_else(|| NcflattenError::UnknownVariable(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testing::sample_dataset;
    use crate::data::{Dimension, Variable};
    use std::collections::HashSet;

    #[test]
    fn one_table_per_signature() {
        let tables = partition(&sample_dataset(), "base").unwrap();
        let keys: Vec<&str> = tables.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["base.time.height", "base.time", "base.height", "base"]);

        let shapes: Vec<(usize, Vec<&str>)> = tables
            .iter()
            .map(|(_, t)| (t.row_count(), t.header()))
            .collect();
        assert_eq!(
            shapes,
            [
                (12, vec!["time", "height", "temperature"]),
                (3, vec!["time", "humidity"]),
                (4, vec!["height", "other"]),
                (1, vec!["static"]),
            ]
        );
    }

    #[test]
    fn no_variable_is_dropped() {
        let ds = sample_dataset();
        let tables = partition(&ds, "base").unwrap();
        let columns: HashSet<&str> = tables.iter().flat_map(|(_, t)| t.column_names()).collect();
        let variables: HashSet<&str> = ds.variables().map(|v| v.name.as_str()).collect();
        assert_eq!(columns, variables);
    }

    #[test]
    fn values_follow_row_major_order() {
        let tables = partition(&sample_dataset(), "base").unwrap();
        let (_, table) = &tables[0];
        assert_eq!(
            table.index_column(0)[..5],
            [1649116800.0, 1649116800.0, 1649116800.0, 1649116800.0, 1649145600.0]
        );
        assert_eq!(table.index_column(1)[..5], [0.0, 10.0, 20.0, 30.0, 0.0]);
        assert_eq!(
            table.column_values("temperature").unwrap()[..5],
            [88.0, 80.0, 75.0, 70.0, 89.0]
        );
    }

    #[test]
    fn scalars_share_one_row() {
        let ds = Dataset::builder()
            .variable(Variable::scalar("a", 1.0))
            .variable(Variable::scalar("b", 2.0))
            .variable(Variable::scalar("c", 3.0))
            .build()
            .unwrap();
        let tables = partition(&ds, "out").unwrap();
        assert_eq!(tables.len(), 1);
        let (key, table) = &tables[0];
        assert_eq!(key, "out");
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.row(&[]), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn scalar_key_conventions() {
        let scalar = Signature::scalar();
        assert_eq!(output_key("a/b", &scalar, ScalarKey::BaseName), "a/b");
        assert_eq!(output_key("a/b", &scalar, ScalarKey::EmptySuffix), "a/b.");
        let sig = Signature::new(["time", "height"]);
        assert_eq!(output_key("a/b", &sig, ScalarKey::EmptySuffix), "a/b.time.height");
    }

    #[test]
    fn repeated_runs_are_identical() {
        let ds = sample_dataset();
        assert_eq!(partition(&ds, "x").unwrap(), partition(&ds, "x").unwrap());
    }

    #[test]
    fn row_count_is_product_of_lengths() {
        let ds = Dataset::builder()
            .dimension("a", vec![0.0, 1.0])
            .dimension("b", vec![0.0, 1.0, 2.0])
            .with_dimension(Dimension::new("c", vec![0.0; 5]))
            .variable(Variable::new(
                "v",
                Signature::new(["c", "a", "b"]),
                ndarray::ArrayD::zeros(ndarray::IxDyn(&[5, 2, 3])),
            ))
            .build()
            .unwrap();
        let tables = partition(&ds, "base").unwrap();
        assert_eq!(tables[0].0, "base.c.a.b");
        assert_eq!(tables[0].1.row_count(), 30);
    }
}
