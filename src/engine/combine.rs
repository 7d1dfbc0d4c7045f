//! Single-table mode over every dimension.

use super::broadcast::broadcast_to;
use super::{IndexAxis, Table};
use crate::data::{Dataset, Dimension};
use crate::error::Result;

/// One table indexed by the cartesian product of the dataset's dimensions.
///
/// Only dimensions some variable depends on take part, in declaration
/// order; an unused axis would repeat every row. Each variable is repeated
/// along the dimensions it does not depend on, so scalars become constant
/// columns.
pub fn combine(dataset: &Dataset) -> Result<Table> {
    dataset.validate()?;

    let dims: Vec<&Dimension> = dataset
        .dimensions()
        .filter(|dim| dataset.variables().any(|v| v.dims.contains(&dim.name)))
        .collect();
    let mut table = Table::new(dims.iter().copied().map(IndexAxis::from).collect());
    for var in dataset.variables() {
        table.push_column(var.name.as_str(), broadcast_to(var, &dims)?)?;
    }

    tracing::debug!(
        rows = table.row_count(),
        columns = table.columns().len(),
        "combined dataset"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testing::sample_dataset;

    #[test]
    fn indexes_by_all_dimensions() {
        let table = combine(&sample_dataset()).unwrap();
        assert_eq!(table.row_count(), 12);
        assert_eq!(
            table.header(),
            ["time", "height", "temperature", "humidity", "other", "static"]
        );
        assert_eq!(
            table.column_values("humidity").unwrap()[..5],
            [60.5, 60.5, 60.5, 60.5, 65.5]
        );
        assert_eq!(table.column_values("other").unwrap()[4..8], [1.0, 2.0, 3.0, 4.0]);
        assert!(table.column_values("static").unwrap().iter().all(|&v| v == 1.5));
    }

    #[test]
    fn unused_dimensions_do_not_repeat_rows() {
        let ds = sample_dataset();
        let mut builder = Dataset::builder().dimension("strlen", vec![0.0; 5]);
        for dim in ds.dimensions() {
            builder = builder.with_dimension(dim.clone());
        }
        for var in ds.variables() {
            builder = builder.variable(var.clone());
        }
        let table = combine(&builder.build().unwrap()).unwrap();

        assert_eq!(table.row_count(), 12);
        assert_eq!(
            table.header(),
            ["time", "height", "temperature", "humidity", "other", "static"]
        );
    }
}
