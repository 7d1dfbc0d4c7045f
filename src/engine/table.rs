//! Two-dimensional tables produced by the engine.

use super::RowIndex;
use crate::data::Dimension;
use crate::error::{NcflattenError, Result};
use ndarray::{Array1, ArrayD, IxDyn};

/// One axis of a table's row index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexAxis {
    /// Dimension name, used as the column header.
    pub name: String,
    /// Coordinate values along the axis.
    pub values: Array1<f64>,
}

impl From<&Dimension> for IndexAxis {
    fn from(dim: &Dimension) -> Self {
        Self {
            name: dim.name.clone(),
            values: dim.coords.clone(),
        }
    }
}

/// A named value column, shaped like its table's index.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column header.
    pub name: String,
    /// Values; element `[i, j, ..]` belongs to the row with index positions `(i, j, ..)`.
    pub data: ArrayD<f64>,
}

/// A table whose rows are the cartesian product of its index axes.
///
/// Every column holds one value per row. Rows are enumerated with the first
/// index axis varying slowest, and a table without index axes has exactly
/// one row.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    index: Vec<IndexAxis>,
    columns: Vec<Column>,
}

impl Table {
    /// Create a table with the given index axes and no columns.
    pub fn new(index: Vec<IndexAxis>) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    /// Append a column. Its shape must equal the index lengths.
    pub fn push_column(&mut self, name: impl Into<String>, data: ArrayD<f64>) -> Result<()> {
        let name = name.into();
        let expected = self.shape();
        if data.shape() != expected.as_slice() {
            return Err(NcflattenError::ShapeMismatch {
                variable: name,
                shape: data.shape().to_vec(),
                expected,
            });
        }
        self.columns.push(Column { name, data });
        Ok(())
    }

    /// Index axes, outermost first.
    pub fn index(&self) -> &[IndexAxis] {
        &self.index
    }

    /// Value columns in insertion order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a value column.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Lengths of the index axes.
    pub fn shape(&self) -> Vec<usize> {
        self.index.iter().map(|axis| axis.values.len()).collect()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.shape().iter().product()
    }

    /// Row positions in output order.
    pub fn rows(&self) -> RowIndex {
        RowIndex::new(self.shape())
    }

    /// Names of the index axes followed by the value columns.
    pub fn header(&self) -> Vec<&str> {
        self.index
            .iter()
            .map(|axis| axis.name.as_str())
            .chain(self.column_names())
            .collect()
    }

    /// Names of the value columns.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Values of one row: index coordinates first, then the columns.
    pub fn row(&self, position: &[usize]) -> Vec<f64> {
        let coords = self
            .index
            .iter()
            .zip(position)
            .map(|(axis, &i)| axis.values[i]);
        let values = self.columns.iter().map(|c| c.data[IxDyn(position)]);
        coords.chain(values).collect()
    }

    /// The coordinates of one index axis, expanded to one value per row.
    pub fn index_column(&self, axis: usize) -> Vec<f64> {
        let values = &self.index[axis].values;
        self.rows().map(|position| values[position[axis]]).collect()
    }

    /// The values of a column, one per row.
    pub fn column_values(&self, name: &str) -> Option<Vec<f64>> {
        self.column(name).map(|c| c.data.iter().copied().collect())
    }

    /// Every column of the table (index axes first), one value per row.
    pub fn materialize(&self) -> Vec<(&str, Vec<f64>)> {
        let index = self
            .index
            .iter()
            .enumerate()
            .map(|(i, axis)| (axis.name.as_str(), self.index_column(i)));
        let columns = self
            .columns
            .iter()
            .map(|c| (c.name.as_str(), c.data.iter().copied().collect::<Vec<f64>>()));
        index.chain(columns).collect()
    }
}
