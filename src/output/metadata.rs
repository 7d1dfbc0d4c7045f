//! Metadata side files.

use crate::data::{Attributes, Dataset};
use crate::error::Result;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;

/// Structural description of a dataset, without its values.
#[derive(Debug, Serialize)]
pub struct Metadata<'a> {
    /// Dimension lengths.
    pub dims: IndexMap<&'a str, usize>,
    /// Coordinate variables.
    pub coords: IndexMap<&'a str, Entry<'a>>,
    /// Data variables.
    pub data_vars: IndexMap<&'a str, Entry<'a>>,
    /// Dataset attributes.
    pub attrs: &'a Attributes,
}

/// Description of one variable.
#[derive(Debug, Serialize)]
pub struct Entry<'a> {
    /// Dimension names.
    pub dims: Vec<&'a str>,
    /// Attributes, unmodified.
    pub attrs: &'a Attributes,
    /// Array shape.
    pub shape: Vec<usize>,
}

impl<'a> Metadata<'a> {
    /// Describe a dataset.
    pub fn of(dataset: &'a Dataset) -> Self {
        let dims = dataset
            .dimensions()
            .map(|d| (d.name.as_str(), d.len()))
            .collect();
        let coords = dataset
            .dimensions()
            .map(|d| {
                let entry = Entry {
                    dims: vec![d.name.as_str()],
                    attrs: &d.attributes,
                    shape: vec![d.len()],
                };
                (d.name.as_str(), entry)
            })
            .collect();
        let data_vars = dataset
            .variables()
            .map(|v| {
                let entry = Entry {
                    dims: v.dims.iter().collect(),
                    attrs: &v.attributes,
                    shape: v.data.shape().to_vec(),
                };
                (v.name.as_str(), entry)
            })
            .collect();

        Self {
            dims,
            coords,
            data_vars,
            attrs: dataset.attributes(),
        }
    }
}

/// Write the dataset's metadata as pretty-printed JSON.
pub fn dump_metadata(dataset: &Dataset, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&Metadata::of(dataset))?;
    std::fs::write(path, json)?;
    Ok(())
}
