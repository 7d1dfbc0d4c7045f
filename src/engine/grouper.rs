//! Grouping of variables by dimension signature.

use crate::data::{Dataset, Signature};
use indexmap::IndexMap;

/// Variables sharing each exact dimension signature.
///
/// Groups appear in the order their first variable appears in the dataset,
/// and names within a group keep dataset order.
pub type DimensionGroups = IndexMap<Signature, Vec<String>>;

/// Partition the dataset's variables by their ordered dimension signature.
pub fn group_by_signature(dataset: &Dataset) -> DimensionGroups {
    let mut groups = DimensionGroups::new();
    for var in dataset.variables() {
        groups
            .entry(var.dims.clone())
            .or_default()
            .push(var.name.clone());
    }
    groups
}
