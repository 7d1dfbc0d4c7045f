//! Data reading and representation.
//!
//! This module holds the in-memory dataset model the conversion engine
//! works on, and the netCDF reader that produces it.

mod attributes;
mod dataset;
mod reader;
mod signature;
#[cfg(test)]
pub(crate) mod testing;

pub use attributes::{AttrValue, Attributes};
pub use dataset::{Dataset, DatasetBuilder, Dimension, Variable};
pub use reader::{load_dataset, read_dataset, Loaded, ReadIssue, ReadIssueKind};
pub use signature::Signature;
