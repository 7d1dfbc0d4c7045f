//! Dimension partitioning and flattening.
//!
//! Turns an N-dimensional [`Dataset`](crate::data::Dataset) into strictly
//! two-dimensional tables. Three modes are offered:
//!
//! - [`partition`]: one table per distinct dimension signature, indexed by
//!   the cartesian product of that signature's coordinates.
//! - [`flatten`]: one table indexed by a primary dimension, with a second
//!   dimension exploded into labeled columns.
//! - [`combine`]: one table indexed by every dimension of the dataset.
//!
//! The engine is synchronous and holds no state between calls.

mod broadcast;
mod cartesian;
mod combine;
mod facet;
mod grouper;
mod labeler;
mod partition;
mod table;

pub use cartesian::RowIndex;
pub use combine::combine;
pub use facet::{
    classify, flatten, Facet, Flattened, LabelCollision, RejectReason, Rejection,
    DEFAULT_PRIMARY_DIMENSION,
};
pub use grouper::{group_by_signature, DimensionGroups};
pub use labeler::labels;
pub use partition::{output_key, partition, partition_with, scalar_table, ScalarKey};
pub use table::{Column, IndexAxis, Table};
