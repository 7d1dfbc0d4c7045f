//! Faceted mode: a single table indexed by the primary dimension.
//!
//! Every variable is placed onto rows of the primary dimension. Variables
//! that also vary along one secondary dimension are exploded into one
//! column per secondary coordinate, named `{variable}_{value}{unit}`.
//! Variables that cannot be placed this way are rejected individually and
//! returned alongside the table; they never fail the conversion.

use super::broadcast::broadcast_to;
use super::partition::lookup;
use super::{group_by_signature, labels, IndexAxis, Table};
use crate::data::{Dataset, Dimension, Signature, Variable};
use crate::error::{NcflattenError, Result};
use ndarray::{ArrayD, Axis};
use std::collections::HashSet;
use std::fmt;

/// Primary dimension used when none is configured.
pub const DEFAULT_PRIMARY_DIMENSION: &str = "time";

/// How a variable is placed onto the primary-dimension index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Facet<'a> {
    /// `()`: one constant column.
    Broadcast,
    /// `(primary,)`: one column, unchanged.
    PassThrough,
    /// `(secondary,)`: repeated along the primary dimension, then exploded.
    BroadcastExplode {
        /// The dimension to explode.
        secondary: &'a str,
    },
    /// `(primary, secondary)` or `(secondary, primary)`: exploded.
    Explode {
        /// The dimension to explode.
        secondary: &'a str,
        /// Whether the primary dimension comes second and must be moved first.
        transpose: bool,
    },
    /// Not representable on a primary-dimension index.
    Reject(RejectReason),
}

/// Why a variable was left out of a faceted table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// More than two dimensions.
    TooManyDimensions(usize),
    /// Two dimensions, neither of them the primary one.
    MissingPrimary(String),
    /// Both dimensions are the primary one.
    RepeatedPrimary(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyDimensions(n) => {
                write!(f, "has {} dimensions; at most 2 are supported", n)
            },
            Self::MissingPrimary(primary) => write!(
                f,
                "is 2-dimensional but does not vary along primary dimension '{}'",
                primary
            ),
            Self::RepeatedPrimary(primary) => {
                write!(f, "repeats primary dimension '{}'", primary)
            },
        }
    }
}

/// A variable excluded from the faceted table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// Variable name.
    pub variable: String,
    /// The variable's actual dimensions.
    pub dims: Signature,
    /// Why it was excluded.
    pub reason: RejectReason,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {}", self.variable, self.dims, self.reason)
    }
}

/// A synthesized column whose name was already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCollision {
    /// The duplicated column name.
    pub column: String,
    /// The variable whose column collided.
    pub variable: String,
}

/// Result of [`flatten`].
#[derive(Debug, Clone, PartialEq)]
pub struct Flattened {
    /// The table, indexed by the primary dimension only.
    pub table: Table,
    /// Variables left out, in dataset order.
    pub rejected: Vec<Rejection>,
    /// Duplicate column names. Both columns are kept.
    pub collisions: Vec<LabelCollision>,
}

/// Decide how a signature maps onto the primary dimension.
pub fn classify<'a>(signature: &'a Signature, primary: &str) -> Facet<'a> {
    let names = signature.names();
    match (names.len(), signature.position(primary)) {
        (n, _) if n > 2 => Facet::Reject(RejectReason::TooManyDimensions(n)),
        (0, _) => Facet::Broadcast,
        (1, Some(_)) => Facet::PassThrough,
        (1, None) => Facet::BroadcastExplode {
            secondary: names[0].as_str(),
        },
        (_, Some(pos)) => {
            let secondary = names[1 - pos].as_str();
            if secondary == primary {
                Facet::Reject(RejectReason::RepeatedPrimary(primary.to_string()))
            } else {
                Facet::Explode {
                    secondary,
                    transpose: pos == 1,
                }
            }
        },
        (_, None) => Facet::Reject(RejectReason::MissingPrimary(primary.to_string())),
    }
}

/// Flatten a dataset into one table indexed by `primary`.
///
/// Columns follow the dimension-group order, with exploded columns in
/// secondary-coordinate order. Unsupported variables are listed in
/// [`Flattened::rejected`] and left out of the table.
pub fn flatten(dataset: &Dataset, primary: &str) -> Result<Flattened> {
    dataset.validate()?;

    let primary_dim = dataset
        .dimension(primary)
        .ok_or_else(|| NcflattenError::MissingPrimaryDimension(primary.to_string()))?;

    let mut builder = FacetBuilder {
        dataset,
        primary: primary_dim,
        table: Table::new(vec![IndexAxis::from(primary_dim)]),
        seen: HashSet::from([primary.to_string()]),
        rejected: Vec::new(),
        collisions: Vec::new(),
    };

    for (signature, names) in &group_by_signature(dataset) {
        let facet = classify(signature, primary);
        for name in names {
            builder.place(lookup(dataset, name)?, &facet)?;
        }
    }

    let FacetBuilder {
        table,
        mut rejected,
        collisions,
        ..
    } = builder;

    // Report rejections in dataset order rather than group order.
    rejected.sort_by_key(|r| {
        dataset
            .variables()
            .position(|v| v.name == r.variable)
            .unwrap_or(usize::MAX)
    });

    tracing::debug!(
        primary,
        rows = table.row_count(),
        columns = table.columns().len(),
        rejected = rejected.len(),
        "flattened dataset"
    );

    Ok(Flattened {
        table,
        rejected,
        collisions,
    })
}

struct FacetBuilder<'a> {
    dataset: &'a Dataset,
    primary: &'a Dimension,
    table: Table,
    seen: HashSet<String>,
    rejected: Vec<Rejection>,
    collisions: Vec<LabelCollision>,
}

impl<'a> FacetBuilder<'a> {
    fn place(&mut self, var: &Variable, facet: &Facet<'_>) -> Result<()> {
        match facet {
            Facet::Broadcast => {
                let column = broadcast_to(var, &[self.primary])?;
                self.push(var, var.name.clone(), column)
            },
            Facet::PassThrough => self.push(var, var.name.clone(), var.data.clone()),
            Facet::BroadcastExplode { secondary } => {
                let secondary = self.secondary(var, secondary)?;
                let wide = broadcast_to(var, &[self.primary, secondary])?;
                self.explode(var, secondary, wide)
            },
            Facet::Explode {
                secondary,
                transpose,
            } => {
                let secondary = self.secondary(var, secondary)?;
                let wide = if *transpose {
                    var.data.clone().reversed_axes()
                } else {
                    var.data.clone()
                };
                self.explode(var, secondary, wide)
            },
            Facet::Reject(reason) => {
                tracing::debug!(
                    variable = %var.name,
                    dims = %var.dims,
                    "{}",
                    reason
                );
                self.rejected.push(Rejection {
                    variable: var.name.clone(),
                    dims: var.dims.clone(),
                    reason: reason.clone(),
                });
                Ok(())
            },
        }
    }

    fn secondary(&self, var: &Variable, name: &str) -> Result<&'a Dimension> {
        self.dataset
            .dimension(name)
            .ok_or_else(|| NcflattenError::undeclared_dimension(&var.name, name))
    }

    /// Split a `(primary, secondary)` array into one column per secondary value.
    fn explode(&mut self, var: &Variable, secondary: &Dimension, wide: ArrayD<f64>) -> Result<()> {
        let suffixes = labels(secondary.coords.iter(), secondary.unit());
        for (j, suffix) in suffixes.into_iter().enumerate() {
            let column = wide.index_axis(Axis(1), j).to_owned();
            self.push(var, format!("{}_{}", var.name, suffix), column)?;
        }
        Ok(())
    }

    fn push(&mut self, var: &Variable, column: String, data: ArrayD<f64>) -> Result<()> {
        if !self.seen.insert(column.clone()) {
            tracing::debug!(
                variable = %var.name,
                column = %column,
                "synthesized column name is already in use"
            );
            self.collisions.push(LabelCollision {
                column: column.clone(),
                variable: var.name.clone(),
            });
        }
        self.table.push_column(column, data)
    }
}
