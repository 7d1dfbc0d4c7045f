//! Broadcasting variables onto a wider set of dimensions.

use crate::data::{Dimension, Variable};
use crate::error::{NcflattenError, Result};
use ndarray::{ArrayD, Axis, IxDyn};

/// Expand `var` so it is shaped like `target`, in `target`'s order.
///
/// Axes the variable already has are reordered to follow `target`; missing
/// ones repeat the existing values. Every dimension of `var` must appear in
/// `target`.
pub(crate) fn broadcast_to(var: &Variable, target: &[&Dimension]) -> Result<ArrayD<f64>> {
    let mut positions = Vec::with_capacity(var.ndim());
    for name in var.dims.iter() {
        let pos = target
            .iter()
            .position(|d| d.name == name)
            .ok_or_else(|| NcflattenError::undeclared_dimension(&var.name, name))?;
        positions.push(pos);
    }

    // Order the variable's own axes by where they sit in the target.
    let mut order: Vec<usize> = (0..positions.len()).collect();
    order.sort_by_key(|&axis| positions[axis]);
    let mut view = var.data.view().permuted_axes(order);

    for (i, dim) in target.iter().enumerate() {
        if !var.dims.contains(&dim.name) {
            view = view.insert_axis(Axis(i));
        }
    }

    let shape: Vec<usize> = target.iter().map(|d| d.len()).collect();
    let broadcast = view
        .broadcast(IxDyn(&shape))
        .ok_or_else(|| NcflattenError::ShapeMismatch {
            variable: var.name.clone(),
            shape: var.data.shape().to_vec(),
            expected: shape.clone(),
        })?;
    Ok(broadcast.to_owned())
}
