//! Pairwise distances between two sets of points, using the minimum image
//! convention for periodic boundary conditions.
use ndarray::{Array2, ArrayViewMut2, Axis};
use rayon::prelude::*;

use crate::{Error, Vector3D};
use crate::systems::UnitCell;

/// Compute all the distances between points in `reference` and points in
/// `configuration`, writing them in the pre-allocated `result` matrix.
///
/// `result[[i, j]]` is the distance between `reference[i]` and
/// `configuration[j]`, using the minimum image convention in `cell`. Rows of
/// the result are computed in parallel, each row being written by a single
/// thread.
#[time_graph::instrument(name = "distance_array")]
pub fn distance_array(
    reference: &[Vector3D],
    configuration: &[Vector3D],
    cell: &UnitCell,
    mut result: ArrayViewMut2<'_, f64>,
) -> Result<(), Error> {
    let expected = (reference.len(), configuration.len());
    if result.dim() != expected {
        return Err(Error::InvalidParameter(format!(
            "distance array result has shape {:?}, expected {:?}",
            result.dim(), expected
        )));
    }

    result.axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(reference.par_iter())
        .for_each(|(mut row, &first)| {
            for (distance, &second) in row.iter_mut().zip(configuration) {
                *distance = cell.distance(first, second);
            }
        });

    Ok(())
}

/// Allocating version of [`distance_array`]
pub fn distances(reference: &[Vector3D], configuration: &[Vector3D], cell: &UnitCell) -> Array2<f64> {
    let mut result = Array2::zeros((reference.len(), configuration.len()));
    distance_array(reference, configuration, cell, result.view_mut())
        .expect("the result shape is built from the inputs");
    return result;
}
