use std::ops::Range;

use crate::{Error, Vector3D};
use super::Frame;

/// A group of atoms, identified by their index in the frames of a trajectory.
///
/// The group itself does not store any position, these are read from the
/// current frame with [`AtomGroup::gather_positions`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtomGroup {
    indices: Vec<usize>,
}

impl AtomGroup {
    /// Create a group containing the atoms at the given `indices`, in this
    /// order.
    pub fn new(indices: Vec<usize>) -> AtomGroup {
        AtomGroup { indices }
    }

    /// Create a group containing all atoms with index in `range`
    pub fn range(range: Range<usize>) -> AtomGroup {
        AtomGroup { indices: range.collect() }
    }

    /// Get the number of atoms in this group
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Is this group empty?
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Get the indices of the atoms in this group
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Copy the positions of the atoms in this group from `frame` into
    /// `positions`. The content of `positions` is replaced, but the memory is
    /// reused across calls.
    pub fn gather_positions(&self, frame: &dyn Frame, positions: &mut Vec<Vector3D>) -> Result<(), Error> {
        let all_positions = frame.positions()?;

        positions.clear();
        positions.reserve(self.indices.len());
        for &atom in &self.indices {
            let position = all_positions.get(atom).ok_or_else(|| Error::InvalidParameter(format!(
                "atom index {} is out of bounds in a frame with {} atoms", atom, all_positions.len()
            )))?;
            positions.push(*position);
        }

        Ok(())
    }
}

impl From<Vec<usize>> for AtomGroup {
    fn from(indices: Vec<usize>) -> AtomGroup {
        AtomGroup::new(indices)
    }
}
