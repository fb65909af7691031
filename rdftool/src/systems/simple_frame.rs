use crate::Error;

use super::{UnitCell, Frame, Vector3D};

/// A simple implementation of `Frame` to use when no other is available
#[derive(Clone, Debug)]
pub struct SimpleFrame {
    cell: UnitCell,
    positions: Vec<Vector3D>,
}

impl SimpleFrame {
    /// Create a new empty frame with the given unit cell
    pub fn new(cell: UnitCell) -> SimpleFrame {
        SimpleFrame {
            cell: cell,
            positions: Vec::new(),
        }
    }

    /// Create a new frame with the given unit cell and atomic positions
    pub fn with_positions(cell: UnitCell, positions: Vec<Vector3D>) -> SimpleFrame {
        SimpleFrame {
            cell: cell,
            positions: positions,
        }
    }

    /// Add an atom at the given position to this frame
    pub fn add_atom(&mut self, position: Vector3D) {
        self.positions.push(position);
    }

    /// Get mutable access to the positions of this frame
    pub fn positions_mut(&mut self) -> &mut Vec<Vector3D> {
        &mut self.positions
    }

    /// Set the unit cell of this frame
    pub fn set_cell(&mut self, cell: UnitCell) {
        self.cell = cell;
    }
}

impl Frame for SimpleFrame {
    fn size(&self) -> Result<usize, Error> {
        Ok(self.positions.len())
    }

    fn positions(&self) -> Result<&[Vector3D], Error> {
        Ok(&self.positions)
    }

    fn cell(&self) -> Result<UnitCell, Error> {
        Ok(self.cell)
    }
}

impl TryFrom<&dyn Frame> for SimpleFrame {
    type Error = Error;

    fn try_from(frame: &dyn Frame) -> Result<SimpleFrame, Error> {
        Ok(SimpleFrame::with_positions(frame.cell()?, frame.positions()?.to_vec()))
    }
}
