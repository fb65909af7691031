use crate::{Error, Vector3D};

mod cell;
pub use self::cell::{UnitCell, CellShape};

mod simple_frame;
pub use self::simple_frame::SimpleFrame;

mod memory;
pub use self::memory::MemoryTrajectory;

mod groups;
pub use self::groups::AtomGroup;

#[cfg(feature = "chemfiles")]
mod chemfiles;
#[cfg(feature = "chemfiles")]
pub use self::chemfiles::ChemfilesTrajectory;

#[cfg(test)]
pub(crate) mod test_utils;

/// A `Frame` is a single snapshot of a simulation: the positions of all
/// atoms, and the unit cell at this point in time.
pub trait Frame {
    /// Get the number of atoms in this frame
    fn size(&self) -> Result<usize, Error>;

    /// Get the positions for all atoms in this frame. The returned value must
    /// be a slice of length `self.size()` containing the Cartesian coordinates
    /// of all atoms in the frame.
    fn positions(&self) -> Result<&[Vector3D], Error>;

    /// Get the unit cell for this frame
    fn cell(&self) -> Result<UnitCell, Error>;

    /// Get the instantaneous volume of this frame. The default implementation
    /// uses the volume of the unit cell, which is zero for infinite cells.
    fn volume(&self) -> Result<f64, Error> {
        Ok(self.cell()?.volume())
    }
}

/// A `Trajectory` is a sequence of frames that can be accessed by index.
///
/// Reading a step replaces the frame previously returned, which is why the
/// frame is borrowed from the trajectory: only one frame is alive at any
/// point in time.
pub trait Trajectory {
    /// Get the number of frames in this trajectory
    fn size(&mut self) -> Result<usize, Error>;

    /// Move the trajectory to the given `step`, and get the corresponding
    /// frame. Steps past the end of the trajectory are an error.
    fn read_step(&mut self, step: usize) -> Result<&dyn Frame, Error>;
}
