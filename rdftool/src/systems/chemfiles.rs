use std::path::Path;

use crate::{Error, Matrix3, Vector3D};
use super::{AtomGroup, Frame, SimpleFrame, Trajectory, UnitCell};

impl From<chemfiles::Error> for Error {
    fn from(error: chemfiles::Error) -> Error {
        Error::Chemfiles(error.message)
    }
}

/// Trajectory read from a file using [chemfiles](https://chemfiles.org/).
///
/// All [formats supported by
/// chemfiles](https://chemfiles.org/chemfiles/latest/formats.html) can be
/// used. Frames are read on demand, and converted to a [`SimpleFrame`] which
/// is reused from one step to the next.
pub struct ChemfilesTrajectory {
    trajectory: chemfiles::Trajectory,
    /// buffer for the data read by chemfiles
    chemfiles_frame: chemfiles::Frame,
    /// converted version of `chemfiles_frame`
    frame: SimpleFrame,
}

impl ChemfilesTrajectory {
    /// Open the trajectory file at the given `path` for reading
    pub fn open(path: impl AsRef<Path>) -> Result<ChemfilesTrajectory, Error> {
        let trajectory = chemfiles::Trajectory::open(path, 'r')?;
        Ok(ChemfilesTrajectory {
            trajectory: trajectory,
            chemfiles_frame: chemfiles::Frame::new(),
            frame: SimpleFrame::new(UnitCell::infinite()),
        })
    }

    /// Create an [`AtomGroup`] from a chemfiles `selection` string (for
    /// example `"name O"` or `"resname WAT and type H"`), evaluated on the
    /// first frame of this trajectory.
    ///
    /// See the [selection language
    /// documentation](https://chemfiles.org/chemfiles/latest/selections.html).
    pub fn select(&mut self, selection: &str) -> Result<AtomGroup, Error> {
        let mut selection = chemfiles::Selection::new(selection)?;
        self.trajectory.read_step(0, &mut self.chemfiles_frame)?;
        let indices = selection.list(&self.chemfiles_frame);
        Ok(AtomGroup::new(indices))
    }
}

impl Trajectory for ChemfilesTrajectory {
    fn size(&mut self) -> Result<usize, Error> {
        Ok(self.trajectory.nsteps())
    }

    fn read_step(&mut self, step: usize) -> Result<&dyn Frame, Error> {
        self.trajectory.read_step(step, &mut self.chemfiles_frame)?;

        let cell = if self.chemfiles_frame.cell().shape() == chemfiles::CellShape::Infinite {
            UnitCell::infinite()
        } else {
            // transpose since chemfiles is using columns for the cell vectors and
            // we want rows as cell vectors
            UnitCell::try_from(Matrix3::from(self.chemfiles_frame.cell().matrix()).transposed())?
        };
        self.frame.set_cell(cell);

        let positions = self.frame.positions_mut();
        positions.clear();
        positions.extend(self.chemfiles_frame.positions().iter().map(|&p| Vector3D::from(p)));

        Ok(&self.frame)
    }
}
