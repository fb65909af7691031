use crate::Error;

use super::{Frame, SimpleFrame, Trajectory};

/// A trajectory stored in memory, as a list of [`SimpleFrame`].
#[derive(Clone, Debug, Default)]
pub struct MemoryTrajectory {
    frames: Vec<SimpleFrame>,
}

impl MemoryTrajectory {
    /// Create a new trajectory without any frame
    pub fn new() -> MemoryTrajectory {
        MemoryTrajectory {
            frames: Vec::new(),
        }
    }

    /// Add a frame at the end of this trajectory
    pub fn push(&mut self, frame: SimpleFrame) {
        self.frames.push(frame);
    }

    /// Get the number of frames in this trajectory
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Is this trajectory empty?
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl From<Vec<SimpleFrame>> for MemoryTrajectory {
    fn from(frames: Vec<SimpleFrame>) -> MemoryTrajectory {
        MemoryTrajectory { frames }
    }
}

impl FromIterator<SimpleFrame> for MemoryTrajectory {
    fn from_iter<I: IntoIterator<Item = SimpleFrame>>(iter: I) -> MemoryTrajectory {
        MemoryTrajectory { frames: iter.into_iter().collect() }
    }
}

impl Trajectory for MemoryTrajectory {
    fn size(&mut self) -> Result<usize, Error> {
        Ok(self.frames.len())
    }

    fn read_step(&mut self, step: usize) -> Result<&dyn Frame, Error> {
        let n_frames = self.frames.len();
        match self.frames.get(step) {
            Some(frame) => Ok(frame),
            None => Err(Error::InvalidParameter(format!(
                "can not read step {} in a trajectory with {} frames", step, n_frames
            ))),
        }
    }
}
