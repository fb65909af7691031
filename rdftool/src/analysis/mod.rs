use crate::{Error, Frame};

/// An `Analysis` accumulates data over the frames of a trajectory, and
/// derives statistics from the accumulated data once all frames have been
/// visited.
///
/// The frames are given to the analysis by a [`FrameDriver`], which calls
/// [`Analysis::setup`] once, then [`Analysis::single_frame`] for each
/// selected frame in order, and finally [`Analysis::finalize`].
pub trait Analysis {
    /// Data computed for a single frame, yielded when iterating lazily over
    /// the frames with [`FrameDriver::iter`]
    type FrameOutput;
    /// Final result of the analysis
    type Output;

    /// Reset the accumulated state before visiting frames. The default
    /// implementation does nothing.
    fn setup(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// Process a single `frame`, adding it to the accumulated state
    fn single_frame(&mut self, frame: &dyn Frame) -> Result<Self::FrameOutput, Error>;

    /// Compute the final result from the accumulated state. This does not
    /// modify the state, and calling it multiple times gives the same result.
    fn finalize(&self) -> Result<Self::Output, Error>;
}

mod frames;
pub use self::frames::FrameSelection;

mod driver;
pub use self::driver::{FrameDriver, FrameDriverBuilder, FrameIter};

mod blocks;
pub use self::blocks::{blocks_of, DiagonalBlocksMut, ExclusionBlocks};

mod histogram;
pub use self::histogram::Histogram;

mod rdf;
pub use self::rdf::{InterRdf, RdfFrame, RdfParameters, RdfResult};
