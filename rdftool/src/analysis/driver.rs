use log::{Level, LevelFilter};

use crate::{Error, Trajectory};
use super::{Analysis, FrameSelection};

/// Builder for [`FrameDriver`], created with [`FrameDriver::builder`].
pub struct FrameDriverBuilder<'t> {
    trajectory: Option<&'t mut dyn Trajectory>,
    selection: FrameSelection,
    verbosity: LevelFilter,
}

impl<'t> FrameDriverBuilder<'t> {
    /// Set the trajectory to read frames from. This is required.
    pub fn trajectory(mut self, trajectory: &'t mut dyn Trajectory) -> FrameDriverBuilder<'t> {
        self.trajectory = Some(trajectory);
        self
    }

    /// Set which frames of the trajectory should be visited. By default, all
    /// frames are visited.
    pub fn selection(mut self, selection: FrameSelection) -> FrameDriverBuilder<'t> {
        self.selection = selection;
        self
    }

    /// Set the maximal level of the progress messages emitted by the driver.
    /// The default is [`LevelFilter::Warn`], which disables progress
    /// messages.
    pub fn verbosity(mut self, verbosity: LevelFilter) -> FrameDriverBuilder<'t> {
        self.verbosity = verbosity;
        self
    }

    /// Create the driver, selecting the frames to visit in the trajectory
    pub fn build(self) -> Result<FrameDriver<'t>, Error> {
        let trajectory = self.trajectory.ok_or(Error::MissingTrajectory)?;
        let n_frames = trajectory.size()?;
        let frames = self.selection.frames(n_frames)?;

        let driver = FrameDriver {
            trajectory: trajectory,
            frames: frames,
            verbosity: self.verbosity,
        };

        if driver.enabled(Level::Debug) {
            log::debug!("selected {} frames out of {}: {:?}", driver.frames.len(), n_frames, driver.frames);
        }

        return Ok(driver);
    }
}

/// `FrameDriver` visits the selected frames of a trajectory in increasing
/// order, giving each one of them to an [`Analysis`].
///
/// Frames are read one at a time, and only the frame currently being
/// processed is alive.
pub struct FrameDriver<'t> {
    trajectory: &'t mut dyn Trajectory,
    frames: Vec<usize>,
    verbosity: LevelFilter,
}

impl<'t> FrameDriver<'t> {
    /// Start configuring a new `FrameDriver`
    pub fn builder() -> FrameDriverBuilder<'t> {
        FrameDriverBuilder {
            trajectory: None,
            selection: FrameSelection::default(),
            verbosity: LevelFilter::Warn,
        }
    }

    /// Get the indexes of the frames this driver will visit
    pub fn frames(&self) -> &[usize] {
        &self.frames
    }

    /// Get the verbosity of this driver
    pub fn verbosity(&self) -> LevelFilter {
        self.verbosity
    }

    fn enabled(&self, level: Level) -> bool {
        level <= self.verbosity
    }

    /// Read the `position`-th selected frame and give it to `analysis`
    fn process_frame<A: Analysis + ?Sized>(&mut self, position: usize, analysis: &mut A) -> Result<(usize, A::FrameOutput), Error> {
        let step = self.frames[position];
        if self.enabled(Level::Info) {
            log::info!("processing frame {} ({}/{})", step, position + 1, self.frames.len());
        }

        let frame = self.trajectory.read_step(step)?;
        let output = analysis.single_frame(frame)?;
        return Ok((step, output));
    }

    /// Run the `analysis` over all the selected frames and return the final
    /// result.
    ///
    /// This calls [`Analysis::setup`] once, [`Analysis::single_frame`] for
    /// every frame and then [`Analysis::finalize`]. The first error stops the
    /// run and is returned.
    pub fn run<A: Analysis + ?Sized>(&mut self, analysis: &mut A) -> Result<A::Output, Error> {
        if self.enabled(Level::Info) {
            log::info!("starting analysis over {} frames", self.frames.len());
        }

        analysis.setup()?;
        for position in 0..self.frames.len() {
            self.process_frame(position, analysis)?;
        }

        let output = analysis.finalize()?;
        if self.enabled(Level::Info) {
            log::info!("finished analysis");
        }

        return Ok(output);
    }

    /// Lazily run the `analysis` over the selected frames.
    ///
    /// The returned iterator reads and processes one frame each time
    /// [`Iterator::next`] is called, yielding the frame index together with
    /// the per-frame output of the analysis. [`Analysis::setup`] is called
    /// before processing the first frame, but [`Analysis::finalize`] is not
    /// called: this is left to the caller once the iteration is done.
    ///
    /// The iterator stops after the first error.
    pub fn iter<'d, A: Analysis + ?Sized>(&'d mut self, analysis: &'d mut A) -> FrameIter<'d, 't, A> {
        FrameIter {
            driver: self,
            analysis: analysis,
            position: 0,
            started: false,
            done: false,
        }
    }
}

/// Lazy iterator over the frames of a [`FrameDriver`], created with
/// [`FrameDriver::iter`].
pub struct FrameIter<'d, 't, A: Analysis + ?Sized> {
    driver: &'d mut FrameDriver<'t>,
    analysis: &'d mut A,
    /// position of the next frame in `driver.frames`
    position: usize,
    started: bool,
    done: bool,
}

impl<'d, 't, A: Analysis + ?Sized> Iterator for FrameIter<'d, 't, A> {
    type Item = Result<(usize, A::FrameOutput), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if !self.started {
            self.started = true;
            if let Err(error) = self.analysis.setup() {
                self.done = true;
                return Some(Err(error));
            }
        }

        if self.position >= self.driver.frames.len() {
            self.done = true;
            return None;
        }

        let result = self.driver.process_frame(self.position, &mut *self.analysis);
        self.position += 1;
        if result.is_err() {
            self.done = true;
        }

        return Some(result);
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        // errors can stop the iteration early, and a failed setup still
        // yields one element
        let remaining = self.driver.frames.len() - self.position;
        return (0, Some(usize::max(remaining, usize::from(!self.started))));
    }
}

impl<'d, 't, A: Analysis + ?Sized> std::iter::FusedIterator for FrameIter<'d, 't, A> {}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::Frame;
    use crate::systems::test_utils::test_trajectory;
    use super::*;

    /// Record the volume of all frames
    #[derive(Default)]
    struct Volumes {
        setup_calls: usize,
        volumes: Vec<f64>,
    }

    impl Analysis for Volumes {
        type FrameOutput = f64;
        type Output = Vec<f64>;

        fn setup(&mut self) -> Result<(), Error> {
            self.setup_calls += 1;
            self.volumes.clear();
            Ok(())
        }

        fn single_frame(&mut self, frame: &dyn Frame) -> Result<f64, Error> {
            let volume = frame.volume()?;
            self.volumes.push(volume);
            Ok(volume)
        }

        fn finalize(&self) -> Result<Vec<f64>, Error> {
            Ok(self.volumes.clone())
        }
    }

    #[test]
    fn run() {
        let mut trajectory = test_trajectory("water-box");
        let mut driver = FrameDriver::builder()
            .trajectory(&mut trajectory)
            .selection(FrameSelection { start: 1, ..Default::default() })
            .build()
            .unwrap();

        assert_eq!(driver.frames(), [1, 2, 3]);
        assert_eq!(driver.verbosity(), LevelFilter::Warn);

        let mut analysis = Volumes::default();
        let volumes = driver.run(&mut analysis).unwrap();
        assert_eq!(analysis.setup_calls, 1);
        assert_eq!(volumes.len(), 3);
        assert_relative_eq!(volumes[0], 1331.0, max_relative = 1e-12);
        assert_relative_eq!(volumes[2], 2197.0, max_relative = 1e-12);

        // running again starts from a clean state
        let volumes = driver.run(&mut analysis).unwrap();
        assert_eq!(analysis.setup_calls, 2);
        assert_eq!(volumes.len(), 3);
    }

    #[test]
    fn lazy_iteration() {
        let mut trajectory = test_trajectory("water-box");
        let mut driver = FrameDriver::builder()
            .trajectory(&mut trajectory)
            .selection(FrameSelection { skip: 2, ..Default::default() })
            .verbosity(LevelFilter::Debug)
            .build()
            .unwrap();

        let mut analysis = Volumes::default();
        let mut iter = driver.iter(&mut analysis);
        assert_eq!(iter.size_hint(), (0, Some(2)));

        let (step, volume) = iter.next().unwrap().unwrap();
        assert_eq!(step, 0);
        assert_relative_eq!(volume, 1000.0, max_relative = 1e-12);

        let (step, volume) = iter.next().unwrap().unwrap();
        assert_eq!(step, 2);
        assert_relative_eq!(volume, 1728.0, max_relative = 1e-12);

        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
        assert_eq!(iter.size_hint(), (0, Some(0)));

        assert_eq!(analysis.setup_calls, 1);
        assert_eq!(analysis.finalize().unwrap().len(), 2);
    }

    #[test]
    fn lazy_iteration_does_not_read_ahead() {
        let mut trajectory = test_trajectory("water-box");
        let mut driver = FrameDriver::builder()
            .trajectory(&mut trajectory)
            .build()
            .unwrap();

        let mut analysis = Volumes::default();
        let steps = driver.iter(&mut analysis)
            .take(2)
            .map(|result| result.map(|(step, _)| step))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(steps, [0, 1]);
        assert_eq!(analysis.setup_calls, 1);
        assert_eq!(analysis.volumes.len(), 2);
    }

    #[test]
    fn errors_stop_iteration() {
        let mut trajectory = test_trajectory("water-box");
        let mut driver = FrameDriver::builder()
            .trajectory(&mut trajectory)
            .selection(FrameSelection { start: 2, stop: Some(6), skip: 1 })
            .build()
            .unwrap();

        let mut analysis = Volumes::default();
        let results = driver.iter(&mut analysis).collect::<Vec<_>>();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_ok());
        assert!(matches!(results[2], Err(Error::InvalidParameter(_))));

        assert!(driver.run(&mut analysis).is_err());
    }

    #[test]
    fn missing_trajectory() {
        let error = FrameDriver::builder().build().err().unwrap();
        assert!(matches!(error, Error::MissingTrajectory));
    }

    #[test]
    fn invalid_selection() {
        let mut trajectory = test_trajectory("dimer");
        let error = FrameDriver::builder()
            .trajectory(&mut trajectory)
            .selection(FrameSelection { skip: 0, ..Default::default() })
            .build()
            .err()
            .unwrap();

        assert!(matches!(error, Error::InvalidParameter(_)));
    }
}
