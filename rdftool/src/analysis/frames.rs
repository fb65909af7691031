use crate::Error;

/// Selection of the frames to visit in a trajectory, as a `start:stop:skip`
/// range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FrameSelection {
    /// Index of the first frame to visit
    #[serde(default)]
    pub start: usize,
    /// Index of the frame where iteration stops (this frame is not visited).
    /// `None` means the end of the trajectory.
    #[serde(default)]
    pub stop: Option<usize>,
    /// Visit one frame every `skip` frames, this must be at least 1
    #[serde(default = "serde_default_skip")]
    pub skip: usize,
}

fn serde_default_skip() -> usize { 1 }

impl Default for FrameSelection {
    fn default() -> FrameSelection {
        FrameSelection {
            start: 0,
            stop: None,
            skip: serde_default_skip(),
        }
    }
}

impl FrameSelection {
    /// Get the ordered list of frames selected in a trajectory containing
    /// `n_frames` frames.
    ///
    /// The values of `start` and `stop` are not clamped to the trajectory
    /// size: selecting frames past the end will make reading them fail later.
    pub fn frames(&self, n_frames: usize) -> Result<Vec<usize>, Error> {
        if self.skip == 0 {
            return Err(Error::InvalidParameter(
                "frame selection skip must be at least 1".into()
            ));
        }

        let stop = self.stop.unwrap_or(n_frames);
        return Ok((self.start..stop).step_by(self.skip).collect());
    }
}

impl std::str::FromStr for FrameSelection {
    type Err = Error;

    /// Parse a selection with the `start:stop:skip` syntax, where all parts
    /// are optional: `10:`, `:100:2` or `::5`.
    fn from_str(selection: &str) -> Result<FrameSelection, Error> {
        let parse = |value: Option<&str>| -> Result<Option<usize>, Error> {
            match value.map(str::trim) {
                None | Some("") => Ok(None),
                Some(value) => value.parse().map(Some).map_err(|e| Error::InvalidParameter(format!(
                    "invalid value '{}' in frame selection '{}': {}", value, selection, e
                ))),
            }
        };

        let mut components = selection.split(':');
        let start = parse(components.next())?;
        let stop = parse(components.next())?;
        let skip = parse(components.next())?;

        if components.next().is_some() {
            return Err(Error::InvalidParameter(format!(
                "frame selection '{}' should have at most three parts (start:stop:skip)", selection
            )));
        }

        return Ok(FrameSelection {
            start: start.unwrap_or(0),
            stop: stop,
            skip: skip.unwrap_or_else(serde_default_skip),
        });
    }
}
