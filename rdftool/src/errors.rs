#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// No trajectory was given when configuring the frame iteration
    MissingTrajectory,
    /// The exclusion blocks do not tile the distance matrix
    InvalidBlockConfiguration(String),
    /// The histogram range or number of bins is not usable
    InvalidHistogramRange(String),
    /// The accumulated data can not be normalized (no frames, no volume, no
    /// pairs)
    DegenerateNormalization(String),
    /// Got an invalid parameter value in a function
    InvalidParameter(String),
    /// Error while serializing/deserializing data
    Json(serde_json::Error),
    /// Error related to reading trajectory files
    Chemfiles(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingTrajectory => write!(f, "missing trajectory: a trajectory is required to select frames"),
            Error::InvalidBlockConfiguration(e) => write!(f, "invalid exclusion block: {}", e),
            Error::InvalidHistogramRange(e) => write!(f, "invalid histogram range: {}", e),
            Error::DegenerateNormalization(e) => write!(f, "can not normalize the RDF: {}", e),
            Error::InvalidParameter(e) => write!(f, "invalid parameter: {}", e),
            Error::Json(e) => write!(f, "json error: {}", e),
            Error::Chemfiles(e) => write!(f, "chemfiles error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MissingTrajectory |
            Error::InvalidBlockConfiguration(_) |
            Error::InvalidHistogramRange(_) |
            Error::DegenerateNormalization(_) |
            Error::InvalidParameter(_) |
            Error::Chemfiles(_) => None,
            Error::Json(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::Json(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            Error::MissingTrajectory.to_string(),
            "missing trajectory: a trajectory is required to select frames"
        );
        assert_eq!(
            Error::InvalidHistogramRange("bins must be at least 1".into()).to_string(),
            "invalid histogram range: bins must be at least 1"
        );

        let json = serde_json::from_str::<usize>("{").unwrap_err();
        let error = Error::from(json);
        assert!(error.to_string().starts_with("json error: "));
        assert!(std::error::Error::source(&error).is_some());
    }
}
