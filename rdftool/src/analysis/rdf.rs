use std::f64::consts::PI;

use ndarray::{Array1, Array2};

use crate::{Error, Vector3D};
use crate::systems::{AtomGroup, Frame};
use crate::distances::distance_array;

use super::{Analysis, ExclusionBlocks, Histogram};

/// Parameters for the intermolecular radial distribution function
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RdfParameters {
    /// Number of bins in the histogram
    #[serde(default = "serde_default_bins")]
    pub bins: usize,
    /// Range of distances covered by the histogram, as `[rmin, rmax]`.
    /// Distances equal to `rmax` are not included.
    #[serde(default = "serde_default_range")]
    pub range: [f64; 2],
    /// Shape `[A, B]` of the blocks of pairs to exclude from the histogram.
    /// The distance matrix between the two groups is split in diagonal blocks
    /// of `A` atoms from the first group and `B` atoms from the second group,
    /// and pairs inside these blocks are ignored. This is typically used to
    /// remove pairs of atoms belonging to the same molecule.
    #[serde(default)]
    pub exclusion_block: Option<[usize; 2]>,
}

fn serde_default_bins() -> usize { 75 }
fn serde_default_range() -> [f64; 2] { [0.0, 15.0] }

impl Default for RdfParameters {
    fn default() -> RdfParameters {
        RdfParameters {
            bins: serde_default_bins(),
            range: serde_default_range(),
            exclusion_block: None,
        }
    }
}

impl RdfParameters {
    /// Parse and validate parameters from a JSON string. Missing keys take
    /// their default value, and unknown keys are an error.
    pub fn from_json(json: &str) -> Result<RdfParameters, Error> {
        let parameters: RdfParameters = serde_json::from_str(json)?;
        parameters.validate()?;
        return Ok(parameters);
    }

    /// Check the parameters which do not depend on the atom groups
    pub fn validate(&self) -> Result<(), Error> {
        Histogram::new(self.bins, self.range)?;
        if let Some([n, m]) = self.exclusion_block {
            if n == 0 || m == 0 {
                return Err(Error::InvalidBlockConfiguration(format!(
                    "block shape must be positive, got ({}, {})", n, m
                )));
            }
        }
        return Ok(());
    }
}

/// Data computed for a single frame by [`InterRdf`]
#[derive(Debug, Clone, PartialEq)]
pub struct RdfFrame {
    /// Number of pairs in each bin of the histogram for this frame
    pub counts: Array1<f64>,
    /// Volume of this frame
    pub volume: f64,
}

/// Normalized radial distribution function
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RdfResult {
    /// Value of the radial distribution function in each bin
    #[serde(serialize_with = "serialize_array")]
    pub rdf: Array1<f64>,
    /// Edges of the bins, this contains one more entry than the other arrays
    #[serde(serialize_with = "serialize_array")]
    pub edges: Array1<f64>,
    /// Center of the bins
    #[serde(serialize_with = "serialize_array")]
    pub bins: Array1<f64>,
    /// Raw number of pairs in each bin, summed over all frames
    #[serde(serialize_with = "serialize_array")]
    pub count: Array1<f64>,
}

fn serialize_array<S: serde::Serializer>(array: &Array1<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(array.iter())
}

impl RdfResult {
    /// Write this RDF to `writer` as a text table, with one line per bin
    /// containing the center of the bin, the value of the RDF and the raw
    /// count of pairs.
    pub fn write_table(&self, mut writer: impl std::io::Write) -> std::io::Result<()> {
        writeln!(writer, "# r g(r) count")?;
        for ((center, rdf), count) in self.bins.iter().zip(&self.rdf).zip(&self.count) {
            writeln!(writer, "{:.6} {:.10} {}", center, rdf, count)?;
        }
        return Ok(());
    }
}

/// Intermolecular radial distribution function between two groups of atoms.
///
/// The histogram of all distances between atoms in the first group and atoms
/// in the second group is accumulated over frames, using the minimum image
/// convention. Pairs of atoms belonging to the same molecule can be removed
/// with [`RdfParameters::exclusion_block`]. At the end, the histogram is
/// normalized by the volume of each spherical shell and by the average pair
/// density, so that the RDF goes to 1 for uncorrelated pairs.
#[derive(Debug, Clone)]
pub struct InterRdf {
    parameters: RdfParameters,
    first: AtomGroup,
    second: AtomGroup,
    histogram: Histogram,
    exclusion: Option<ExclusionBlocks>,
    /// distance written in the excluded entries of the distance matrix, this
    /// is outside of the histogram range
    masking_distance: f64,

    /// distance matrix, reused for all frames
    distances: Array2<f64>,
    /// positions of the first group in the current frame
    first_positions: Vec<Vector3D>,
    /// positions of the second group in the current frame
    second_positions: Vec<Vector3D>,

    /// running histogram of distances
    count: Array1<f64>,
    /// running sum of frame volumes
    volume: f64,
    /// number of frames processed since the last setup
    n_frames: usize,
}

impl InterRdf {
    /// Create a new RDF between atoms in `first` and atoms in `second`.
    ///
    /// The same atoms can be part of both groups, in which case the distance
    /// of an atom with itself (zero) is included unless removed with an
    /// exclusion block.
    pub fn new(first: AtomGroup, second: AtomGroup, parameters: RdfParameters) -> Result<InterRdf, Error> {
        if first.is_empty() || second.is_empty() {
            return Err(Error::InvalidParameter(
                "atom groups for the RDF can not be empty".into()
            ));
        }

        let histogram = Histogram::new(parameters.bins, parameters.range)?;

        let shape = (first.len(), second.len());
        let exclusion = match parameters.exclusion_block {
            Some([n, m]) => Some(ExclusionBlocks::new(shape, (n, m))?),
            None => None,
        };

        if let Some(exclusion) = &exclusion {
            log::debug!(
                "excluding {} blocks of ({}, {}) pairs from the RDF",
                exclusion.count(), exclusion.block_shape().0, exclusion.block_shape().1
            );
        }

        let masking_distance = parameters.range[1] + 1.0;
        let count = Array1::zeros(histogram.bins());

        return Ok(InterRdf {
            parameters: parameters,
            distances: Array2::zeros(shape),
            first_positions: Vec::with_capacity(first.len()),
            second_positions: Vec::with_capacity(second.len()),
            first: first,
            second: second,
            histogram: histogram,
            exclusion: exclusion,
            masking_distance: masking_distance,
            count: count,
            volume: 0.0,
            n_frames: 0,
        });
    }

    /// Get the parameters used to create this RDF
    pub fn parameters(&self) -> &RdfParameters {
        &self.parameters
    }

    /// Get the histogram used by this RDF
    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    /// Get the raw count of pairs in each bin, accumulated over all frames
    /// since the last call to [`Analysis::setup`]
    pub fn count(&self) -> &Array1<f64> {
        &self.count
    }

    /// Get the edges of the histogram bins
    pub fn edges(&self) -> &Array1<f64> {
        self.histogram.edges()
    }

    /// Get the center of the histogram bins
    pub fn bins(&self) -> &Array1<f64> {
        self.histogram.centers()
    }

    /// Get the sum of the volumes of all the processed frames
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Get the number of frames processed since the last call to
    /// [`Analysis::setup`]
    pub fn n_frames(&self) -> usize {
        self.n_frames
    }

    /// Number of pairs contributing to the RDF in every frame
    fn n_pairs(&self) -> usize {
        let mut n_pairs = self.first.len() * self.second.len();
        if let Some(exclusion) = &self.exclusion {
            n_pairs -= exclusion.excluded();
        }
        return n_pairs;
    }
}

impl Analysis for InterRdf {
    type FrameOutput = RdfFrame;
    type Output = RdfResult;

    fn setup(&mut self) -> Result<(), Error> {
        self.count.fill(0.0);
        self.volume = 0.0;
        self.n_frames = 0;
        Ok(())
    }

    #[time_graph::instrument(name = "InterRdf::single_frame")]
    fn single_frame(&mut self, frame: &dyn Frame) -> Result<RdfFrame, Error> {
        let cell = frame.cell()?;
        self.first.gather_positions(frame, &mut self.first_positions)?;
        self.second.gather_positions(frame, &mut self.second_positions)?;

        distance_array(&self.first_positions, &self.second_positions, &cell, self.distances.view_mut())?;

        if let Some(exclusion) = &self.exclusion {
            exclusion.view(self.distances.view_mut())?.fill(self.masking_distance);
        }

        let counts = self.histogram.count(&self.distances);
        self.count += &counts;

        let volume = frame.volume()?;
        self.volume += volume;
        self.n_frames += 1;

        return Ok(RdfFrame {
            counts: counts,
            volume: volume,
        });
    }

    fn finalize(&self) -> Result<RdfResult, Error> {
        if self.n_frames == 0 {
            return Err(Error::DegenerateNormalization(
                "no frame was processed".into()
            ));
        }

        let n_pairs = self.n_pairs();
        if n_pairs == 0 {
            return Err(Error::DegenerateNormalization(
                "all pairs are excluded".into()
            ));
        }

        let n_frames = self.n_frames as f64;
        let mean_volume = self.volume / n_frames;
        if !mean_volume.is_finite() || mean_volume <= 0.0 {
            return Err(Error::DegenerateNormalization(format!(
                "the average volume is {}, frames should have a finite unit cell", mean_volume
            )));
        }

        if self.count.sum() == 0.0 {
            log::warn!("no pair distance was found in the RDF range [{}, {})", self.parameters.range[0], self.parameters.range[1]);
        }

        let density = n_pairs as f64 / mean_volume;
        let edges = self.histogram.edges();
        let rdf = Array1::from_shape_fn(self.histogram.bins(), |i| {
            let shell = 4.0 / 3.0 * PI * (edges[i + 1].powi(3) - edges[i].powi(3));
            self.count[i] / (density * shell * n_frames)
        });

        if !rdf.iter().all(|v| v.is_finite()) {
            return Err(Error::DegenerateNormalization(
                "some histogram shells have a zero volume".into()
            ));
        }

        return Ok(RdfResult {
            rdf: rdf,
            edges: edges.clone(),
            bins: self.histogram.centers().clone(),
            count: self.count.clone(),
        });
    }
}
