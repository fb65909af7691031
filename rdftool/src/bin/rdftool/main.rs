//! Compute the intermolecular radial distribution function between two
//! selections of atoms in a trajectory file.
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use rdftool::analysis::{FrameDriver, FrameSelection, InterRdf, RdfParameters};
use rdftool::systems::ChemfilesTrajectory;

mod logging;

fn range_parser(range: &str) -> Result<[f64; 2], String> {
    let (min, max) = range.split_once(':').ok_or_else(|| {
        format!("expected a range as 'MIN:MAX', got '{}'", range)
    })?;
    let min = min.trim().parse::<f64>().map_err(|e| format!("invalid range minimum '{}': {}", min, e))?;
    let max = max.trim().parse::<f64>().map_err(|e| format!("invalid range maximum '{}': {}", max, e))?;
    Ok([min, max])
}

fn block_parser(block: &str) -> Result<[usize; 2], String> {
    let (n, m) = block.split_once(':').ok_or_else(|| {
        format!("expected an exclusion block as 'A:B', got '{}'", block)
    })?;
    let n = n.trim().parse::<usize>().map_err(|e| format!("invalid block size '{}': {}", n, e))?;
    let m = m.trim().parse::<usize>().map_err(|e| format!("invalid block size '{}': {}", m, e))?;
    Ok([n, m])
}

/// Compute the intermolecular radial distribution function g(r) between two
/// groups of atoms, averaged over the frames of a trajectory.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Trajectory file, in any format supported by chemfiles
    trajectory: PathBuf,

    /// Chemfiles selection for the first group of atoms, for example
    /// `"name O"`. The selection is evaluated on the first frame.
    #[arg(long)]
    first: String,

    /// Chemfiles selection for the second group of atoms
    #[arg(long)]
    second: String,

    /// Number of bins in the histogram
    #[arg(long)]
    bins: Option<usize>,

    /// Range of distances in the histogram, as `MIN:MAX`
    #[arg(long, value_parser = range_parser)]
    range: Option<[f64; 2]>,

    /// Exclude pairs in diagonal blocks of `A` atoms from the first group and
    /// `B` atoms from the second group, given as `A:B`. Use this to remove
    /// same-molecule contributions.
    #[arg(long, value_parser = block_parser)]
    exclusion_block: Option<[usize; 2]>,

    /// Frames to use, in the format `start:stop:skip`. Each of these values
    /// is optional.
    ///
    /// - `:100` uses the first 100 frames.
    ///
    /// - `::10` uses one frame every 10 frames.
    #[arg(long)]
    frames: Option<FrameSelection>,

    /// RDF parameters as a JSON document. Values given with `--bins`,
    /// `--range` or `--exclusion-block` take precedence.
    #[arg(long)]
    parameters: Option<String>,

    /// Output file. The RDF is written as JSON if the file name ends with
    /// `.json`, and as a text table otherwise. Defaults to standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase verbosity, this can be used multiple times
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Collect and display profiling data at the end of the run
    #[arg(long)]
    profile: bool,
}

impl Args {
    /// Merge the JSON parameters and explicit command line flags
    fn rdf_parameters(&self) -> Result<RdfParameters, rdftool::Error> {
        let mut parameters = match &self.parameters {
            Some(json) => RdfParameters::from_json(json)?,
            None => RdfParameters::default(),
        };

        if let Some(bins) = self.bins {
            parameters.bins = bins;
        }

        if let Some(range) = self.range {
            parameters.range = range;
        }

        if let Some(block) = self.exclusion_block {
            parameters.exclusion_block = Some(block);
        }

        parameters.validate()?;
        return Ok(parameters);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let parameters = args.rdf_parameters()?;

    let mut trajectory = ChemfilesTrajectory::open(&args.trajectory)?;
    let first = trajectory.select(&args.first)?;
    let second = trajectory.select(&args.second)?;
    log::info!(
        "computing RDF between {} atoms ({}) and {} atoms ({})",
        first.len(), args.first, second.len(), args.second
    );

    let mut rdf = InterRdf::new(first, second, parameters)?;

    let mut driver = FrameDriver::builder()
        .trajectory(&mut trajectory)
        .selection(args.frames.unwrap_or_default())
        .verbosity(logging::level_from_verbosity(args.verbose))
        .build()?;

    let result = driver.run(&mut rdf)?;

    match &args.output {
        Some(path) if path.extension().map_or(false, |extension| extension == "json") => {
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, &result)?;
        }
        Some(path) => {
            result.write_table(BufWriter::new(File::create(path)?))?;
        }
        None => {
            result.write_table(std::io::stdout().lock())?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(logging::level_from_verbosity(args.verbose));

    if args.profile {
        time_graph::enable_data_collection(true);
        time_graph::clear_collected_data();
    }

    if let Err(error) = run(&args) {
        log::error!("{}", error);
        return ExitCode::FAILURE;
    }

    if args.profile {
        eprintln!("{}", time_graph::get_full_graph().as_short_table());
    }

    return ExitCode::SUCCESS;
}
