#![warn(clippy::all, clippy::pedantic)]

// disable some style lints
#![allow(clippy::needless_return, clippy::must_use_candidate, clippy::comparison_chain)]
#![allow(clippy::redundant_field_names, clippy::redundant_closure_for_method_calls)]
#![allow(clippy::unreadable_literal, clippy::option_if_let_else, clippy::range_plus_one)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc, clippy::module_name_repetitions)]

#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap, clippy::cast_lossless, clippy::cast_sign_loss)]
#![allow(clippy::default_trait_access)]

// Tests lints
#![cfg_attr(test, allow(clippy::float_cmp))]

//! Intermolecular radial distribution functions (RDF) from a sequence of
//! simulation frames.
//!
//! The [`FrameDriver`](analysis::FrameDriver) walks over the selected frames
//! of a [`Trajectory`](systems::Trajectory) and hands each of them to an
//! [`Analysis`](analysis::Analysis). [`InterRdf`](analysis::InterRdf) is the
//! analysis accumulating a histogram of pair distances between two
//! [`AtomGroup`](systems::AtomGroup)s, normalized into a radial distribution
//! function at the end of the run.
//!
//! ```no_run
//! # use rdftool::{AtomGroup, Error};
//! # use rdftool::analysis::{FrameDriver, FrameSelection, InterRdf, RdfParameters};
//! # fn main() -> Result<(), Error> {
//! # let mut trajectory = rdftool::systems::MemoryTrajectory::new();
//! let mut rdf = InterRdf::new(
//!     AtomGroup::range(0..64),
//!     AtomGroup::range(64..128),
//!     RdfParameters::default(),
//! )?;
//!
//! let mut driver = FrameDriver::builder()
//!     .trajectory(&mut trajectory)
//!     .selection(FrameSelection { skip: 10, ..Default::default() })
//!     .build()?;
//!
//! let result = driver.run(&mut rdf)?;
//! println!("g(r) = {}", result.rdf);
//! # Ok(())
//! # }
//! ```

pub mod types;
pub use types::*;

mod errors;
pub use self::errors::Error;

pub mod systems;
pub use systems::{AtomGroup, Frame, SimpleFrame, Trajectory, UnitCell};

pub mod distances;

pub mod analysis;
pub use analysis::{Analysis, FrameDriver, InterRdf, RdfResult};
