//! Split GPS traces into trajectories.
//!
//! Two consecutive points belong to the same trajectory when they are strictly less than
//! `threshold` apart.  This is the first stage before looking for stay points.
//!
//! ```no_run
//! # fn main() -> Result<(), geotrail_formats::FormatError> {
//! use geotrail_formats::PltTrace;
//! use geotrail_segments::{default_threshold, segment};
//!
//! let trace = PltTrace::new("Data/000/Trajectory/20081023025304.plt")?;
//! for traj in segment(trace.records()?, default_threshold()) {
//!     println!("{}", traj?);
//! }
//! # Ok(())
//! # }
//! ```
//!

pub use segmenter::*;
pub use summary::*;
pub use trajectory::*;

mod segmenter;
mod summary;
mod trajectory;

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
