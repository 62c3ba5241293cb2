//! Definition of the input data formats for GeoTrail.
//!
//! For now we only read GPS traces in the PLT format (one point per line after a fixed
//! preamble) but everything is organised so that new formats get their own module here.
//!
//! ```no_run
//! # fn main() -> Result<(), geotrail_formats::FormatError> {
//! use geotrail_formats::PltTrace;
//!
//! let trace = PltTrace::new("Data/000/Trajectory/20081023025304.plt")?;
//! for point in trace.records()? {
//!     println!("{}", point?);
//! }
//! # Ok(())
//! # }
//! ```
//!

// Re-export for convenience
//
pub use error::*;
pub use plt::*;

mod error;
mod plt;

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
