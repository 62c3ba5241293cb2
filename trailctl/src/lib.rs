//! Library part of the `trailctl` utility.
//!
//! The actual work (reading traces, splitting them) is done in `geotrail-formats` and
//! `geotrail-segments`; this is only the glue: command-line parsing, configuration, directory
//! walking and output.
//!

pub use cli::*;
pub use cmds::*;
pub use config::*;
pub use error::*;

mod cli;
mod cmds;
mod config;
mod error;
