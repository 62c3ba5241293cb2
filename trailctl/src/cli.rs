//! Module describing all possible commands and sub-commands to the `trailctl` main driver
//!
//! We have three main commands:
//!
//! - `segment`
//! - `info`
//! - `list`
//!
//! `segment` reads one trace file or every trace file under a directory and splits each of
//! them into trajectories, whenever two consecutive points are too far apart in time.  The
//! result is either a human-readable summary or a CSV file with one line per trajectory.
//!
//! `info` and `list` only describe the trace files themselves (user, start time, number of
//! points).
//!

use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser};
use strum::EnumString;

/// CLI options
#[derive(Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// Maximum time gap inside a trajectory, like "20m" (overrides the config file).
    #[clap(short = 't', long)]
    pub threshold: Option<String>,
    /// Hierarchical log output.
    #[clap(short = 'T', long)]
    pub tree: bool,
    /// Also log into daily files in this directory.
    #[clap(short = 'L', long)]
    pub log_dir: Option<PathBuf>,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

// ------

/// All sub-commands:
///
/// `segment [-f text|csv] [-o FILE] [-j] PATH`
/// `info FILE`
/// `list DIR`
/// `version`
///
#[derive(Debug, Parser)]
pub enum SubCommand {
    /// Split traces into trajectories
    Segment(SegmentOpts),
    /// Describe one trace file
    Info(InfoOpts),
    /// List all trace files under a directory
    List(ListOpts),
    /// List all package versions.
    Version,
}

// ------

/// How to write the trajectories
///
#[derive(Clone, Copy, Debug, Default, PartialEq, strum::Display, EnumString, strum::VariantNames)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    /// One summary line per trajectory
    #[default]
    Text,
    /// One CSV record per trajectory
    Csv,
}

/// Options for `segment`.
///
#[derive(Debug, Parser)]
pub struct SegmentOpts {
    /// Output format (text or csv).
    #[clap(short = 'f', long, default_value = "text")]
    pub format: OutputFormat,
    /// Output file (default is stdout).
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,
    /// Process trace files in parallel.
    #[clap(short = 'j', long)]
    pub parallel: bool,
    /// Trace file or directory.
    pub path: PathBuf,
}

/// Options for `info`.
///
#[derive(Debug, Parser)]
pub struct InfoOpts {
    /// Trace file.
    pub file: PathBuf,
}

/// Options for `list`.
///
#[derive(Debug, Parser)]
pub struct ListOpts {
    /// Top directory.
    pub dir: PathBuf,
}
