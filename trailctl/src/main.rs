//! Main driver for splitting GPS traces into trajectories.
//!
//! Traces are read through `geotrail-formats`, split by `geotrail-segments` and the result is
//! written either as text or as CSV.
//!

use chrono::TimeDelta;
use clap::{crate_authors, crate_description, crate_version, Parser};
use eyre::Result;
use tracing::{info, trace};

use geotrail_common::{init_logging, parse_duration, ConfigFile};
use trailctl::{list_traces, segment_path, trace_info, CmdError, Opts, SubCommand, TrailConfig};

/// Binary name, using a different binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

fn main() -> Result<()> {
    let opts = Opts::parse();

    // Initialise logging early
    //
    init_logging(NAME, opts.tree, opts.log_dir.clone())?;
    trace!("Logging initialised.");

    // Defaults apply when there is no config file at all.
    //
    let cfg = ConfigFile::<TrailConfig>::load(opts.config.as_deref())?.into_inner();

    // Command-line wins over the config file.
    //
    let threshold = opts.threshold.as_deref().unwrap_or(&cfg.threshold);
    let threshold = parse_duration(threshold).map_err(CmdError::from)?;
    info!("Threshold is {}", threshold);

    banner()?;

    handle_subcmd(&opts.subcmd, &cfg, threshold)
}

pub fn handle_subcmd(subcmd: &SubCommand, cfg: &TrailConfig, threshold: TimeDelta) -> Result<()> {
    match subcmd {
        // Handle `segment path`
        //
        SubCommand::Segment(sopts) => {
            trace!("segment");

            segment_path(sopts, threshold, &cfg.extension)?;
        }

        // Handle `info file`
        //
        SubCommand::Info(iopts) => {
            trace!("info");

            let str = trace_info(&iopts.file)?;
            println!("{}", str);
        }

        // Handle `list dir`
        //
        SubCommand::List(lopts) => {
            trace!("list");

            let str = list_traces(&lopts.dir, &cfg.extension)?;
            println!("{}", str);
        }

        // Standalone `version` command
        //
        SubCommand::Version => {
            eprintln!("Modules: ");
            eprintln!("\t{}", geotrail_common::version());
            eprintln!("\t{}", geotrail_formats::version());
            eprintln!("\t{}", geotrail_segments::version());
        }
    }
    Ok(())
}

/// Display banner
///
fn banner() -> Result<()> {
    Ok(eprintln!(
        r##"
{}/{} by {}
{}
"##,
        NAME,
        VERSION,
        AUTHORS,
        crate_description!()
    ))
}
