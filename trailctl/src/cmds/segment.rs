//! `segment` sub-command: split every trace found under a path into trajectories.
//!

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::TimeDelta;
use eyre::{Result, WrapErr};
use rayon::prelude::*;
use tracing::{debug, info, trace};

use geotrail_formats::{find_traces, PltTrace};
use geotrail_segments::{segment_trace, Trajectory, TrajectorySummary};

use crate::{CmdError, OutputFormat, SegmentOpts};

/// One trace file and the trajectories found in it.
///
#[derive(Debug)]
pub struct Segmented {
    pub trace: PltTrace,
    pub trajectories: Vec<Trajectory>,
}

/// Look for trace files under `path`, fail if there is none.
///
pub fn traces_under(path: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let files = find_traces(path, ext)?;
    if files.is_empty() {
        return Err(CmdError::NoTraces(path.display().to_string(), ext.to_string()).into());
    }
    Ok(files)
}

#[tracing::instrument(skip(threshold))]
fn segment_one(path: &Path, threshold: TimeDelta) -> Result<Segmented> {
    let trace = PltTrace::new(path).wrap_err_with(|| format!("opening {}", path.display()))?;
    let trajectories = segment_trace(&trace, threshold)
        .wrap_err_with(|| format!("reading {}", path.display()))?;
    debug!("{} trajectories", trajectories.len());
    Ok(Segmented { trace, trajectories })
}

/// Segment all files, in order.  With `parallel`, each file is handled by its own rayon task
/// but the result keeps the order of `files`.  The first failing file aborts the whole run.
///
#[tracing::instrument(skip(files, threshold))]
pub fn segment_files(
    files: &[PathBuf],
    threshold: TimeDelta,
    parallel: bool,
) -> Result<Vec<Segmented>> {
    if parallel {
        files.par_iter().map(|f| segment_one(f, threshold)).collect()
    } else {
        files.iter().map(|f| segment_one(f, threshold)).collect()
    }
}

/// Human-readable output: one header per trace, one line per trajectory.
///
pub fn write_text<W: Write>(out: &mut W, all: &[Segmented]) -> Result<()> {
    for seg in all {
        writeln!(
            out,
            "{} (user {}, {} trajectories)",
            seg.trace.path().display(),
            seg.trace.user(),
            seg.trajectories.len()
        )?;
        for (i, traj) in seg.trajectories.iter().enumerate() {
            writeln!(out, "  #{i:<3} {traj}")?;
        }
    }
    Ok(())
}

/// CSV output: one record per trajectory, with a header line.
///
pub fn write_csv<W: Write>(out: W, all: &[Segmented]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(true).from_writer(out);

    for seg in all {
        seg.trajectories
            .iter()
            .enumerate()
            .filter_map(|(i, traj)| TrajectorySummary::new(&seg.trace, i, traj))
            .try_for_each(|rec| wtr.serialize(rec))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Entry point for `trailctl segment`.
///
#[tracing::instrument(skip(opts, threshold))]
pub fn segment_path(opts: &SegmentOpts, threshold: TimeDelta, ext: &str) -> Result<()> {
    let files = traces_under(&opts.path, ext)?;
    info!("{} trace files, threshold {}", files.len(), threshold);

    let all = segment_files(&files, threshold, opts.parallel)?;

    let mut out: Box<dyn Write> = match &opts.output {
        Some(fname) => {
            trace!("output to {:?}", fname);
            let fh = File::create(fname)
                .wrap_err_with(|| format!("creating {}", fname.display()))?;
            Box::new(fh)
        }
        None => Box::new(io::stdout().lock()),
    };

    match opts.format {
        OutputFormat::Text => {
            write_text(&mut out, &all)?;
            out.flush()?;
        }
        OutputFormat::Csv => write_csv(out, &all)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const HEADER: &str = "Geolife trajectory\nWGS 84\nAltitude is in Feet\nReserved 3\n\
        0,2,255,My Track,0,0,2,8421376\n0\n";

    fn fixture(root: &Path, user: &str, name: &str, times: &[&str]) -> Result<PathBuf> {
        let dir = root.join(user).join("Trajectory");
        fs::create_dir_all(&dir)?;
        let body: String = times
            .iter()
            .map(|t| format!("39.9,116.4,0,100,39925.0,2009-04-22,{t}\n"))
            .collect();
        let fname = dir.join(name);
        fs::write(&fname, format!("{HEADER}{body}"))?;
        Ok(fname)
    }

    fn sample() -> Result<(tempfile::TempDir, Vec<PathBuf>)> {
        let dir = tempfile::tempdir()?;
        let times = ["10:00:00", "10:10:00", "10:35:00"];
        let a = fixture(dir.path(), "000", "a.plt", &times)?;
        let b = fixture(dir.path(), "001", "b.plt", &["11:00:00", "11:05:00"])?;
        Ok((dir, vec![a, b]))
    }

    #[test]
    fn test_segment_files() -> Result<()> {
        let (_dir, files) = sample()?;

        let all = segment_files(&files, TimeDelta::minutes(20), false)?;
        assert_eq!(2, all.len());
        assert_eq!(0, all[0].trace.user());
        assert_eq!(2, all[0].trajectories.len());
        assert_eq!(1, all[1].trace.user());
        assert_eq!(1, all[1].trajectories.len());
        Ok(())
    }

    #[test]
    fn test_segment_files_parallel_same_order() -> Result<()> {
        let (_dir, files) = sample()?;

        let seq = segment_files(&files, TimeDelta::minutes(20), false)?;
        let par = segment_files(&files, TimeDelta::minutes(20), true)?;
        let lens = |v: &[Segmented]| {
            v.iter()
                .map(|s| s.trajectories.len())
                .collect::<Vec<_>>()
        };
        assert_eq!(lens(&seq[..]), lens(&par[..]));
        assert_eq!(seq[1].trace.path(), par[1].trace.path());
        Ok(())
    }

    #[test]
    fn test_segment_files_bad_file() -> Result<()> {
        let (dir, mut files) = sample()?;
        let bad = dir.path().join("002").join("Trajectory");
        fs::create_dir_all(&bad)?;
        let fname = bad.join("c.plt");
        fs::write(&fname, HEADER)?;
        files.push(fname);

        assert!(segment_files(&files, TimeDelta::minutes(20), false).is_err());
        Ok(())
    }

    #[test]
    fn test_write_text() -> Result<()> {
        let (_dir, files) = sample()?;
        let all = segment_files(&files, TimeDelta::minutes(20), false)?;

        let mut out = vec![];
        write_text(&mut out, &all)?;
        let out = String::from_utf8(out)?;
        assert!(out.contains("(user 0, 2 trajectories)"));
        assert!(out.contains(
            "#0      2 points, 2009-04-22 10:00:00 to 2009-04-22 10:10:00 (10m)"
        ));
        assert!(out.contains("#1      1 points"));
        Ok(())
    }

    #[test]
    fn test_write_csv() -> Result<()> {
        let (_dir, files) = sample()?;
        let all = segment_files(&files, TimeDelta::minutes(20), false)?;

        let mut out = vec![];
        write_csv(&mut out, &all)?;
        let out = String::from_utf8(out)?;
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(4, lines.len());
        assert_eq!("user,file,index,points,start,end,duration", lines[0]);
        assert!(lines[1].ends_with(",0,2,2009-04-22T10:00:00Z,2009-04-22T10:10:00Z,600"));
        Ok(())
    }

    #[test]
    fn test_traces_under_none() -> Result<()> {
        let dir = tempfile::tempdir()?;
        assert!(traces_under(dir.path(), "plt").is_err());
        Ok(())
    }
}
