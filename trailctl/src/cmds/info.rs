//! `info` and `list` sub-commands, describing trace files without segmenting them.
//!

use std::path::Path;

use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::trace;

use geotrail_formats::PltTrace;

use crate::traces_under;

const HEADER: [&str; 4] = ["Path", "User", "Start", "Points"];

fn row(trace: &PltTrace) -> Result<Vec<String>> {
    Ok(vec![
        trace.path().display().to_string(),
        trace.user().to_string(),
        trace.start_time().naive_utc().to_string(),
        trace.len()?.to_string(),
    ])
}

fn table(traces: &[PltTrace]) -> Result<String> {
    let mut builder = Builder::default();
    builder.push_record(HEADER.iter().map(|s| s.to_string()));

    for trace in traces {
        builder.push_record(row(trace)?);
    }
    Ok(builder.build().with(Style::modern()).to_string())
}

/// Describe one trace file.
///
#[tracing::instrument]
pub fn trace_info(file: &Path) -> Result<String> {
    let trace = PltTrace::new(file)?;
    table(&[trace])
}

/// List every trace file under `dir`, with the same columns as `info`.
///
#[tracing::instrument]
pub fn list_traces(dir: &Path, ext: &str) -> Result<String> {
    let traces = traces_under(dir, ext)?
        .iter()
        .map(PltTrace::new)
        .collect::<Result<Vec<_>, _>>()?;
    trace!("{} traces", traces.len());

    let str = table(&traces)?;
    Ok(format!("{} trace files:\n{str}", traces.len()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const BODY: &str = "Geolife trajectory\nWGS 84\nAltitude is in Feet\nReserved 3\n\
        0,2,255,My Track,0,0,2,8421376\n0\n\
        39.984702,116.318417,0,492,39744.1201851852,2008-10-23,02:53:04\n\
        39.984683,116.31845,0,492,39744.1202546296,2008-10-23,02:53:10\n";

    #[test]
    fn test_trace_info() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let sub = dir.path().join("163").join("Trajectory");
        fs::create_dir_all(&sub)?;
        let fname = sub.join("20081023025304.plt");
        fs::write(&fname, BODY)?;

        let str = trace_info(&fname)?;
        assert!(str.contains("163"));
        assert!(str.contains("2008-10-23 02:53:04"));
        assert!(str.contains("Points"));
        Ok(())
    }

    #[test]
    fn test_list_traces() -> Result<()> {
        let dir = tempfile::tempdir()?;
        for user in ["000", "001"] {
            let sub = dir.path().join(user).join("Trajectory");
            fs::create_dir_all(&sub)?;
            fs::write(sub.join("20081023025304.plt"), BODY)?;
        }

        let str = list_traces(dir.path(), "plt")?;
        assert!(str.starts_with("2 trace files:"));
        Ok(())
    }

    #[test]
    fn test_list_traces_empty() -> Result<()> {
        let dir = tempfile::tempdir()?;
        assert!(list_traces(dir.path(), "plt").is_err());
        Ok(())
    }
}
