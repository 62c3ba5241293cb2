//! Reader for one PLT trace file.
//!
//! A trace file starts with a fixed 6-line preamble which we never look at, followed by one
//! point per line.  The file is expected to live in the usual tree:
//!
//! ```text
//! <root>/<user>/Trajectory/<YYYYMMDDhhmmss>.plt
//! ```
//!
//! so that the user ID can be taken from the path itself.
//!
//! `PltTrace` never keeps the file open: each traversal gets its own handle, released when the
//! traversal is done or dropped.
//!

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::{FormatError, PltPoint};

/// Number of lines of preamble
pub const HEADER_LINES: usize = 6;

/// The user ID is three levels up from the file itself
const USER_FROM_END: usize = 3;

/// One trace file on disk.
///
#[derive(Clone, Debug)]
pub struct PltTrace {
    /// Where the file is
    path: PathBuf,
    /// User (or device) ID taken from the path
    user: i64,
    /// Timestamp of the first point
    start_time: DateTime<Utc>,
}

impl PltTrace {
    /// Validate the path, then peek at the first point to get the start time.
    ///
    #[tracing::instrument(skip_all)]
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, FormatError> {
        let path = path.as_ref().to_path_buf();
        debug!("path={path:?}");

        let user = user_from_path(&path)?;

        // Only the first data line is needed, the handle is dropped right after.
        //
        let first = match open(&path)?.next() {
            Some(line) => line?,
            None => return Err(FormatError::EmptyTrace(path.display().to_string())),
        };
        let start_time = PltPoint::new(&first)?.timestamp();
        trace!("user={user} start={start_time}");

        Ok(PltTrace {
            path,
            user,
            start_time,
        })
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn user(&self) -> i64 {
        self.user
    }

    #[inline]
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Start a new traversal of all the points, in file order.
    ///
    /// Every call opens the file again so several traversals can run side by side.
    ///
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub fn records(&self) -> Result<Records, FormatError> {
        Ok(Records {
            lines: open(&self.path)?,
            done: false,
        })
    }

    /// Number of data lines after the header.  Lines are counted, not decoded.
    ///
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub fn len(&self) -> Result<usize, FormatError> {
        let mut count = 0;
        for line in open(&self.path)? {
            line?;
            count += 1;
        }
        trace!("{count} lines");
        Ok(count)
    }

    /// Always false for a trace built by `new()` unless the file changed behind our back.
    ///
    pub fn is_empty(&self) -> Result<bool, FormatError> {
        Ok(self.len()? == 0)
    }
}

/// Lazy traversal of a trace file, yielding one decoded point per line.
///
/// The first error (I/O or decoding) is returned once and ends the traversal.
///
#[derive(Debug)]
pub struct Records {
    lines: Lines<BufReader<File>>,
    done: bool,
}

impl Iterator for Records {
    type Item = Result<PltPoint, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let res = match self.lines.next() {
            Some(Ok(line)) => PltPoint::new(&line),
            Some(Err(e)) => Err(e.into()),
            None => {
                self.done = true;
                return None;
            }
        };
        if res.is_err() {
            self.done = true;
        }
        Some(res)
    }
}

impl FusedIterator for Records {}

/// Open the file and skip the preamble.
///
/// A file shorter than the preamble gives an empty iterator.
///
fn open(path: &Path) -> Result<Lines<BufReader<File>>, FormatError> {
    let mut lines = BufReader::new(File::open(path)?).lines();
    for line in lines.by_ref().take(HEADER_LINES) {
        line?;
    }
    Ok(lines)
}

/// Extract the user ID from `.../<user>/Trajectory/<file>`.
///
fn user_from_path(path: &Path) -> Result<i64, FormatError> {
    let parts: Vec<_> = path.iter().collect();
    if parts.len() < USER_FROM_END {
        return Err(FormatError::InvalidPath(path.display().to_string()));
    }

    parts[parts.len() - USER_FROM_END]
        .to_str()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| FormatError::InvalidPath(path.display().to_string()))
}
