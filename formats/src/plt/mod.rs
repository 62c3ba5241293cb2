//! GPS logs in the PLT format, as found in the GeoLife dataset.
//!
//! - `point` decodes a single line,
//! - `trace` reads a whole file, lazily.
//!

use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::FormatError;

pub use point::*;
pub use trace::*;

mod point;
mod trace;

/// Default extension for trace files
pub const PLT_EXT: &str = "plt";

/// Walk `root` and return every file ending in `.<ext>`, sorted by path.
///
/// `root` can also be a single file, in which case it is returned as-is if it matches.
///
#[tracing::instrument(skip(root), fields(root = %root.as_ref().display()))]
pub fn find_traces<P: AsRef<Path>>(root: P, ext: &str) -> Result<Vec<PathBuf>, FormatError> {
    let mut found = vec![];

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| FormatError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().is_some_and(|e| e == ext) {
            trace!("found {:?}", entry.path());
            found.push(entry.into_path());
        }
    }
    debug!("{} trace files", found.len());
    Ok(found)
}
